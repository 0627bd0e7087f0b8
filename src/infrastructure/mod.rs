pub mod api;
pub mod catalog;
pub mod observability;
pub mod persistence;
pub mod scheduling;
