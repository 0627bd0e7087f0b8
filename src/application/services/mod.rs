mod catalog_service;
mod job_simulator;
mod log_cursor;

pub use catalog_service::{CatalogService, DEFAULT_SEARCH_PAGE_SIZE};
pub use job_simulator::{FailurePolicy, JobSimulator, SimulatorConfig, SimulatorError};
pub use log_cursor::LogCursor;
