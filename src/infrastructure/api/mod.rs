mod api_factory;
mod http_api;
mod simulated_api;

pub use api_factory::{ApiFactory, ApiFactoryError};
pub use http_api::HttpApi;
pub use simulated_api::SimulatedApi;
