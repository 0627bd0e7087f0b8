use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ApiError, Clock, JobRepository, ReviewApi, Scheduler};
use crate::application::services::{CatalogService, JobSimulator};
use crate::infrastructure::catalog::{fixture_categories, fixture_products};
use crate::infrastructure::persistence::InMemoryJobRepository;
use crate::infrastructure::scheduling::{SystemClock, TokioScheduler};
use crate::presentation::config::{BackendSettings, SettingsError, SimulatorSettings};

use super::{HttpApi, SimulatedApi};

pub struct ApiFactory;

impl ApiFactory {
    /// Picks the backend implementation once, from `backend.use_mocks`.
    ///
    /// The simulated backend runs its pipeline on the current Tokio runtime.
    pub fn create(
        backend: &BackendSettings,
        simulator: &SimulatorSettings,
    ) -> Result<Arc<dyn ReviewApi>, ApiFactoryError> {
        if backend.use_mocks {
            tracing::info!("Using in-process simulated backend");
            let clock: Arc<dyn Clock> = Arc::new(SystemClock);
            let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::new());
            let api = Self::simulated(simulator, scheduler, clock)?
                .with_latency(Duration::from_millis(backend.mock_latency_ms));
            Ok(Arc::new(api))
        } else {
            tracing::info!(base_url = %backend.base_url, "Using HTTP backend");
            let api = HttpApi::new(&backend.base_url, Duration::from_millis(backend.timeout_ms))?;
            Ok(Arc::new(api))
        }
    }

    /// Wires a fresh simulator and catalog around the given time sources.
    pub fn simulated(
        simulator: &SimulatorSettings,
        scheduler: Arc<dyn Scheduler>,
        clock: Arc<dyn Clock>,
    ) -> Result<SimulatedApi, ApiFactoryError> {
        let repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
        let simulator = JobSimulator::new(
            repository,
            scheduler,
            Arc::clone(&clock),
            simulator.to_config()?,
        );
        let products = fixture_products(clock.now());
        let catalog = CatalogService::new(products, fixture_categories(), clock);
        Ok(SimulatedApi::new(simulator, catalog))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiFactoryError {
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("http backend: {0}")]
    Http(#[from] ApiError),
}
