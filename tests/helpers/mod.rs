#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use reviewhub::application::ports::{Clock, Scheduler};
use reviewhub::infrastructure::api::{ApiFactory, SimulatedApi};
use reviewhub::infrastructure::scheduling::ManualScheduler;
use reviewhub::presentation::config::{FailurePolicySetting, SimulatorSettings};

pub const START_DELAY: Duration = Duration::from_millis(600);
pub const CRAWL_DELAY: Duration = Duration::from_millis(1000);
pub const FINISH_DELAY: Duration = Duration::from_millis(1200);
pub const PIPELINE_LENGTH: Duration = Duration::from_millis(2800);

pub struct TestBackend {
    pub scheduler: Arc<ManualScheduler>,
    pub api: Arc<SimulatedApi>,
}

pub fn simulator_settings() -> SimulatorSettings {
    SimulatorSettings {
        start_delay_ms: 600,
        crawl_delay_ms: 1000,
        finish_delay_ms: 1200,
        failure_policy: FailurePolicySetting::Never,
        failure_marker: None,
    }
}

pub fn failing_simulator_settings(marker: &str) -> SimulatorSettings {
    SimulatorSettings {
        failure_policy: FailurePolicySetting::Keyword,
        failure_marker: Some(marker.to_string()),
        ..simulator_settings()
    }
}

pub fn test_backend() -> TestBackend {
    test_backend_with(simulator_settings())
}

pub fn test_backend_with(settings: SimulatorSettings) -> TestBackend {
    let scheduler = Arc::new(ManualScheduler::default());
    let api = ApiFactory::simulated(
        &settings,
        Arc::clone(&scheduler) as Arc<dyn Scheduler>,
        Arc::clone(&scheduler) as Arc<dyn Clock>,
    )
    .expect("valid simulator settings");

    TestBackend {
        scheduler,
        api: Arc::new(api),
    }
}
