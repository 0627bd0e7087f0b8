mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    BackendSettings, FailurePolicySetting, LoggingSettings, ServerSettings, Settings,
    SettingsError, SimulatorSettings,
};
