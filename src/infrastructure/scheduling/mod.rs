mod manual_scheduler;
mod system_clock;
mod tokio_scheduler;

pub use manual_scheduler::ManualScheduler;
pub use system_clock::SystemClock;
pub use tokio_scheduler::TokioScheduler;
