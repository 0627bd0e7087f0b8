use std::time::Duration;

use futures::future::BoxFuture;
use tokio::runtime::Handle;

use crate::application::ports::Scheduler;

/// Spawns each task on the Tokio runtime after sleeping for its delay.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Binds to the runtime the caller is running on.
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new() -> Self {
        Self::from_handle(Handle::current())
    }

    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
    }
}
