use std::time::Duration;

use futures::future::BoxFuture;

/// Runs a one-shot task after a delay.
///
/// Implementations must not run the task before `delay` has elapsed on their
/// own notion of time, and must run tasks scheduled with equal due times in
/// scheduling order.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>);
}
