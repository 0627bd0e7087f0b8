use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;

use crate::application::ports::{Clock, Scheduler};

/// Virtual-time scheduler and clock for deterministic tests.
///
/// Nothing runs until [`ManualScheduler::advance`] is awaited. Tasks become due
/// in `(due time, scheduling order)` order, and a task scheduled by another
/// task runs in the same `advance` call if it falls due inside the window.
/// While a task runs, [`Clock::now`] reports the task's due time.
pub struct ManualScheduler {
    origin: DateTime<Utc>,
    state: Mutex<ManualState>,
}

struct ManualState {
    elapsed: Duration,
    next_seq: u64,
    queue: Vec<PendingTask>,
}

struct PendingTask {
    due: Duration,
    seq: u64,
    task: BoxFuture<'static, ()>,
}

impl ManualScheduler {
    pub fn new(origin: DateTime<Utc>) -> Self {
        Self {
            origin,
            state: Mutex::new(ManualState {
                elapsed: Duration::ZERO,
                next_seq: 0,
                queue: Vec::new(),
            }),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed
    }

    pub fn pending_tasks(&self) -> usize {
        self.lock().queue.len()
    }

    /// Moves virtual time forward by `by`, running every task that falls due.
    pub async fn advance(&self, by: Duration) {
        let target = self.lock().elapsed + by;

        while let Some(task) = self.take_due(target) {
            task.await;
        }

        let mut state = self.lock();
        if state.elapsed < target {
            state.elapsed = target;
        }
    }

    /// Runs every queued task, including ones scheduled along the way.
    pub async fn run_until_idle(&self) {
        loop {
            let next_due = self.lock().queue.iter().map(|p| p.due).min();
            match next_due {
                Some(due) => {
                    let by = due.saturating_sub(self.elapsed());
                    self.advance(by).await;
                }
                None => break,
            }
        }
    }

    fn take_due(&self, target: Duration) -> Option<BoxFuture<'static, ()>> {
        let mut state = self.lock();
        let index = state
            .queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;

        let pending = state.queue.swap_remove(index);
        state.elapsed = state.elapsed.max(pending.due);
        Some(pending.task)
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) {
        let mut state = self.lock();
        let due = state.elapsed + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.queue.push(PendingTask { due, seq, task });
    }
}

impl Clock for ManualScheduler {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.origin + elapsed
    }
}
