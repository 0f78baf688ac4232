use davidmodal_core::{Scheduler, Task};
use gloo_timers::callback::Timeout;
use std::time::Duration;

/// Longest delay `setTimeout` honors
pub const MAX_TIMEOUT_MS: u32 = i32::MAX as u32;

/// Milliseconds handed to `setTimeout` for `delay`
pub fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis())
        .unwrap_or(u32::MAX)
        .min(MAX_TIMEOUT_MS)
}

/// [`Scheduler`] backed by `setTimeout`
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let millis = timeout_millis(delay);
        // Dropping a gloo Timeout cancels it, and nothing here ever cancels
        let _ = Timeout::new(millis, task).forget();
    }
}
