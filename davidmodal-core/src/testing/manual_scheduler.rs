use crate::dom::{Scheduler, Task};
use std::cell::{Cell, RefCell};
use std::time::Duration;

struct Pending {
    due: Duration,
    seq: u64,
    task: Task,
}

/// Virtual-clock [`Scheduler`]: tasks only run when the test advances time
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    pending: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Delays of pending tasks relative to the current virtual time, soonest first
    pub fn pending_delays(&self) -> Vec<Duration> {
        let now = self.now.get();
        let mut delays: Vec<Duration> = self
            .pending
            .borrow()
            .iter()
            .map(|p| p.due.saturating_sub(now))
            .collect();
        delays.sort();
        delays
    }

    /// Move the clock forward, running every task that falls due in order of due time
    /// (ties in scheduling order). Tasks scheduled while advancing run too if they fall
    /// inside the window. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get().saturating_add(by);
        let mut ran = 0;
        while let Some(next) = self.take_next_due(target) {
            self.now.set(next.due);
            (next.task)();
            ran += 1;
        }
        self.now.set(target);
        ran
    }

    /// Run everything pending, including tasks scheduled by earlier tasks
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let Some(latest) = self.pending.borrow().iter().map(|p| p.due).max() else {
                return ran;
            };
            let now = self.now.get();
            ran += self.advance(latest.saturating_sub(now));
        }
    }

    fn take_next_due(&self, target: Duration) -> Option<Pending> {
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(i, _)| i)?;
        Some(pending.remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.pending.borrow_mut().push(Pending {
            due: self.now.get().saturating_add(delay),
            seq,
            task,
        });
    }
}
