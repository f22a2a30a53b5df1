//! Deferred, cancellable session tasks
//!
//! Games never touch wall-clock timers. They schedule plain data tasks here;
//! the owning session advances the clock and handles whatever comes due.
//! Dropping the queue drops every pending task, so nothing can fire against
//! a torn-down session.

use std::time::Duration;

/// Handle to a scheduled task, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TimerHandle,
    due: Duration,
    /// Re-arm interval for repeating tasks
    period: Option<Duration>,
    task: T,
}

/// Per-session task queue with its own monotonic clock
#[derive(Debug, Clone)]
pub struct Timers<T> {
    now: Duration,
    entries: Vec<Entry<T>>,
    next_handle: u64,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            entries: Vec::new(),
            next_handle: 1,
        }
    }

    /// Time elapsed on this queue's clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run `task` once, `delay` from now
    pub fn after(&mut self, delay: Duration, task: T) -> TimerHandle {
        self.push(delay, None, task)
    }

    /// Run `task` every `period`, first firing one period from now
    pub fn every(&mut self, period: Duration, task: T) -> TimerHandle {
        // A zero period would fire forever within a single advance
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), task)
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            due: self.now + delay,
            period,
            task,
        });
        handle
    }

    /// Cancel one task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Cancel everything. Returns how many tasks were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.entries.len();
        if dropped > 0 {
            log::debug!("Cancelled {} pending task(s)", dropped);
        }
        self.entries.clear();
        dropped
    }

    /// Move the clock forward. Due tasks are collected with `pop_due`.
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }
}

impl<T: Clone> Timers<T> {
    /// Take the earliest task that is due (ties fire in scheduling order).
    /// Repeating tasks are re-armed one period later.
    pub fn pop_due(&mut self) -> Option<T> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= self.now)
            .min_by_key(|(_, e)| (e.due, e.handle.0))
            .map(|(i, _)| i)?;

        match self.entries[idx].period {
            Some(period) => {
                let entry = &mut self.entries[idx];
                entry.due += period;
                Some(entry.task.clone())
            }
            None => Some(self.entries.remove(idx).task),
        }
    }
}

impl<T> Drop for Timers<T> {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("Dropping {} pending task(s) with their session", self.entries.len());
        }
    }
}
