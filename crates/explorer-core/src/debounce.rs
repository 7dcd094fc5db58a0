//! Debounce timers for search input.
//!
//! Typing schedules two independent timers: a short one that re-renders the
//! result list and a longer one that recomputes facet counts, the more
//! expensive and less urgent of the two. A new keystroke supersedes whatever
//! is pending. Timers are plain deadlines polled with the caller's clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)start the timer at `now`, replacing any pending deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true exactly once when the deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// The two search cadences.
#[derive(Debug, Clone)]
pub struct SearchCadences {
    pub list: Debouncer,
    pub counts: Debouncer,
}

impl SearchCadences {
    pub fn new(list_delay: Duration, counts_delay: Duration) -> Self {
        Self {
            list: Debouncer::new(list_delay),
            counts: Debouncer::new(counts_delay),
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.list.schedule(now);
        self.counts.schedule(now);
    }

    pub fn cancel(&mut self) {
        self.list.cancel();
        self.counts.cancel();
    }

    /// Earliest pending deadline, for the caller's wake-up timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.list.deadline(), self.counts.deadline()]
            .into_iter()
            .flatten()
            .min()
    }
}
