//! Time-delayed propagation of a rapidly changing value.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Holds a settled value that only follows its input once the input has been
/// stable for `delay`.
///
/// Time is supplied by the caller, so an event loop can drive the debouncer
/// from its own clock and sleep until [`Debounced::next_deadline`]. Dropping
/// the debouncer (or calling [`Debounced::cancel`]) discards whatever update
/// was pending.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    settled: T,
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T: Clone + PartialEq> Debounced<T> {
    #[must_use]
    pub fn new(value: T, delay: Duration) -> Self {
        Self {
            settled: value,
            delay,
            pending: None,
        }
    }

    /// The most recently settled value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.settled
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new input value observed at `now`.
    ///
    /// Any change restarts the timer. Re-submitting the value that is already
    /// waiting leaves its deadline untouched.
    pub fn set(&mut self, value: T, now: Instant) {
        match &self.pending {
            Some(pending) if pending.value == value => return,
            None if self.settled == value => return,
            _ => {}
        }

        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Settle the pending value if its deadline has passed.
    ///
    /// Returns the new settled value only when it differs from the previous
    /// one.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.deadline <= now);
        if !due {
            return None;
        }

        let pending = self.pending.take()?;
        if pending.value == self.settled {
            return None;
        }
        self.settled = pending.value;
        Some(&self.settled)
    }

    /// Instant at which the pending value will settle, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending update without settling it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
