// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounce helper: fire once a burst of triggers has settled.
//!
//! ## Usage
//!
//! 1) Call [`Debounce::trigger`] for every raw event; each call replaces the
//!    previously scheduled timer with one `delay` milliseconds in the future.
//! 2) When the host's [`TimerQueue`] reports an expired timer, pass its handle
//!    to [`Debounce::settle`]. It returns `true` exactly once per burst.
//!
//! ## Minimal example
//!
//! ```
//! use understory_timing::{Debounce, TimerQueue};
//!
//! let mut queue = TimerQueue::new();
//! let mut resize = Debounce::new(300);
//!
//! // Three raw events 100ms apart.
//! for now in [0, 100, 200] {
//!     resize.trigger(&mut queue, now, "resize");
//! }
//!
//! // Only the last trigger is still scheduled.
//! assert_eq!(queue.len(), 1);
//! assert!(queue.pop_expired(499).is_none());
//! let expired = queue.pop_expired(500).unwrap();
//! assert!(resize.settle(expired.id));
//! assert!(!resize.is_pending());
//! ```

use crate::queue::{TimerId, TimerQueue};

/// Restartable settle timer.
///
/// `Debounce` only remembers which timer it owns; the timers themselves live
/// in a caller-provided [`TimerQueue`], so several debouncers can share one
/// queue and one host wake-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debounce {
    delay: u64,
    pending: Option<TimerId>,
}

impl Debounce {
    /// Creates an idle debouncer that settles `delay` milliseconds after the last trigger.
    #[must_use]
    pub const fn new(delay: u64) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Returns the settling delay in milliseconds.
    #[must_use]
    pub const fn delay(&self) -> u64 {
        self.delay
    }

    /// Sets the settling delay.
    ///
    /// An already scheduled timer keeps its deadline; the new delay applies
    /// from the next [`Debounce::trigger`].
    pub fn set_delay(&mut self, delay: u64) {
        self.delay = delay;
    }

    /// Returns the handle of the pending timer, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Returns `true` while a settle timer is scheduled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancels the pending timer (if any) and schedules a new one `delay` ms after `now`.
    pub fn trigger<T>(&mut self, queue: &mut TimerQueue<T>, now: u64, payload: T) -> TimerId {
        if let Some(previous) = self.pending.take() {
            queue.cancel(previous);
        }
        let id = queue.schedule_after(now, self.delay, payload);
        tracing::trace!(
            timer = id.get(),
            deadline = now.saturating_add(self.delay),
            "debounce rescheduled"
        );
        self.pending = Some(id);
        id
    }

    /// Acknowledges an expired timer.
    ///
    /// Returns `true` if `id` was this debouncer's pending timer, in which
    /// case the debouncer becomes idle.
    pub fn settle(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancels the pending timer, if any. Returns `true` if one was cancelled.
    pub fn cancel<T>(&mut self, queue: &mut TimerQueue<T>) -> bool {
        match self.pending.take() {
            Some(id) => queue.cancel(id).is_some(),
            None => false,
        }
    }
}
