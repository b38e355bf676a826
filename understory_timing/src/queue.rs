// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered store of pending timers keyed by deadline.

use alloc::collections::BinaryHeap;
use core::cmp::Reverse;
use core::fmt;

use hashbrown::HashMap;

/// Stale heap entries are compacted away once they outnumber live ones by this factor.
const COMPACT_RATIO: usize = 2;
/// Below this heap size compaction is never worth it.
const COMPACT_MIN: usize = 64;

/// Handle of a timer scheduled in a [`TimerQueue`].
///
/// Handles are never reused by the queue that issued them, so a stale handle
/// can be safely passed to [`TimerQueue::cancel`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw value of this handle.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A timer that reached its deadline, as returned by [`TimerQueue::pop_expired`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<T> {
    /// Handle the timer was scheduled under.
    pub id: TimerId,
    /// Deadline the timer was scheduled for.
    pub deadline: u64,
    /// Payload supplied at scheduling time.
    pub payload: T,
}

struct Pending<T> {
    deadline: u64,
    payload: T,
}

/// Host-agnostic timer queue.
///
/// Time is whatever monotonic millisecond clock the host uses: the queue never
/// reads a clock itself. Hosts schedule payloads at absolute deadlines, then
/// call [`TimerQueue::pop_expired`] with the current time to collect the ones
/// that are due. Timers with equal deadlines expire in scheduling order.
///
/// Cancellation is O(1); cancelled entries are dropped lazily from the
/// underlying heap.
///
/// ```
/// use understory_timing::TimerQueue;
///
/// let mut queue = TimerQueue::new();
/// let a = queue.schedule_after(0, 300, "resize");
/// queue.schedule_after(0, 100, "scroll");
/// queue.cancel(a);
///
/// assert_eq!(queue.next_deadline(), Some(100));
/// assert!(queue.pop_expired(50).is_none());
/// assert_eq!(queue.pop_expired(100).map(|e| e.payload), Some("scroll"));
/// assert!(queue.is_empty());
/// ```
pub struct TimerQueue<T> {
    // Invariant: the top entry, if any, is live.
    heap: BinaryHeap<Reverse<(u64, TimerId)>>,
    pending: HashMap<TimerId, Pending<T>>,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pending: HashMap::new(),
            next_id: 0,
        }
    }

    /// Schedules `payload` to expire at the absolute time `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Reverse((deadline, id)));
        self.pending.insert(id, Pending { deadline, payload });
        id
    }

    /// Schedules `payload` to expire `delay` milliseconds after `now`.
    pub fn schedule_after(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.schedule(now.saturating_add(delay), payload)
    }

    /// Cancels a pending timer, returning its payload.
    ///
    /// Returns `None` if the timer already expired or was cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let pending = self.pending.remove(&id)?;
        self.prune();
        if self.heap.len() >= COMPACT_MIN && self.heap.len() > self.pending.len() * COMPACT_RATIO
        {
            self.compact();
        }
        Some(pending.payload)
    }

    /// Returns `true` if `id` is still pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Returns the deadline of a pending timer.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<u64> {
        self.pending.get(&id).map(|p| p.deadline)
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse((deadline, _))| *deadline)
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now`.
    pub fn pop_expired(&mut self, now: u64) -> Option<Expired<T>> {
        let Reverse((deadline, id)) = *self.heap.peek()?;
        if deadline > now {
            return None;
        }
        self.heap.pop();
        let pending = self.pending.remove(&id);
        self.prune();
        pending.map(|p| Expired {
            id,
            deadline: p.deadline,
            payload: p.payload,
        })
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.pending.clear();
    }

    fn prune(&mut self) {
        while let Some(Reverse((_, id))) = self.heap.peek() {
            if self.pending.contains_key(id) {
                break;
            }
            self.heap.pop();
        }
    }

    fn compact(&mut self) {
        let pending = &self.pending;
        self.heap.retain(|Reverse((_, id))| pending.contains_key(id));
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("pending", &self.pending.len())
            .field("heap", &self.heap.len())
            .field("next_deadline", &self.next_deadline())
            .field("next_id", &self.next_id)
            .finish()
    }
}
