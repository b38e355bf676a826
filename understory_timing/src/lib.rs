// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer primitives for UI runtimes.
//!
//! UI code frequently needs "run this later" behavior: settle timers for
//! resize and scroll bursts, staggered notification, tooltips. Browsers offer
//! `setTimeout`, native toolkits offer their own timer sources, and tests want
//! a virtual clock. This crate keeps the bookkeeping independent of all of
//! them:
//!
//! - [`TimerQueue`]: an ordered store of pending payloads keyed by absolute
//!   deadline, with O(1) cancellation by [`TimerId`].
//! - [`Debounce`]: a restartable settle timer built on a shared queue.
//!
//! The crate never reads a clock. Hosts pass the current time (milliseconds on
//! any monotonic clock) into [`TimerQueue::pop_expired`], and use
//! [`TimerQueue::next_deadline`] to decide when to wake up next.
//!
//! ## Example
//!
//! ```rust
//! use understory_timing::{Debounce, TimerQueue};
//!
//! #[derive(Debug, PartialEq)]
//! enum Task { ScrollSettled }
//!
//! let mut queue = TimerQueue::new();
//! let mut scroll = Debounce::new(300);
//!
//! scroll.trigger(&mut queue, 0, Task::ScrollSettled);
//! scroll.trigger(&mut queue, 120, Task::ScrollSettled);
//!
//! assert_eq!(queue.next_deadline(), Some(420));
//! while let Some(expired) = queue.pop_expired(420) {
//!     assert!(scroll.settle(expired.id));
//!     assert_eq!(expired.payload, Task::ScrollSettled);
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod debounce;
mod queue;

pub use debounce::Debounce;
pub use queue::{Expired, TimerId, TimerQueue};
