// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Default gap between consecutive listener invocations, in milliseconds.
pub const DEFAULT_EVENT_LISTENER_DELAY: u64 = 20;
/// Default settling period for resize bursts, in milliseconds.
pub const DEFAULT_RESIZE_TIMEOUT: u64 = 300;
/// Default settling period for scroll bursts, in milliseconds.
pub const DEFAULT_SCROLL_TIMEOUT: u64 = 300;

/// Timing configuration for a [`Viewport`](crate::Viewport).
///
/// All values can also be changed on a live viewport; see
/// [`Viewport::set_resize_timeout`](crate::Viewport::set_resize_timeout) and friends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ViewportConfig {
    /// Delay between invoking one listener and the next within a single firing.
    pub event_listener_delay: u64,
    /// Quiet period after the last raw resize before `resize:complete` fires.
    pub resize_timeout: u64,
    /// Quiet period after the last raw scroll before `scroll:complete` fires.
    pub scroll_timeout: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            event_listener_delay: DEFAULT_EVENT_LISTENER_DELAY,
            resize_timeout: DEFAULT_RESIZE_TIMEOUT,
            scroll_timeout: DEFAULT_SCROLL_TIMEOUT,
        }
    }
}
