// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event names, listener handles and delivery outcomes.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::ViewportError;

/// Synthetic events a [`Viewport`](crate::Viewport) delivers to listeners.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A burst of window resizes has settled.
    ResizeComplete,
    /// A burst of document scrolls has settled.
    ScrollComplete,
    /// The orientation changed, in either direction.
    OrientationChange,
    /// The orientation changed to portrait.
    OrientationPortrait,
    /// The orientation changed to landscape.
    OrientationLandscape,
}

impl EventType {
    /// Every event type, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::ResizeComplete,
        Self::ScrollComplete,
        Self::OrientationChange,
        Self::OrientationPortrait,
        Self::OrientationLandscape,
    ];

    /// Canonical (lower case) name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ResizeComplete => "resize:complete",
            Self::ScrollComplete => "scroll:complete",
            Self::OrientationChange => "orientation:change",
            Self::OrientationPortrait => "orientation:portrait",
            Self::OrientationLandscape => "orientation:landscape",
        }
    }

    /// Looks up an event by name, ignoring ASCII case.
    ///
    /// ```
    /// use understory_viewport::EventType;
    ///
    /// assert_eq!(EventType::parse("Scroll:Complete"), Some(EventType::ScrollComplete));
    /// assert_eq!(EventType::parse("orientation:sideways"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns `true` for the three orientation events, which share one host listener.
    #[must_use]
    pub const fn is_orientation(self) -> bool {
        matches!(
            self,
            Self::OrientationChange | Self::OrientationPortrait | Self::OrientationLandscape
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ViewportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ViewportError::UnknownEventType(s.to_string()))
    }
}

/// What a listener wants to happen to the rest of the current delivery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Keep delivering to later listeners.
    #[default]
    Continue,
    /// Skip the remaining listeners for this firing only.
    Stop,
}

impl Propagation {
    /// Returns `true` for [`Propagation::Stop`].
    #[must_use]
    pub const fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Handle identifying a registered listener.
///
/// Returned from [`Viewport::add_event_listener`](crate::Viewport::add_event_listener)
/// and accepted by [`Viewport::remove_event_listener`](crate::Viewport::remove_event_listener).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    /// Returns the raw value of this handle.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}
