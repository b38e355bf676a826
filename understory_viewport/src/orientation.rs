// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orientation tracking on top of the `(orientation: portrait)` media query.

use crate::event::{EventType, ListenerId};
use crate::host::{HostEvent, Window};
use crate::registry::{Binding, ListenerList};

/// Orientation reported for portrait layouts, in degrees.
pub const PORTRAIT: i32 = 0;
/// Orientation reported for landscape layouts when the host gives no angle, in degrees.
pub const LANDSCAPE: i32 = 90;

/// Orientation a freshly created viewport reports.
///
/// Uses the host's angle when it has a nonzero one; otherwise a window taller
/// than it is wide counts as portrait.
#[must_use]
pub fn initial_orientation(host_orientation: Option<i32>, width: f64, height: f64) -> i32 {
    host_orientation
        .filter(|degrees| *degrees != PORTRAIT)
        .unwrap_or(if height > width { PORTRAIT } else { LANDSCAPE })
}

/// Orientation after the portrait query reports `matches`.
#[must_use]
pub fn orientation_after_change(matches: bool, host_orientation: Option<i32>) -> i32 {
    if matches {
        PORTRAIT
    } else {
        host_orientation
            .filter(|degrees| *degrees != PORTRAIT)
            .unwrap_or(LANDSCAPE)
    }
}

/// Subscribers for the three orientation events, sharing one media-query listener.
#[derive(Debug)]
pub(crate) struct OrientationTracker<L> {
    degrees: i32,
    query_supported: bool,
    binding: Binding,
    subscribers: usize,
    change: ListenerList<L>,
    portrait: ListenerList<L>,
    landscape: ListenerList<L>,
}

impl<L> OrientationTracker<L> {
    pub(crate) fn new(degrees: i32, query_supported: bool) -> Self {
        Self {
            degrees,
            query_supported,
            binding: Binding::Unbound,
            subscribers: 0,
            change: ListenerList::new(),
            portrait: ListenerList::new(),
            landscape: ListenerList::new(),
        }
    }

    pub(crate) fn degrees(&self) -> i32 {
        self.degrees
    }

    pub(crate) fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }

    pub(crate) fn subscribers(&self) -> usize {
        self.subscribers
    }

    /// Listener list for an orientation event; `None` for other event types.
    pub(crate) fn listeners(&self, event: EventType) -> Option<&ListenerList<L>> {
        match event {
            EventType::OrientationChange => Some(&self.change),
            EventType::OrientationPortrait => Some(&self.portrait),
            EventType::OrientationLandscape => Some(&self.landscape),
            EventType::ResizeComplete | EventType::ScrollComplete => None,
        }
    }

    fn listeners_mut(&mut self, event: EventType) -> Option<&mut ListenerList<L>> {
        match event {
            EventType::OrientationChange => Some(&mut self.change),
            EventType::OrientationPortrait => Some(&mut self.portrait),
            EventType::OrientationLandscape => Some(&mut self.landscape),
            EventType::ResizeComplete | EventType::ScrollComplete => None,
        }
    }

    /// Adds a listener, binding the media-query listener on the first subscriber.
    pub(crate) fn subscribe<W: Window>(
        &mut self,
        host: &mut W,
        event: EventType,
        id: ListenerId,
        listener: L,
    ) -> bool {
        if !event.is_orientation() {
            return false;
        }
        if self.subscribers == 0 && self.query_supported {
            self.binding.bind(host, HostEvent::OrientationQuery);
        }
        if let Some(list) = self.listeners_mut(event) {
            list.push(id, listener);
        }
        self.subscribers += 1;
        true
    }

    /// Removes a listener, unbinding the media-query listener after the last one.
    pub(crate) fn unsubscribe<W: Window>(
        &mut self,
        host: &mut W,
        event: EventType,
        id: ListenerId,
    ) -> bool {
        let removed = self
            .listeners_mut(event)
            .is_some_and(|list| list.remove(id));
        if !removed {
            return false;
        }
        self.subscribers = self.subscribers.saturating_sub(1);
        if self.subscribers == 0 {
            self.binding.unbind(host, HostEvent::OrientationQuery);
        }
        true
    }

    /// Records a media-query change and returns the events to fire, in order.
    pub(crate) fn apply(&mut self, matches: bool, host_orientation: Option<i32>) -> [EventType; 2] {
        let previous = self.degrees;
        self.degrees = orientation_after_change(matches, host_orientation);
        tracing::debug!(previous, current = self.degrees, "orientation changed");
        let specific = if matches {
            EventType::OrientationPortrait
        } else {
            EventType::OrientationLandscape
        };
        [EventType::OrientationChange, specific]
    }

    /// Unbinds the media-query listener and forgets every subscriber.
    pub(crate) fn detach<W: Window>(&mut self, host: &mut W) {
        self.binding.unbind(host, HostEvent::OrientationQuery);
        self.change.clear();
        self.portrait.clear();
        self.landscape.clear();
        self.subscribers = 0;
    }
}
