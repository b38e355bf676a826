// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::ptr;

use kurbo::Rect;
use understory_timing::TimerQueue;

use crate::config::ViewportConfig;
use crate::error::ViewportError;
use crate::event::{EventType, ListenerId, Propagation};
use crate::geometry::{element_rect, overlaps, window_rect};
use crate::host::{Element, HostEvent, MediaQueryList, PORTRAIT_QUERY, Window};
use crate::orientation::{OrientationTracker, initial_orientation};
use crate::registry::{CoalescedEvent, ListenerList};

type Listener<W> = Rc<RefCell<dyn FnMut(&Viewport<W>) -> Propagation>>;

/// Work scheduled in the viewport's timer queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Task {
    ResizeSettled,
    ScrollSettled,
    /// Invoke listener `next` of `event`, continuing a staggered delivery.
    Deliver { event: EventType, next: usize },
}

/// Viewport over a host window.
///
/// `Viewport` answers visibility questions about elements and turns bursts of
/// raw `resize`/`scroll` events and orientation media-query changes into
/// settled notifications:
///
/// - [`EventType::ResizeComplete`] fires once no resize arrived for
///   [`Viewport::resize_timeout`] milliseconds.
/// - [`EventType::ScrollComplete`] likewise for scrolling and
///   [`Viewport::scroll_timeout`].
/// - [`EventType::OrientationChange`] fires on every orientation flip,
///   followed by exactly one of [`EventType::OrientationPortrait`] or
///   [`EventType::OrientationLandscape`].
///
/// Listeners of one event are invoked in registration order, one every
/// [`Viewport::event_listener_delay`] milliseconds. A listener returning
/// [`Propagation::Stop`] skips the rest of that firing.
///
/// The viewport never reads a clock. The host forwards raw events with the
/// current time, calls [`Viewport::advance`] as time passes, and can use
/// [`Viewport::next_deadline`] to schedule its next wake-up.
///
/// Host listeners are attached lazily: the viewport asks the host for raw
/// `resize` events only while someone listens for `resize:complete`, and so
/// on. [`Viewport::destroy`] (or dropping the viewport) detaches everything.
pub struct Viewport<W: Window> {
    window: Option<W>,
    resize: CoalescedEvent<Listener<W>>,
    scroll: CoalescedEvent<Listener<W>>,
    orientation: OrientationTracker<Listener<W>>,
    timers: TimerQueue<Task>,
    event_listener_delay: u64,
    next_listener: u64,
}

impl<W: Window> Viewport<W> {
    /// Creates a viewport over `window` with the default [`ViewportConfig`].
    #[must_use]
    pub fn new(window: W) -> Self {
        Self::with_config(window, ViewportConfig::default())
    }

    /// Creates a viewport over `window` with explicit timing configuration.
    #[must_use]
    pub fn with_config(window: W, config: ViewportConfig) -> Self {
        let degrees = initial_orientation(
            window.orientation(),
            window.inner_width(),
            window.inner_height(),
        );
        let query_supported = window.match_media(PORTRAIT_QUERY).is_some();
        Self {
            window: Some(window),
            resize: CoalescedEvent::new(HostEvent::Resize, config.resize_timeout),
            scroll: CoalescedEvent::new(HostEvent::Scroll, config.scroll_timeout),
            orientation: OrientationTracker::new(degrees, query_supported),
            timers: TimerQueue::new(),
            event_listener_delay: config.event_listener_delay,
            next_listener: 0,
        }
    }

    /// Creates a viewport from an optional window.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::MissingWindow`] if `window` is `None`.
    pub fn from_window(window: Option<W>) -> Result<Self, ViewportError> {
        window.map(Self::new).ok_or(ViewportError::MissingWindow)
    }

    // --- Geometry -------------------------------------------------------

    /// Inner width of the window; `0.0` once destroyed.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.window.as_ref().map_or(0.0, W::inner_width)
    }

    /// Inner height of the window; `0.0` once destroyed.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.window.as_ref().map_or(0.0, W::inner_height)
    }

    /// Left edge of the visible region (horizontal scroll offset).
    #[must_use]
    pub fn left(&self) -> f64 {
        self.window.as_ref().map_or(0.0, W::page_x_offset)
    }

    /// Top edge of the visible region (vertical scroll offset).
    #[must_use]
    pub fn top(&self) -> f64 {
        self.window.as_ref().map_or(0.0, W::page_y_offset)
    }

    /// Right edge of the visible region.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left() + self.width()
    }

    /// Bottom edge of the visible region.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top() + self.height()
    }

    /// Visible region of the document.
    #[must_use]
    pub fn position(&self) -> Rect {
        window_rect(self.left(), self.top(), self.width(), self.height())
    }

    /// Absolute rectangle of `element` in document coordinates.
    #[must_use]
    pub fn element_position<E: Element>(&self, element: &E) -> Rect {
        element_rect(element)
    }

    /// Returns `true` if any part of `element` is inside the visible region.
    ///
    /// Elements that merely touch the edge of the viewport are not contained.
    /// Always `false` once destroyed.
    #[must_use]
    pub fn contains<E: Element>(&self, element: &E) -> bool {
        self.window.is_some() && overlaps(element_rect(element), self.position())
    }

    /// Current orientation in degrees: `0` for portrait, otherwise the host's
    /// angle or `90`. Reads `0` once destroyed, like the other accessors.
    #[must_use]
    pub fn orientation(&self) -> i32 {
        if self.window.is_none() {
            return 0;
        }
        self.orientation.degrees()
    }

    // --- Host passthrough ------------------------------------------------

    /// The host window, until destroyed.
    #[must_use]
    pub fn window(&self) -> Option<&W> {
        self.window.as_ref()
    }

    /// The host document, until destroyed.
    #[must_use]
    pub fn document(&self) -> Option<&W::Document> {
        self.window.as_ref().map(W::document)
    }

    /// The host screen, until destroyed.
    #[must_use]
    pub fn screen(&self) -> Option<&W::Screen> {
        self.window.as_ref().map(W::screen)
    }

    /// The host location, until destroyed.
    #[must_use]
    pub fn location(&self) -> Option<&W::Location> {
        self.window.as_ref().map(W::location)
    }

    /// Returns `true` if `x` is this viewport, or its window, screen or document.
    ///
    /// Identity is decided by address, so zero-sized handles are
    /// indistinguishable from one another.
    #[must_use]
    pub fn is<T: ?Sized>(&self, x: &T) -> bool {
        let x = ptr::from_ref(x);
        if ptr::addr_eq(x, ptr::from_ref(self)) {
            return true;
        }
        self.window.as_ref().is_some_and(|w| {
            ptr::addr_eq(x, ptr::from_ref(w))
                || ptr::addr_eq(x, ptr::from_ref(w.screen()))
                || ptr::addr_eq(x, ptr::from_ref(w.document()))
        })
    }

    /// Evaluates a media query, reporting no match when the host can't.
    #[must_use]
    pub fn match_media(&self, query: &str) -> MediaQueryList {
        self.window
            .as_ref()
            .and_then(|w| w.match_media(query))
            .unwrap_or_else(|| MediaQueryList::unsupported(query))
    }

    /// Visible elements matching `selector`, in document order.
    #[must_use]
    pub fn query_selector_all(&self, selector: &str) -> Vec<W::Element> {
        self.query_selector_all_with(selector, |_, _, _| Propagation::Continue)
    }

    /// Visible elements matching `selector`, calling `callback` for each.
    ///
    /// The callback receives the element, its index among the visible matches
    /// and the viewport. Returning [`Propagation::Stop`] ends the query: the
    /// result holds the matches collected so far, including the current one.
    pub fn query_selector_all_with<F>(&self, selector: &str, mut callback: F) -> Vec<W::Element>
    where
        F: FnMut(&W::Element, usize, &Self) -> Propagation,
    {
        let Some(window) = self.window.as_ref() else {
            return Vec::new();
        };
        let mut matches = Vec::new();
        for element in window.query_selector_all(selector) {
            if !self.contains(&element) {
                continue;
            }
            let flow = callback(&element, matches.len(), self);
            matches.push(element);
            if flow.is_stop() {
                break;
            }
        }
        matches
    }

    /// First visible element matching `selector`.
    #[must_use]
    pub fn query_selector(&self, selector: &str) -> Option<W::Element> {
        self.query_selector_all_with(selector, |_, _, _| Propagation::Stop)
            .into_iter()
            .next()
    }

    // --- Configuration -------------------------------------------------

    /// Delay between consecutive listener invocations, in milliseconds.
    #[must_use]
    pub fn event_listener_delay(&self) -> u64 {
        self.event_listener_delay
    }

    /// Sets the delay between consecutive listener invocations.
    ///
    /// Steps already scheduled keep their deadlines.
    pub fn set_event_listener_delay(&mut self, delay: u64) {
        self.event_listener_delay = delay;
    }

    /// Quiet period before `resize:complete` fires, in milliseconds.
    #[must_use]
    pub fn resize_timeout(&self) -> u64 {
        self.resize.debounce.delay()
    }

    /// Sets the resize quiet period; applies from the next raw resize.
    pub fn set_resize_timeout(&mut self, timeout: u64) {
        self.resize.debounce.set_delay(timeout);
    }

    /// Quiet period before `scroll:complete` fires, in milliseconds.
    #[must_use]
    pub fn scroll_timeout(&self) -> u64 {
        self.scroll.debounce.delay()
    }

    /// Sets the scroll quiet period; applies from the next raw scroll.
    pub fn set_scroll_timeout(&mut self, timeout: u64) {
        self.scroll.debounce.set_delay(timeout);
    }

    /// Current timing configuration.
    #[must_use]
    pub fn config(&self) -> ViewportConfig {
        ViewportConfig {
            event_listener_delay: self.event_listener_delay,
            resize_timeout: self.resize_timeout(),
            scroll_timeout: self.scroll_timeout(),
        }
    }

    // --- Listeners -------------------------------------------------------

    /// Registers `listener` for the event named `event_type` (ASCII case-insensitive).
    ///
    /// Returns `None`, registering nothing, for unknown names or once destroyed.
    ///
    /// Listeners only get shared access to the viewport, so one cannot remove
    /// itself while running. For one-shot listeners keep the returned
    /// [`ListenerId`] and call [`Viewport::remove_event_listener`] from the
    /// host side once the listener has run.
    pub fn add_event_listener<F>(&mut self, event_type: &str, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&Self) -> Propagation + 'static,
    {
        let Some(event) = EventType::parse(event_type) else {
            tracing::trace!(event_type, "ignoring listener for unknown event");
            return None;
        };
        self.add_listener(event, listener)
    }

    /// Registers `listener` for `event`.
    ///
    /// The first listener of a category asks the host for the underlying raw
    /// events. Returns `None` once destroyed.
    pub fn add_listener<F>(&mut self, event: EventType, listener: F) -> Option<ListenerId>
    where
        F: FnMut(&Self) -> Propagation + 'static,
    {
        let host = self.window.as_mut()?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        let listener: Listener<W> = Rc::new(RefCell::new(listener));
        match event {
            EventType::ResizeComplete => self.resize.subscribe(host, id, listener),
            EventType::ScrollComplete => self.scroll.subscribe(host, id, listener),
            EventType::OrientationChange
            | EventType::OrientationPortrait
            | EventType::OrientationLandscape => {
                self.orientation.subscribe(host, event, id, listener);
            }
        }
        Some(id)
    }

    /// Unregisters a listener by event name (ASCII case-insensitive).
    ///
    /// Returns `false` if nothing was removed.
    pub fn remove_event_listener(&mut self, event_type: &str, id: ListenerId) -> bool {
        EventType::parse(event_type).is_some_and(|event| self.remove_listener(event, id))
    }

    /// Unregisters a listener.
    ///
    /// Removing the last listener of a category detaches the host's raw
    /// listener. Returns `false` if `id` wasn't registered for `event`.
    pub fn remove_listener(&mut self, event: EventType, id: ListenerId) -> bool {
        let Some(host) = self.window.as_mut() else {
            return false;
        };
        match event {
            EventType::ResizeComplete => self.resize.unsubscribe(host, id),
            EventType::ScrollComplete => self.scroll.unsubscribe(host, id),
            EventType::OrientationChange
            | EventType::OrientationPortrait
            | EventType::OrientationLandscape => self.orientation.unsubscribe(host, event, id),
        }
    }

    /// Number of listeners registered for `event`.
    #[must_use]
    pub fn listener_count(&self, event: EventType) -> usize {
        self.listeners(event).map_or(0, ListenerList::len)
    }

    /// Returns `true` while the host listener behind `event` is attached.
    ///
    /// The three orientation events share one media-query listener.
    #[must_use]
    pub fn is_bound(&self, event: EventType) -> bool {
        match event {
            EventType::ResizeComplete => self.resize.is_bound(),
            EventType::ScrollComplete => self.scroll.is_bound(),
            EventType::OrientationChange
            | EventType::OrientationPortrait
            | EventType::OrientationLandscape => self.orientation.is_bound(),
        }
    }

    fn listeners(&self, event: EventType) -> Option<&ListenerList<Listener<W>>> {
        match event {
            EventType::ResizeComplete => Some(&self.resize.listeners),
            EventType::ScrollComplete => Some(&self.scroll.listeners),
            EventType::OrientationChange
            | EventType::OrientationPortrait
            | EventType::OrientationLandscape => self.orientation.listeners(event),
        }
    }

    // --- Host events and time ------------------------------------------

    /// Raw `resize` from the host at time `now`.
    ///
    /// Ignored unless someone listens for `resize:complete`.
    pub fn handle_resize(&mut self, now: u64) {
        if !self.resize.is_bound() {
            tracing::trace!("resize while unbound");
            return;
        }
        self.resize
            .debounce
            .trigger(&mut self.timers, now, Task::ResizeSettled);
    }

    /// Raw `scroll` from the host at time `now`.
    ///
    /// Ignored unless someone listens for `scroll:complete`.
    pub fn handle_scroll(&mut self, now: u64) {
        if !self.scroll.is_bound() {
            tracing::trace!("scroll while unbound");
            return;
        }
        self.scroll
            .debounce
            .trigger(&mut self.timers, now, Task::ScrollSettled);
    }

    /// Change notification from the portrait media query at time `now`.
    ///
    /// Updates [`Viewport::orientation`], then fires `orientation:change`
    /// followed by `orientation:portrait` or `orientation:landscape`.
    /// Ignored unless someone listens for an orientation event.
    pub fn handle_orientation_change(&mut self, matches: bool, now: u64) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if !self.orientation.is_bound() {
            tracing::trace!("orientation change while unbound");
            return;
        }
        let host_orientation = window.orientation();
        for event in self.orientation.apply(matches, host_orientation) {
            self.fire_event(event, now);
        }
    }

    /// Runs every task due at or before `now`.
    pub fn advance(&mut self, now: u64) {
        while let Some(expired) = self.timers.pop_expired(now) {
            match expired.payload {
                Task::ResizeSettled => {
                    if self.resize.debounce.settle(expired.id) {
                        tracing::debug!(now, "resize settled");
                        self.fire_event(EventType::ResizeComplete, now);
                    }
                }
                Task::ScrollSettled => {
                    if self.scroll.debounce.settle(expired.id) {
                        tracing::debug!(now, "scroll settled");
                        self.fire_event(EventType::ScrollComplete, now);
                    }
                }
                Task::Deliver { event, next } => self.deliver(event, next, now),
            }
        }
    }

    /// Time of the earliest pending task, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Starts delivering `event` to its listeners at time `now`.
    ///
    /// The first listener runs immediately; each following one runs
    /// [`Viewport::event_listener_delay`] milliseconds after its predecessor,
    /// via [`Viewport::advance`]. Does nothing if `event` has no listeners.
    pub fn fire_event(&mut self, event: EventType, now: u64) {
        self.deliver(event, 0, now);
    }

    fn deliver(&mut self, event: EventType, index: usize, now: u64) {
        let Some(listener) = self
            .listeners(event)
            .and_then(|list| list.get(index))
            .map(Rc::clone)
        else {
            return;
        };
        tracing::trace!(event = event.as_str(), index, now, "delivering");
        let flow = match listener.try_borrow_mut() {
            Ok(mut callback) => (&mut *callback)(&*self),
            Err(_) => Propagation::Continue,
        };
        if flow.is_stop() {
            tracing::debug!(event = event.as_str(), index, "delivery stopped by listener");
            return;
        }
        let next = index + 1;
        if next < self.listener_count(event) {
            self.timers.schedule_after(
                now,
                self.event_listener_delay,
                Task::Deliver { event, next },
            );
        }
    }

    // --- Lifecycle -------------------------------------------------------

    /// Returns `true` once [`Viewport::destroy`] has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.window.is_none()
    }

    /// Cancels pending timers, detaches every host listener, drops all
    /// listeners and releases the window, handing it back to the caller.
    ///
    /// Afterwards the viewport is inert. Calling this again returns `None`.
    pub fn destroy(&mut self) -> Option<W> {
        let mut window = self.window.take()?;
        self.resize.debounce.cancel(&mut self.timers);
        self.scroll.debounce.cancel(&mut self.timers);
        self.timers.clear();
        self.resize.detach(&mut window);
        self.scroll.detach(&mut window);
        self.orientation.detach(&mut window);
        tracing::debug!("viewport destroyed");
        Some(window)
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            position: self.position(),
            orientation: self.orientation(),
            config: self.config(),
            resize_listeners: self.resize.listeners.len(),
            scroll_listeners: self.scroll.listeners.len(),
            orientation_subscribers: self.orientation.subscribers(),
            resize_bound: self.resize.is_bound(),
            scroll_bound: self.scroll.is_bound(),
            orientation_bound: self.orientation.is_bound(),
            pending_tasks: self.timers.len(),
            next_deadline: self.next_deadline(),
            destroyed: self.is_destroyed(),
        }
    }
}

impl<W: Window> Drop for Viewport<W> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<W: Window> fmt::Display for Viewport<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.window {
            Some(window) => write!(f, "[object Viewport: {}]", window.location()),
            None => f.write_str("[object Viewport]"),
        }
    }
}

impl<W: Window> fmt::Debug for Viewport<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("position", &self.position())
            .field("orientation", &self.orientation())
            .field("config", &self.config())
            .field("resize_listeners", &self.resize.listeners.len())
            .field("scroll_listeners", &self.scroll.listeners.len())
            .field("orientation_subscribers", &self.orientation.subscribers())
            .field("timers", &self.timers)
            .field("destroyed", &self.is_destroyed())
            .finish_non_exhaustive()
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportDebugInfo {
    /// Visible region of the document.
    pub position: Rect,
    /// Current orientation in degrees.
    pub orientation: i32,
    /// Current timing configuration.
    pub config: ViewportConfig,
    /// Listeners for `resize:complete`.
    pub resize_listeners: usize,
    /// Listeners for `scroll:complete`.
    pub scroll_listeners: usize,
    /// Listeners across all three orientation events.
    pub orientation_subscribers: usize,
    /// Whether the host's raw `resize` listener is attached.
    pub resize_bound: bool,
    /// Whether the host's raw `scroll` listener is attached.
    pub scroll_bound: bool,
    /// Whether the orientation media-query listener is attached.
    pub orientation_bound: bool,
    /// Settle timers and delivery steps waiting in the timer queue.
    pub pending_tasks: usize,
    /// Earliest pending deadline.
    pub next_deadline: Option<u64>,
    /// Whether [`Viewport::destroy`] has run.
    pub destroyed: bool,
}
