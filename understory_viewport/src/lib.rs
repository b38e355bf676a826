// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_viewport --heading-base-level=0

//! Understory Viewport: a headless model of a browser window's visible region.
//!
//! This crate answers two recurring questions of web UI code without
//! re-deriving window geometry and event coalescing each time:
//!
//! - *Is this element on screen?* [`Viewport::contains`] tests an element's
//!   absolute rectangle (accumulated along its offset-parent chain) against
//!   the scrolled window rectangle.
//! - *Tell me once scrolling/resizing has settled.* Listeners for
//!   `resize:complete` and `scroll:complete` fire once after a burst of raw
//!   events pauses; `orientation:*` listeners follow the
//!   `(orientation: portrait)` media query.
//!
//! The host (a browser binding, a test harness) implements [`Window`] and
//! [`Element`], forwards raw events together with the current time, and calls
//! [`Viewport::advance`] as its clock moves. Timers live in an
//! [`understory_timing::TimerQueue`] owned by the viewport; nothing in this
//! crate reads a clock or blocks.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use understory_viewport::{Element, EventType, HostEvent, Propagation, Viewport, Window};
//!
//! #[derive(Clone)]
//! struct Node { x: f64, y: f64, w: f64, h: f64 }
//!
//! impl Element for Node {
//!     fn offset_left(&self) -> f64 { self.x }
//!     fn offset_top(&self) -> f64 { self.y }
//!     fn offset_width(&self) -> f64 { self.w }
//!     fn offset_height(&self) -> f64 { self.h }
//!     fn offset_parent(&self) -> Option<Self> { None }
//! }
//!
//! struct Page { scroll_y: f64, nodes: Vec<Node> }
//!
//! impl Window for Page {
//!     type Document = ();
//!     type Screen = ();
//!     type Location = &'static str;
//!     type Element = Node;
//!
//!     fn document(&self) -> &() { &() }
//!     fn screen(&self) -> &() { &() }
//!     fn location(&self) -> &&'static str { &"https://example.com/" }
//!     fn inner_width(&self) -> f64 { 800.0 }
//!     fn inner_height(&self) -> f64 { 600.0 }
//!     fn page_x_offset(&self) -> f64 { 0.0 }
//!     fn page_y_offset(&self) -> f64 { self.scroll_y }
//!     fn add_event_listener(&mut self, _: HostEvent) {}
//!     fn remove_event_listener(&mut self, _: HostEvent) {}
//!     fn query_selector_all(&self, _: &str) -> Vec<Node> { self.nodes.clone() }
//! }
//!
//! let page = Page {
//!     scroll_y: 0.0,
//!     nodes: vec![
//!         Node { x: 0.0, y: 100.0, w: 100.0, h: 50.0 },
//!         Node { x: 0.0, y: 2_000.0, w: 100.0, h: 50.0 },
//!     ],
//! };
//! let mut viewport = Viewport::new(page);
//! assert_eq!(viewport.query_selector_all(".card").len(), 1);
//!
//! let settled = Rc::new(Cell::new(0));
//! let seen = settled.clone();
//! viewport.add_listener(EventType::ScrollComplete, move |_| {
//!     seen.set(seen.get() + 1);
//!     Propagation::Continue
//! });
//!
//! // A burst of raw scroll events, 16ms apart.
//! for now in (0..160).step_by(16) {
//!     viewport.handle_scroll(now);
//! }
//! viewport.advance(400);
//! assert_eq!(settled.get(), 0);
//! viewport.advance(444);
//! assert_eq!(settled.get(), 1);
//! ```
//!
//! ## Delivery model
//!
//! Listeners of one event are invoked in registration order, spaced
//! [`Viewport::event_listener_delay`] milliseconds apart so that work
//! triggered by one listener (DOM mutation, layout) does not pile into the
//! same turn as the next. Any listener can return [`Propagation::Stop`] to
//! skip the rest of the current firing; it stays registered.
//!
//! ## Host listeners
//!
//! Raw host listeners are attached lazily and reference counted: the host
//! is asked for `resize` events only while at least one `resize:complete`
//! listener exists, for `scroll` likewise, and for media-query changes while
//! any of the three orientation events has a listener.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod event;
mod geometry;
mod host;
mod orientation;
mod registry;
mod viewport;

pub use config::{
    DEFAULT_EVENT_LISTENER_DELAY, DEFAULT_RESIZE_TIMEOUT, DEFAULT_SCROLL_TIMEOUT, ViewportConfig,
};
pub use error::ViewportError;
pub use event::{EventType, ListenerId, Propagation};
pub use geometry::{element_rect, overlaps};
pub use host::{Element, HostEvent, MediaQueryList, PORTRAIT_QUERY, Window};
pub use orientation::{LANDSCAPE, PORTRAIT, initial_orientation, orientation_after_change};
pub use viewport::{Viewport, ViewportDebugInfo};
