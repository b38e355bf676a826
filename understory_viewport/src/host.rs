// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host boundary: the window and element capabilities a [`Viewport`](crate::Viewport) consumes.
//!
//! A browser binding implements [`Window`] over its global window object and
//! [`Element`] over its element handles; tests implement both over plain
//! structs. The viewport never calls back into the host except through these
//! traits.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Media query watched to detect orientation changes.
pub const PORTRAIT_QUERY: &str = "(orientation: portrait)";

/// Raw host event sources the viewport subscribes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// `resize` on the window.
    Resize,
    /// `scroll` on the document.
    Scroll,
    /// Change listener on the [`PORTRAIT_QUERY`] media query list.
    OrientationQuery,
}

impl HostEvent {
    /// Name of the raw event as the host knows it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Scroll => "scroll",
            Self::OrientationQuery => "change",
        }
    }
}

/// Result of evaluating a media query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaQueryList {
    /// The query as evaluated.
    pub media: String,
    /// Whether the query currently matches.
    pub matches: bool,
}

impl MediaQueryList {
    /// Non-matching result reported when the host cannot evaluate media queries.
    #[must_use]
    pub fn unsupported(query: &str) -> Self {
        Self {
            media: query.into(),
            matches: false,
        }
    }
}

/// Laid-out element with offset geometry.
///
/// Offsets are relative to [`Element::offset_parent`]; an element without an
/// offset parent is positioned relative to the document.
pub trait Element: Sized {
    /// Horizontal offset from the offset parent.
    fn offset_left(&self) -> f64;
    /// Vertical offset from the offset parent.
    fn offset_top(&self) -> f64;
    /// Laid-out width.
    fn offset_width(&self) -> f64;
    /// Laid-out height.
    fn offset_height(&self) -> f64;
    /// The nearest positioned ancestor, if any.
    fn offset_parent(&self) -> Option<Self>;
}

/// Host window context.
///
/// Metrics are read live on every viewport query, so implementations should
/// return current values rather than cached ones.
pub trait Window {
    /// Document handle exposed through [`Viewport::document`](crate::Viewport::document).
    type Document;
    /// Screen handle exposed through [`Viewport::screen`](crate::Viewport::screen).
    type Screen;
    /// Location, rendered by the viewport's `Display` impl.
    type Location: fmt::Display;
    /// Element handle returned from selector queries.
    type Element: Element;

    /// The window's document.
    fn document(&self) -> &Self::Document;
    /// The window's screen.
    fn screen(&self) -> &Self::Screen;
    /// The window's location.
    fn location(&self) -> &Self::Location;

    /// Inner width of the window in CSS pixels.
    fn inner_width(&self) -> f64;
    /// Inner height of the window in CSS pixels.
    fn inner_height(&self) -> f64;
    /// Horizontal scroll offset.
    fn page_x_offset(&self) -> f64;
    /// Vertical scroll offset.
    fn page_y_offset(&self) -> f64;

    /// Device orientation in degrees, on hosts that report one.
    fn orientation(&self) -> Option<i32> {
        None
    }

    /// Evaluates a media query; `None` if the host has no media query support.
    fn match_media(&self, query: &str) -> Option<MediaQueryList> {
        let _ = query;
        None
    }

    /// Starts delivering `event` to the viewport.
    ///
    /// After this call the host forwards raw events to
    /// [`Viewport::handle_resize`](crate::Viewport::handle_resize),
    /// [`Viewport::handle_scroll`](crate::Viewport::handle_scroll) or
    /// [`Viewport::handle_orientation_change`](crate::Viewport::handle_orientation_change).
    fn add_event_listener(&mut self, event: HostEvent);

    /// Stops delivering `event` to the viewport.
    fn remove_event_listener(&mut self, event: HostEvent);

    /// Elements below the document body matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;
}
