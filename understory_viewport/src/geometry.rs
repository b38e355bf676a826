// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle helpers behind the viewport's containment queries.
//!
//! Rectangles are plain [`Rect`]s with `x0`/`y0` as left/top and `x1`/`y1`
//! as right/bottom. They are never normalized: an element with a negative
//! offset width simply never overlaps anything.

use kurbo::Rect;

use crate::host::Element;

/// Returns `true` if `a` and `b` share a region of positive area.
///
/// Unlike [`Rect::overlaps`], the comparison is strict: rectangles that only
/// touch along an edge or at a corner do not overlap.
///
/// ```
/// use kurbo::Rect;
/// use understory_viewport::overlaps;
///
/// let view = Rect::new(0.0, 0.0, 100.0, 100.0);
/// assert!(overlaps(Rect::new(90.0, 90.0, 110.0, 110.0), view));
/// assert!(!overlaps(Rect::new(100.0, 0.0, 150.0, 100.0), view));
/// ```
#[must_use]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Absolute rectangle of `element`, accumulating offsets along its offset-parent chain.
#[must_use]
pub fn element_rect<E: Element>(element: &E) -> Rect {
    let mut left = element.offset_left();
    let mut top = element.offset_top();
    let mut parent = element.offset_parent();
    while let Some(ancestor) = parent {
        left += ancestor.offset_left();
        top += ancestor.offset_top();
        parent = ancestor.offset_parent();
    }
    Rect::new(
        left,
        top,
        left + element.offset_width(),
        top + element.offset_height(),
    )
}

/// Rectangle of a window scrolled to `(left, top)` with the given inner size.
#[must_use]
pub(crate) fn window_rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    Rect::new(left, top, left + width, top + height)
}
