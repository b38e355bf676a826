// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orientation and resize notifications.
//!
//! Rotates a simulated phone twice. Each rotation is a resize burst followed
//! by a portrait media-query change; listeners see `orientation:change`
//! first, then the specific orientation, then `resize:complete` once the
//! window stops changing size.
//!
//! Run:
//! - `cargo run -p understory_demos --example viewport_orientation`

use understory_demos::{Page, init_logging};
use understory_viewport::{Propagation, Viewport, ViewportConfig};

fn main() {
    init_logging();

    let (page, metrics) = Page::new(390.0, 844.0, 12, 200.0, 0.0);
    let config = ViewportConfig {
        resize_timeout: 150,
        ..ViewportConfig::default()
    };
    let mut viewport = Viewport::with_config(page, config);
    println!("start: orientation {}", viewport.orientation());

    for name in [
        "orientation:change",
        "orientation:portrait",
        "orientation:landscape",
        "resize:complete",
    ] {
        viewport.add_event_listener(name, move |vp| {
            println!(
                "  {name}: {}x{} at {} degrees",
                vp.width(),
                vp.height(),
                vp.orientation()
            );
            Propagation::Continue
        });
    }

    let mut now = 0;
    for angle in [90, 0] {
        println!("rotate to {angle} degrees at t={now}ms");
        {
            let mut guard = metrics.borrow_mut();
            let m = &mut *guard;
            std::mem::swap(&mut m.width, &mut m.height);
            m.angle = Some(angle);
        }
        for _ in 0..5 {
            viewport.handle_resize(now);
            now += 10;
        }
        let portrait = metrics.borrow().is_portrait();
        viewport.handle_orientation_change(portrait, now);
        while let Some(deadline) = viewport.next_deadline() {
            now = deadline;
            viewport.advance(now);
        }
        now += 1_000;
    }
}
