// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settled scroll notifications and visibility queries.
//!
//! Simulates a user flicking through a feed: raw scroll events arrive every
//! 16ms, and only once the page rests does `scroll:complete` report which
//! cards are on screen.
//!
//! Run:
//! - `cargo run -p understory_demos --example viewport_scroll`
//! - `RUST_LOG=understory_viewport=trace cargo run -p understory_demos --example viewport_scroll`

use understory_demos::{Page, init_logging};
use understory_viewport::{EventType, Propagation, Viewport, Window};

fn main() {
    init_logging();

    let (page, metrics) = Page::new(360.0, 640.0, 40, 120.0, 16.0);
    let mut viewport = Viewport::new(page);
    println!("{viewport}: {:?}", viewport.position());

    println!("subscribe scroll:complete");
    let report = viewport
        .add_listener(EventType::ScrollComplete, |vp| {
            let visible: Vec<usize> = vp
                .query_selector_all(".card")
                .iter()
                .map(|card| card.index)
                .collect();
            println!("  settled at y={}: cards {visible:?} visible", vp.top());
            Propagation::Continue
        })
        .expect("viewport is live");
    viewport.add_event_listener("scroll:complete", |vp| {
        let first = vp.query_selector(".card").map(|card| card.index);
        println!("  second listener: first visible card {first:?}");
        Propagation::Continue
    });

    // Two flicks with a pause in between.
    let mut now = 0;
    for target in [1_400.0, 3_000.0] {
        let start = metrics.borrow().scroll_y;
        for step in 1..=10 {
            metrics.borrow_mut().scroll_y = start + (target - start) * f64::from(step) / 10.0;
            viewport.handle_scroll(now);
            now += 16;
        }
        println!("flick to {target} ends at t={now}ms");
        while let Some(deadline) = viewport.next_deadline() {
            now = deadline;
            viewport.advance(now);
        }
        now += 500;
    }

    println!("unsubscribe first listener");
    viewport.remove_listener(EventType::ScrollComplete, report);
    println!("{:#?}", viewport.debug_info());

    if let Some(page) = viewport.destroy() {
        println!("destroyed; window handed back with {} cards", page.document().len());
    }
}
