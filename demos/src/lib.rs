// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated page used by the viewport demos.
//!
//! [`Page`] stands in for a browser window: a fixed-size window over a tall
//! column of cards, with scroll position, size and orientation that the demo
//! changes directly. Host listener calls are printed so the lazy binding is
//! visible.

use std::cell::RefCell;
use std::rc::Rc;

use understory_viewport::{Element, HostEvent, MediaQueryList, PORTRAIT_QUERY, Window};

/// A card in the page's single column.
#[derive(Clone, Debug)]
pub struct Card {
    /// Position in the column, used as a label.
    pub index: usize,
    top: f64,
    width: f64,
    height: f64,
}

impl Element for Card {
    fn offset_left(&self) -> f64 {
        0.0
    }
    fn offset_top(&self) -> f64 {
        self.top
    }
    fn offset_width(&self) -> f64 {
        self.width
    }
    fn offset_height(&self) -> f64 {
        self.height
    }
    fn offset_parent(&self) -> Option<Self> {
        None
    }
}

/// Mutable window metrics shared between the demo and the [`Page`].
#[derive(Debug)]
pub struct Metrics {
    /// Inner width of the window.
    pub width: f64,
    /// Inner height of the window.
    pub height: f64,
    /// Vertical scroll offset.
    pub scroll_y: f64,
    /// Host-reported orientation angle.
    pub angle: Option<i32>,
}

impl Metrics {
    /// Returns `true` if the window is taller than it is wide.
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

/// Fake window over a column of cards.
#[derive(Debug)]
pub struct Page {
    metrics: Rc<RefCell<Metrics>>,
    cards: Vec<Card>,
    url: String,
}

impl Page {
    /// Creates a `width` x `height` window over `count` cards of height `card_height`,
    /// separated by `gap`.
    pub fn new(
        width: f64,
        height: f64,
        count: usize,
        card_height: f64,
        gap: f64,
    ) -> (Self, Rc<RefCell<Metrics>>) {
        let metrics = Rc::new(RefCell::new(Metrics {
            width,
            height,
            scroll_y: 0.0,
            angle: None,
        }));
        let mut cards = Vec::with_capacity(count);
        let mut top = 0.0;
        for index in 0..count {
            cards.push(Card {
                index,
                top,
                width,
                height: card_height,
            });
            top += card_height + gap;
        }
        let page = Self {
            metrics: Rc::clone(&metrics),
            cards,
            url: "https://example.com/feed".to_string(),
        };
        (page, metrics)
    }
}

impl Window for Page {
    type Document = Vec<Card>;
    type Screen = ();
    type Location = String;
    type Element = Card;

    fn document(&self) -> &Vec<Card> {
        &self.cards
    }
    fn screen(&self) -> &() {
        &()
    }
    fn location(&self) -> &String {
        &self.url
    }
    fn inner_width(&self) -> f64 {
        self.metrics.borrow().width
    }
    fn inner_height(&self) -> f64 {
        self.metrics.borrow().height
    }
    fn page_x_offset(&self) -> f64 {
        0.0
    }
    fn page_y_offset(&self) -> f64 {
        self.metrics.borrow().scroll_y
    }
    fn orientation(&self) -> Option<i32> {
        self.metrics.borrow().angle
    }
    fn match_media(&self, query: &str) -> Option<MediaQueryList> {
        Some(MediaQueryList {
            media: query.to_string(),
            matches: query == PORTRAIT_QUERY && self.metrics.borrow().is_portrait(),
        })
    }
    fn add_event_listener(&mut self, event: HostEvent) {
        println!("  host: listening for `{}`", event.as_str());
    }
    fn remove_event_listener(&mut self, event: HostEvent) {
        println!("  host: no longer listening for `{}`", event.as_str());
    }
    fn query_selector_all(&self, _selector: &str) -> Vec<Card> {
        self.cards.clone()
    }
}

/// Installs a `fmt` subscriber honoring `RUST_LOG`, so the viewport's
/// `tracing` events show up next to the demo output.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();
}
