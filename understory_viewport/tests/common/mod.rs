// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scriptable host used by the integration tests.
//!
//! The viewport owns a [`FakeWindow`], so the mutable host state lives behind
//! an `Rc<RefCell<_>>` that tests keep a second handle to.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use understory_viewport::{
    Element, HostEvent, MediaQueryList, PORTRAIT_QUERY, Propagation, Viewport, Window,
};

/// Opaque document handle with a distinct address.
#[derive(Debug, PartialEq, Eq)]
pub struct Document {
    pub title: &'static str,
}

/// Opaque screen handle with a distinct address.
#[derive(Debug, PartialEq, Eq)]
pub struct Screen {
    pub depth: u8,
}

#[derive(Debug)]
struct NodeData {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    parent: Option<Node>,
}

/// Element handle; clones share identity.
#[derive(Clone, Debug)]
pub struct Node(Rc<NodeData>);

impl Node {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self(Rc::new(NodeData {
            left,
            top,
            width,
            height,
            parent: None,
        }))
    }

    pub fn child_of(parent: &Self, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self(Rc::new(NodeData {
            left,
            top,
            width,
            height,
            parent: Some(parent.clone()),
        }))
    }

    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Element for Node {
    fn offset_left(&self) -> f64 {
        self.0.left
    }
    fn offset_top(&self) -> f64 {
        self.0.top
    }
    fn offset_width(&self) -> f64 {
        self.0.width
    }
    fn offset_height(&self) -> f64 {
        self.0.height
    }
    fn offset_parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }
}

/// Mutable side of the fake host.
#[derive(Debug)]
pub struct HostState {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub orientation: Option<i32>,
    pub media_queries: bool,
    pub portrait: bool,
    /// Every add/remove call, in order.
    pub calls: Vec<(&'static str, HostEvent)>,
    /// Elements under the body, in document order.
    pub body: Vec<Node>,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            orientation: None,
            media_queries: true,
            portrait: false,
            calls: Vec::new(),
            body: Vec::new(),
        }
    }
}

impl HostState {
    /// Whether `event` is currently attached, replaying the call log.
    pub fn is_attached(&self, event: HostEvent) -> bool {
        self.calls
            .iter()
            .filter(|(_, e)| *e == event)
            .fold(false, |_, (op, _)| *op == "add")
    }

    pub fn count(&self, op: &str, event: HostEvent) -> usize {
        self.calls
            .iter()
            .filter(|(o, e)| *o == op && *e == event)
            .count()
    }
}

#[derive(Debug)]
pub struct FakeWindow {
    pub state: Rc<RefCell<HostState>>,
    pub document: Document,
    pub screen: Screen,
    pub location: String,
}

impl Window for FakeWindow {
    type Document = Document;
    type Screen = Screen;
    type Location = String;
    type Element = Node;

    fn document(&self) -> &Document {
        &self.document
    }
    fn screen(&self) -> &Screen {
        &self.screen
    }
    fn location(&self) -> &String {
        &self.location
    }
    fn inner_width(&self) -> f64 {
        self.state.borrow().width
    }
    fn inner_height(&self) -> f64 {
        self.state.borrow().height
    }
    fn page_x_offset(&self) -> f64 {
        self.state.borrow().scroll_x
    }
    fn page_y_offset(&self) -> f64 {
        self.state.borrow().scroll_y
    }
    fn orientation(&self) -> Option<i32> {
        self.state.borrow().orientation
    }
    fn match_media(&self, query: &str) -> Option<MediaQueryList> {
        let state = self.state.borrow();
        state.media_queries.then(|| MediaQueryList {
            media: query.to_string(),
            matches: query == PORTRAIT_QUERY && state.portrait,
        })
    }
    fn add_event_listener(&mut self, event: HostEvent) {
        self.state.borrow_mut().calls.push(("add", event));
    }
    fn remove_event_listener(&mut self, event: HostEvent) {
        self.state.borrow_mut().calls.push(("remove", event));
    }
    fn query_selector_all(&self, _selector: &str) -> Vec<Node> {
        self.state.borrow().body.clone()
    }
}

/// Builds a viewport over a fresh fake host and returns both handles.
pub fn viewport_with(state: HostState) -> (Viewport<FakeWindow>, Rc<RefCell<HostState>>) {
    let state = Rc::new(RefCell::new(state));
    let window = FakeWindow {
        state: Rc::clone(&state),
        document: Document { title: "fixture" },
        screen: Screen { depth: 24 },
        location: "https://example.com/page".to_string(),
    };
    (Viewport::new(window), state)
}

pub fn viewport() -> (Viewport<FakeWindow>, Rc<RefCell<HostState>>) {
    viewport_with(HostState::default())
}

/// Virtual clock shared with listeners so they can record when they ran.
#[derive(Clone, Default)]
pub struct Clock(Rc<Cell<u64>>);

impl Clock {
    pub fn now(&self) -> u64 {
        self.0.get()
    }

    /// Runs every task due up to and including `end`, one deadline at a time.
    pub fn run_until(&self, viewport: &mut Viewport<FakeWindow>, end: u64) {
        while let Some(deadline) = viewport.next_deadline() {
            if deadline > end {
                break;
            }
            self.0.set(self.0.get().max(deadline));
            viewport.advance(self.now());
        }
        self.0.set(self.0.get().max(end));
    }

    pub fn set(&self, now: u64) {
        self.0.set(now);
    }
}

/// Shared log of `(label, time)` entries written by listeners.
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<(&'static str, u64)>>>);

impl Log {
    /// Listener that records `label` and returns `flow`.
    pub fn listener(
        &self,
        clock: &Clock,
        label: &'static str,
        flow: Propagation,
    ) -> impl FnMut(&Viewport<FakeWindow>) -> Propagation + 'static {
        let log = Rc::clone(&self.0);
        let clock = clock.clone();
        move |_: &Viewport<FakeWindow>| {
            log.borrow_mut().push((label, clock.now()));
            flow
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, u64)> {
        self.0.borrow().clone()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.0.borrow().iter().map(|(label, _)| *label).collect()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}
