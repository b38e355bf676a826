// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_viewport::{Element, HostEvent, Propagation, Viewport, Window};

#[derive(Clone)]
struct Node {
    top: f64,
    parent: Option<Box<Node>>,
}

impl Element for Node {
    fn offset_left(&self) -> f64 {
        8.0
    }
    fn offset_top(&self) -> f64 {
        self.top
    }
    fn offset_width(&self) -> f64 {
        300.0
    }
    fn offset_height(&self) -> f64 {
        40.0
    }
    fn offset_parent(&self) -> Option<Self> {
        self.parent.as_deref().cloned()
    }
}

struct Column {
    scroll_y: f64,
    nodes: Vec<Node>,
}

impl Window for Column {
    type Document = ();
    type Screen = ();
    type Location = &'static str;
    type Element = Node;

    fn document(&self) -> &() {
        &()
    }
    fn screen(&self) -> &() {
        &()
    }
    fn location(&self) -> &&'static str {
        &"bench://column"
    }
    fn inner_width(&self) -> f64 {
        1280.0
    }
    fn inner_height(&self) -> f64 {
        720.0
    }
    fn page_x_offset(&self) -> f64 {
        0.0
    }
    fn page_y_offset(&self) -> f64 {
        self.scroll_y
    }
    fn add_event_listener(&mut self, _: HostEvent) {}
    fn remove_event_listener(&mut self, _: HostEvent) {}
    fn query_selector_all(&self, _: &str) -> Vec<Node> {
        self.nodes.clone()
    }
}

/// `count` flat nodes stacked 48px apart.
fn column(count: usize, scroll_y: f64) -> Column {
    let nodes = (0..count)
        .map(|i| Node {
            top: i as f64 * 48.0,
            parent: None,
        })
        .collect();
    Column { scroll_y, nodes }
}

/// Node nested `depth` levels below the root.
fn nested(depth: usize) -> Node {
    let mut node = Node {
        top: 0.0,
        parent: None,
    };
    for _ in 0..depth {
        node = Node {
            top: 12.0,
            parent: Some(Box::new(node)),
        };
    }
    node
}

fn bench_contains_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/contains");
    let viewport = Viewport::new(column(0, 0.0));
    for depth in [0_usize, 4, 16, 64] {
        let node = nested(depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &node, |b, node| {
            b.iter(|| black_box(viewport.contains(black_box(node))));
        });
    }
    group.finish();
}

fn bench_query_selector_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/query_selector_all");
    for count in [100_usize, 1_000, 10_000] {
        // Scrolled to the middle so most nodes are filtered out.
        let viewport = Viewport::new(column(count, count as f64 * 24.0));
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("all", count), &viewport, |b, vp| {
            b.iter(|| black_box(vp.query_selector_all(".item")));
        });
        group.bench_with_input(BenchmarkId::new("first", count), &viewport, |b, vp| {
            b.iter(|| black_box(vp.query_selector(".item")));
        });
    }
    group.finish();
}

fn bench_scroll_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/scroll_burst");
    for listeners in [1_usize, 8, 64] {
        group.bench_function(BenchmarkId::new("listeners", listeners), |b| {
            let mut viewport = Viewport::new(column(0, 0.0));
            for _ in 0..listeners {
                viewport.add_event_listener("scroll:complete", |vp| {
                    black_box(vp.top());
                    Propagation::Continue
                });
            }
            let mut now = 0_u64;
            b.iter(|| {
                for _ in 0..60 {
                    viewport.handle_scroll(now);
                    now += 16;
                }
                while let Some(deadline) = viewport.next_deadline() {
                    now = deadline;
                    viewport.advance(now);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_contains_depth,
    bench_query_selector_all,
    bench_scroll_burst
);
criterion_main!(benches);
