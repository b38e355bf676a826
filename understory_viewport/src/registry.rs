// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener bookkeeping and lazy host binding for coalesced events.
//!
//! Each coalesced category (resize, scroll) owns one raw host listener. The
//! listener is attached when the first subscriber arrives and detached when
//! the last one leaves, so an idle viewport costs the host nothing.

use alloc::vec::Vec;

use understory_timing::Debounce;

use crate::event::ListenerId;
use crate::host::{HostEvent, Window};

/// Attachment state of a raw host listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum Binding {
    #[default]
    Unbound,
    Bound,
}

impl Binding {
    pub(crate) fn is_bound(self) -> bool {
        self == Self::Bound
    }

    /// Attaches `event` on the host unless already bound.
    pub(crate) fn bind<W: Window>(&mut self, host: &mut W, event: HostEvent) {
        if self.is_bound() {
            return;
        }
        host.add_event_listener(event);
        *self = Self::Bound;
        tracing::trace!(event = event.as_str(), "host listener bound");
    }

    /// Detaches `event` from the host if bound.
    pub(crate) fn unbind<W: Window>(&mut self, host: &mut W, event: HostEvent) {
        if !self.is_bound() {
            return;
        }
        host.remove_event_listener(event);
        *self = Self::Unbound;
        tracing::trace!(event = event.as_str(), "host listener unbound");
    }
}

/// Ordered listeners with their handles.
#[derive(Debug)]
pub(crate) struct ListenerList<L> {
    entries: Vec<(ListenerId, L)>,
}

impl<L> ListenerList<L> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, id: ListenerId, listener: L) {
        self.entries.push((id, listener));
    }

    /// Removes the listener registered under `id`. Returns `false` if absent.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&L> {
        self.entries.get(index).map(|(_, listener)| listener)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Descriptor of one debounced ("complete") event category.
#[derive(Debug)]
pub(crate) struct CoalescedEvent<L> {
    source: HostEvent,
    binding: Binding,
    pub(crate) listeners: ListenerList<L>,
    pub(crate) debounce: Debounce,
}

impl<L> CoalescedEvent<L> {
    pub(crate) fn new(source: HostEvent, settle_delay: u64) -> Self {
        Self {
            source,
            binding: Binding::Unbound,
            listeners: ListenerList::new(),
            debounce: Debounce::new(settle_delay),
        }
    }

    pub(crate) fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }

    /// Binds the host listener if needed, then appends `listener`.
    pub(crate) fn subscribe<W: Window>(&mut self, host: &mut W, id: ListenerId, listener: L) {
        self.binding.bind(host, self.source);
        self.listeners.push(id, listener);
    }

    /// Removes `id`; unbinds the host listener once no subscriber is left.
    pub(crate) fn unsubscribe<W: Window>(&mut self, host: &mut W, id: ListenerId) -> bool {
        if !self.listeners.remove(id) {
            return false;
        }
        if self.listeners.is_empty() {
            self.binding.unbind(host, self.source);
        }
        true
    }

    /// Unbinds the host listener and forgets every subscriber.
    pub(crate) fn detach<W: Window>(&mut self, host: &mut W) {
        self.binding.unbind(host, self.source);
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{Binding, CoalescedEvent, ListenerList};
    use crate::event::ListenerId;
    use crate::host::{Element, HostEvent, Window};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(&'static str, HostEvent)>,
    }

    struct NoElement;

    impl Element for NoElement {
        fn offset_left(&self) -> f64 {
            0.0
        }
        fn offset_top(&self) -> f64 {
            0.0
        }
        fn offset_width(&self) -> f64 {
            0.0
        }
        fn offset_height(&self) -> f64 {
            0.0
        }
        fn offset_parent(&self) -> Option<Self> {
            None
        }
    }

    impl Window for Recorder {
        type Document = ();
        type Screen = ();
        type Location = &'static str;
        type Element = NoElement;

        fn document(&self) -> &() {
            &()
        }
        fn screen(&self) -> &() {
            &()
        }
        fn location(&self) -> &&'static str {
            &"about:blank"
        }
        fn inner_width(&self) -> f64 {
            0.0
        }
        fn inner_height(&self) -> f64 {
            0.0
        }
        fn page_x_offset(&self) -> f64 {
            0.0
        }
        fn page_y_offset(&self) -> f64 {
            0.0
        }
        fn add_event_listener(&mut self, event: HostEvent) {
            self.calls.push(("add", event));
        }
        fn remove_event_listener(&mut self, event: HostEvent) {
            self.calls.push(("remove", event));
        }
        fn query_selector_all(&self, _: &str) -> Vec<NoElement> {
            Vec::new()
        }
    }

    #[test]
    fn binding_transitions_call_host_once() {
        let mut host = Recorder::default();
        let mut binding = Binding::default();

        binding.bind(&mut host, HostEvent::Resize);
        binding.bind(&mut host, HostEvent::Resize);
        binding.unbind(&mut host, HostEvent::Resize);
        binding.unbind(&mut host, HostEvent::Resize);

        assert_eq!(
            host.calls,
            [("add", HostEvent::Resize), ("remove", HostEvent::Resize)]
        );
    }

    #[test]
    fn listener_list_removes_by_handle() {
        let mut list = ListenerList::new();
        list.push(ListenerId(1), 'a');
        list.push(ListenerId(2), 'b');
        list.push(ListenerId(3), 'c');

        assert!(list.remove(ListenerId(2)));
        assert!(!list.remove(ListenerId(2)));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some(&'a'));
        assert_eq!(list.get(1), Some(&'c'));
        assert_eq!(list.get(2), None);
    }

    #[test]
    fn coalesced_event_binds_on_first_and_unbinds_on_last() {
        let mut host = Recorder::default();
        let mut scroll = CoalescedEvent::new(HostEvent::Scroll, 300);

        scroll.subscribe(&mut host, ListenerId(1), ());
        scroll.subscribe(&mut host, ListenerId(2), ());
        assert!(scroll.is_bound());

        assert!(scroll.unsubscribe(&mut host, ListenerId(1)));
        assert!(scroll.is_bound());
        assert!(!scroll.unsubscribe(&mut host, ListenerId(7)));
        assert!(scroll.unsubscribe(&mut host, ListenerId(2)));
        assert!(!scroll.is_bound());

        assert_eq!(
            host.calls,
            [("add", HostEvent::Scroll), ("remove", HostEvent::Scroll)]
        );
    }

    #[test]
    fn detach_is_idempotent() {
        let mut host = Recorder::default();
        let mut resize = CoalescedEvent::new(HostEvent::Resize, 300);
        resize.subscribe(&mut host, ListenerId(1), ());

        resize.detach(&mut host);
        resize.detach(&mut host);

        assert!(resize.listeners.is_empty());
        assert_eq!(host.calls.len(), 2);
    }
}
