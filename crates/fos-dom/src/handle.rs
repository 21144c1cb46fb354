//! Shared document handle
//!
//! Collections, listeners and embedders all hold the same document. The
//! handle hands out short borrows and never keeps one alive while user
//! callbacks run, so a listener is free to mutate the document.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::{Document, Event, EventPhase, NodeId};

/// Reference-counted, interior-mutable document
#[derive(Debug, Clone)]
pub struct DocumentRef(Rc<RefCell<Document>>);

impl DocumentRef {
    pub fn new(document: Document) -> Self {
        Self(Rc::new(RefCell::new(document)))
    }

    /// Borrow the document immutably
    ///
    /// Panics if a mutable borrow is outstanding.
    pub fn borrow(&self) -> Ref<'_, Document> {
        self.0.borrow()
    }

    /// Borrow the document mutably
    ///
    /// Panics if any other borrow is outstanding.
    pub fn borrow_mut(&self) -> RefMut<'_, Document> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same document
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Dispatch `event` at `target`: capture listeners from the root down,
    /// then target listeners, then bubble listeners back up when the event
    /// bubbles. Returns the event so callers can inspect its flags.
    pub fn dispatch_event(&self, target: NodeId, mut event: Event) -> Event {
        event.target = target;

        // Parent first, root last
        let path: Vec<NodeId> = self.borrow().tree.ancestors(target).collect();
        tracing::trace!(
            "Dispatching {} at {:?} through {} ancestors",
            event.event_type,
            target,
            path.len()
        );

        for &node in path.iter().rev() {
            if self.invoke(node, &mut event, EventPhase::Capturing, Some(true)) {
                return Self::finish(event);
            }
        }

        if self.invoke(target, &mut event, EventPhase::AtTarget, None) {
            return Self::finish(event);
        }

        if event.bubbles {
            for &node in &path {
                if self.invoke(node, &mut event, EventPhase::Bubbling, Some(false)) {
                    break;
                }
            }
        }

        Self::finish(event)
    }

    /// Dispatch a bubbling, cancelable event of `event_type`
    pub fn dispatch(&self, target: NodeId, event_type: &str) -> Event {
        self.dispatch_event(target, Event::bubbling(event_type))
    }

    /// Run the listeners of one node. Returns true when propagation stopped.
    fn invoke(&self, node: NodeId, event: &mut Event, phase: EventPhase, capture: Option<bool>) -> bool {
        // Snapshot so the borrow is released before any listener runs
        let listeners = self
            .borrow()
            .event_targets()
            .listeners(node, &event.event_type, capture);
        if listeners.is_empty() {
            return false;
        }

        event.current_target = Some(node);
        event.phase = phase;
        for listener in listeners {
            listener.call(event);
        }
        event.is_propagation_stopped()
    }

    fn finish(mut event: Event) -> Event {
        event.current_target = None;
        event.phase = EventPhase::None;
        event
    }
}

impl From<Document> for DocumentRef {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventListener;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn nested() -> (DocumentRef, NodeId, NodeId) {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let outer = doc.tree.create_element("div");
        let inner = doc.tree.create_element("span");
        doc.tree.append_child(body, outer).unwrap();
        doc.tree.append_child(outer, inner).unwrap();
        (DocumentRef::new(doc), outer, inner)
    }

    #[test]
    fn test_capture_target_bubble_order() {
        let (doc, outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (node, capture, label) in [
            (outer, true, "outer-capture"),
            (inner, false, "inner"),
            (outer, false, "outer-bubble"),
        ] {
            let log = log.clone();
            doc.borrow_mut().add_event_listener(
                node,
                "click",
                EventListener::new(move |_| log.borrow_mut().push(label)),
                capture,
            );
        }

        doc.dispatch(inner, "click");
        assert_eq!(*log.borrow(), vec!["outer-capture", "inner", "outer-bubble"]);
    }

    #[test]
    fn test_stop_propagation() {
        let (doc, outer, inner) = nested();
        let reached = Rc::new(RefCell::new(false));

        doc.borrow_mut().add_event_listener(
            inner,
            "click",
            EventListener::new(|e| e.stop_propagation()),
            false,
        );
        let flag = reached.clone();
        doc.borrow_mut().add_event_listener(
            outer,
            "click",
            EventListener::new(move |_| *flag.borrow_mut() = true),
            false,
        );

        let event = doc.dispatch(inner, "click");
        assert!(event.is_propagation_stopped());
        assert!(!*reached.borrow());
    }

    #[test]
    fn test_non_bubbling_event_stays_at_target() {
        let (doc, outer, inner) = nested();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        doc.borrow_mut().add_event_listener(
            outer,
            "focus",
            EventListener::new(move |_| *c.borrow_mut() += 1),
            false,
        );

        doc.dispatch_event(inner, Event::new("focus"));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_listener_can_mutate_document() {
        let (doc, _outer, inner) = nested();
        let handle = doc.clone();
        doc.borrow_mut().add_event_listener(
            inner,
            "click",
            EventListener::new(move |e| {
                handle.borrow_mut().tree.set_attribute(e.target, "data-clicked", "yes");
            }),
            false,
        );

        doc.dispatch(inner, "click");
        assert_eq!(doc.borrow().tree.get_attribute(inner, "data-clicked"), Some("yes"));
    }
}
