//! DOM Events
//!
//! Listener storage per node and the event object passed to listeners.
//! Dispatch itself lives on `DocumentRef` so the document borrow can be
//! released while listeners run.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::NodeId;

/// Dispatch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// Event passed to listeners
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub phase: EventPhase,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Non-bubbling, non-cancelable event (the `new Event(type)` default)
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            target: NodeId::NONE,
            current_target: None,
            phase: EventPhase::None,
            bubbles: false,
            cancelable: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Bubbling, cancelable event like a user-agent `click`
    pub fn bubbling(event_type: &str) -> Self {
        Self {
            bubbles: true,
            cancelable: true,
            ..Self::new(event_type)
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation after the current node
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Shared listener callback. Two listeners are the same listener when they
/// share the same allocation, like function identity in the DOM.
#[derive(Clone)]
pub struct EventListener(Rc<dyn Fn(&mut Event)>);

impl EventListener {
    pub fn new(callback: impl Fn(&mut Event) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub fn call(&self, event: &mut Event) {
        (self.0)(event)
    }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for EventListener {}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventListener({:p})", Rc::as_ptr(&self.0))
    }
}

#[derive(Debug, Clone)]
struct Registration {
    event_type: String,
    listener: EventListener,
    capture: bool,
}

/// Native listener table keyed by node
#[derive(Debug, Clone, Default)]
pub struct EventTargets {
    registrations: HashMap<NodeId, Vec<Registration>>,
}

impl EventTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Returns false for an exact duplicate.
    pub fn add(&mut self, node: NodeId, event_type: &str, listener: EventListener, capture: bool) -> bool {
        let list = self.registrations.entry(node).or_default();
        if list
            .iter()
            .any(|r| r.event_type == event_type && r.listener == listener && r.capture == capture)
        {
            return false;
        }
        list.push(Registration {
            event_type: event_type.to_string(),
            listener,
            capture,
        });
        true
    }

    /// Unregister a listener. Returns whether anything was removed.
    pub fn remove(&mut self, node: NodeId, event_type: &str, listener: &EventListener, capture: bool) -> bool {
        let Some(list) = self.registrations.get_mut(&node) else {
            return false;
        };
        let before = list.len();
        list.retain(|r| !(r.event_type == event_type && r.listener == *listener && r.capture == capture));
        let removed = list.len() != before;
        if list.is_empty() {
            self.registrations.remove(&node);
        }
        removed
    }

    /// Listeners on `node` for `event_type` in registration order, filtered
    /// by capture flag (`None` = both)
    pub fn listeners(&self, node: NodeId, event_type: &str, capture: Option<bool>) -> Vec<EventListener> {
        self.registrations
            .get(&node)
            .map(|list| {
                list.iter()
                    .filter(|r| r.event_type == event_type)
                    .filter(|r| capture.is_none_or(|c| c == r.capture))
                    .map(|r| r.listener.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total registrations on a node
    pub fn count(&self, node: NodeId) -> usize {
        self.registrations.get(&node).map_or(0, Vec::len)
    }
}
