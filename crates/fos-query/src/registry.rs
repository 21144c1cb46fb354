//! Per-entry listener bookkeeping
//!
//! Records the listeners a collection attached to one node, so they can be
//! removed in bulk later. Listeners attached by other means are not tracked.

use fos_dom::EventListener;

/// Event type to listeners, both in registration order
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    listeners: Vec<(String, Vec<EventListener>)>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a listener. Returns false if it was already recorded for this
    /// type, matching how the host ignores duplicate registrations.
    pub fn on(&mut self, event_type: &str, listener: EventListener) -> bool {
        match self.listeners.iter_mut().find(|(t, _)| t == event_type) {
            Some((_, list)) => {
                if list.contains(&listener) {
                    return false;
                }
                list.push(listener);
            }
            None => self.listeners.push((event_type.to_string(), vec![listener])),
        }
        true
    }

    /// Forget a listener. Returns whether it was recorded.
    pub fn off(&mut self, event_type: &str, listener: &EventListener) -> bool {
        let Some(index) = self.listeners.iter().position(|(t, _)| t == event_type) else {
            return false;
        };
        let list = &mut self.listeners[index].1;
        let before = list.len();
        list.retain(|l| l != listener);
        let removed = list.len() != before;
        if list.is_empty() {
            self.listeners.remove(index);
        }
        removed
    }

    /// Listeners recorded for one type
    pub fn listeners(&self, event_type: &str) -> &[EventListener] {
        self.listeners
            .iter()
            .find(|(t, _)| t == event_type)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.listeners.iter().map(|(t, _)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EventListener])> {
        self.listeners.iter().map(|(t, l)| (t.as_str(), l.as_slice()))
    }

    /// Total recorded listeners across all types
    pub fn len(&self) -> usize {
        self.listeners.iter().map(|(_, l)| l.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drop every record, returning them
    pub fn take(&mut self) -> Vec<(String, Vec<EventListener>)> {
        std::mem::take(&mut self.listeners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_keeps_order_and_skips_duplicates() {
        let mut registry = EventRegistry::new();
        let a = EventListener::new(|_| {});
        let b = EventListener::new(|_| {});

        assert!(registry.on("click", a.clone()));
        assert!(registry.on("keyup", b.clone()));
        assert!(registry.on("click", b.clone()));
        assert!(!registry.on("click", a.clone()));

        assert_eq!(registry.event_types().collect::<Vec<_>>(), vec!["click", "keyup"]);
        assert_eq!(registry.listeners("click"), &[a, b]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_off_prunes_empty_types() {
        let mut registry = EventRegistry::new();
        let a = EventListener::new(|_| {});
        registry.on("click", a.clone());

        assert!(!registry.off("keyup", &a));
        assert!(registry.off("click", &a));
        assert!(registry.is_empty());
        assert!(registry.listeners("click").is_empty());
    }

    #[test]
    fn test_take_empties_registry() {
        let mut registry = EventRegistry::new();
        registry.on("click", EventListener::new(|_| {}));
        let taken = registry.take();
        assert_eq!(taken.len(), 1);
        assert!(registry.is_empty());
    }
}
