//! Listener attachment with per-entry bookkeeping

use fos_dom::EventListener;

use super::NodeCollection;
use crate::EventRegistry;

impl NodeCollection {
    /// Attach a non-capturing listener to every node and record it
    pub fn on(&mut self, event_type: &str, listener: EventListener) -> &mut Self {
        {
            let mut doc = self.doc.borrow_mut();
            for entry in &mut self.entries {
                doc.add_event_listener(entry.node, event_type, listener.clone(), false);
                entry.events.on(event_type, listener.clone());
            }
        }
        tracing::trace!("on({}) for {} nodes", event_type, self.entries.len());
        self
    }

    /// Detach a listener from every node and forget it
    pub fn off(&mut self, event_type: &str, listener: &EventListener) -> &mut Self {
        {
            let mut doc = self.doc.borrow_mut();
            for entry in &mut self.entries {
                doc.remove_event_listener(entry.node, event_type, listener, false);
                entry.events.off(event_type, listener);
            }
        }
        self
    }

    /// Detach every listener recorded through this collection and reset
    /// the registries. Listeners attached by other means stay.
    pub fn remove_all_events(&mut self) -> &mut Self {
        {
            let mut doc = self.doc.borrow_mut();
            for entry in &mut self.entries {
                for (event_type, listeners) in entry.events.take() {
                    for listener in &listeners {
                        doc.remove_event_listener(entry.node, &event_type, listener, false);
                    }
                }
            }
        }
        self
    }

    /// Registry of the entry at `index`
    pub fn registry(&self, index: usize) -> Option<&EventRegistry> {
        self.entries.get(index).map(|e| &e.events)
    }
}
