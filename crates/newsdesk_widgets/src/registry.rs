//! Per-page widget registry and event dispatch
//!
//! Each page constructs its instances explicitly and hands them to a
//! [`WidgetRegistry`]; instances share no state, even when two widgets on
//! the same page bind the same conceptual field on different subtrees.
//!
//! Dispatch is synchronous and run-to-completion: every event is delivered
//! to every instance (instances filter by target, the way document-level
//! listeners do), and change notifications queued during handling — a
//! commit writing its hidden field, for example — are drained and delivered
//! afterwards, cascading until the page settles.
//!
//! Mounting is failure-tolerant: a widget whose bindings did not resolve is
//! logged and dropped, and the rest of the page keeps working.

use std::collections::VecDeque;

use newsdesk_page::{ElementId, Event, EventKind, Fragment, KeyCode};

use crate::error::Result;

/// A page-bound widget instance
pub trait Widget {
    /// Deliver one event; the handler runs to completion and may freely
    /// mutate the fragment
    fn handle_event(&mut self, fragment: &mut Fragment, event: &Event);
}

/// Owns a fragment and the widget instances wired to it
pub struct WidgetRegistry {
    fragment: Fragment,
    instances: Vec<Box<dyn Widget>>,
}

impl WidgetRegistry {
    pub fn new(fragment: Fragment) -> Self {
        Self {
            fragment,
            instances: Vec::new(),
        }
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn fragment_mut(&mut self) -> &mut Fragment {
        &mut self.fragment
    }

    /// Number of live (successfully mounted) instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Build a widget against the owned fragment and mount it, or log and
    /// disable it if construction failed. Returns whether the instance is
    /// live.
    pub fn mount<W, F>(&mut self, build: F) -> bool
    where
        W: Widget + 'static,
        F: FnOnce(&mut Fragment) -> Result<W>,
    {
        match build(&mut self.fragment) {
            Ok(widget) => {
                self.instances.push(Box::new(widget));
                true
            }
            Err(error) => {
                tracing::warn!(%error, "widget disabled, required bindings missing");
                false
            }
        }
    }

    /// Deliver an event and run the page to quiescence
    pub fn dispatch(&mut self, event: Event) {
        let mut queue = VecDeque::new();
        queue.push_back(event);
        while let Some(event) = queue.pop_front() {
            tracing::trace!(kind = ?event.kind, "dispatch");
            for widget in &mut self.instances {
                widget.handle_event(&mut self.fragment, &event);
            }
            queue.extend(self.fragment.drain_pending_changes());
        }
    }

    /// Deliver only the change notifications already queued on the fragment
    fn pump(&mut self) {
        let pending = self.fragment.drain_pending_changes();
        for event in pending {
            self.dispatch(event);
        }
    }

    // =========================================================================
    // Input simulation
    // =========================================================================
    //
    // Browser-equivalent helpers used by tests and demos: they mutate the
    // fragment the way a user agent would and dispatch the matching event.

    /// Give keyboard focus to the element with `id`
    pub fn focus(&mut self, id: &str) {
        let Some(target) = self.lookup(id) else { return };
        self.fragment.focus(target);
        self.dispatch(Event::new(target, EventKind::FocusGained));
    }

    /// Replace the element's text value as if the user edited it
    pub fn type_text(&mut self, id: &str, text: &str) {
        let Some(target) = self.lookup(id) else { return };
        self.fragment.set_value(target, text);
        self.dispatch(Event::new(target, EventKind::Input));
    }

    /// Press a key while the element has focus
    pub fn press(&mut self, id: &str, key: KeyCode) {
        let Some(target) = self.lookup(id) else { return };
        self.dispatch(Event::new(target, EventKind::KeyDown(key)));
    }

    /// Click the element with `id`
    pub fn click(&mut self, id: &str) {
        let Some(target) = self.lookup(id) else { return };
        self.click_element(target);
    }

    /// Click an element by handle (options rarely carry ids)
    pub fn click_element(&mut self, target: ElementId) {
        self.dispatch(Event::new(target, EventKind::Click));
    }

    /// Write a field programmatically, cascading its change notification
    pub fn write_field(&mut self, id: &str, value: &str) {
        let Some(target) = self.lookup(id) else { return };
        self.fragment.write_value(target, value);
        self.pump();
    }

    fn lookup(&self, id: &str) -> Option<ElementId> {
        let found = self.fragment.by_id(id);
        if found.is_none() {
            tracing::warn!(id = %id, "no such element, input ignored");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::search_select::search_select;
    use newsdesk_page::el;

    fn page() -> Fragment {
        let mut page = Fragment::new();
        let root = page.root();
        page.append(root, el("input").id("search"));
        page.append(
            root,
            el("div").id("dropdown").hidden().child(
                el("div")
                    .class("opt")
                    .attr("data-value", "1")
                    .attr("data-text", "Daily Planet"),
            ),
        );
        page.append(root, el("input").id("value").attr("type", "hidden"));
        page
    }

    #[test]
    fn test_mount_failure_disables_instance_only() {
        let mut registry = WidgetRegistry::new(page());
        let ok = registry
            .mount(|page| search_select("search", "missing-dropdown", "value", "opt").build(page));
        assert!(!ok);
        assert_eq!(registry.instance_count(), 0);

        // The page itself keeps working.
        let ok =
            registry.mount(|page| search_select("search", "dropdown", "value", "opt").build(page));
        assert!(ok);
        assert_eq!(registry.instance_count(), 1);
    }

    #[test]
    fn test_write_field_cascades_change() {
        let mut registry = WidgetRegistry::new(page());
        registry.mount(|page| search_select("search", "dropdown", "value", "opt").build(page));

        registry.focus("search");
        let dropdown = registry.fragment().by_id("dropdown").unwrap();
        let option = registry.fragment().query(dropdown, "opt")[0];
        registry.click_element(option);

        let search = registry.fragment().by_id("search").unwrap();
        assert_eq!(registry.fragment().value(search), "Daily Planet");

        registry.write_field("value", "");
        assert_eq!(registry.fragment().value(search), "");
    }

    #[test]
    fn test_unknown_element_input_is_ignored() {
        let mut registry = WidgetRegistry::new(page());
        registry.type_text("nope", "anything");
        registry.click("nope");
    }
}
