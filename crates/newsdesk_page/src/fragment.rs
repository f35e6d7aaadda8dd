//! Element fragment storage and queries
//!
//! A [`Fragment`] is the headless stand-in for a server-rendered page
//! subtree: a slotmap-backed element tree carrying the handful of things the
//! widget layer actually reads and writes — ids, classes, data attributes,
//! text, form-control values, and a visibility flag. There is no layout, no
//! styling and no rendering here.
//!
//! # Example
//!
//! ```ignore
//! use newsdesk_page::prelude::*;
//!
//! let mut page = Fragment::new();
//! let root = page.root();
//! page.append(
//!     root,
//!     el("div").id("portal-dropdown").hidden().child(
//!         el("div")
//!             .class("portal-option")
//!             .attr("data-value", "1")
//!             .attr("data-text", "Daily Planet"),
//!     ),
//! );
//!
//! let dropdown = page.by_id("portal-dropdown").unwrap();
//! assert_eq!(page.query(dropdown, "portal-option").len(), 1);
//! ```

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::event::{Event, EventKind};

new_key_type! {
    /// Unique identifier for an element within a fragment
    pub struct ElementId;
}

/// One stored element
struct Element {
    tag: String,
    classes: SmallVec<[String; 2]>,
    attrs: FxHashMap<String, String>,
    text: String,
    value: String,
    visible: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// A detached element description, built fluently and handed to
/// [`Fragment::append`]
pub struct ElementNode {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    attrs: FxHashMap<String, String>,
    text: String,
    value: String,
    visible: bool,
    children: Vec<ElementNode>,
}

/// Create a new element description
pub fn el(tag: impl Into<String>) -> ElementNode {
    ElementNode {
        tag: tag.into(),
        id: None,
        classes: SmallVec::new(),
        attrs: FxHashMap::default(),
        text: String::new(),
        value: String::new(),
        visible: true,
        children: Vec::new(),
    }
}

impl ElementNode {
    /// Set the element id (unique within the fragment)
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute (e.g. `data-value`)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the element's own text content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the form-control value
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Start hidden
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Append a child element
    pub fn child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A headless page subtree
pub struct Fragment {
    nodes: SlotMap<ElementId, Element>,
    root: ElementId,
    ids: FxHashMap<String, ElementId>,
    focused: Option<ElementId>,
    pending_changes: Vec<ElementId>,
}

impl Fragment {
    /// Create an empty fragment with a `body` root
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Element {
            tag: "body".to_string(),
            classes: SmallVec::new(),
            attrs: FxHashMap::default(),
            text: String::new(),
            value: String::new(),
            visible: true,
            parent: None,
            children: Vec::new(),
        });
        Self {
            nodes,
            root,
            ids: FxHashMap::default(),
            focused: None,
            pending_changes: Vec::new(),
        }
    }

    /// The root element
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Attach an element description (and its children) under `parent`,
    /// returning the id of the new element
    pub fn append(&mut self, parent: ElementId, node: ElementNode) -> ElementId {
        let ElementNode {
            tag,
            id,
            classes,
            attrs,
            text,
            value,
            visible,
            children,
        } = node;

        let element_id = self.nodes.insert(Element {
            tag,
            classes,
            attrs,
            text,
            value,
            visible,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(element_id);
        }
        if let Some(id) = id {
            if self.ids.insert(id.clone(), element_id).is_some() {
                tracing::warn!(id = %id, "duplicate element id, later element wins");
            }
        }
        for child in children {
            self.append(element_id, child);
        }
        element_id
    }

    /// Look up an element by id
    pub fn by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    /// All descendants of `scope` carrying `class`, in document order
    pub fn query(&self, scope: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        self.collect(scope, class, &mut found);
        found
    }

    fn collect(&self, node: ElementId, class: &str, found: &mut Vec<ElementId>) {
        let Some(element) = self.nodes.get(node) else {
            return;
        };
        for &child in &element.children {
            if self.has_class(child, class) {
                found.push(child);
            }
            self.collect(child, class, found);
        }
    }

    /// Whether `node` is `ancestor` or a descendant of it
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// The element's tag name, or `""` for a dangling id
    pub fn tag(&self, id: ElementId) -> &str {
        self.nodes.get(id).map(|n| n.tag.as_str()).unwrap_or("")
    }

    /// An attribute value, if present
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|n| n.attrs.get(name))
            .map(String::as_str)
    }

    /// The element's own text
    pub fn text(&self, id: ElementId) -> &str {
        self.nodes.get(id).map(|n| n.text.as_str()).unwrap_or("")
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.text = text.into();
        }
    }

    /// The element's text plus all descendant text, in document order
    /// (the `textContent` of the element)
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.gather_text(id, &mut out);
        out
    }

    fn gather_text(&self, id: ElementId, out: &mut String) {
        let Some(element) = self.nodes.get(id) else {
            return;
        };
        if !element.text.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&element.text);
        }
        for &child in &element.children {
            self.gather_text(child, out);
        }
    }

    /// The form-control value
    pub fn value(&self, id: ElementId) -> &str {
        self.nodes.get(id).map(|n| n.value.as_str()).unwrap_or("")
    }

    /// Set the value without raising a change notification (a user edit;
    /// the matching `Input` event is dispatched by the caller)
    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.value = value.into();
        }
    }

    /// Write the value programmatically, queueing a `Change` notification
    /// when the stored value actually changed
    pub fn write_value(&mut self, id: ElementId, value: impl Into<String>) {
        let value = value.into();
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.value == value {
            return;
        }
        node.value = value;
        if !self.pending_changes.contains(&id) {
            self.pending_changes.push(id);
        }
    }

    /// Drain queued change notifications as dispatchable events
    pub fn drain_pending_changes(&mut self) -> Vec<Event> {
        self.pending_changes
            .drain(..)
            .map(|target| Event::new(target, EventKind::Change))
            .collect()
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.nodes.get(id).map(|n| n.visible).unwrap_or(false)
    }

    pub fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.visible = visible;
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.nodes
            .get(id)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    /// The currently focused element, if any
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn focus(&mut self, id: ElementId) {
        if self.nodes.contains_key(id) {
            self.focused = Some(id);
        }
    }

    /// Release focus if `id` currently holds it
    pub fn blur(&mut self, id: ElementId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fragment {
        let mut page = Fragment::new();
        let root = page.root();
        page.append(
            root,
            el("div").id("list").child(
                el("div")
                    .class("option")
                    .attr("data-value", "1")
                    .attr("data-text", "Alpha"),
            )
            .child(
                el("div")
                    .class("option")
                    .attr("data-value", "2")
                    .attr("data-text", "Beta"),
            ),
        );
        page.append(root, el("input").id("field"));
        page
    }

    #[test]
    fn test_by_id_and_query_order() {
        let page = sample();
        let list = page.by_id("list").unwrap();
        let options = page.query(list, "option");
        assert_eq!(options.len(), 2);
        assert_eq!(page.attr(options[0], "data-text"), Some("Alpha"));
        assert_eq!(page.attr(options[1], "data-text"), Some("Beta"));
    }

    #[test]
    fn test_contains() {
        let page = sample();
        let list = page.by_id("list").unwrap();
        let field = page.by_id("field").unwrap();
        let option = page.query(list, "option")[0];
        assert!(page.contains(list, option));
        assert!(page.contains(list, list));
        assert!(!page.contains(list, field));
    }

    #[test]
    fn test_write_value_queues_change_once() {
        let mut page = sample();
        let field = page.by_id("field").unwrap();

        page.write_value(field, "7");
        page.write_value(field, "7");
        let events = page.drain_pending_changes();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, field);
        assert_eq!(events[0].kind, EventKind::Change);
        assert!(page.drain_pending_changes().is_empty());
    }

    #[test]
    fn test_set_value_is_silent() {
        let mut page = sample();
        let field = page.by_id("field").unwrap();
        page.set_value(field, "typed");
        assert_eq!(page.value(field), "typed");
        assert!(page.drain_pending_changes().is_empty());
    }

    #[test]
    fn test_visibility_and_classes() {
        let mut page = sample();
        let list = page.by_id("list").unwrap();
        let option = page.query(list, "option")[0];

        assert!(page.is_visible(option));
        page.set_visible(option, false);
        assert!(!page.is_visible(option));

        page.add_class(option, "highlighted");
        page.add_class(option, "highlighted");
        assert!(page.has_class(option, "highlighted"));
        page.remove_class(option, "highlighted");
        assert!(!page.has_class(option, "highlighted"));
    }

    #[test]
    fn test_text_content_includes_descendants() {
        let mut page = Fragment::new();
        let root = page.root();
        let label = page.append(
            root,
            el("label")
                .text("https://example.com/news")
                .child(el("span").text("(rss)")),
        );
        assert_eq!(page.text_content(label), "https://example.com/news (rss)");
    }

    #[test]
    fn test_focus_tracking() {
        let mut page = sample();
        let field = page.by_id("field").unwrap();
        page.focus(field);
        assert_eq!(page.focused(), Some(field));
        page.blur(field);
        assert_eq!(page.focused(), None);
    }
}
