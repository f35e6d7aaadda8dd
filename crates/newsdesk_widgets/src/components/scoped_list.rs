//! Dependent live filter for plain item lists
//!
//! Binds a scope field (any form control, typically the hidden field of a
//! [`search_select`](crate::components::search_select) instance) and an
//! optional free-text search field to a container of items. An item is
//! visible iff it belongs to the selected scope (or no scope is selected)
//! AND its text content contains the query, case-insensitively — the same
//! rule the selection machine uses, applied through the same pure function
//! regardless of which input changed.
//!
//! The filter runs once at bind time so a pre-populated edit form starts
//! correctly narrowed instead of defaulting to "all visible".

use newsdesk_page::{ElementId, Event, EventKind, Fragment};

use crate::error::{Result, WidgetError};
use crate::machine;
use crate::registry::Widget;

/// A scope-and-query filtered item list
#[derive(Debug)]
pub struct ScopedList {
    scope_field: ElementId,
    query_field: Option<ElementId>,
    items: Vec<ElementId>,
    scope_attr: String,
}

/// Start binding a scoped list
///
/// `scope_field_id` names the form control whose value selects the scope,
/// `list_id` the container, and `item_class` the class identifying items.
/// Items carry their scope tag in the attribute named by
/// [`scope_attr`](ScopedListBuilder::scope_attr) (default `data-scope`) and
/// match the query against their text content.
pub fn scoped_list(
    scope_field_id: impl Into<String>,
    list_id: impl Into<String>,
    item_class: impl Into<String>,
) -> ScopedListBuilder {
    ScopedListBuilder {
        scope_field: scope_field_id.into(),
        list: list_id.into(),
        item_class: item_class.into(),
        query_field: None,
        scope_attr: "data-scope".to_string(),
    }
}

/// Builder for [`ScopedList`]
pub struct ScopedListBuilder {
    scope_field: String,
    list: String,
    item_class: String,
    query_field: Option<String>,
    scope_attr: String,
}

impl ScopedListBuilder {
    /// Also refilter whenever this free-text field changes
    pub fn query_field(mut self, id: impl Into<String>) -> Self {
        self.query_field = Some(id.into());
        self
    }

    /// Attribute carrying each item's scope tag (default `data-scope`)
    pub fn scope_attr(mut self, attr: impl Into<String>) -> Self {
        self.scope_attr = attr.into();
        self
    }

    /// Resolve the bindings and run the initial filter pass
    pub fn build(self, fragment: &mut Fragment) -> Result<ScopedList> {
        let scope_field = resolve(fragment, "scope field", &self.scope_field)?;
        let list = resolve(fragment, "item list", &self.list)?;
        let query_field = match &self.query_field {
            Some(id) => Some(resolve(fragment, "query field", id)?),
            None => None,
        };

        let widget = ScopedList {
            scope_field,
            query_field,
            items: fragment.query(list, &self.item_class),
            scope_attr: self.scope_attr,
        };
        widget.refresh(fragment);
        Ok(widget)
    }
}

fn resolve(fragment: &Fragment, role: &'static str, id: &str) -> Result<ElementId> {
    fragment.by_id(id).ok_or_else(|| WidgetError::MissingElement {
        role,
        id: id.to_string(),
    })
}

impl ScopedList {
    /// Number of items bound at construction
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Recompute every item's visibility from the current scope and query.
    /// Idempotent; both triggers land here.
    fn refresh(&self, fragment: &mut Fragment) {
        let scope_value = fragment.value(self.scope_field).to_string();
        let scope = (!scope_value.is_empty()).then_some(scope_value.as_str());
        let query = self
            .query_field
            .map(|field| fragment.value(field).to_string())
            .unwrap_or_default();

        for &item in &self.items {
            let label = fragment.text_content(item);
            let item_scope = fragment.attr(item, &self.scope_attr).map(str::to_string);
            let visible = machine::eligible(item_scope.as_deref(), &label, scope, &query);
            fragment.set_visible(item, visible);
        }
    }
}

impl Widget for ScopedList {
    fn handle_event(&mut self, fragment: &mut Fragment, event: &Event) {
        let triggered = match event.kind {
            EventKind::Change => event.target == self.scope_field,
            EventKind::Input => Some(event.target) == self.query_field,
            _ => false,
        };
        if triggered {
            self.refresh(fragment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_page::el;

    fn seed_page() -> Fragment {
        let mut page = Fragment::new();
        let root = page.root();
        page.append(root, el("input").id("portal").attr("type", "hidden"));
        page.append(root, el("input").id("seed-search"));
        page.append(
            root,
            el("div")
                .id("seed-list")
                .child(
                    el("label")
                        .class("seed-item")
                        .attr("data-portal", "1")
                        .text("https://dailyplanet.example/world"),
                )
                .child(
                    el("label")
                        .class("seed-item")
                        .attr("data-portal", "2")
                        .text("https://gotham.example/crime"),
                )
                .child(
                    el("label")
                        .class("seed-item")
                        .attr("data-portal", "2")
                        .text("https://gotham.example/sports"),
                ),
        );
        page
    }

    fn item_visibility(page: &Fragment) -> Vec<bool> {
        let list = page.by_id("seed-list").unwrap();
        page.query(list, "seed-item")
            .iter()
            .map(|&item| page.is_visible(item))
            .collect()
    }

    #[test]
    fn test_no_scope_no_query_shows_all() {
        let mut page = seed_page();
        let _widget = scoped_list("portal", "seed-list", "seed-item")
            .query_field("seed-search")
            .scope_attr("data-portal")
            .build(&mut page)
            .unwrap();
        assert_eq!(item_visibility(&page), vec![true, true, true]);
    }

    #[test]
    fn test_initial_refresh_applies_prepopulated_scope() {
        let mut page = seed_page();
        let portal = page.by_id("portal").unwrap();
        page.set_value(portal, "2");

        let _widget = scoped_list("portal", "seed-list", "seed-item")
            .query_field("seed-search")
            .scope_attr("data-portal")
            .build(&mut page)
            .unwrap();
        assert_eq!(item_visibility(&page), vec![false, true, true]);
    }

    #[test]
    fn test_conjunction_of_scope_and_query() {
        let mut page = seed_page();
        let portal = page.by_id("portal").unwrap();
        let search = page.by_id("seed-search").unwrap();
        let mut widget = scoped_list("portal", "seed-list", "seed-item")
            .query_field("seed-search")
            .scope_attr("data-portal")
            .build(&mut page)
            .unwrap();

        page.set_value(portal, "2");
        widget.handle_event(&mut page, &Event::new(portal, EventKind::Change));
        assert_eq!(item_visibility(&page), vec![false, true, true]);

        page.set_value(search, "SPORTS");
        widget.handle_event(&mut page, &Event::new(search, EventKind::Input));
        assert_eq!(item_visibility(&page), vec![false, false, true]);

        page.set_value(portal, "");
        widget.handle_event(&mut page, &Event::new(portal, EventKind::Change));
        assert_eq!(item_visibility(&page), vec![false, false, true]);
    }

    #[test]
    fn test_build_without_query_field() {
        let mut page = seed_page();
        let portal = page.by_id("portal").unwrap();
        page.set_value(portal, "1");
        let widget = scoped_list("portal", "seed-list", "seed-item")
            .scope_attr("data-portal")
            .build(&mut page)
            .unwrap();
        assert_eq!(widget.item_count(), 3);
        assert_eq!(item_visibility(&page), vec![true, false, false]);
    }

    #[test]
    fn test_missing_list_is_an_error() {
        let mut page = seed_page();
        let err = scoped_list("portal", "nope", "seed-item")
            .build(&mut page)
            .unwrap_err();
        assert!(matches!(err, WidgetError::MissingElement { role: "item list", .. }));
    }
}
