//! Searchable selection widget bound to a page fragment
//!
//! A text input paired with a filterable option list and a hidden field that
//! receives the committed value. The widget parses its options from the
//! markup once at bind time, feeds page events through the pure machine in
//! [`crate::machine`], and mirrors the resulting state back into the
//! fragment: option visibility, the `highlighted` class, the list's own
//! visibility, the text field, and the hidden field.
//!
//! # Example
//!
//! ```ignore
//! use newsdesk_widgets::prelude::*;
//!
//! let mut registry = WidgetRegistry::new(page);
//! registry.mount(|page| {
//!     search_select("portal-search", "portal-dropdown", "portal", "portal-option").build(page)
//! });
//!
//! registry.focus("portal-search");
//! registry.type_text("portal-search", "got");
//! registry.press("portal-search", KeyCode::ArrowDown);
//! registry.press("portal-search", KeyCode::Enter);
//! ```

use newsdesk_page::{ElementId, Event, EventKind, Fragment};

use crate::error::{Result, WidgetError};
use crate::machine::{self, OptionEntry, SelectEvent, SelectSignal, SelectState};
use crate::registry::Widget;

/// Class applied to the highlighted option element
const HIGHLIGHT_CLASS: &str = "highlighted";

/// A searchable selection instance
#[derive(Debug)]
pub struct SearchSelect {
    input: ElementId,
    list: ElementId,
    hidden: ElementId,
    scope_field: Option<ElementId>,
    entries: Vec<OptionEntry>,
    targets: Vec<ElementId>,
    state: SelectState,
}

/// Start binding a searchable selection
///
/// `input_id` is the visible text field, `list_id` the container holding the
/// option elements, `hidden_id` the field that receives the committed value,
/// and `option_class` the class identifying option elements inside the
/// container. Options carry `data-value` and `data-text` attributes; an
/// option missing either is excluded from matching and selection.
pub fn search_select(
    input_id: impl Into<String>,
    list_id: impl Into<String>,
    hidden_id: impl Into<String>,
    option_class: impl Into<String>,
) -> SearchSelectBuilder {
    SearchSelectBuilder {
        input: input_id.into(),
        list: list_id.into(),
        hidden: hidden_id.into(),
        option_class: option_class.into(),
        scope_field: None,
        scope_attr: "data-scope".to_string(),
    }
}

/// Builder for [`SearchSelect`]
pub struct SearchSelectBuilder {
    input: String,
    list: String,
    hidden: String,
    option_class: String,
    scope_field: Option<String>,
    scope_attr: String,
}

impl SearchSelectBuilder {
    /// Constrain the options by an external scope field: options stay
    /// eligible only while their scope attribute matches the field's value
    /// (or no value is selected)
    pub fn scope_field(mut self, id: impl Into<String>) -> Self {
        self.scope_field = Some(id.into());
        self
    }

    /// Attribute carrying each option's scope tag (default `data-scope`)
    pub fn scope_attr(mut self, attr: impl Into<String>) -> Self {
        self.scope_attr = attr.into();
        self
    }

    /// Resolve all bindings against the fragment
    pub fn build(self, fragment: &mut Fragment) -> Result<SearchSelect> {
        let input = resolve(fragment, "search input", &self.input)?;
        let list = resolve(fragment, "option list", &self.list)?;
        let hidden = resolve(fragment, "hidden value", &self.hidden)?;
        let scope_field = match &self.scope_field {
            Some(id) => Some(resolve(fragment, "scope", id)?),
            None => None,
        };

        let mut entries = Vec::new();
        let mut targets = Vec::new();
        for element in fragment.query(list, &self.option_class) {
            let value = fragment.attr(element, "data-value").map(str::to_string);
            let label = fragment.attr(element, "data-text").map(str::to_string);
            match (value, label) {
                (Some(value), Some(label)) => {
                    let mut entry = OptionEntry::new(value, label);
                    entry.scope = fragment.attr(element, &self.scope_attr).map(str::to_string);
                    entries.push(entry);
                    targets.push(element);
                }
                _ => {
                    tracing::debug!(
                        list = %self.list,
                        "option missing data-value/data-text, excluded"
                    );
                    fragment.set_visible(element, false);
                }
            }
        }

        let mut state = SelectState {
            text: fragment.value(input).to_string(),
            ..SelectState::default()
        };
        let prior = fragment.value(hidden);
        if !prior.is_empty() && entries.iter().any(|e| e.value == prior) {
            state.committed = Some(prior.to_string());
        }
        if let Some(scope_field) = scope_field {
            let scope = fragment.value(scope_field);
            if !scope.is_empty() {
                state.scope = Some(scope.to_string());
            }
        }

        let widget = SearchSelect {
            input,
            list,
            hidden,
            scope_field,
            entries,
            targets,
            state,
        };
        // Apply pre-populated scope/query immediately so an edit form never
        // starts with options a selected scope already excludes.
        widget.sync(fragment);
        Ok(widget)
    }
}

fn resolve(fragment: &Fragment, role: &'static str, id: &str) -> Result<ElementId> {
    fragment.by_id(id).ok_or_else(|| WidgetError::MissingElement {
        role,
        id: id.to_string(),
    })
}

impl SearchSelect {
    /// Current machine state
    pub fn state(&self) -> &SelectState {
        &self.state
    }

    /// Number of well-formed options bound at construction
    pub fn option_count(&self) -> usize {
        self.entries.len()
    }

    fn apply(&mut self, fragment: &mut Fragment, event: SelectEvent) {
        let (next, signals) = machine::step(&self.state, &self.entries, event);
        if next != self.state {
            self.state = next;
            self.sync(fragment);
        }
        for signal in signals {
            match signal {
                SelectSignal::Committed { value, label } => {
                    tracing::debug!(%value, %label, "selection committed");
                    fragment.write_value(self.hidden, value);
                }
                SelectSignal::ReleaseFocus => fragment.blur(self.input),
            }
        }
    }

    fn sync(&self, fragment: &mut Fragment) {
        if fragment.value(self.input) != self.state.text {
            fragment.set_value(self.input, self.state.text.clone());
        }

        let visible = machine::visible_indices(&self.entries, &self.state);
        for (index, &target) in self.targets.iter().enumerate() {
            fragment.set_visible(target, visible.contains(&index));
            let is_highlighted =
                self.state.highlighted.as_deref() == Some(self.entries[index].value.as_str());
            if is_highlighted {
                fragment.add_class(target, HIGHLIGHT_CLASS);
            } else {
                fragment.remove_class(target, HIGHLIGHT_CLASS);
            }
        }

        fragment.set_visible(self.list, self.state.open);
    }
}

impl Widget for SearchSelect {
    fn handle_event(&mut self, fragment: &mut Fragment, event: &Event) {
        match event.kind {
            EventKind::FocusGained if event.target == self.input => {
                self.apply(fragment, SelectEvent::Focus);
            }
            EventKind::Input if event.target == self.input => {
                let query = fragment.value(self.input).to_string();
                self.apply(fragment, SelectEvent::QueryChanged(&query));
            }
            EventKind::KeyDown(key) if event.target == self.input => {
                self.apply(fragment, SelectEvent::Key(key));
            }
            EventKind::Click => {
                let clicked_option = self
                    .targets
                    .iter()
                    .position(|&t| t == event.target || fragment.contains(t, event.target));
                if let Some(index) = clicked_option {
                    let value = self.entries[index].value.clone();
                    self.apply(fragment, SelectEvent::ClickOption(&value));
                } else if event.target != self.input && !fragment.contains(self.list, event.target)
                {
                    self.apply(fragment, SelectEvent::Dismiss);
                }
            }
            EventKind::Change if Some(event.target) == self.scope_field => {
                let value = fragment.value(event.target).to_string();
                let scope = (!value.is_empty()).then_some(value.as_str());
                self.apply(fragment, SelectEvent::ScopeChanged(scope));
            }
            EventKind::Change if event.target == self.hidden => {
                if fragment.value(self.hidden).is_empty() {
                    self.apply(fragment, SelectEvent::ValueCleared);
                }
            }
            _ => {}
        }
    }
}
