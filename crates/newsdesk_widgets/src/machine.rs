//! Pure state machine for the searchable selection widget
//!
//! Everything here is a plain function over plain data: the page-bound
//! driver in [`components::search_select`](crate::components::search_select)
//! maps UI events onto [`SelectEvent`]s, applies [`step`], and mirrors the
//! resulting [`SelectState`] back into the fragment. Keeping the transitions
//! pure means the whole keyboard/filter/commit behavior is unit testable
//! with no page at all.
//!
//! # Example
//!
//! ```ignore
//! use newsdesk_widgets::machine::{step, OptionEntry, SelectEvent, SelectState};
//!
//! let options = vec![OptionEntry::new("1", "Daily Planet")];
//! let state = SelectState::default();
//! let (state, _signals) = step(&state, &options, SelectEvent::QueryChanged("daily"));
//! assert!(state.open);
//! ```

use newsdesk_page::KeyCode;
use smallvec::SmallVec;

/// One selectable entry, parsed once from the markup at bind time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionEntry {
    /// Opaque identifier written into the hidden field on commit
    pub value: String,
    /// Display text matched against the query
    pub label: String,
    /// Optional scope tag consulted only when a scope selection is active
    pub scope: Option<String>,
}

impl OptionEntry {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// Widget state
///
/// `text` is both the displayed text and the filter query: they are the same
/// input field. After an outside-click dismissal `text` may no longer match
/// the label of the `committed` option — the divergence window stays open
/// until the user commits again or the value is reset externally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectState {
    /// Contents of the visible text field (display text and filter query)
    pub text: String,
    /// Active scope selection, `None` when no scope constrains the options
    pub scope: Option<String>,
    /// Committed value, `None` until a selection is made
    pub committed: Option<String>,
    /// Value of the highlighted option, `None` for no highlight
    pub highlighted: Option<String>,
    /// Whether the option list is presented
    pub open: bool,
}

/// Inputs to the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectEvent<'a> {
    /// The text input gained focus
    Focus,
    /// The text input's contents changed to the given string
    QueryChanged(&'a str),
    /// The external scope selection changed (`None` clears it)
    ScopeChanged(Option<&'a str>),
    /// A key went down while the text input had focus
    Key(KeyCode),
    /// An option with the given value was clicked
    ClickOption(&'a str),
    /// A pointer interaction landed outside the widget
    Dismiss,
    /// The hidden field was cleared externally
    ValueCleared,
}

/// Side effects a transition asks the driver to perform
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectSignal {
    /// A new value was committed; write the hidden field and notify
    Committed { value: String, label: String },
    /// The text input should give up keyboard focus
    ReleaseFocus,
}

/// Signals emitted by a single transition
pub type Signals = SmallVec<[SelectSignal; 1]>;

/// Case-insensitive substring match; an empty query matches everything
pub fn label_matches(label: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    label.to_lowercase().contains(&query.to_lowercase())
}

/// The conjunctive visibility rule: scope match (or no scope selected) AND
/// label match. Shared verbatim with the dependent list filter.
pub fn eligible(option_scope: Option<&str>, label: &str, scope: Option<&str>, query: &str) -> bool {
    let in_scope = match scope {
        None => true,
        Some(scope) => option_scope == Some(scope),
    };
    in_scope && label_matches(label, query)
}

/// Indices of the options visible under the state's query and scope, in
/// document order
pub fn visible_indices(options: &[OptionEntry], state: &SelectState) -> Vec<usize> {
    options
        .iter()
        .enumerate()
        .filter(|(_, opt)| {
            eligible(
                opt.scope.as_deref(),
                &opt.label,
                state.scope.as_deref(),
                &state.text,
            )
        })
        .map(|(i, _)| i)
        .collect()
}

/// Position of the highlighted option within the visible subset, `None`
/// when nothing is highlighted or the highlight has been filtered out
pub fn highlight_index(state: &SelectState, options: &[OptionEntry]) -> Option<usize> {
    let highlighted = state.highlighted.as_deref()?;
    visible_indices(options, state)
        .iter()
        .position(|&i| options[i].value == highlighted)
}

/// Apply one event, returning the next state and any signals for the driver
pub fn step(state: &SelectState, options: &[OptionEntry], event: SelectEvent) -> (SelectState, Signals) {
    let mut next = state.clone();
    let mut signals = Signals::new();

    match event {
        SelectEvent::Focus => {
            next.open = true;
        }
        SelectEvent::QueryChanged(query) => {
            next.text = query.to_string();
            let has_match = !visible_indices(options, &next).is_empty();
            // Empty query shows everything; a non-empty query with zero
            // matches has nothing useful to present.
            next.open = next.text.is_empty() || has_match;
            drop_hidden_highlight(&mut next, options);
        }
        SelectEvent::ScopeChanged(scope) => {
            next.scope = scope.map(str::to_string);
            let has_match = !visible_indices(options, &next).is_empty();
            // A scope change may close an emptied list but never opens one.
            next.open = next.open && (next.text.is_empty() || has_match);
            drop_hidden_highlight(&mut next, options);
        }
        SelectEvent::Key(key) if next.open => match key {
            KeyCode::ArrowDown | KeyCode::ArrowUp => {
                let visible = visible_indices(options, &next);
                if !visible.is_empty() {
                    let current = highlight_index(&next, options);
                    let pos = match (key, current) {
                        (KeyCode::ArrowDown, Some(i)) => (i + 1).min(visible.len() - 1),
                        (KeyCode::ArrowUp, Some(i)) => i.saturating_sub(1),
                        // No highlight yet: either arrow lands on the first
                        // visible option.
                        _ => 0,
                    };
                    next.highlighted = Some(options[visible[pos]].value.clone());
                }
            }
            KeyCode::Enter => {
                let visible = visible_indices(options, &next);
                if let Some(pos) = highlight_index(&next, options) {
                    commit(&mut next, &mut signals, &options[visible[pos]]);
                }
            }
            KeyCode::Escape => {
                next.open = false;
                signals.push(SelectSignal::ReleaseFocus);
            }
            KeyCode::Char(_) => {}
        },
        SelectEvent::Key(_) => {}
        SelectEvent::ClickOption(value) if next.open => {
            if let Some(option) = options.iter().find(|o| o.value == value) {
                commit(&mut next, &mut signals, option);
            }
        }
        SelectEvent::ClickOption(_) => {}
        SelectEvent::Dismiss => {
            // Closes the list only; the typed text stays, even when it no
            // longer matches the committed label.
            next.open = false;
        }
        SelectEvent::ValueCleared => {
            next.committed = None;
            next.text.clear();
            next.highlighted = None;
        }
    }

    (next, signals)
}

fn drop_hidden_highlight(state: &mut SelectState, options: &[OptionEntry]) {
    if state.highlighted.is_some() && highlight_index(state, options).is_none() {
        state.highlighted = None;
    }
}

fn commit(state: &mut SelectState, signals: &mut Signals, option: &OptionEntry) {
    let changed = state.committed.as_deref() != Some(option.value.as_str());
    state.text = option.label.clone();
    state.committed = Some(option.value.clone());
    state.highlighted = None;
    state.open = false;
    if changed {
        signals.push(SelectSignal::Committed {
            value: option.value.clone(),
            label: option.label.clone(),
        });
    }
}
