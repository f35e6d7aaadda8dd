//! Console widgets built on the page model
//!
//! Each component follows a consistent pattern:
//! - Builder function (e.g. `search_select("input", "list", "hidden", "opt")`)
//! - `build(&mut Fragment)` resolving the element bindings
//! - A [`Widget`](crate::registry::Widget) impl driven by page events

pub mod scoped_list;
pub mod search_select;

pub use scoped_list::{scoped_list, ScopedList, ScopedListBuilder};
pub use search_select::{search_select, SearchSelect, SearchSelectBuilder};
