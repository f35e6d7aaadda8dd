//! # Newsdesk Console Widgets
//!
//! The client-side widget layer of the Newsdesk content-ingestion console:
//! searchable selection controls (a text input filtering a fixed option
//! list into a hidden form value) and dependent live filters (item lists
//! narrowed by a sibling scope selection and a free-text query).
//!
//! The widgets are headless: they bind to a
//! [`Fragment`](newsdesk_page::Fragment) standing in for server-rendered
//! markup, and all selection logic lives in the pure state machine in
//! [`machine`], so behavior is testable without any rendered interface.
//!
//! ## Example
//!
//! ```ignore
//! use newsdesk_widgets::prelude::*;
//!
//! let mut registry = WidgetRegistry::new(page);
//!
//! // Portal picker writing into the hidden `portal` field.
//! registry.mount(|page| {
//!     search_select("portal-search", "portal-dropdown", "portal", "portal-option").build(page)
//! });
//!
//! // Seed URLs narrowed to the picked portal and the seed search box.
//! registry.mount(|page| {
//!     scoped_list("portal", "seed-url-list", "seed-item")
//!         .query_field("seed-url-search")
//!         .scope_attr("data-portal")
//!         .build(page)
//! });
//! ```

pub mod components;
pub mod error;
pub mod machine;
pub mod registry;

pub use components::{scoped_list, search_select, ScopedList, SearchSelect};
pub use error::{Result, WidgetError};
pub use registry::{Widget, WidgetRegistry};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::components::{scoped_list, search_select, ScopedList, SearchSelect};
    pub use crate::error::{Result, WidgetError};
    pub use crate::machine::{OptionEntry, SelectState};
    pub use crate::registry::{Widget, WidgetRegistry};
    pub use newsdesk_page::prelude::*;
}
