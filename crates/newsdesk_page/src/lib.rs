//! Newsdesk page model
//!
//! Headless element fragments standing in for the server-rendered markup the
//! console widgets are bound to, plus the synchronous event model they
//! communicate through. Nothing here knows about layout or rendering; the
//! point is to make widget behavior testable without a browser.
//!
//! # Example
//!
//! ```ignore
//! use newsdesk_page::prelude::*;
//!
//! let mut page = Fragment::new();
//! let root = page.root();
//! let input = page.append(root, el("input").id("portal-search"));
//!
//! page.set_value(input, "got");
//! let event = Event::new(input, EventKind::Input);
//! // ...hand the event to whoever owns the widgets on this page
//! ```

pub mod event;
pub mod fragment;

pub use event::{Event, EventKind, KeyCode};
pub use fragment::{el, ElementId, ElementNode, Fragment};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::event::{Event, EventKind, KeyCode};
    pub use crate::fragment::{el, ElementId, ElementNode, Fragment};
}
