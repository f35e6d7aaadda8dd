//! Error types for widget construction

use thiserror::Error;

/// Errors raised while binding a widget to a fragment
///
/// Construction failures are not fatal to the page: the registry logs them
/// and leaves the instance disabled.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// A required element binding could not be resolved
    #[error("missing {role} element '{id}'")]
    MissingElement { role: &'static str, id: String },
}

/// Result type for widget construction
pub type Result<T> = std::result::Result<T, WidgetError>;
