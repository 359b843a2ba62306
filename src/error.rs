// Typed errors callers may want to match on

use thiserror::Error;

/// Store conditions a caller can recover from.
///
/// Store operations return `eyre::Result`; use `report.downcast_ref::<StoreError>()`
/// to tell these apart from storage failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("list not found: {0}")]
    ListNotFound(String),

    /// NaN and infinities cannot be stored as JSON numbers
    #[error("item {item_id} has a non-finite {field}")]
    NonFiniteAmount { item_id: String, field: &'static str },
}

/// Unknown text for one of the closed enumerations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
