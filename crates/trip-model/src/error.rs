//! Error types for the trip-model crate.

use thiserror::Error;

use crate::types::ContentField;

/// Errors raised while reading or updating a `PlanningState`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A stage asked for a content field that no earlier stage has written.
    ///
    /// With the standard stage order this cannot happen; it guards
    /// hand-assembled pipelines that put a stage before its inputs.
    #[error("Field {field} has not been written yet")]
    MissingField { field: ContentField },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ModelError>;
