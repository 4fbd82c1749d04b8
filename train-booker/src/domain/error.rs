//! Query validation errors.
//!
//! These are raised before any offer source is consulted. They are always
//! recoverable: the caller re-prompts for the named field.

/// A search query that cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("please enter an origin station")]
    MissingOrigin,

    #[error("please enter a destination station")]
    MissingDestination,

    #[error("origin and destination cannot be the same")]
    SameStation,

    /// Date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid journey date: {0:?}")]
    InvalidDate(String),
}

impl QueryError {
    /// Name of the offending query field, as the search form calls it.
    pub fn field(&self) -> &'static str {
        match self {
            QueryError::MissingOrigin => "origin",
            QueryError::MissingDestination | QueryError::SameStation => "destination",
            QueryError::InvalidDate(_) => "date",
        }
    }
}
