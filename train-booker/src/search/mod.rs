//! Train search.
//!
//! Answers "which trains run from A to B on this date, and what do they
//! cost in my class?" by validating the query and asking an offer source.

mod config;
mod service;

#[cfg(test)]
mod service_tests;

pub use config::{SearchConfig, SourceKind, UnknownSourceKind};
pub use service::{SEARCH_FAILED_NOTICE, SearchOutcome, TrainSearch};
