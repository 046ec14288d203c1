//! Error taxonomy for the metrics engine

use thiserror::Error;

/// Errors surfaced by the metrics engine and its validation boundary.
///
/// Missing categories, empty series and zero denominators are not errors in
/// this domain; they resolve to defined defaults in the store and ratio
/// helpers and never appear here.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Engine output was requested before any dataset was supplied
    #[error("no dataset has been loaded")]
    DataNotLoaded,

    /// The dataset document failed shape validation; nothing was computed
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),
}
