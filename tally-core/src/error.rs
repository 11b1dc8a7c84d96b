//! Error types for event extraction.

use thiserror::Error;

use crate::metric::MetricKind;

/// Failure to extract participation events for one proposal.
///
/// Both variants are data errors, recoverable by policy: the aggregator
/// skips the proposal and keeps folding the rest of the corpus. Only
/// configuration mistakes (see `tally-features`) fail fast.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// No events of this kind exist for the proposal.
    #[error("no {metric} events found for proposal #{index}")]
    NotFound { index: usize, metric: MetricKind },

    /// The proposal's raw record could not be read as an event list.
    #[error("malformed {metric} record for proposal #{index}: {reason}")]
    Malformed {
        index: usize,
        metric: MetricKind,
        reason: String,
    },
}
