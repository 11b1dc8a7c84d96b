//! Configuration errors for the scoring engine.

use thiserror::Error;

use tally_core::MetricKind;

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that indicate a wiring defect rather than bad data.
///
/// Data-level problems (missing events for a proposal, participants unseen
/// during training) degrade to zero-valued defaults and are logged; they
/// never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// A score was requested that the performance table does not carry.
    #[error("unknown score `{name}` for the {metric} performance table")]
    UnknownScore { metric: MetricKind, name: String },
}
