//! Shared data model for the tally proposal-scoring pipeline.
//!
//! This crate defines the types that flow between the event-extraction
//! adapter and the scoring engine in `tally-features`:
//!
//! - **Proposals** ([`Proposal`]) carry their raw participation data and the
//!   convenience for/against participant lists.
//! - **Events** ([`ParticipationEvent`]) are produced on demand by an
//!   [`EventSource`], consumed once per aggregation pass, never persisted.
//! - **Performance records** ([`PerformanceRecord`]) hold the per-participant
//!   win/loss aggregates and the four derived scores.
//!
//! No networking or persistence lives here; adapters that fetch raw data
//! implement [`EventSource`] in their own crates.

mod adapter;
mod error;
mod metric;
mod performance;
mod proposal;

// Adapter seam
pub use adapter::{EventSource, ParticipationEvent, ProposalDataset};

// Error types
pub use error::ExtractionError;

// Metric configuration
pub use metric::{MetricKind, ScoreField};

// Performance records
pub use performance::PerformanceRecord;

// Proposal types
pub use proposal::{
    FeatureRow, Outcome, ParticipantId, ParticipationSummary, Proposal, RawEvent, Side, Sides,
};
