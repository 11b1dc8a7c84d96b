//! Historical performance scoring engine.
//!
//! Converts a corpus of past governance proposals into per-participant
//! performance tables, then synthesizes directional net-score features for
//! target proposals:
//!
//! - [`aggregate`] folds participation events into a [`PerformanceTable`],
//!   one per metric kind, keyed by participant.
//! - [`synthesize`] applies a table to target proposals, producing one net
//!   score (for-side total minus against-side total) per proposal.
//! - [`FeaturePipeline`] wires both together for the stake and vote metric
//!   kinds and emits the feature rows the downstream classifier consumes.
//!
//! The engine is a pure batch computation: no I/O, no persistence. Event
//! extraction is delegated to a [`tally_core::EventSource`] and extraction
//! failures degrade per proposal instead of aborting the batch.

mod aggregate;
mod error;
mod pipeline;
mod synthesize;

pub use aggregate::{PerformanceTable, aggregate};
pub use error::{Error, Result};
pub use pipeline::{FeaturePipeline, ScoreSelection};
pub use synthesize::synthesize;
