//! Event-extraction seam between raw proposal data and the scoring engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::metric::MetricKind;
use crate::proposal::{Outcome, ParticipantId, Proposal};

/// One participant's action on one proposal, tagged with the owning
/// proposal's title and final outcome.
///
/// Ephemeral: produced on demand by an [`EventSource`], folded into a
/// performance table once, then dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationEvent {
    pub participant: ParticipantId,
    pub quantity: f64,
    pub outcome: Outcome,
    pub created_at: DateTime<Utc>,
    pub proposal_title: String,
    pub winning_outcome: Outcome,
}

/// Source of participation events for a corpus of proposals.
///
/// Implementations own all raw-record normalization; the scoring engine only
/// ever sees typed events or a typed [`ExtractionError`]. Network-backed
/// adapters live outside this workspace.
pub trait EventSource {
    /// Ordered events of one metric kind for the proposal at `index`.
    fn participation_events(
        &self,
        index: usize,
        metric: MetricKind,
    ) -> Result<Vec<ParticipationEvent>, ExtractionError>;
}

/// In-memory [`EventSource`] over an already-loaded proposal corpus.
#[derive(Debug, Clone, Copy)]
pub struct ProposalDataset<'a> {
    proposals: &'a [Proposal],
}

impl<'a> ProposalDataset<'a> {
    #[must_use]
    pub fn new(proposals: &'a [Proposal]) -> Self {
        Self { proposals }
    }
}

impl EventSource for ProposalDataset<'_> {
    fn participation_events(
        &self,
        index: usize,
        metric: MetricKind,
    ) -> Result<Vec<ParticipationEvent>, ExtractionError> {
        let proposal = self
            .proposals
            .get(index)
            .ok_or(ExtractionError::NotFound { index, metric })?;
        let raw = proposal
            .raw_events(metric)
            .ok_or_else(|| ExtractionError::Malformed {
                index,
                metric,
                reason: format!("{metric} list is not a well-formed collection"),
            })?;
        if raw.is_empty() {
            return Err(ExtractionError::NotFound { index, metric });
        }

        Ok(raw
            .iter()
            .map(|event| ParticipationEvent {
                participant: event.participant.clone(),
                quantity: event.quantity,
                outcome: event.outcome,
                created_at: event.created_at,
                proposal_title: proposal.title.clone(),
                winning_outcome: proposal.winning_outcome,
            })
            .collect())
    }
}
