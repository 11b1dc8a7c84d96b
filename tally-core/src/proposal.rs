//! Proposal records and per-proposal participation views.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metric::MetricKind;

/// Final outcome of a proposal, and the direction of a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Pass,
    Fail,
}

/// Identifier of a staking or voting participant (an account address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub String);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One raw participation record attached to a proposal.
///
/// Field names are already normalized by the adapter: the source data calls
/// the participant `staker`/`voter` and the quantity `amount`/`reputation`
/// depending on the metric kind (see [`MetricKind::id_field`] and
/// [`MetricKind::quantity_field`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub participant: ParticipantId,
    /// Stake amount or reputation weight; non-negative.
    pub quantity: f64,
    pub outcome: Outcome,
    pub created_at: DateTime<Utc>,
}

/// Convenience for/against participant-ID lists for one metric kind.
///
/// `None` on a side means upstream extraction never produced a well-formed
/// list for it. The synthesizer forces the whole proposal's net score to 0
/// in that case, even when the other side is intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    pub supporters: Option<Vec<ParticipantId>>,
    pub opponents: Option<Vec<ParticipantId>>,
}

impl Sides {
    /// Both side lists present (possibly empty).
    #[must_use]
    pub fn complete(supporters: Vec<ParticipantId>, opponents: Vec<ParticipantId>) -> Self {
        Self {
            supporters: Some(supporters),
            opponents: Some(opponents),
        }
    }
}

/// A governance proposal with its participation data for both metric kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub title: String,
    pub winning_outcome: Outcome,
    /// Boosting confidence reported by the voting machine; passed through to
    /// the downstream classifier, never interpreted here.
    pub confidence: f64,
    /// Lifecycle stage at extraction time; pass-through.
    pub stage: String,
    pub created_at: DateTime<Utc>,
    /// Raw stake events; `None` when extraction failed upstream.
    pub stakes: Option<Vec<RawEvent>>,
    /// Raw vote events; `None` when extraction failed upstream.
    pub votes: Option<Vec<RawEvent>>,
    pub stake_sides: Sides,
    pub vote_sides: Sides,
}

impl Proposal {
    /// Raw events of one metric kind, if they extracted cleanly.
    #[must_use]
    pub fn raw_events(&self, metric: MetricKind) -> Option<&[RawEvent]> {
        match metric {
            MetricKind::Stake => self.stakes.as_deref(),
            MetricKind::Vote => self.votes.as_deref(),
        }
    }

    /// Borrowed participation view for one metric kind.
    #[must_use]
    pub fn participation(&self, metric: MetricKind) -> ParticipationSummary<'_> {
        let sides = match metric {
            MetricKind::Stake => &self.stake_sides,
            MetricKind::Vote => &self.vote_sides,
        };
        ParticipationSummary {
            supporters: sides.supporters.as_deref(),
            opponents: sides.opponents.as_deref(),
            events: self.raw_events(metric).unwrap_or_default(),
        }
    }
}

/// Which side of a proposal a participant backed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    For,
    Against,
}

impl Side {
    /// The event outcome that places an event on this side.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::For => Outcome::Pass,
            Self::Against => Outcome::Fail,
        }
    }
}

/// Borrowed per-proposal, per-metric participation view.
///
/// Bundles the side lists with the raw events so the synthesizer can weight
/// a participant's stored score by what they put on this specific proposal.
#[derive(Debug, Clone, Copy)]
pub struct ParticipationSummary<'a> {
    pub supporters: Option<&'a [ParticipantId]>,
    pub opponents: Option<&'a [ParticipantId]>,
    pub events: &'a [RawEvent],
}

impl ParticipationSummary<'_> {
    /// Participant list for one side, if it extracted cleanly.
    #[must_use]
    pub fn side(&self, side: Side) -> Option<&[ParticipantId]> {
        match side {
            Side::For => self.supporters,
            Side::Against => self.opponents,
        }
    }

    /// Total quantity `participant` put on `side` of this proposal.
    ///
    /// 0 when the participant has no events here; that is expected for
    /// participants who appear only in a side list.
    #[must_use]
    pub fn contribution(&self, participant: &ParticipantId, side: Side) -> f64 {
        self.events
            .iter()
            .filter(|event| event.outcome == side.outcome() && &event.participant == participant)
            .map(|event| event.quantity)
            .sum()
    }
}

/// Output row for one target proposal: pass-through fields plus the two
/// synthesized feature columns consumed by the downstream classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRow {
    pub title: String,
    pub confidence: f64,
    pub stage: String,
    /// Known label, passed through for classifier training.
    pub winning_outcome: Outcome,
    /// Stake-derived feature: net `win_amount_ratio`, contribution-weighted.
    pub win_amount_ratio: f64,
    /// Vote-derived feature: net `reputation_score`, unweighted.
    pub reputation_score: f64,
}
