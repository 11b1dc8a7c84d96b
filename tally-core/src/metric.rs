//! Metric kinds and the static score-column configuration table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which participation channel is being scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Stake events: tokens staked for or against a proposal.
    Stake,
    /// Vote events: reputation-weighted votes cast on a proposal.
    Vote,
}

impl MetricKind {
    /// Field name identifying the participant in raw records of this kind.
    #[must_use]
    pub fn id_field(&self) -> &'static str {
        match self {
            Self::Stake => "staker",
            Self::Vote => "voter",
        }
    }

    /// Field name carrying the quantity in raw records of this kind.
    #[must_use]
    pub fn quantity_field(&self) -> &'static str {
        match self {
            Self::Stake => "amount",
            Self::Vote => "reputation",
        }
    }

    /// Column name a derived score is published under for this kind.
    #[must_use]
    pub fn score_name(&self, field: ScoreField) -> &'static str {
        match (self, field) {
            (Self::Stake, ScoreField::WinCountRatio) => "win_count_ratio_stakes",
            (Self::Stake, ScoreField::WinQuantityRatio) => "win_amount_ratio",
            (Self::Stake, ScoreField::CountScore) => "stakes_count_score",
            (Self::Stake, ScoreField::QuantityScore) => "amount_score",
            (Self::Vote, ScoreField::WinCountRatio) => "win_count_ratio_votes",
            (Self::Vote, ScoreField::WinQuantityRatio) => "win_reputation_ratio",
            (Self::Vote, ScoreField::CountScore) => "votes_count_score",
            (Self::Vote, ScoreField::QuantityScore) => "reputation_score",
        }
    }

    /// Resolve a score column name for this kind.
    ///
    /// Returns `None` for names this kind's performance table does not carry.
    /// Callers treat that as a configuration error, not as missing data.
    #[must_use]
    pub fn score_field(&self, name: &str) -> Option<ScoreField> {
        ScoreField::ALL
            .iter()
            .copied()
            .find(|&field| self.score_name(field) == name)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stake => write!(f, "stakes"),
            Self::Vote => write!(f, "votes"),
        }
    }
}

/// One of the four derived scores on a performance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    /// Won event count over lost event count.
    WinCountRatio,
    /// Won quantity sum over lost quantity sum.
    WinQuantityRatio,
    /// Won count scaled by the count ratio.
    CountScore,
    /// Won quantity sum scaled by the quantity ratio.
    QuantityScore,
}

impl ScoreField {
    /// All derived scores, in record-field order.
    pub const ALL: [ScoreField; 4] = [
        ScoreField::WinCountRatio,
        ScoreField::WinQuantityRatio,
        ScoreField::CountScore,
        ScoreField::QuantityScore,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_field_resolves_stake_column_names() {
        assert_eq!(
            MetricKind::Stake.score_field("win_amount_ratio"),
            Some(ScoreField::WinQuantityRatio)
        );
        assert_eq!(
            MetricKind::Stake.score_field("stakes_count_score"),
            Some(ScoreField::CountScore)
        );
    }

    #[test]
    fn score_field_resolves_vote_column_names() {
        assert_eq!(
            MetricKind::Vote.score_field("reputation_score"),
            Some(ScoreField::QuantityScore)
        );
        assert_eq!(
            MetricKind::Vote.score_field("win_count_ratio_votes"),
            Some(ScoreField::WinCountRatio)
        );
    }

    #[test]
    fn score_field_rejects_names_from_the_other_kind() {
        // A vote table never carries stake columns, and vice versa.
        assert_eq!(MetricKind::Vote.score_field("win_amount_ratio"), None);
        assert_eq!(MetricKind::Stake.score_field("reputation_score"), None);
    }

    #[test]
    fn score_field_rejects_unknown_names() {
        assert_eq!(MetricKind::Stake.score_field("charisma"), None);
    }

    #[test]
    fn raw_record_field_names_follow_the_kind() {
        assert_eq!(MetricKind::Stake.id_field(), "staker");
        assert_eq!(MetricKind::Stake.quantity_field(), "amount");
        assert_eq!(MetricKind::Vote.id_field(), "voter");
        assert_eq!(MetricKind::Vote.quantity_field(), "reputation");
    }

    #[test]
    fn score_names_round_trip_for_both_kinds() {
        for kind in [MetricKind::Stake, MetricKind::Vote] {
            for field in ScoreField::ALL {
                assert_eq!(kind.score_field(kind.score_name(field)), Some(field));
            }
        }
    }
}
