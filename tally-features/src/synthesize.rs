//! Applies a performance table to target proposals.

use rayon::prelude::*;
use tracing::debug;

use tally_core::{ParticipantId, ParticipationSummary, Proposal, ScoreField, Side};

use crate::aggregate::PerformanceTable;
use crate::error::{Error, Result};

/// Net directional score for each target proposal, in input order.
///
/// `score_name` must be a score column of the table's metric kind; anything
/// else is a configuration error and fails before any proposal is scored.
/// Participants unseen during training contribute 0. With
/// `weight_by_contribution`, each participant's stored score is scaled by
/// the quantity they put on their side of the proposal being scored.
pub fn synthesize(
    table: &PerformanceTable,
    score_name: &str,
    targets: &[Proposal],
    weight_by_contribution: bool,
) -> Result<Vec<f64>> {
    let field = table
        .metric()
        .score_field(score_name)
        .ok_or_else(|| Error::UnknownScore {
            metric: table.metric(),
            name: score_name.to_owned(),
        })?;

    Ok(targets
        .par_iter()
        .map(|proposal| net_score(table, field, proposal, weight_by_contribution))
        .collect())
}

fn net_score(
    table: &PerformanceTable,
    field: ScoreField,
    proposal: &Proposal,
    weighted: bool,
) -> f64 {
    let summary = proposal.participation(table.metric());

    // When either side's ID list failed to extract, the whole proposal
    // scores 0, even if the other side is intact.
    let (Some(supporters), Some(opponents)) = (summary.supporters, summary.opponents) else {
        debug!(proposal = %proposal.title, "side list missing, net score forced to 0");
        return 0.0;
    };

    let for_total = side_total(table, field, &summary, supporters, Side::For, weighted);
    let against_total = side_total(table, field, &summary, opponents, Side::Against, weighted);
    for_total - against_total
}

fn side_total(
    table: &PerformanceTable,
    field: ScoreField,
    summary: &ParticipationSummary<'_>,
    participants: &[ParticipantId],
    side: Side,
    weighted: bool,
) -> f64 {
    participants
        .iter()
        .map(|participant| {
            let Some(record) = table.get(participant) else {
                return 0.0;
            };
            let score = record.score(field);
            if weighted {
                score * summary.contribution(participant, side)
            } else {
                score
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tally_core::{MetricKind, Outcome, ProposalDataset, RawEvent, Sides};

    use crate::aggregate::aggregate;

    const EPSILON: f64 = 1e-9;

    fn stake(participant: &str, quantity: f64, outcome: Outcome) -> RawEvent {
        RawEvent {
            participant: participant.into(),
            quantity,
            outcome,
            created_at: Utc.with_ymd_and_hms(2019, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn training_proposal(title: &str, winning: Outcome, stakes: Vec<RawEvent>) -> Proposal {
        Proposal {
            title: title.to_owned(),
            winning_outcome: winning,
            confidence: 1.0,
            stage: "Executed".to_owned(),
            created_at: Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap(),
            stakes: Some(stakes),
            votes: None,
            stake_sides: Sides::default(),
            vote_sides: Sides::default(),
        }
    }

    fn target_proposal(title: &str, stakes: Vec<RawEvent>, sides: Sides) -> Proposal {
        Proposal {
            title: title.to_owned(),
            winning_outcome: Outcome::Pass,
            confidence: 1.0,
            stage: "Boosted".to_owned(),
            created_at: Utc.with_ymd_and_hms(2019, 7, 1, 0, 0, 0).unwrap(),
            stakes: Some(stakes),
            votes: None,
            stake_sides: sides,
            vote_sides: Sides::default(),
        }
    }

    /// Table where alice's `amount_score` is 200 (one win of 100, one loss
    /// of 50) and bob's is 1 (normalized unit win over an 80 loss).
    fn stake_table() -> PerformanceTable {
        let corpus = vec![
            training_proposal("t1", Outcome::Pass, vec![stake("alice", 100.0, Outcome::Pass)]),
            training_proposal(
                "t2",
                Outcome::Pass,
                vec![
                    stake("alice", 50.0, Outcome::Fail),
                    stake("bob", 80.0, Outcome::Fail),
                ],
            ),
        ];
        let dataset = ProposalDataset::new(&corpus);
        aggregate(&dataset, &corpus, MetricKind::Stake)
    }

    #[test]
    fn weighted_single_sided_proposal_scales_by_contribution() {
        let table = stake_table();
        let targets = vec![target_proposal(
            "target",
            vec![stake("alice", 30.0, Outcome::Pass)],
            Sides::complete(vec!["alice".into()], vec![]),
        )];

        let scores = synthesize(&table, "amount_score", &targets, true).unwrap();

        // alice's stored score is 200, scaled by her 30 on this proposal.
        assert!((scores[0] - 6000.0).abs() < EPSILON);
    }

    #[test]
    fn unweighted_scores_ignore_current_contribution() {
        let table = stake_table();
        let small = vec![target_proposal(
            "small",
            vec![stake("alice", 1.0, Outcome::Pass)],
            Sides::complete(vec!["alice".into()], vec![]),
        )];
        let large = vec![target_proposal(
            "large",
            vec![stake("alice", 10_000.0, Outcome::Pass)],
            Sides::complete(vec!["alice".into()], vec![]),
        )];

        let small_scores = synthesize(&table, "amount_score", &small, false).unwrap();
        let large_scores = synthesize(&table, "amount_score", &large, false).unwrap();

        assert!((small_scores[0] - large_scores[0]).abs() < EPSILON);
        assert!((small_scores[0] - 200.0).abs() < EPSILON);
    }

    #[test]
    fn identical_sides_cancel_to_zero() {
        let table = stake_table();
        let targets = vec![target_proposal(
            "mirrored",
            vec![
                stake("alice", 10.0, Outcome::Pass),
                stake("alice", 10.0, Outcome::Fail),
            ],
            Sides::complete(vec!["alice".into()], vec!["alice".into()]),
        )];

        let scores = synthesize(&table, "amount_score", &targets, true).unwrap();

        assert!(scores[0].abs() < EPSILON);
    }

    #[test]
    fn unseen_participants_contribute_zero() {
        let table = stake_table();
        let targets = vec![target_proposal(
            "newcomers",
            vec![stake("mallory", 40.0, Outcome::Pass)],
            Sides::complete(vec!["mallory".into()], vec![]),
        )];

        let scores = synthesize(&table, "amount_score", &targets, true).unwrap();

        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn missing_side_list_forces_the_whole_score_to_zero() {
        let table = stake_table();
        // The for side is intact and would score, but the against list
        // failed to extract.
        let targets = vec![target_proposal(
            "half-broken",
            vec![stake("alice", 30.0, Outcome::Pass)],
            Sides {
                supporters: Some(vec!["alice".into()]),
                opponents: None,
            },
        )];

        let scores = synthesize(&table, "amount_score", &targets, true).unwrap();

        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn unknown_score_name_is_a_configuration_error() {
        let table = stake_table();
        let targets = vec![target_proposal(
            "target",
            vec![],
            Sides::complete(vec![], vec![]),
        )];

        let err = synthesize(&table, "reputation_score", &targets, true).unwrap_err();

        assert!(matches!(err, Error::UnknownScore { name, .. } if name == "reputation_score"));
    }

    #[test]
    fn scores_come_back_in_target_order() {
        let table = stake_table();
        let targets = vec![
            target_proposal(
                "first",
                vec![stake("alice", 1.0, Outcome::Pass)],
                Sides::complete(vec!["alice".into()], vec![]),
            ),
            target_proposal("second", vec![], Sides::complete(vec![], vec![])),
            target_proposal(
                "third",
                vec![stake("alice", 2.0, Outcome::Pass)],
                Sides::complete(vec!["alice".into()], vec![]),
            ),
        ];

        let scores = synthesize(&table, "amount_score", &targets, true).unwrap();

        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 200.0).abs() < EPSILON);
        assert_eq!(scores[1], 0.0);
        assert!((scores[2] - 400.0).abs() < EPSILON);
    }
}
