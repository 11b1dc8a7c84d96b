//! Feature assembly: wires the aggregator and synthesizer together.

use tracing::debug;

use tally_core::{EventSource, FeatureRow, MetricKind, Proposal};

use crate::aggregate::aggregate;
use crate::error::Result;
use crate::synthesize::synthesize;

/// One feature's wiring: which score column to read from the performance
/// table and whether to weight it by the participant's contribution to the
/// proposal being scored.
#[derive(Debug, Clone)]
pub struct ScoreSelection {
    pub score_name: String,
    pub weight_by_contribution: bool,
}

impl ScoreSelection {
    #[must_use]
    pub fn new(score_name: impl Into<String>, weight_by_contribution: bool) -> Self {
        Self {
            score_name: score_name.into(),
            weight_by_contribution,
        }
    }
}

/// Configuration for a full feature-assembly pass.
///
/// The default wiring is deliberately asymmetric: the stake feature is the
/// pure `win_amount_ratio` scaled by the stake put on the target proposal,
/// while the vote feature is the magnitude-carrying `reputation_score`
/// taken unweighted.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    pub stake: ScoreSelection,
    pub vote: ScoreSelection,
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self {
            stake: ScoreSelection::new("win_amount_ratio", true),
            vote: ScoreSelection::new("reputation_score", false),
        }
    }
}

impl FeaturePipeline {
    /// Aggregate both metric kinds over `training` and synthesize both
    /// feature columns for every proposal in `targets`.
    ///
    /// `source` must index the same corpus as `training`. Fails only on
    /// misconfigured score names; data gaps degrade per proposal.
    pub fn build_features<S>(
        &self,
        source: &S,
        training: &[Proposal],
        targets: &[Proposal],
    ) -> Result<Vec<FeatureRow>>
    where
        S: EventSource + Sync,
    {
        let stakers = aggregate(source, training, MetricKind::Stake);
        let voters = aggregate(source, training, MetricKind::Vote);
        debug!(
            stakers = stakers.len(),
            voters = voters.len(),
            "aggregated training corpus"
        );

        let stake_scores = synthesize(
            &stakers,
            &self.stake.score_name,
            targets,
            self.stake.weight_by_contribution,
        )?;
        let vote_scores = synthesize(
            &voters,
            &self.vote.score_name,
            targets,
            self.vote.weight_by_contribution,
        )?;

        Ok(targets
            .iter()
            .zip(stake_scores)
            .zip(vote_scores)
            .map(|((proposal, win_amount_ratio), reputation_score)| FeatureRow {
                title: proposal.title.clone(),
                confidence: proposal.confidence,
                stage: proposal.stage.clone(),
                winning_outcome: proposal.winning_outcome,
                win_amount_ratio,
                reputation_score,
            })
            .collect())
    }
}
