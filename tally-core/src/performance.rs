//! Per-participant historical performance records.

use serde::{Deserialize, Serialize};

use crate::metric::ScoreField;

/// Accumulated win/loss aggregates and derived scores for one participant.
///
/// Counts are `f64` because an absent side is normalized to a nominal 1.0
/// aggregate before ratios are derived; all score math stays in float space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub won_quantity_sum: f64,
    pub won_count: f64,
    pub lost_quantity_sum: f64,
    pub lost_count: f64,
    pub win_count_ratio: f64,
    pub win_quantity_ratio: f64,
    pub count_score: f64,
    pub quantity_score: f64,
}

impl PerformanceRecord {
    /// Build a record from raw aggregates, deriving all four scores.
    ///
    /// Callers apply the no-loss/no-win normalization first; with every
    /// aggregate at least 1 the ratios are always finite.
    #[must_use]
    pub fn from_aggregates(
        won_quantity_sum: f64,
        won_count: f64,
        lost_quantity_sum: f64,
        lost_count: f64,
    ) -> Self {
        let win_count_ratio = won_count / lost_count;
        let win_quantity_ratio = won_quantity_sum / lost_quantity_sum;
        Self {
            won_quantity_sum,
            won_count,
            lost_quantity_sum,
            lost_count,
            win_count_ratio,
            win_quantity_ratio,
            count_score: won_count * win_count_ratio,
            quantity_score: won_quantity_sum * win_quantity_ratio,
        }
    }

    /// Value of one derived score.
    #[must_use]
    pub fn score(&self, field: ScoreField) -> f64 {
        match field {
            ScoreField::WinCountRatio => self.win_count_ratio,
            ScoreField::WinQuantityRatio => self.win_quantity_ratio,
            ScoreField::CountScore => self.count_score,
            ScoreField::QuantityScore => self.quantity_score,
        }
    }
}
