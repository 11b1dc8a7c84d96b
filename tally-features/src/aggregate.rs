//! Folds participation events into per-participant performance tables.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::warn;

use tally_core::{
    EventSource, MetricKind, ParticipantId, PerformanceRecord, Proposal,
};

/// Per-participant performance lookup for one metric kind.
///
/// Built fresh per training pass, then treated as an immutable lookup for
/// the lifetime of a scoring pass.
#[derive(Debug, Clone)]
pub struct PerformanceTable {
    metric: MetricKind,
    records: HashMap<ParticipantId, PerformanceRecord>,
}

impl PerformanceTable {
    /// The metric kind this table was aggregated over.
    #[must_use]
    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    /// Record for one participant, if they appeared in the training corpus.
    #[must_use]
    pub fn get(&self, participant: &ParticipantId) -> Option<&PerformanceRecord> {
        self.records.get(participant)
    }

    /// Number of participants in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all participants and their records.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &PerformanceRecord)> {
        self.records.iter()
    }
}

/// Running sums for one side of a participant's history.
#[derive(Debug, Clone, Copy, Default)]
struct SideSum {
    quantity: f64,
    count: f64,
}

impl SideSum {
    const UNIT: SideSum = SideSum {
        quantity: 1.0,
        count: 1.0,
    };

    fn add(&mut self, quantity: f64) {
        self.quantity += quantity;
        self.count += 1.0;
    }

    fn merge(&mut self, other: SideSum) {
        self.quantity += other.quantity;
        self.count += other.count;
    }

    /// Quantity sum floored to one unit. Ratios divide by the lost
    /// aggregates, so recorded losses of quantity 0 get the same floor as
    /// an absent side; counts are already >= 1 whenever the side exists.
    fn floor_quantity(mut self) -> Self {
        self.quantity = self.quantity.max(1.0);
        self
    }
}

/// Won/lost tallies for one participant. `None` on a side means no events
/// there anywhere in the corpus, which is what the normalization keys off.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    won: Option<SideSum>,
    lost: Option<SideSum>,
}

impl Tally {
    fn merge(&mut self, other: Tally) {
        merge_side(&mut self.won, other.won);
        merge_side(&mut self.lost, other.lost);
    }
}

fn merge_side(into: &mut Option<SideSum>, from: Option<SideSum>) {
    match (into.as_mut(), from) {
        (Some(a), Some(b)) => a.merge(b),
        (None, Some(b)) => *into = Some(b),
        _ => {}
    }
}

/// Build a performance table for `metric` from a training corpus.
///
/// Proposals whose events fail to extract are skipped with a warning and the
/// rest of the corpus still contributes. Accumulation is a keyed reduction
/// over per-proposal partial tallies, so corpus order never affects the
/// result (up to float summation order).
///
/// Every participant who appears in at least one event gets exactly one
/// record; an entirely absent won or lost side is normalized to one nominal
/// event of unit magnitude, and lost quantity sums are floored to one unit,
/// so no derived score is ever infinite.
pub fn aggregate<S>(source: &S, corpus: &[Proposal], metric: MetricKind) -> PerformanceTable
where
    S: EventSource + Sync,
{
    let tallies = corpus
        .par_iter()
        .enumerate()
        .map(|(index, proposal)| proposal_tallies(source, index, proposal, metric))
        .reduce(HashMap::new, merge_tallies);

    let records = tallies
        .into_iter()
        .map(|(participant, tally)| {
            let won = tally.won.unwrap_or(SideSum::UNIT);
            let lost = tally.lost.unwrap_or(SideSum::UNIT).floor_quantity();
            (
                participant,
                PerformanceRecord::from_aggregates(won.quantity, won.count, lost.quantity, lost.count),
            )
        })
        .collect();

    PerformanceTable { metric, records }
}

fn proposal_tallies<S: EventSource>(
    source: &S,
    index: usize,
    proposal: &Proposal,
    metric: MetricKind,
) -> HashMap<ParticipantId, Tally> {
    let events = match source.participation_events(index, metric) {
        Ok(events) => events,
        Err(err) => {
            warn!(proposal = %proposal.title, %err, "skipping proposal during aggregation");
            return HashMap::new();
        }
    };

    let mut tallies: HashMap<ParticipantId, Tally> = HashMap::new();
    for event in events {
        let won = event.outcome == proposal.winning_outcome;
        let tally = tallies.entry(event.participant).or_default();
        let side = if won { &mut tally.won } else { &mut tally.lost };
        side.get_or_insert_with(SideSum::default).add(event.quantity);
    }
    tallies
}

fn merge_tallies(
    mut into: HashMap<ParticipantId, Tally>,
    from: HashMap<ParticipantId, Tally>,
) -> HashMap<ParticipantId, Tally> {
    for (participant, tally) in from {
        into.entry(participant).or_default().merge(tally);
    }
    into
}
