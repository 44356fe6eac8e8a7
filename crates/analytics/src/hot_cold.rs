use crate::error::AnalyticsError;
use crate::report::{FrequencyEntry, RankedPocket};
use core_types::{Outcome, Pocket, WheelLayout};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Ranks pockets by exponentially time-decayed frequency.
///
/// An occurrence at `sequence_index` contributes `0.5^((n - sequence_index) / half_life)`
/// where `n` is the number of spins recorded since the last reset. Older occurrences
/// still count, they just count for less.
#[derive(Debug, Clone)]
pub struct HotColdRanker {
    half_life: f64,
    max_ranked: Option<usize>,
}

impl HotColdRanker {
    /// Creates a ranker, validating that the half-life is a positive finite number.
    pub fn new(half_life: f64, max_ranked: Option<usize>) -> Result<Self, AnalyticsError> {
        if !half_life.is_finite() || half_life <= 0.0 {
            return Err(AnalyticsError::InvalidParameter(
                "recency_half_life",
                format!("must be a positive number, got {}", half_life),
            ));
        }
        Ok(Self {
            half_life,
            max_ranked,
        })
    }

    pub fn half_life(&self) -> f64 {
        self.half_life
    }

    /// Weight of one occurrence at `sequence_index` when `total_recorded` spins exist.
    pub fn decay_weight(&self, sequence_index: u64, total_recorded: u64) -> f64 {
        let age = total_recorded.saturating_sub(sequence_index) as f64;
        0.5f64.powf(age / self.half_life)
    }

    /// Produces the `(hot, cold)` rankings.
    ///
    /// Hot lists observed pockets, highest score first. Cold lists observed pockets
    /// lowest score first, followed by every unobserved pocket in ascending order.
    /// Equal scores fall back to ascending pocket order.
    ///
    /// With `max_ranked`, the cold list gives up observed entries before unobserved
    /// ones, so a truncated list never hides a pocket that has not hit at all.
    pub fn rank(
        &self,
        outcomes: &[Outcome],
        total_recorded: u64,
        frequency_table: &BTreeMap<Pocket, FrequencyEntry>,
        layout: &WheelLayout,
    ) -> (Vec<RankedPocket>, Vec<RankedPocket>) {
        if outcomes.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let newest = outcomes
            .last()
            .map(|o| o.sequence_index)
            .unwrap_or_default();

        let mut scores: BTreeMap<Pocket, (f64, u64)> = BTreeMap::new();
        for outcome in outcomes {
            let entry = scores.entry(outcome.pocket).or_insert((0.0, outcome.sequence_index));
            entry.0 += self.decay_weight(outcome.sequence_index, total_recorded);
            entry.1 = entry.1.max(outcome.sequence_index);
        }

        let mut observed: Vec<RankedPocket> = scores
            .iter()
            .map(|(&pocket, &(score, last_seen))| RankedPocket {
                pocket,
                score,
                hits: frequency_table.get(&pocket).map(|e| e.count).unwrap_or(0),
                spins_since_seen: Some(newest.saturating_sub(last_seen)),
            })
            .collect();

        let mut unobserved: Vec<RankedPocket> = layout
            .pockets()
            .iter()
            .filter(|&&p| !scores.contains_key(&p))
            .map(|&pocket| RankedPocket {
                pocket,
                score: 0.0,
                hits: 0,
                spins_since_seen: None,
            })
            .collect();
        unobserved.sort_by_key(|r| r.pocket);

        observed.sort_by(|a, b| by_score(b, a).then_with(|| a.pocket.cmp(&b.pocket)));
        let mut hot = observed.clone();

        observed.sort_by(|a, b| by_score(a, b).then_with(|| a.pocket.cmp(&b.pocket)));

        if let Some(limit) = self.max_ranked {
            hot.truncate(limit);
            let never_seen = unobserved.len().min(limit);
            unobserved.truncate(never_seen);
            observed.truncate(limit - never_seen);
        }
        let mut cold = observed;
        cold.extend(unobserved);

        tracing::debug!(
            hot = hot.len(),
            cold = cold.len(),
            half_life = self.half_life,
            "Hot/cold ranking complete"
        );
        (hot, cold)
    }
}

fn by_score(a: &RankedPocket, b: &RankedPocket) -> Ordering {
    a.score.total_cmp(&b.score)
}
