use crate::error::HistoryError;
use chrono::{DateTime, Utc};
use core_types::{Outcome, Pocket, WheelLayout};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// Owns the ordered spin history of the current session.
///
/// Sequence indices start at 0 after construction or `reset` and increase by one per
/// append. When a maximum length is configured the oldest outcome is dropped first;
/// surviving outcomes keep their original indices.
#[derive(Debug, Clone)]
pub struct History {
    layout: Arc<WheelLayout>,
    outcomes: VecDeque<Outcome>,
    max_length: Option<usize>,
    next_sequence_index: u64,
}

impl History {
    /// Creates an empty history for `layout`. `max_length` of `None` never evicts;
    /// `Some(0)` is rejected since such a store could never hold an outcome.
    pub fn new(layout: Arc<WheelLayout>, max_length: Option<usize>) -> Result<Self, HistoryError> {
        if max_length == Some(0) {
            return Err(HistoryError::ZeroCapacity);
        }
        let capacity = max_length.unwrap_or(64).min(4096);
        Ok(Self {
            layout,
            outcomes: VecDeque::with_capacity(capacity),
            max_length,
            next_sequence_index: 0,
        })
    }

    /// Validates and appends a spin with no timestamp.
    pub fn append(&mut self, pocket: Pocket) -> Result<Outcome, HistoryError> {
        self.append_at(pocket, None)
    }

    /// Validates and appends a spin, evicting the oldest entry if the store is full.
    pub fn append_at(
        &mut self,
        pocket: Pocket,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Outcome, HistoryError> {
        self.validate(pocket)?;

        let outcome = Outcome {
            pocket,
            sequence_index: self.next_sequence_index,
            timestamp,
        };

        if self.max_length.is_some_and(|max| self.outcomes.len() >= max) {
            if let Some(evicted) = self.outcomes.pop_front() {
                tracing::debug!(
                    pocket = %evicted.pocket,
                    sequence_index = evicted.sequence_index,
                    "Evicted oldest outcome"
                );
            }
        }

        self.outcomes.push_back(outcome);
        self.next_sequence_index += 1;
        tracing::debug!(pocket = %pocket, sequence_index = outcome.sequence_index, "Appended outcome");
        Ok(outcome)
    }

    /// Appends every pocket or none of them.
    pub fn append_all(
        &mut self,
        pockets: &[Pocket],
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Vec<Outcome>, HistoryError> {
        for &pocket in pockets {
            self.validate(pocket)?;
        }
        pockets
            .iter()
            .map(|&pocket| self.append_at(pocket, timestamp))
            .collect()
    }

    /// Clears every outcome and restarts sequence numbering at 0.
    pub fn reset(&mut self) {
        self.outcomes.clear();
        self.next_sequence_index = 0;
    }

    /// An owned copy of the current state.
    pub fn snapshot_view(&self) -> HistoryView {
        HistoryView {
            outcomes: self.outcomes.iter().copied().collect(),
            total_recorded: self.next_sequence_index,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    /// The index the next append will receive.
    pub fn next_sequence_index(&self) -> u64 {
        self.next_sequence_index
    }

    /// Index of the newest stored outcome.
    pub fn last_sequence_index(&self) -> Option<u64> {
        self.outcomes.back().map(|o| o.sequence_index)
    }

    fn validate(&self, pocket: Pocket) -> Result<(), HistoryError> {
        if self.layout.contains(pocket) {
            Ok(())
        } else {
            Err(HistoryError::InvalidNumber {
                pocket,
                variant: self.layout.variant(),
            })
        }
    }
}

/// A frozen, oldest-first copy of a `History`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryView {
    outcomes: Vec<Outcome>,
    total_recorded: u64,
}

impl HistoryView {
    /// Builds a view directly. `total_recorded` is the number of appends since the last
    /// reset, evicted ones included; it is raised to at least `outcomes.len()`.
    pub fn new(outcomes: Vec<Outcome>, total_recorded: u64) -> Self {
        let total_recorded = total_recorded.max(outcomes.len() as u64);
        Self {
            outcomes,
            total_recorded,
        }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    pub fn last_sequence_index(&self) -> Option<u64> {
        self.outcomes.last().map(|o| o.sequence_index)
    }

    pub fn last(&self) -> Option<&Outcome> {
        self.outcomes.last()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
