use core_types::{AttributeKind, AttributeValue, Outcome, Pocket, Sector, Split, WheelSide};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrence count and its share of the sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub count: u64,
    /// `count / n`, or 0 for an empty sample.
    pub relative_frequency: f64,
}

impl FrequencyEntry {
    pub fn new(count: u64, sample_size: usize) -> Self {
        let relative_frequency = if sample_size == 0 {
            0.0
        } else {
            count as f64 / sample_size as f64
        };
        Self {
            count,
            relative_frequency,
        }
    }
}

/// Chi-square goodness-of-fit against the uniform wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasScore {
    pub chi_square: f64,
    pub degrees_of_freedom: usize,
    /// Withheld when the sample is too small for the approximation.
    pub p_value: Option<f64>,
    pub sample_too_small: bool,
    /// A p-value exists and is below the configured significance level.
    pub significant: bool,
}

/// Hit tallies of the overlapping inside-bet groupings.
///
/// A pocket belongs to several six-lines, corners and splits, so these shares do not
/// sum to 1. The zero class belongs to none of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsideBetTables {
    pub streets: BTreeMap<u8, FrequencyEntry>,
    pub six_lines: BTreeMap<u8, FrequencyEntry>,
    pub corners: BTreeMap<u8, FrequencyEntry>,
    pub splits: BTreeMap<Split, FrequencyEntry>,
}

/// Run-length statistics for one attribute kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakStats {
    /// Value of the run still active at the newest outcome.
    pub current_value: AttributeValue,
    pub current_run_length: usize,
    pub longest_run_length: usize,
    /// Value of the earliest run reaching `longest_run_length`.
    pub longest_run_value: AttributeValue,
    /// Longest run seen for each value that occurred.
    pub longest_by_value: BTreeMap<AttributeValue, usize>,
    /// The current run of a non-zero value has reached the configured alert threshold.
    pub alert: bool,
}

/// One entry of the hot or cold ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedPocket {
    pub pocket: Pocket,
    /// Recency-weighted frequency. 0 for pockets never seen.
    pub score: f64,
    /// Raw count in the retained history.
    pub hits: u64,
    /// Spins since the pocket last hit; `None` if it never did.
    pub spins_since_seen: Option<u64>,
}

/// An immutable statistical summary of one history state.
///
/// This struct is the final output of the `ReportBuilder` and the only thing the
/// interface layer consumes. Recomputation always produces a new snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    // I. Identity
    /// Final `sequence_index` of the summarised history. `None` when empty.
    pub sequence_index: Option<u64>,
    pub sample_size: usize,
    /// Appends since the last reset, evicted ones included.
    pub total_recorded: u64,
    pub history_empty: bool,
    /// The sample is below the threshold for reporting p-values.
    pub sample_too_small: bool,

    // II. Frequencies
    pub frequency_table: BTreeMap<Pocket, FrequencyEntry>,
    pub attribute_tables: BTreeMap<AttributeKind, BTreeMap<AttributeValue, FrequencyEntry>>,
    pub sector_table: BTreeMap<Sector, FrequencyEntry>,
    pub side_table: BTreeMap<WheelSide, FrequencyEntry>,
    pub inside_tables: InsideBetTables,

    // III. Bias
    pub bias_scores: BTreeMap<AttributeKind, BiasScore>,
    pub number_bias: Option<BiasScore>,

    // IV. Streaks
    pub streaks: BTreeMap<AttributeKind, StreakStats>,

    // V. Hot / cold
    pub hot: Vec<RankedPocket>,
    pub cold: Vec<RankedPocket>,

    // VI. Newest spin
    pub last_outcome: Option<Outcome>,
    pub last_traits: Vec<AttributeValue>,
}

impl AnalysisSnapshot {
    /// The snapshot of an empty history.
    pub fn empty() -> Self {
        Self {
            history_empty: true,
            sample_too_small: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_entry_never_divides_by_zero() {
        let entry = FrequencyEntry::new(0, 0);
        assert_eq!(entry.relative_frequency, 0.0);
        let entry = FrequencyEntry::new(1, 8);
        assert!((entry.relative_frequency - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_serializes_with_string_keys() {
        let mut snapshot = AnalysisSnapshot::empty();
        snapshot
            .frequency_table
            .insert(Pocket::DoubleZero, FrequencyEntry::new(1, 1));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["frequency_table"]["00"]["count"], 1);
        assert_eq!(json["history_empty"], true);
    }

    #[test]
    fn test_inside_tables_serialize_with_string_keys() {
        let mut snapshot = AnalysisSnapshot::empty();
        snapshot
            .inside_tables
            .splits
            .insert(Split { low: 1, high: 4 }, FrequencyEntry::new(2, 4));
        snapshot.inside_tables.streets.insert(3, FrequencyEntry::new(1, 4));
        snapshot.side_table.insert(WheelSide::Left, FrequencyEntry::new(3, 4));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["inside_tables"]["splits"]["1-4"]["count"], 2);
        assert_eq!(json["inside_tables"]["streets"]["3"]["count"], 1);
        assert_eq!(json["side_table"]["left"]["count"], 3);
    }
}
