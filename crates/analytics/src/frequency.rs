use crate::report::{BiasScore, FrequencyEntry, InsideBetTables};
use core_types::{AttributeKind, AttributeValue, Outcome, Pocket, Sector, Split, WheelLayout, WheelSide};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::collections::BTreeMap;

/// Counts, relative frequencies and bias scores for one sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrequencyAnalysis {
    pub sample_size: usize,
    pub frequency_table: BTreeMap<Pocket, FrequencyEntry>,
    pub attribute_tables: BTreeMap<AttributeKind, BTreeMap<AttributeValue, FrequencyEntry>>,
    pub sector_table: BTreeMap<Sector, FrequencyEntry>,
    pub side_table: BTreeMap<WheelSide, FrequencyEntry>,
    pub inside_tables: InsideBetTables,
    pub bias_scores: BTreeMap<AttributeKind, BiasScore>,
    pub number_bias: Option<BiasScore>,
}

/// A stateless calculator for occurrence statistics.
#[derive(Debug, Clone)]
pub struct FrequencyAnalyzer {
    min_sample_size: usize,
    significance_level: f64,
}

impl FrequencyAnalyzer {
    pub fn new(min_sample_size: usize, significance_level: f64) -> Self {
        Self {
            min_sample_size,
            significance_level,
        }
    }

    /// Counts every pocket and attribute value in a single pass, then scores each
    /// attribute kind and the pocket distribution against the uniform wheel.
    ///
    /// An empty sample yields empty tables and no bias scores.
    pub fn analyze(&self, outcomes: &[Outcome], layout: &WheelLayout) -> FrequencyAnalysis {
        let n = outcomes.len();
        if n == 0 {
            return FrequencyAnalysis::default();
        }

        let mut pocket_counts: BTreeMap<Pocket, u64> =
            layout.pockets().iter().map(|&p| (p, 0)).collect();
        let mut attribute_counts: BTreeMap<AttributeKind, BTreeMap<AttributeValue, u64>> =
            AttributeKind::ALL
                .iter()
                .map(|&kind| (kind, kind.values().iter().map(|&v| (v, 0)).collect()))
                .collect();
        let mut sector_counts: BTreeMap<Sector, u64> = BTreeMap::new();
        let mut side_counts: BTreeMap<WheelSide, u64> =
            WheelSide::ALL.iter().map(|&side| (side, 0)).collect();
        let mut street_counts: BTreeMap<u8, u64> = layout.streets().map(|k| (k, 0)).collect();
        let mut six_line_counts: BTreeMap<u8, u64> =
            layout.six_lines().map(|k| (k, 0)).collect();
        let mut corner_counts: BTreeMap<u8, u64> =
            layout.corners().into_iter().map(|c| (c, 0)).collect();
        let mut split_counts: BTreeMap<Split, u64> =
            layout.splits().into_iter().map(|s| (s, 0)).collect();

        for outcome in outcomes {
            *pocket_counts.entry(outcome.pocket).or_insert(0) += 1;
            for kind in AttributeKind::ALL {
                let value = layout.attribute(kind, outcome.pocket);
                if let Some(counts) = attribute_counts.get_mut(&kind) {
                    *counts.entry(value).or_insert(0) += 1;
                }
            }
            if let Some(sector) = layout.sector_of(outcome.pocket) {
                *sector_counts.entry(sector).or_insert(0) += 1;
            }
            if let Some(side) = layout.side_of(outcome.pocket) {
                *side_counts.entry(side).or_insert(0) += 1;
            }
            if let Some(street) = layout.street_of(outcome.pocket) {
                *street_counts.entry(street).or_insert(0) += 1;
            }
            for line in layout.six_lines_of(outcome.pocket) {
                *six_line_counts.entry(line).or_insert(0) += 1;
            }
            for corner in layout.corners_of(outcome.pocket) {
                *corner_counts.entry(corner).or_insert(0) += 1;
            }
            for split in layout.splits_of(outcome.pocket) {
                *split_counts.entry(split).or_insert(0) += 1;
            }
        }

        // Sectors only exist on the European wheel; list all three there.
        if layout.pockets().iter().any(|&p| layout.sector_of(p).is_some()) {
            for sector in Sector::ALL {
                sector_counts.entry(sector).or_insert(0);
            }
        }

        let bias_scores = attribute_counts
            .iter()
            .map(|(&kind, counts)| {
                let buckets: Vec<(u64, f64)> = counts
                    .iter()
                    .map(|(&value, &count)| {
                        let share = layout.pockets_with(kind, value) as f64 / layout.len() as f64;
                        (count, share)
                    })
                    .collect();
                (kind, self.goodness_of_fit(&buckets, n))
            })
            .collect();

        let pocket_share = 1.0 / layout.len() as f64;
        let pocket_buckets: Vec<(u64, f64)> = pocket_counts
            .values()
            .map(|&count| (count, pocket_share))
            .collect();
        let number_bias = Some(self.goodness_of_fit(&pocket_buckets, n));

        let frequency_table = pocket_counts
            .into_iter()
            .map(|(pocket, count)| (pocket, FrequencyEntry::new(count, n)))
            .collect();
        let attribute_tables = attribute_counts
            .into_iter()
            .map(|(kind, counts)| {
                let table = counts
                    .into_iter()
                    .map(|(value, count)| (value, FrequencyEntry::new(count, n)))
                    .collect();
                (kind, table)
            })
            .collect();
        let sector_table = to_entries(sector_counts, n);
        let side_table = to_entries(side_counts, n);
        let inside_tables = InsideBetTables {
            streets: to_entries(street_counts, n),
            six_lines: to_entries(six_line_counts, n),
            corners: to_entries(corner_counts, n),
            splits: to_entries(split_counts, n),
        };

        tracing::debug!(sample_size = n, "Frequency analysis complete");

        FrequencyAnalysis {
            sample_size: n,
            frequency_table,
            attribute_tables,
            sector_table,
            side_table,
            inside_tables,
            bias_scores,
            number_bias,
        }
    }

    /// Chi-square statistic over `(observed count, expected share)` buckets.
    /// Buckets with no expected mass are skipped.
    fn goodness_of_fit(&self, buckets: &[(u64, f64)], n: usize) -> BiasScore {
        let total = n as f64;
        let chi_square = buckets
            .iter()
            .filter(|(_, share)| *share > 0.0)
            .map(|&(count, share)| {
                let expected = total * share;
                let diff = count as f64 - expected;
                diff * diff / expected
            })
            .sum::<f64>();
        let degrees_of_freedom = buckets.len().saturating_sub(1);

        let sample_too_small = n < self.min_sample_size;
        let p_value = if sample_too_small {
            None
        } else {
            chi_square_survival(chi_square, degrees_of_freedom)
        };
        let significant = p_value.is_some_and(|p| p < self.significance_level);

        BiasScore {
            chi_square,
            degrees_of_freedom,
            p_value,
            sample_too_small,
            significant,
        }
    }
}

fn to_entries<K: Ord>(counts: BTreeMap<K, u64>, n: usize) -> BTreeMap<K, FrequencyEntry> {
    counts
        .into_iter()
        .map(|(key, count)| (key, FrequencyEntry::new(count, n)))
        .collect()
}

/// Upper-tail probability of the chi-square distribution.
pub fn chi_square_survival(statistic: f64, degrees_of_freedom: usize) -> Option<f64> {
    if degrees_of_freedom == 0 || !statistic.is_finite() {
        return None;
    }
    match ChiSquared::new(degrees_of_freedom as f64) {
        Ok(dist) => Some(dist.sf(statistic.max(0.0)).clamp(0.0, 1.0)),
        Err(e) => {
            tracing::warn!(error = ?e, degrees_of_freedom, "Chi-square distribution unavailable");
            None
        }
    }
}
