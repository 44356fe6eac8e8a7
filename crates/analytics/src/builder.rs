use crate::error::AnalyticsError;
use crate::frequency::FrequencyAnalyzer;
use crate::hot_cold::HotColdRanker;
use crate::report::AnalysisSnapshot;
use crate::streaks::analyze_streaks;
use configuration::EngineConfig;
use core_types::WheelLayout;
use history::HistoryView;

/// Composes the three analyzers into one `AnalysisSnapshot`.
///
/// The builder holds configuration only, so `build` is a pure function of the view
/// and layout it is given.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    frequency: FrequencyAnalyzer,
    ranker: HotColdRanker,
    min_sample_size: usize,
    streak_alert_threshold: Option<usize>,
}

impl ReportBuilder {
    /// Creates a builder from the analysis parameters in `config`.
    pub fn new(config: &EngineConfig) -> Result<Self, AnalyticsError> {
        if config.min_sample_size == 0 {
            return Err(AnalyticsError::InvalidParameter(
                "min_sample_size",
                "must be greater than 0".to_string(),
            ));
        }
        if !(config.significance_level > 0.0 && config.significance_level < 1.0) {
            return Err(AnalyticsError::InvalidParameter(
                "significance_level",
                format!("must be between 0 and 1, got {}", config.significance_level),
            ));
        }
        Ok(Self {
            frequency: FrequencyAnalyzer::new(config.min_sample_size, config.significance_level),
            ranker: HotColdRanker::new(config.recency_half_life, config.max_ranked)?,
            min_sample_size: config.min_sample_size,
            streak_alert_threshold: config.streak_alert_threshold,
        })
    }

    /// Runs every analyzer over `view` and stamps the result with the view's final
    /// sequence index.
    pub fn build(&self, view: &HistoryView, layout: &WheelLayout) -> AnalysisSnapshot {
        if view.is_empty() {
            tracing::debug!("History is empty; returning empty snapshot");
            return AnalysisSnapshot {
                total_recorded: view.total_recorded(),
                ..AnalysisSnapshot::empty()
            };
        }

        let outcomes = view.outcomes();
        let frequency = self.frequency.analyze(outcomes, layout);
        let streaks = analyze_streaks(outcomes, layout, self.streak_alert_threshold);
        let (hot, cold) = self.ranker.rank(
            outcomes,
            view.total_recorded(),
            &frequency.frequency_table,
            layout,
        );

        let last_outcome = view.last().copied();
        let last_traits = last_outcome
            .map(|o| layout.traits_of(o.pocket))
            .unwrap_or_default();

        let snapshot = AnalysisSnapshot {
            sequence_index: view.last_sequence_index(),
            sample_size: frequency.sample_size,
            total_recorded: view.total_recorded(),
            history_empty: false,
            sample_too_small: frequency.sample_size < self.min_sample_size,
            frequency_table: frequency.frequency_table,
            attribute_tables: frequency.attribute_tables,
            sector_table: frequency.sector_table,
            side_table: frequency.side_table,
            inside_tables: frequency.inside_tables,
            bias_scores: frequency.bias_scores,
            number_bias: frequency.number_bias,
            streaks,
            hot,
            cold,
            last_outcome,
            last_traits,
        };

        tracing::debug!(
            sequence_index = ?snapshot.sequence_index,
            sample_size = snapshot.sample_size,
            "Built analysis snapshot"
        );
        snapshot
    }
}

/// One-shot form of `ReportBuilder::new(config)?.build(view, layout)`.
pub fn build(
    view: &HistoryView,
    layout: &WheelLayout,
    config: &EngineConfig,
) -> Result<AnalysisSnapshot, AnalyticsError> {
    Ok(ReportBuilder::new(config)?.build(view, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{AttributeKind, AttributeValue, Outcome, Pocket};

    fn view(numbers: &[u8]) -> HistoryView {
        let outcomes = numbers
            .iter()
            .enumerate()
            .map(|(i, &n)| Outcome {
                pocket: Pocket::new(n),
                sequence_index: i as u64,
                timestamp: None,
            })
            .collect();
        HistoryView::new(outcomes, numbers.len() as u64)
    }

    #[test]
    fn test_empty_view_produces_empty_snapshot() {
        let snapshot = build(&view(&[]), &WheelLayout::european(), &EngineConfig::default()).unwrap();
        assert!(snapshot.history_empty);
        assert!(snapshot.sample_too_small);
        assert_eq!(snapshot.sequence_index, None);
        assert!(snapshot.frequency_table.is_empty());
        assert!(snapshot.attribute_tables.is_empty());
        assert!(snapshot.bias_scores.is_empty());
        assert!(snapshot.streaks.is_empty());
        assert!(snapshot.hot.is_empty() && snapshot.cold.is_empty());
    }

    #[test]
    fn test_snapshot_is_stamped_with_final_index() {
        let snapshot = build(&view(&[4, 21, 2]), &WheelLayout::european(), &EngineConfig::default()).unwrap();
        assert_eq!(snapshot.sequence_index, Some(2));
        assert_eq!(snapshot.sample_size, 3);
        assert_eq!(snapshot.last_outcome.map(|o| o.pocket), Some(Pocket::new(2)));
        assert_eq!(
            snapshot.last_traits,
            vec![
                AttributeValue::Black,
                AttributeValue::Even,
                AttributeValue::FirstDozen,
                AttributeValue::SecondColumn,
                AttributeValue::Low,
            ]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let layout = WheelLayout::european();
        let builder = ReportBuilder::new(&EngineConfig::default()).unwrap();
        let sample = view(&[0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6]);
        assert_eq!(builder.build(&sample, &layout), builder.build(&sample, &layout));
    }

    #[test]
    fn test_all_analyzers_are_composed() {
        let snapshot = build(&view(&[1, 3, 5, 2, 7]), &WheelLayout::european(), &EngineConfig::default()).unwrap();
        assert_eq!(snapshot.attribute_tables.len(), AttributeKind::ALL.len());
        assert_eq!(snapshot.bias_scores.len(), AttributeKind::ALL.len());
        assert_eq!(snapshot.streaks[&AttributeKind::Color].longest_run_length, 3);
        assert_eq!(snapshot.hot.len(), 5);
        assert_eq!(snapshot.cold.len(), 37);
        assert!(snapshot.sample_too_small);
    }

    #[test]
    fn test_descriptive_tables_and_alerts_reach_the_snapshot() {
        // Four blacks in a row: 2, 4, 6, 8.
        let snapshot = build(&view(&[2, 4, 6, 8]), &WheelLayout::european(), &EngineConfig::default()).unwrap();
        assert_eq!(snapshot.side_table.values().map(|e| e.count).sum::<u64>(), 4);
        assert_eq!(snapshot.inside_tables.streets[&1].count, 1);
        assert_eq!(snapshot.inside_tables.streets[&2].count, 2);
        assert_eq!(snapshot.inside_tables.six_lines[&1].count, 3);
        assert!(snapshot.streaks[&AttributeKind::Color].alert);

        let quiet = EngineConfig {
            streak_alert_threshold: None,
            ..EngineConfig::default()
        };
        let snapshot = build(&view(&[2, 4, 6, 8]), &WheelLayout::european(), &quiet).unwrap();
        assert!(snapshot.streaks.values().all(|stats| !stats.alert));
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let config = EngineConfig {
            recency_half_life: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            ReportBuilder::new(&config),
            Err(AnalyticsError::InvalidParameter("recency_half_life", _))
        ));
    }
}
