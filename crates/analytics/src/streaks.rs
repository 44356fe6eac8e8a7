use crate::report::StreakStats;
use core_types::{AttributeKind, AttributeValue, Outcome, WheelLayout};
use std::collections::BTreeMap;

/// Running state of one forward pass over a single attribute kind.
struct RunTracker {
    current_value: AttributeValue,
    current_run: usize,
    longest_run: usize,
    longest_value: AttributeValue,
    longest_by_value: BTreeMap<AttributeValue, usize>,
}

impl RunTracker {
    fn start(value: AttributeValue) -> Self {
        Self {
            current_value: value,
            current_run: 1,
            longest_run: 1,
            longest_value: value,
            longest_by_value: BTreeMap::from([(value, 1)]),
        }
    }

    fn push(&mut self, value: AttributeValue) {
        if value == self.current_value {
            self.current_run += 1;
        } else {
            self.close_run();
            self.current_value = value;
            self.current_run = 1;
        }
        let best = self.longest_by_value.entry(value).or_insert(0);
        *best = (*best).max(self.current_run);
    }

    // Strict comparison keeps the earliest run on ties.
    fn close_run(&mut self) {
        if self.current_run > self.longest_run {
            self.longest_run = self.current_run;
            self.longest_value = self.current_value;
        }
    }

    fn finish(mut self, alert_threshold: Option<usize>) -> StreakStats {
        self.close_run();
        let zero_class = matches!(self.current_value, AttributeValue::Green | AttributeValue::Zero);
        let alert = !zero_class && alert_threshold.is_some_and(|t| self.current_run >= t);
        StreakStats {
            current_value: self.current_value,
            current_run_length: self.current_run,
            longest_run_length: self.longest_run,
            longest_run_value: self.longest_value,
            longest_by_value: self.longest_by_value,
            alert,
        }
    }
}

/// Computes run-length statistics for every attribute kind in one forward pass.
///
/// `outcomes` must be oldest first. An empty slice yields an empty map: streak data
/// is absent rather than zero.
///
/// A kind raises `alert` when its current run reaches `alert_threshold` consecutive
/// hits on the same value. Runs of the zero class never alert.
pub fn analyze_streaks(
    outcomes: &[Outcome],
    layout: &WheelLayout,
    alert_threshold: Option<usize>,
) -> BTreeMap<AttributeKind, StreakStats> {
    let Some((first, rest)) = outcomes.split_first() else {
        return BTreeMap::new();
    };

    let mut trackers: Vec<(AttributeKind, RunTracker)> = AttributeKind::ALL
        .iter()
        .map(|&kind| (kind, RunTracker::start(layout.attribute(kind, first.pocket))))
        .collect();

    for outcome in rest {
        for (kind, tracker) in trackers.iter_mut() {
            tracker.push(layout.attribute(*kind, outcome.pocket));
        }
    }

    trackers
        .into_iter()
        .map(|(kind, tracker)| (kind, tracker.finish(alert_threshold)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Pocket;

    fn outcomes(numbers: &[u8]) -> Vec<Outcome> {
        numbers
            .iter()
            .enumerate()
            .map(|(i, &n)| Outcome {
                pocket: Pocket::new(n),
                sequence_index: i as u64,
                timestamp: None,
            })
            .collect()
    }

    #[test]
    fn test_empty_history_has_no_streaks() {
        assert!(analyze_streaks(&[], &WheelLayout::european(), None).is_empty());
    }

    #[test]
    fn test_single_outcome_is_a_run_of_one() {
        let streaks = analyze_streaks(&outcomes(&[7]), &WheelLayout::european(), None);
        assert_eq!(streaks.len(), AttributeKind::ALL.len());
        for stats in streaks.values() {
            assert_eq!(stats.current_run_length, 1);
            assert_eq!(stats.longest_run_length, 1);
        }
        assert_eq!(streaks[&AttributeKind::Color].current_value, AttributeValue::Red);
    }

    #[test]
    fn test_red_red_red_black_red() {
        // 1, 3, 5 are red; 2 is black; 7 is red.
        let streaks = analyze_streaks(&outcomes(&[1, 3, 5, 2, 7]), &WheelLayout::european(), None);
        let color = &streaks[&AttributeKind::Color];
        assert_eq!(color.longest_run_length, 3);
        assert_eq!(color.longest_run_value, AttributeValue::Red);
        assert_eq!(color.current_run_length, 1);
        assert_eq!(color.current_value, AttributeValue::Red);
        assert_eq!(color.longest_by_value[&AttributeValue::Black], 1);
    }

    #[test]
    fn test_ties_keep_the_earliest_run() {
        // Black, black, red, red: two runs of length 2.
        let streaks = analyze_streaks(&outcomes(&[2, 4, 1, 3]), &WheelLayout::european(), None);
        let color = &streaks[&AttributeKind::Color];
        assert_eq!(color.longest_run_length, 2);
        assert_eq!(color.longest_run_value, AttributeValue::Black);
        assert_eq!(color.current_value, AttributeValue::Red);
        assert_eq!(color.current_run_length, 2);
    }

    #[test]
    fn test_trailing_run_can_be_the_longest() {
        let streaks = analyze_streaks(&outcomes(&[2, 1, 3, 5]), &WheelLayout::european(), None);
        let color = &streaks[&AttributeKind::Color];
        assert_eq!(color.longest_run_length, 3);
        assert_eq!(color.longest_run_value, AttributeValue::Red);
        assert_eq!(color.current_run_length, 3);
    }

    #[test]
    fn test_zero_forms_its_own_run() {
        let streaks = analyze_streaks(&outcomes(&[2, 0, 0, 4]), &WheelLayout::european(), None);
        let parity = &streaks[&AttributeKind::Parity];
        assert_eq!(parity.longest_run_length, 2);
        assert_eq!(parity.longest_run_value, AttributeValue::Zero);
        assert_eq!(parity.current_value, AttributeValue::Even);
    }

    #[test]
    fn test_current_never_exceeds_longest() {
        let sample = outcomes(&[1, 13, 25, 2, 14, 26, 0, 36, 35, 34, 33, 33, 33, 1]);
        for stats in analyze_streaks(&sample, &WheelLayout::european(), None).values() {
            assert!(stats.current_run_length <= stats.longest_run_length);
        }
    }

    #[test]
    fn test_alert_fires_at_threshold() {
        let layout = WheelLayout::european();
        // Black then three reds: 1, 3, 5 are also odd, first dozen and low.
        let streaks = analyze_streaks(&outcomes(&[2, 1, 3, 5]), &layout, Some(3));
        assert!(streaks[&AttributeKind::Color].alert);
        assert!(streaks[&AttributeKind::Parity].alert);
        // Columns go 2nd, 1st, 3rd, 2nd: no run.
        assert!(!streaks[&AttributeKind::Column].alert);

        // Dozen and range run the full four spins; nothing reaches five.
        let four = analyze_streaks(&outcomes(&[2, 1, 3, 5]), &layout, Some(4));
        assert!(four[&AttributeKind::Dozen].alert);
        assert!(!four[&AttributeKind::Color].alert);
        let five = analyze_streaks(&outcomes(&[2, 1, 3, 5]), &layout, Some(5));
        assert!(five.values().all(|stats| !stats.alert));

        let disabled = analyze_streaks(&outcomes(&[1, 3, 5, 7, 9]), &layout, None);
        assert!(disabled.values().all(|stats| !stats.alert));
    }

    #[test]
    fn test_zero_runs_never_alert() {
        let streaks = analyze_streaks(&outcomes(&[0, 0, 0]), &WheelLayout::european(), Some(2));
        assert_eq!(streaks[&AttributeKind::Color].current_run_length, 3);
        assert!(streaks.values().all(|stats| !stats.alert));
    }
}
