use configuration::EngineConfig;
use core_types::{AttributeKind, AttributeValue, Pocket, WheelVariant};
use engine::{EngineError, RouletteEngine};

fn engine_with(config: EngineConfig) -> RouletteEngine {
    RouletteEngine::new(config).expect("valid config")
}

fn european() -> RouletteEngine {
    engine_with(EngineConfig::default())
}

fn record_all(engine: &mut RouletteEngine, numbers: &[u8]) {
    for &n in numbers {
        engine.record_outcome(Pocket::new(n)).expect("valid pocket");
    }
}

#[test]
fn counts_sum_to_history_length() {
    let mut engine = european();
    record_all(&mut engine, &[0, 32, 15, 19, 4, 21, 2, 25, 32, 0, 36, 11, 11]);
    let snapshot = engine.get_snapshot();

    let n = snapshot.sample_size as u64;
    assert_eq!(n, 13);
    assert_eq!(snapshot.frequency_table.values().map(|e| e.count).sum::<u64>(), n);
    for kind in AttributeKind::ALL {
        let total: u64 = snapshot.attribute_tables[&kind].values().map(|e| e.count).sum();
        assert_eq!(total, n, "attribute kind {}", kind);
    }
}

#[test]
fn repeated_snapshots_are_identical() {
    let mut engine = european();
    record_all(&mut engine, &[7, 7, 28, 12, 35]);
    let first = engine.get_snapshot();
    let second = engine.get_snapshot();
    assert_eq!(*first, *second);
}

#[test]
fn current_streak_never_exceeds_longest() {
    let mut engine = european();
    let spins = [1, 3, 5, 2, 7, 0, 0, 13, 26, 26, 26, 26, 1, 36, 2, 4, 6, 8, 10, 11];
    for &n in &spins {
        engine.record_outcome(Pocket::new(n)).unwrap();
        let snapshot = engine.get_snapshot();
        for (kind, stats) in &snapshot.streaks {
            assert!(
                stats.current_run_length <= stats.longest_run_length,
                "kind {} after {}",
                kind,
                n
            );
        }
    }
}

#[test]
fn empty_history_gives_empty_snapshot() {
    let mut engine = european();
    let snapshot = engine.get_snapshot();
    assert!(snapshot.history_empty);
    assert!(snapshot.frequency_table.is_empty());
    assert!(snapshot.attribute_tables.is_empty());
    assert!(snapshot.bias_scores.is_empty());
    assert!(snapshot.number_bias.is_none());
    assert!(snapshot.streaks.is_empty());
    assert!(snapshot.last_outcome.is_none());
}

#[test]
fn european_wheel_order_scenario() {
    let mut engine = european();
    record_all(&mut engine, &[0, 32, 15, 19, 4, 21, 2, 25]);
    let snapshot = engine.get_snapshot();

    let zero = snapshot.frequency_table[&Pocket::ZERO];
    assert_eq!(zero.count, 1);
    assert!((zero.relative_frequency - 0.125).abs() < 1e-12);

    // 32, 19, 21, 25 are red; 15, 4, 2 are black.
    let colors = &snapshot.attribute_tables[&AttributeKind::Color];
    assert_eq!(colors[&AttributeValue::Green].count, 1);
    assert_eq!(colors[&AttributeValue::Red].count, 4);
    assert_eq!(colors[&AttributeValue::Black].count, 3);

    let bias = &snapshot.bias_scores[&AttributeKind::Color];
    assert!(bias.sample_too_small);
    assert!(bias.p_value.is_none());
    assert_eq!(snapshot.sequence_index, Some(7));
}

#[test]
fn color_streak_scenario() {
    let mut engine = european();
    // red, red, red, black, red
    record_all(&mut engine, &[1, 3, 5, 2, 7]);
    let snapshot = engine.get_snapshot();
    let color = &snapshot.streaks[&AttributeKind::Color];
    assert_eq!(color.longest_run_length, 3);
    assert_eq!(color.longest_run_value, AttributeValue::Red);
    assert_eq!(color.current_run_length, 1);
    assert_eq!(color.current_value, AttributeValue::Red);
}

#[test]
fn eviction_scenario() {
    let mut engine = engine_with(EngineConfig {
        max_history_length: Some(3),
        ..EngineConfig::default()
    });
    record_all(&mut engine, &[1, 2, 3, 4]);
    assert_eq!(engine.history().len(), 3);

    let snapshot = engine.get_snapshot();
    assert_eq!(snapshot.sample_size, 3);
    assert_eq!(snapshot.total_recorded, 4);
    assert_eq!(snapshot.frequency_table[&Pocket::new(1)].count, 0);
    for n in 2..=4 {
        assert_eq!(snapshot.frequency_table[&Pocket::new(n)].count, 1);
    }
    assert_eq!(snapshot.sequence_index, Some(3));
    assert!(snapshot.hot.iter().all(|r| r.pocket != Pocket::new(1)));
}

#[test]
fn invalid_number_scenario() {
    let mut engine = european();
    record_all(&mut engine, &[10, 20]);
    let err = engine.record_outcome(Pocket::new(37)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidNumber(_)));
    assert_eq!(engine.history().len(), 2);
}

#[test]
fn batch_record_is_all_or_nothing() {
    let mut engine = european();
    let result = engine.record_outcomes(&[Pocket::new(1), Pocket::DoubleZero]);
    assert!(result.is_err());
    assert!(engine.history().is_empty());
}

#[test]
fn reset_clears_history_and_snapshot() {
    let mut engine = european();
    record_all(&mut engine, &[5, 6, 7]);
    assert_eq!(engine.get_snapshot().sample_size, 3);

    engine.reset_session();
    assert!(engine.get_snapshot().history_empty);

    let outcome = engine.record_outcome(Pocket::new(9)).unwrap();
    assert_eq!(outcome.sequence_index, 0);
    let snapshot = engine.get_snapshot();
    assert_eq!(snapshot.sample_size, 1);
    assert_eq!(snapshot.frequency_table[&Pocket::new(9)].count, 1);
    assert_eq!(snapshot.frequency_table[&Pocket::new(5)].count, 0);
}

#[test]
fn american_session_accepts_double_zero() {
    let mut engine = engine_with(EngineConfig {
        wheel_variant: WheelVariant::American,
        ..EngineConfig::default()
    });
    engine.record_outcome(Pocket::DoubleZero).unwrap();
    engine.record_outcome(Pocket::ZERO).unwrap();

    assert_eq!(engine.get_wheel_layout().len(), 38);
    let snapshot = engine.get_snapshot();
    let colors = &snapshot.attribute_tables[&AttributeKind::Color];
    assert_eq!(colors[&AttributeValue::Green].count, 2);
    assert_eq!(snapshot.streaks[&AttributeKind::Parity].current_run_length, 2);
    assert!(snapshot.sector_table.is_empty());
}

#[test]
fn large_sample_reports_p_values() {
    let mut engine = european();
    for _ in 0..2 {
        record_all(&mut engine, &(0..=36).collect::<Vec<u8>>());
    }
    let snapshot = engine.get_snapshot();
    assert!(!snapshot.sample_too_small);
    for score in snapshot.bias_scores.values() {
        let p = score.p_value.expect("sample is large enough");
        assert!((0.0..=1.0).contains(&p));
        assert!(!score.significant);
    }
}
