use analytics::{AnalysisSnapshot, BiasScore, FrequencyEntry, RankedPocket};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use core_types::{AttributeKind, AttributeValue, Pocket, WheelLayout};
use std::collections::BTreeMap;

/// Pockets listed on each side in the layout's neighbour column.
const NEIGHBOUR_SPAN: usize = 2;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn value_cell(value: AttributeValue) -> Cell {
    match value {
        AttributeValue::Red => Cell::new(value).fg(Color::Red),
        AttributeValue::Green => Cell::new(value).fg(Color::Green),
        _ => Cell::new(value),
    }
}

fn pct(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

pub fn print_snapshot(snapshot: &AnalysisSnapshot) {
    if snapshot.history_empty {
        println!("No spins recorded yet.");
        return;
    }

    println!(
        "\nAnalysed {} spins ({} recorded since reset)",
        snapshot.sample_size, snapshot.total_recorded
    );
    if let Some(last) = &snapshot.last_outcome {
        let traits = snapshot
            .last_traits
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("Last spin: {} ({})", last.pocket, traits);
    }
    if snapshot.sample_too_small {
        println!("Sample too small for p-values; chi-square statistics are shown for reference only.");
    }

    print_attributes(snapshot);
    print_streaks(snapshot);
    print_rankings("Hot", &snapshot.hot);
    print_rankings("Cold", &snapshot.cold);

    if !snapshot.sector_table.is_empty() {
        print_tally("Wheel sectors", "Sector", &snapshot.sector_table, |sector| {
            sector.to_string()
        });
    }
    print_tally("Sides of zero", "Side", &snapshot.side_table, |side| side.to_string());

    let inside = &snapshot.inside_tables;
    print_tally("Streets", "Street", &inside.streets, |&k| span_label(3 * k - 2, 3 * k));
    print_tally("Six lines", "Line", &inside.six_lines, |&k| span_label(3 * k - 2, 3 * k + 3));
    print_best("Corners", &inside.corners, |&c| format!("{}-{}-{}-{}", c, c + 1, c + 3, c + 4));
    print_best("Splits", &inside.splits, |split| split.to_string());
}

fn span_label(first: u8, last: u8) -> String {
    format!("{}-{}", first, last)
}

fn print_tally<K>(
    title: &str,
    label: &str,
    tally: &BTreeMap<K, FrequencyEntry>,
    name: impl Fn(&K) -> String,
) {
    println!("\n── {} ──", title);
    let mut table = new_table(vec![label, "Hits", "Share"]);
    for (key, entry) in tally {
        table.add_row(vec![name(key), entry.count.to_string(), pct(entry.relative_frequency)]);
    }
    println!("{table}");
}

/// Corners and splits are too many to list; show the most hit ones.
fn print_best<K>(title: &str, tally: &BTreeMap<K, FrequencyEntry>, name: impl Fn(&K) -> String) {
    let mut ranked: Vec<(&K, &FrequencyEntry)> =
        tally.iter().filter(|(_, entry)| entry.count > 0).collect();
    ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count));
    ranked.truncate(5);
    if ranked.is_empty() {
        return;
    }

    println!("\n── Most hit {} ──", title.to_lowercase());
    let mut table = new_table(vec![title, "Hits", "Share"]);
    for (key, entry) in ranked {
        table.add_row(vec![name(key), entry.count.to_string(), pct(entry.relative_frequency)]);
    }
    println!("{table}");
}

fn print_attributes(snapshot: &AnalysisSnapshot) {
    println!("\n── Attribute frequencies ──");
    let mut table = new_table(vec!["Kind", "Value", "Hits", "Share"]);
    for (kind, values) in &snapshot.attribute_tables {
        for (value, entry) in values {
            table.add_row(vec![
                Cell::new(kind),
                value_cell(*value),
                Cell::new(entry.count),
                Cell::new(pct(entry.relative_frequency)),
            ]);
        }
    }
    println!("{table}");

    println!("\n── Bias (chi-square vs. uniform wheel) ──");
    let mut table = new_table(vec!["Kind", "Chi²", "df", "p-value", "Signal"]);
    for (kind, score) in &snapshot.bias_scores {
        table.add_row(bias_row(&kind.to_string(), score));
    }
    if let Some(score) = &snapshot.number_bias {
        table.add_row(bias_row("pocket", score));
    }
    println!("{table}");
}

fn bias_row(label: &str, score: &BiasScore) -> Vec<Cell> {
    let p_value = match score.p_value {
        Some(p) => format!("{:.4}", p),
        None => "n/a".to_string(),
    };
    let signal = if score.significant {
        Cell::new("deviation").fg(Color::Yellow)
    } else if score.sample_too_small {
        Cell::new("sample too small")
    } else {
        Cell::new("-")
    };
    vec![
        Cell::new(label),
        Cell::new(format!("{:.3}", score.chi_square)),
        Cell::new(score.degrees_of_freedom),
        Cell::new(p_value),
        signal,
    ]
}

fn print_streaks(snapshot: &AnalysisSnapshot) {
    println!("\n── Streaks ──");
    let mut table = new_table(vec!["Kind", "Current", "Run", "Longest", "Run", "Alert"]);
    for kind in AttributeKind::ALL {
        if let Some(stats) = snapshot.streaks.get(&kind) {
            table.add_row(vec![
                Cell::new(kind),
                value_cell(stats.current_value),
                Cell::new(stats.current_run_length),
                value_cell(stats.longest_run_value),
                Cell::new(stats.longest_run_length),
                if stats.alert {
                    Cell::new("streak").fg(Color::Yellow)
                } else {
                    Cell::new("")
                },
            ]);
        }
    }
    println!("{table}");
}

fn print_rankings(title: &str, entries: &[RankedPocket]) {
    println!("\n── {} pockets ──", title);
    let mut table = new_table(vec!["Pocket", "Score", "Hits", "Spins since seen"]);
    for entry in entries {
        let since = entry
            .spins_since_seen
            .map(|s| s.to_string())
            .unwrap_or_else(|| "never".to_string());
        table.add_row(vec![
            entry.pocket.to_string(),
            format!("{:.3}", entry.score),
            entry.hits.to_string(),
            since,
        ]);
    }
    println!("{table}");
}

pub fn print_layout(layout: &WheelLayout) {
    println!("\n── {} wheel ({} pockets) ──", layout.variant(), layout.len());
    let mut table = new_table(vec![
        "Pocket", "Color", "Parity", "Dozen", "Column", "Range", "Side", "Sector", "Neighbours",
    ]);
    for &pocket in layout.pockets() {
        let mut row = vec![Cell::new(pocket)];
        row.extend(layout.traits_of(pocket).into_iter().map(value_cell));
        row.push(Cell::new(
            layout
                .side_of(pocket)
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ));
        row.push(Cell::new(
            layout
                .sector_of(pocket)
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ));
        row.push(Cell::new(neighbour_label(layout, pocket, NEIGHBOUR_SPAN)));
        table.add_row(row);
    }
    println!("{table}");

    let order = layout
        .wheel_order()
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("Wheel order: {}", order);
}

/// `pocket` bracketed by its wheel neighbours, e.g. `3 26 [0] 32 15`.
fn neighbour_label(layout: &WheelLayout, pocket: Pocket, span: usize) -> String {
    let neighbours = layout.neighbors(pocket, span);
    let (left, right) = neighbours.split_at(neighbours.len() / 2);
    let join = |side: &[Pocket]| side.iter().map(|p| p.to_string()).collect::<Vec<_>>();
    let mut parts = join(left);
    parts.push(format!("[{}]", pocket));
    parts.extend(join(right));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbour_label_follows_the_wheel() {
        let layout = WheelLayout::european();
        assert_eq!(neighbour_label(&layout, Pocket::ZERO, 2), "3 26 [0] 32 15");
        assert_eq!(neighbour_label(&layout, Pocket::new(26), 1), "3 [26] 0");

        let american = WheelLayout::american();
        assert_eq!(neighbour_label(&american, Pocket::DoubleZero, 1), "1 [00] 27");
    }

    #[test]
    fn test_span_labels() {
        assert_eq!(span_label(1, 3), "1-3");
        assert_eq!(span_label(31, 36), "31-36");
    }
}
