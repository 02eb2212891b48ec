use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{interval::Interval, plan::Plan};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

/// Every known hour with its label, the current hour highlighted.
#[must_use]
pub fn build_hours_table(plan: &Plan) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Start", "End", "Price", "Rank", "State"]);
    let now = chrono::Local::now();
    for hour in &plan.hours {
        let color = if hour.decision.is_on { Color::Green } else { Color::Red };
        let mut start = Cell::new(hour.point.start.format("%a %H:%M"));
        if hour.point.interval().contains(now) {
            start = start.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            start,
            Cell::new(hour.point.end.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(format!("{:.3}", hour.point.value)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.0}%", hour.rank_fraction * 100.0))
                .set_alignment(CellAlignment::Right),
            Cell::new(if hour.decision.is_on { "on" } else { "off" }).fg(color),
        ]);
    }
    table
}

#[must_use]
pub fn build_schedule_table(schedule: &[Interval]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Start", "End", "Duration"]);
    for interval in schedule {
        table.add_row(vec![
            Cell::new(interval.start.format("%a %H:%M")),
            Cell::new(interval.end.format("%a %H:%M")),
            Cell::new(format!("{}h", interval.duration().num_hours()))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
