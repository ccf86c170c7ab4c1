//! Text rendering of a journal day for `list` and `chart`.

use crate::models::{ChartData, DailyState, DaySummary, Progress};
use crate::utils::colors::{RESET, color_for_progress, color_for_remaining};
use crate::utils::formatting::{bar, bold, kcal, macros};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

const PROGRESS_WIDTH: usize = 30;
const CHART_WIDTH: usize = 40;
const NOTE_WIDTH: usize = 72;

pub const GOAL_REACHED: &str = "🎉 Congratulations! You've reached your goal!";
pub const GOAL_QUOTE: &str = "Success is the sum of small efforts repeated day in and day out.";

/// Entries newest-first, total, progress bar and notes.
pub fn render_day(day: NaiveDate, state: &DailyState) -> String {
    let progress = Progress::new(state.total_kcal(), state.limit);
    let mut out = String::new();

    out.push_str(&format!(
        "📅 {}  ·  limit {}\n\n",
        bold(&day.format("%Y-%m-%d").to_string()),
        kcal(u64::from(state.limit))
    ));

    if state.entries.is_empty() {
        out.push_str("No meals recorded.\n\n");
    } else {
        let mut table = Table::new(vec![
            Column::left("ID", 14),
            Column::left("Time", 5),
            Column::left("Meal", 24),
            Column::right("kcal", 6),
            Column::left("Macros", 24),
        ]);

        for e in &state.entries {
            table.add_row(vec![
                e.id.clone(),
                e.clock_label(),
                e.name.clone(),
                e.kcal.to_string(),
                macros(e.macros.as_ref()),
            ]);
        }
        out.push_str(&table.render());
        out.push('\n');
    }

    out.push_str(&progress_block(&progress));

    let notes: Vec<String> = state
        .entries
        .iter()
        .filter_map(|e| {
            let text = e.reasoning.as_deref().or(e.description.as_deref())?;
            Some(note(&e.name, text, e.additional_details.as_deref()))
        })
        .collect();

    if !notes.is_empty() {
        out.push_str("\nNotes:\n");
        for n in notes {
            out.push_str(&n);
        }
    }

    out
}

fn progress_block(p: &Progress) -> String {
    let color = color_for_progress(p.percent, p.over_limit);
    let remaining = p.remaining();

    let mut out = format!(
        "Total: {} / {}\n{color}{}{RESET} {:.0}%\n",
        kcal(p.consumed),
        kcal(u64::from(p.limit)),
        bar(p.percent, PROGRESS_WIDTH),
        p.ratio * 100.0
    );

    let rem_color = color_for_remaining(remaining);
    if remaining >= 0 {
        out.push_str(&format!(
            "Remaining: {rem_color}{}{RESET}\n",
            kcal(remaining.unsigned_abs())
        ));
    } else {
        out.push_str(&format!(
            "Over limit by {rem_color}{}{RESET}\n",
            kcal(remaining.unsigned_abs())
        ));
    }

    if p.goal_reached {
        out.push_str(GOAL_REACHED);
        out.push('\n');
        out.push_str(&format!("   \"{GOAL_QUOTE}\"\n"));
    }
    out
}

fn note(name: &str, text: &str, details: Option<&str>) -> String {
    let body = match details {
        Some(d) => format!("{name}: {text} ({d})"),
        None => format!("{name}: {text}"),
    };
    let opts = textwrap::Options::new(NOTE_WIDTH)
        .initial_indent("  • ")
        .subsequent_indent("    ");
    let mut s = textwrap::fill(&body, opts);
    s.push('\n');
    s
}

/// Cumulative series as a table with one bar per point.
pub fn render_chart(day: NaiveDate, chart: &ChartData) -> String {
    let limit = chart.limit.first().copied().unwrap_or(0);
    let scale = chart.peak().max(u64::from(limit)).max(1);

    let mut table = Table::new(vec![
        Column::left("Time", 8),
        Column::right("Total", 7),
        Column::left("", CHART_WIDTH),
        Column::right("Limit", 7),
    ]);

    // Cells stay uncolored: the table pads on display width.
    for ((label, value), lim) in chart.points().zip(chart.limit.iter()) {
        let percent = value as f64 / scale as f64 * 100.0;
        table.add_row(vec![
            label.to_string(),
            value.to_string(),
            bar(percent, CHART_WIDTH),
            lim.to_string(),
        ]);
    }

    format!(
        "📈 Cumulative intake for {}\n\n{}",
        bold(&day.format("%Y-%m-%d").to_string()),
        table.render()
    )
}

/// One line per stored day.
pub fn render_history(days: &[DaySummary]) -> String {
    if days.is_empty() {
        return "No days recorded yet.\n".to_string();
    }

    let mut table = Table::new(vec![
        Column::left("Date", 10),
        Column::right("Meals", 5),
        Column::right("Total", 7),
        Column::right("Limit", 7),
        Column::left("", 4),
    ]);

    for d in days {
        let flag = if d.over_limit() { "⚠️" } else { "" };
        table.add_row(vec![
            d.date.format("%Y-%m-%d").to_string(),
            d.entries.to_string(),
            d.total_kcal.to_string(),
            d.limit.to_string(),
            flag.to_string(),
        ]);
    }
    table.render()
}
