//! Table rendering for reports and run summaries.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dq_model::{PipelineResult, QualityReport, RoutingDecision, RunStatus, Severity};

/// Print the quality report for one source: score, decision, and the
/// issue table ordered as the detector reported it.
pub fn print_report(source: &str, report: &QualityReport, decision: RoutingDecision) {
    println!("Source: {source}");
    println!(
        "Shape: {} rows x {} columns",
        report.row_count, report.column_count
    );
    println!("Score: {}  Decision: {}", report.score, decision);
    if report.issues.is_empty() {
        println!("No issues detected.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Kind"),
        header_cell("Column"),
        header_cell("Rows"),
        header_cell("First row"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for issue in &report.issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.kind.to_string()),
            Cell::new(issue.column.clone().unwrap_or_else(|| "-".to_string())),
            Cell::new(issue.affected()),
            match issue.first_row() {
                Some(row) => Cell::new(row + 1),
                None => dim_cell("-"),
            },
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

/// Print one row per processed file plus a totals line.
pub fn print_run_summaries(runs: &[(String, PipelineResult)]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Status"),
        header_cell("Score"),
        header_cell("Decision"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Issues"),
        header_cell("Reason"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut rows_in = 0usize;
    let mut rows_out = 0usize;
    for (source, result) in runs {
        rows_in += result.rows_in;
        rows_out += result.rows_out;
        let summary = result.summary(source.clone());
        table.add_row(vec![
            Cell::new(source),
            status_cell(result.status),
            Cell::new(summary.score),
            Cell::new(
                summary
                    .decision
                    .map_or_else(|| "-".to_string(), |decision| decision.to_string()),
            ),
            Cell::new(summary.rows_in),
            Cell::new(summary.rows_out),
            Cell::new(summary.issue_count),
            Cell::new(&result.reason),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(rows_in).add_attribute(Attribute::Bold),
        Cell::new(rows_out).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::High => Cell::new("HIGH")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Medium => Cell::new("MEDIUM").fg(Color::Yellow),
        Severity::Low => Cell::new("LOW").fg(Color::DarkGrey),
    }
}

fn status_cell(status: RunStatus) -> Cell {
    match status {
        RunStatus::Success => Cell::new("SUCCESS")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        RunStatus::Rejected => Cell::new("REJECTED").fg(Color::Yellow),
        RunStatus::Failed => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
