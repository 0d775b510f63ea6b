//! Run summary rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::types::SyncRunResult;

pub fn print_summary(result: &SyncRunResult) {
    println!(
        "Source: {} ({} rows)",
        result.source.display(),
        result.source_rows
    );
    if result.report.dry_run {
        println!("Dry run: no entries were written");
    }
    println!("{}", summary_table(result));
    if result.report.capped {
        println!("Processing cap reached; rerun to continue with the remaining rows.");
    }
}

/// Build the outcome table for one run.
pub fn summary_table(result: &SyncRunResult) -> Table {
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Rows processed"), Cell::new(report.rows_seen)]);
    table.add_row(vec![
        Cell::new(if report.dry_run { "Would create" } else { "Created" }),
        count_cell(report.created, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Already in store"),
        Cell::new(report.duplicate_skips),
    ]);
    table.add_row(vec![
        Cell::new("Date parse failures"),
        count_cell(report.parse_failures, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Failed after retries"),
        count_cell(report.record_failures, Color::Red),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, highlight: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(highlight)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
        column.set_constraint(ColumnConstraint::LowerBoundary(Width::Fixed(7)));
    }
}
