//! Table and JSON rendering for listings and summaries.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use labrec_model::{PatientRecord, SummaryResult, TestCatalog, format_delta, format_timestamp};

pub fn print_tests(catalog: &TestCatalog) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Test"),
        header_cell("Range"),
        header_cell("Unit"),
        header_cell("Turnaround"),
    ]);
    apply_table_style(&mut table);
    for definition in catalog.iter() {
        let range = definition.range.to_string();
        table.add_row(vec![
            Cell::new(&definition.name),
            if range.is_empty() {
                dim_cell("unbounded")
            } else {
                Cell::new(range)
            },
            Cell::new(&definition.unit),
            Cell::new(definition.turnaround.to_string()),
        ]);
    }
    println!("{table}");
    println!("{} test(s)", catalog.len());
}

pub fn print_records(records: &[PatientRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Patient"),
        header_cell("Test"),
        header_cell("Test date"),
        header_cell("Result"),
        header_cell("Unit"),
        header_cell("Status"),
        header_cell("Result date"),
        header_cell("Turnaround"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.patient_id),
            Cell::new(&record.test_name),
            Cell::new(format_timestamp(record.test_at)),
            Cell::new(fmt_value(record.result)),
            Cell::new(&record.unit),
            Cell::new(record.status.as_str()),
            match record.result_at {
                Some(result_at) => Cell::new(format_timestamp(result_at)),
                None => dim_cell("-"),
            },
            match record.turnaround() {
                Some(turnaround) => Cell::new(format_delta(turnaround)),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
    println!("{} record(s)", records.len());
}

pub fn print_summary(summary: &SummaryResult) {
    if summary.is_empty() {
        println!("No records matched the filters.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Statistic"),
        header_cell("Result value"),
        header_cell("Turnaround"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Minimum"),
        value_cell(summary.min_value),
        delta_cell(summary.min_turnaround),
    ]);
    table.add_row(vec![
        Cell::new("Maximum"),
        value_cell(summary.max_value),
        delta_cell(summary.max_turnaround),
    ]);
    table.add_row(vec![
        Cell::new("Average"),
        value_cell(summary.avg_value),
        delta_cell(summary.avg_turnaround),
    ]);
    table.add_row(vec![
        Cell::new("Records")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.value_count).add_attribute(Attribute::Bold),
        Cell::new(summary.turnaround_count).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn records_json(records: &[PatientRecord]) -> serde_json::Value {
    serde_json::json!({
        "count": records.len(),
        "records": records,
    })
}

pub fn tests_json(catalog: &TestCatalog) -> serde_json::Value {
    let tests: Vec<_> = catalog.iter().collect();
    serde_json::json!({
        "count": tests.len(),
        "tests": tests,
    })
}

pub fn summary_json(summary: &SummaryResult) -> serde_json::Value {
    serde_json::json!({
        "value": {
            "count": summary.value_count,
            "min": summary.min_value,
            "max": summary.max_value,
            "avg": summary.avg_value,
        },
        "turnaround": {
            "count": summary.turnaround_count,
            "min_seconds": summary.min_turnaround.map(|d| d.num_seconds()),
            "max_seconds": summary.max_turnaround.map(|d| d.num_seconds()),
            "avg_seconds": summary.avg_turnaround.map(|d| d.num_seconds()),
            "min": summary.min_turnaround.map(format_delta),
            "max": summary.max_turnaround.map(format_delta),
            "avg": summary.avg_turnaround.map(format_delta),
        },
    })
}

/// Format a result value without trailing zeros (12.500 prints as 12.5).
fn fmt_value(value: f64) -> String {
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn value_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(fmt_value(value)),
        None => dim_cell("-"),
    }
}

fn delta_cell(delta: Option<chrono::TimeDelta>) -> Cell {
    match delta {
        Some(delta) => Cell::new(format_delta(delta)),
        None => dim_cell("-"),
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn dim_cell(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).add_attribute(Attribute::Dim)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
