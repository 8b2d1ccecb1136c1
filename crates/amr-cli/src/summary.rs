use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use amr_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Source: {}", result.source);
    println!("Output: {}", result.output_dir.display());
    print_metrics(result);
    print_columns(result);
    print_outputs(result);
}

fn print_metrics(result: &RunResult) {
    let summary = &result.reports.summary;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Input rows", result.input_rows),
        ("Reported rows", result.reported_rows),
        ("Unique patients", summary.unique_patients),
        ("Pathogens", summary.distinct_pathogens),
        ("Specimen types", summary.distinct_specimens),
        ("Bug-drug rows", result.reports.bug_drug.len()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    for row in result.reports.indicators.iter().filter(|row| row.is_parent()) {
        table.add_row(vec![
            Cell::new(&row.description).add_attribute(Attribute::Bold),
            Cell::new(row.number).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}

fn print_columns(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Source column"),
        header_cell("Output column"),
    ]);
    apply_table_style(&mut table);
    for (field, header) in &result.bound {
        table.add_row(vec![
            Cell::new(field.label()).fg(Color::Blue),
            Cell::new(header),
            Cell::new(field.column_name()),
        ]);
    }
    for field in &result.unresolved {
        table.add_row(vec![
            Cell::new(field.label()).fg(Color::DarkGrey),
            missing_cell(),
            dim_cell(field.column_name()),
        ]);
    }
    println!("{table}");
}

fn print_outputs(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("File"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for output in &result.outputs {
        let name = output
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let rows = if output.rows == 0 {
            dim_cell(0)
        } else {
            Cell::new(output.rows)
        };
        table.add_row(vec![Cell::new(name), rows]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn missing_cell() -> Cell {
    Cell::new("not found").fg(Color::Yellow)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
