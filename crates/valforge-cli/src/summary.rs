use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use valforge_model::{CompilerErrors, ErrorKind};

use crate::types::{CheckResult, GenerateResult};

pub fn print_generate_summary(result: &GenerateResult) {
    if result.has_errors() {
        eprintln!("Input: {}", result.input.display());
        print_diagnostics(&result.diagnostics);
        return;
    }
    if result.to_stdout {
        return;
    }

    println!("Input: {}", result.input.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Namespace"),
        header_cell("Records"),
        header_cell("Imports"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    let mut total_records = 0usize;
    for unit in &result.units {
        total_records += unit.records.len();
        let output = unit
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&unit.namespace),
            Cell::new(unit.records.join(", ")),
            dim_cell(if unit.dependencies.is_empty() {
                "-".to_string()
            } else {
                unit.dependencies.join(", ")
            }),
            Cell::new(output),
        ]);
    }
    println!("{table}");
    println!(
        "Generated validation for {total_records} record(s) in {} file(s)",
        result.units.len()
    );
}

pub fn print_check_summary(result: &CheckResult) {
    println!("Input: {}", result.input.display());
    if result.has_errors() {
        print_diagnostics(&result.diagnostics);
        return;
    }
    println!(
        "OK: {} rule(s) on {} record(s) passed type checking",
        result.rules, result.records
    );
}

/// Print every diagnostic as a table on stderr.
pub fn print_diagnostics(diagnostics: &CompilerErrors) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Location"),
        header_cell("Rule"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for error in diagnostics {
        table.add_row(vec![
            kind_cell(error.kind),
            Cell::new(error.location().unwrap_or_else(|| "-".to_string())),
            dim_cell(if error.rule.is_empty() { "-" } else { error.rule.as_str() }),
            Cell::new(&error.message),
        ]);
    }
    eprintln!("{table}");
    eprintln!("error: {} diagnostic(s); no code generated", diagnostics.len());
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn kind_cell(kind: ErrorKind) -> Cell {
    let color = match kind {
        ErrorKind::Missing => Color::Yellow,
        ErrorKind::Incompatible | ErrorKind::Invalid => Color::Red,
        ErrorKind::Duplicate => Color::Magenta,
    };
    Cell::new(kind.as_str())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
