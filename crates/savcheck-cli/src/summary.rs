use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use savcheck_core::{CheckOutcome, display_value};
use savcheck_model::{Diagnostic, DiagnosticSeverity};
use savcheck_sav::{SavDataset, SavVarType};

pub fn print_report(outcome: &CheckOutcome) {
    if let Some(label) = &outcome.meta.file_label {
        println!("File label: {label}");
    }
    println!(
        "Cases: {}  Variables: {}",
        outcome.meta.row_count,
        outcome.meta.column_count()
    );
    if !outcome.has_duplicates() {
        println!("No duplicated IDs found.");
        print_diagnostics(outcome.diagnostics.iter());
        return;
    }
    let report = &outcome.report;
    let names = report.get_column_names_owned();
    let mut table = Table::new();
    table.set_header(
        names
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_report_table_style(&mut table);
    for idx in 0..report.height() {
        let mut row = Vec::with_capacity(names.len());
        for name in &names {
            let value = savcheck_core::data_utils::cell(report, name.as_str(), idx);
            row.push(Cell::new(display_value(value)));
        }
        table.add_row(row);
    }
    println!(
        "Duplicated IDs: {} record(s) share an identifier",
        report.height()
    );
    println!("{table}");
    print_diagnostics(outcome.diagnostics.iter());
}

pub fn print_diagnostics<'a>(diagnostics: impl Iterator<Item = &'a Diagnostic>) {
    let entries: Vec<&Diagnostic> = diagnostics.collect();
    if entries.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Column"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for diagnostic in entries {
        table.add_row(vec![
            severity_cell(diagnostic.severity),
            Cell::new(diagnostic.code.clone()),
            match &diagnostic.column {
                Some(column) => Cell::new(column.clone()),
                None => dim_cell("-"),
            },
            Cell::new(diagnostic.message.clone()),
        ]);
    }
    println!();
    println!("Diagnostics:");
    println!("{table}");
}

pub fn print_dictionary(dataset: &SavDataset) {
    if let Some(label) = &dataset.file_label {
        println!("File label: {label}");
    }
    println!(
        "Cases: {}  Variables: {}",
        dataset.num_rows(),
        dataset.columns.len()
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variable"),
        header_cell("Type"),
        header_cell("Label"),
        header_cell("Value labels"),
    ]);
    apply_dictionary_table_style(&mut table);
    for column in &dataset.columns {
        let type_cell = match column.var_type {
            SavVarType::Numeric => Cell::new("numeric").fg(Color::Blue),
            SavVarType::Text { width } => Cell::new(format!("text({width})")).fg(Color::Green),
        };
        let label_cell = match &column.label {
            Some(label) => Cell::new(label.clone()),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(column.name.clone()).add_attribute(Attribute::Bold),
            type_cell,
            label_cell,
            value_labels_cell(dataset, &column.name),
        ]);
    }
    println!("{table}");
}

fn value_labels_cell(dataset: &SavDataset, name: &str) -> Cell {
    match dataset.value_labels.get(name) {
        Some(labels) => {
            let rendered: Vec<String> = labels
                .iter()
                .map(|(value, label)| format!("{value}={label}"))
                .collect();
            Cell::new(rendered.join(", "))
        }
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_dictionary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: DiagnosticSeverity) -> Cell {
    match severity {
        DiagnosticSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        DiagnosticSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
        DiagnosticSeverity::Info => Cell::new("INFO").fg(Color::DarkGrey),
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
