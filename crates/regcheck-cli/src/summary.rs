use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use regcheck_model::{CheckRecord, Severity, StatusCounts};
use regcheck_validate::count_statuses;

use crate::types::ValidateOutcome;

pub fn print_summary(outcome: &ValidateOutcome) {
    println!("Submission: {}", outcome.root.display());
    match &outcome.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: dry run, no reports written"),
    }

    let run = &outcome.run;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Validator"),
        header_cell("Pass"),
        header_cell("Warn"),
        header_cell("Fail"),
        header_cell("Error"),
        header_cell("Result"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);

    for result in &run.validation {
        let counts = count_statuses([result]);
        table.add_row(counts_row(
            file_cell(result.file_name()),
            Cell::new(result.kind().label()),
            &counts,
            severity_cell(result.worst()),
        ));
    }
    table.add_row(counts_row(
        total_cell("TOTAL"),
        total_cell("Validation"),
        &run.summary.validation,
        dim_cell("-"),
    ));
    table.add_row(counts_row(
        total_cell("TOTAL"),
        total_cell("Integrity"),
        &run.summary.integrity,
        dim_cell("-"),
    ));
    println!("{table}");

    print_issue_table(outcome);

    println!();
    println!(
        "Files validated: {}  Overall compliance: {}",
        run.summary.files_validated,
        run.summary.compliance
    );
    for path in &outcome.reports {
        println!("Report: {}", path.display());
    }
}

fn print_issue_table(outcome: &ValidateOutcome) {
    let run = &outcome.run;
    let validation = run
        .validation
        .iter()
        .map(|result| (result as &dyn CheckRecord, result.kind().label()));
    let integrity = run
        .integrity
        .iter()
        .map(|result| (result as &dyn CheckRecord, "Integrity"));

    let mut rows: Vec<(&str, &str, Severity, &str)> = validation
        .chain(integrity)
        .flat_map(|(record, source)| {
            let worst = record.worst();
            record
                .issues()
                .iter()
                .map(move |issue| (record.file_name(), source, worst, issue.as_str()))
        })
        .collect();
    if rows.is_empty() {
        return;
    }
    rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Source"),
        header_cell("Severity"),
        header_cell("Issue"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for (file, source, worst, issue) in rows {
        table.add_row(vec![
            file_cell(file),
            Cell::new(source),
            severity_cell(worst),
            Cell::new(issue),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn counts_row(file: Cell, validator: Cell, counts: &StatusCounts, result: Cell) -> Vec<Cell> {
    vec![
        file,
        validator,
        count_cell(counts.pass, Color::Green),
        count_cell(counts.warn, Color::Yellow),
        count_cell(counts.fail, Color::Red),
        count_cell(counts.error, Color::Red),
        result,
    ]
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() == 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Pass => Color::Green,
        Severity::Warn => Color::Yellow,
        Severity::Fail | Severity::Error => Color::Red,
    }
}

fn severity_cell(severity: Severity) -> Cell {
    let cell = Cell::new(severity.as_str()).fg(severity_color(severity));
    if severity.is_blocking() {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn file_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn total_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
