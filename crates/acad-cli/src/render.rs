//! Terminal rendering for catalog paths, options, and load results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use acad_core::{Flattened, SkippedBranch};
use acad_model::{AcademicPath, Dimension};
use acad_store::{CatalogList, HierarchyStore, LoadReport};

use crate::catalog::{OptionsReport, ReconcileReport};

/// One path per line, `/`-separated with `-` for absent levels.
pub fn path_listing(paths: &[AcademicPath]) -> String {
    paths
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn paths_table(flattened: &Flattened) -> Table {
    let mut table = Table::new();
    table.set_header(
        Dimension::ALL
            .into_iter()
            .map(|dim| header_cell(dim.label()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for path in &flattened.paths {
        table.add_row(
            Dimension::ALL
                .into_iter()
                .map(|dim| match path.value(dim) {
                    Some(value) if dim == Dimension::Modalidad && path.has_placeholder_modalidad() => {
                        dim_cell(value)
                    }
                    Some(value) => Cell::new(value),
                    None => dim_cell("-"),
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}

pub fn skipped_table(skipped: &[SkippedBranch]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Depth"),
        header_cell("Reason"),
        header_cell("Exam type"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    for branch in skipped {
        table.add_row(vec![
            Cell::new(branch.depth),
            Cell::new(format!("{:?}", branch.reason)).fg(Color::Yellow),
            optional_cell(branch.exam_type_id),
            optional_cell(branch.source_id),
        ]);
    }
    table
}

/// Comma-separated values, or a marker when the dimension is disabled or empty.
pub fn options_line(report: &OptionsReport) -> String {
    if !report.enabled {
        return format!("{}: (disabled)", report.dimension);
    }
    if report.values.is_empty() {
        return format!("{}: (none)", report.dimension);
    }
    let values: Vec<String> = report.values.iter().map(ToString::to_string).collect();
    format!("{}: {}", report.dimension, values.join(", "))
}

pub fn reconcile_lines(report: &ReconcileReport) -> String {
    let mut lines = vec![
        format!("before: {}", report.before),
        format!("after:  {}", report.after),
    ];
    if report.is_unchanged() {
        lines.push("unchanged".to_string());
    } else {
        let reset: Vec<&str> = report.reset.iter().copied().map(Dimension::label).collect();
        lines.push(format!("reset: {}", reset.join(", ")));
    }
    lines.join("\n")
}

pub fn load_table(store: &HierarchyStore, report: &LoadReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("List"),
        header_cell("Items"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (list, count) in store.counts() {
        table.add_row(vec![Cell::new(list), Cell::new(count), status_cell(report, list)]);
    }
    table
}

fn status_cell(report: &LoadReport, list: CatalogList) -> Cell {
    match report.failures.iter().find(|failure| failure.list == list) {
        Some(failure) => Cell::new(&failure.message).fg(Color::Red),
        None => Cell::new("ok").fg(Color::Green),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<u32>) -> Cell {
    match value {
        Some(id) => Cell::new(id),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
