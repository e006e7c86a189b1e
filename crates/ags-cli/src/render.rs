//! Terminal rendering of session views.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::{Value, json};

use ags_session::{DatasetStore, GridView, ViewProjection, ViewState, format_count};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Lists every table of the store, marking the active one.
pub fn tables_table(store: &DatasetStore, active: Option<&str>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for dataset in store.iter() {
        let is_active = active == Some(dataset.name());
        let name = if is_active {
            Cell::new(dataset.name())
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(dataset.name())
        };
        table.add_row(vec![
            Cell::new(if is_active { "*" } else { "" }),
            name,
            Cell::new(format_count(dataset.row_count())),
            Cell::new(dataset.column_count()),
        ]);
    }
    table
}

pub fn grid_table(grid: &GridView) -> Table {
    let mut table = Table::new();
    table.set_header(grid.columns.iter().map(|column| header_cell(column)));
    apply_table_style(&mut table);
    for row in &grid.rows {
        table.add_row(row.iter().map(|value| {
            if value.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(value)
            }
        }));
    }
    table
}

/// Renders the grid of the active table, or the empty-state message.
pub fn render_view(view: &ViewProjection) -> String {
    match (&view.grid, view.state) {
        (Some(grid), ViewState::Active) => {
            let mut out = format!("{}\n{}", view.header_label, grid_table(grid));
            if grid.is_truncated() {
                out.push_str(&format!(
                    "\nshowing first {} of {} rows",
                    format_count(grid.rows.len()),
                    format_count(grid.total_rows)
                ));
            }
            out
        }
        (_, state) => format!("{}\n{}", state.title(), state.hint()),
    }
}

/// The table list as a JSON document.
pub fn tables_json(store: &DatasetStore) -> Value {
    let tables: Vec<Value> = store
        .iter()
        .map(|dataset| {
            json!({
                "name": dataset.name(),
                "rows": dataset.row_count(),
                "columns": dataset.column_count(),
                "headings": store.metadata().headings(dataset.name()),
            })
        })
        .collect();
    json!({
        "file": store.source(),
        "tables": tables,
    })
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ags_session::{GridOptions, SelectionState};

    #[test]
    fn empty_session_renders_the_upload_prompt() {
        let view = ViewProjection::compute(
            &DatasetStore::new(),
            &SelectionState::new(),
            GridOptions::default(),
        );
        assert_eq!(
            render_view(&view),
            "No file uploaded\nPlease upload an AGS4 file to begin exploring"
        );
    }

    #[test]
    fn empty_store_has_no_table_rows() {
        let store = DatasetStore::new();
        let json = tables_json(&store);
        assert_eq!(json["tables"], json!([]));
        assert_eq!(json["file"], Value::Null);
    }
}
