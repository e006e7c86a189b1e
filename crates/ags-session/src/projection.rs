//! Derived view of the session state.
//!
//! [`ViewProjection::compute`] is a pure function of a [`DatasetStore`] and a
//! [`SelectionState`]. It never mutates either input and is recomputed after
//! every transition instead of being cached alongside them.

use ags_model::{SourceInfo, TabularDataset};
use serde::Serialize;

use crate::selection::SelectionState;
use crate::store::DatasetStore;

/// Default number of rows copied into a [`GridView`].
pub const DEFAULT_GRID_ROWS: usize = 1000;

/// Which of the view states the projection is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// Nothing has been loaded in this session.
    NoFileLoaded,
    /// A file was loaded but contained no tables.
    NoTables,
    /// Tables are available but none is selected.
    NoTableSelected,
    /// The selection names a table the store does not hold.
    TableNotFound,
    /// A table is selected and present.
    Active,
}

impl ViewState {
    /// Heading shown in place of the grid.
    pub fn title(self) -> &'static str {
        match self {
            Self::NoFileLoaded => "No file uploaded",
            Self::NoTables => "No tables in file",
            Self::NoTableSelected | Self::TableNotFound => "Select a table",
            Self::Active => "Table data",
        }
    }

    /// Longer hint shown under [`ViewState::title`].
    pub fn hint(self) -> &'static str {
        match self {
            Self::NoFileLoaded => "Please upload an AGS4 file to begin exploring",
            Self::NoTables => "The uploaded file does not contain any groups",
            Self::NoTableSelected | Self::TableNotFound => {
                "Choose a table from the list to view its contents"
            }
            Self::Active => "",
        }
    }
}

/// Limits applied when copying rows into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub max_rows: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_GRID_ROWS,
        }
    }
}

/// The leading rows of the active table, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl GridView {
    pub fn from_dataset(dataset: &TabularDataset, options: GridOptions) -> Self {
        Self {
            columns: dataset.columns().to_vec(),
            rows: dataset
                .rows()
                .iter()
                .take(options.max_rows)
                .cloned()
                .collect(),
            total_rows: dataset.row_count(),
        }
    }

    /// True when rows were left out because of [`GridOptions::max_rows`].
    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_rows
    }
}

/// Everything a front-end needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewProjection {
    pub state: ViewState,
    pub table_names: Vec<String>,
    pub active_name: Option<String>,
    pub row_count: usize,
    pub column_count: usize,
    /// Short status line, e.g. `3 rows × 2 columns`.
    pub summary_label: String,
    /// Banner over the grid, e.g. `Showing LOCA • 1,204 rows • 9 columns`.
    pub header_label: String,
    pub source: Option<SourceInfo>,
    pub grid: Option<GridView>,
}

impl ViewProjection {
    pub fn compute(
        store: &DatasetStore,
        selection: &SelectionState,
        options: GridOptions,
    ) -> Self {
        let table_names: Vec<String> = store.keys().into_iter().map(str::to_string).collect();
        let active_name = selection.get().map(str::to_string);
        let active = selection.get().and_then(|name| store.get(name).ok());

        let state = match (active_name.as_ref(), active) {
            (Some(_), Some(_)) => ViewState::Active,
            (Some(_), None) => ViewState::TableNotFound,
            (None, _) if !store.is_loaded() => ViewState::NoFileLoaded,
            (None, _) if store.is_empty() => ViewState::NoTables,
            (None, _) => ViewState::NoTableSelected,
        };

        let (row_count, column_count) = active
            .map(|dataset| (dataset.row_count(), dataset.column_count()))
            .unwrap_or_default();

        let summary_label = match state {
            ViewState::Active => format!("{row_count} rows × {column_count} columns"),
            ViewState::TableNotFound => "Table not found".to_string(),
            _ => "No table selected".to_string(),
        };
        let header_label = match (state, active) {
            (ViewState::Active, Some(dataset)) => format!(
                "Showing {} • {} rows • {} columns",
                dataset.name(),
                format_count(row_count),
                column_count
            ),
            _ => String::new(),
        };

        Self {
            state,
            table_names,
            active_name,
            row_count,
            column_count,
            summary_label,
            header_label,
            source: store.source().cloned(),
            grid: active.map(|dataset| GridView::from_dataset(dataset, options)),
        }
    }

    /// Export is only offered while a present table is selected.
    pub fn can_export(&self) -> bool {
        self.state == ViewState::Active
    }

    /// Download file name for the active table.
    pub fn export_file_name(&self) -> Option<String> {
        if !self.can_export() {
            return None;
        }
        self.active_name
            .as_deref()
            .map(crate::export::export_file_name)
    }
}

/// Formats a count with `,` thousands separators.
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
