#![deny(unsafe_code)]

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{DatasetError, Result};

/// An in-memory table of text cells.
///
/// Columns are unique and every row holds exactly one cell per column. The
/// dataset cannot be modified once built; counts are derived from the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabularDataset {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularDataset {
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DatasetError::EmptyName);
        }
        let mut seen = BTreeSet::new();
        for (index, column) in columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(DatasetError::EmptyColumnName {
                    dataset: name,
                    index,
                });
            }
            if !seen.insert(column.as_str()) {
                return Err(DatasetError::DuplicateColumn {
                    dataset: name,
                    column: column.clone(),
                });
            }
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(DatasetError::RowLength {
                    dataset: name,
                    row,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }
        }
        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    /// Builds a dataset with headers but no rows.
    pub fn empty(name: impl Into<String>, columns: Vec<String>) -> Result<Self> {
        Self::new(name, columns, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    /// Returns a single cell by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn counts_are_derived_from_data() {
        let dataset = TabularDataset::new(
            "LOCA",
            strings(&["LOCA_ID", "LOCA_TYPE"]),
            vec![strings(&["BH1", "CP"]), strings(&["BH2", "RC"])],
        )
        .unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.cell(1, "LOCA_TYPE"), Some("RC"));
        assert_eq!(dataset.cell(2, "LOCA_TYPE"), None);
        assert_eq!(dataset.cell(0, "MISSING"), None);
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = TabularDataset::empty("LOCA", strings(&["A", "B", "A"])).unwrap_err();
        assert_eq!(
            err,
            DatasetError::DuplicateColumn {
                dataset: "LOCA".to_string(),
                column: "A".to_string(),
            }
        );
    }

    #[test]
    fn rejects_misaligned_rows() {
        let err = TabularDataset::new("LOCA", strings(&["A", "B"]), vec![strings(&["1"])])
            .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::RowLength {
                row: 0,
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn rejects_blank_names() {
        assert_eq!(
            TabularDataset::empty("  ", strings(&["A"])).unwrap_err(),
            DatasetError::EmptyName
        );
        assert!(matches!(
            TabularDataset::empty("LOCA", strings(&["A", ""])).unwrap_err(),
            DatasetError::EmptyColumnName { index: 1, .. }
        ));
    }
}
