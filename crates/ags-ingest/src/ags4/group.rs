//! Accumulates the lines of one AGS4 group into a dataset.

use std::collections::BTreeSet;

use ags_model::{GroupMetadata, TabularDataset};

use crate::error::ParseError;

/// Name of the leading column that keeps each row's descriptor.
pub const DESCRIPTOR_COLUMN: &str = "HEADING";

#[derive(Debug)]
pub(super) struct GroupBuilder {
    name: String,
    line: u64,
    headings: Option<Vec<String>>,
    units: Option<Vec<String>>,
    types: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl GroupBuilder {
    pub(super) fn new(name: String, line: u64) -> Self {
        Self {
            name,
            line,
            headings: None,
            units: None,
            types: None,
            rows: Vec::new(),
        }
    }

    pub(super) fn name(&self) -> &str {
        &self.name
    }

    pub(super) fn set_headings(&mut self, line: u64, fields: &[String]) -> Result<(), ParseError> {
        if self.headings.is_some() {
            return Err(ParseError::DuplicateHeadingRow {
                line,
                group: self.name.clone(),
            });
        }
        let raw: Vec<String> = fields.iter().map(|field| field.trim().to_string()).collect();
        self.headings = Some(dedupe_headings(&self.name, raw));
        Ok(())
    }

    /// Appends a UNIT, TYPE or DATA line as a row.
    pub(super) fn push_row(
        &mut self,
        line: u64,
        descriptor: &str,
        fields: Vec<String>,
    ) -> Result<(), ParseError> {
        let Some(headings) = self.headings.as_ref() else {
            return Err(ParseError::RowBeforeHeading {
                line,
                group: self.name.clone(),
                descriptor: descriptor.to_string(),
            });
        };
        if fields.len() != headings.len() {
            return Err(ParseError::FieldCount {
                line,
                group: self.name.clone(),
                expected: headings.len(),
                found: fields.len(),
            });
        }
        match descriptor {
            "UNIT" if self.units.is_none() => self.units = Some(fields.clone()),
            "TYPE" if self.types.is_none() => self.types = Some(fields.clone()),
            _ => {}
        }
        let mut row = Vec::with_capacity(fields.len() + 1);
        row.push(descriptor.to_string());
        row.extend(fields);
        self.rows.push(row);
        Ok(())
    }

    pub(super) fn finish(self) -> Result<(TabularDataset, GroupMetadata), ParseError> {
        let Some(headings) = self.headings else {
            return Err(ParseError::MissingHeading {
                line: self.line,
                group: self.name,
            });
        };
        let mut columns = Vec::with_capacity(headings.len() + 1);
        columns.push(DESCRIPTOR_COLUMN.to_string());
        columns.extend(headings.iter().cloned());
        let dataset = TabularDataset::new(self.name.clone(), columns, self.rows)?;
        let metadata = GroupMetadata {
            name: self.name,
            headings,
            units: self.units.unwrap_or_default(),
            types: self.types.unwrap_or_default(),
        };
        Ok((dataset, metadata))
    }
}

/// Renames repeated headings with a numeric suffix (`X`, `X_2`, `X_3`).
///
/// The descriptor column name is reserved, so a heading that collides with it
/// is renamed as well.
fn dedupe_headings(group: &str, headings: Vec<String>) -> Vec<String> {
    let mut taken: BTreeSet<String> = BTreeSet::new();
    taken.insert(DESCRIPTOR_COLUMN.to_string());
    let mut result = Vec::with_capacity(headings.len());
    for heading in headings {
        if taken.insert(heading.clone()) {
            result.push(heading);
            continue;
        }
        let mut suffix = 2usize;
        let renamed = loop {
            let candidate = format!("{heading}_{suffix}");
            if taken.insert(candidate.clone()) {
                break candidate;
            }
            suffix += 1;
        };
        tracing::warn!(
            group,
            heading = %heading,
            renamed = %renamed,
            "duplicate heading renamed"
        );
        result.push(renamed);
    }
    result
}
