//! Metadata that accompanies a parsed file.

use serde::Serialize;

/// Heading, unit and type rows declared by one group of the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupMetadata {
    pub name: String,
    pub headings: Vec<String>,
    pub units: Vec<String>,
    pub types: Vec<String>,
}

/// Per-group metadata in the order the groups appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetMetadata {
    pub groups: Vec<GroupMetadata>,
}

impl DatasetMetadata {
    pub fn group(&self, name: &str) -> Option<&GroupMetadata> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn headings(&self, name: &str) -> Option<&[String]> {
        self.group(name).map(|group| group.headings.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Where a loaded set of datasets came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub file_name: String,
    pub size_bytes: u64,
}

impl SourceInfo {
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
        }
    }
}
