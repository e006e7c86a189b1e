//! AGS4 text format parser.
//!
//! An AGS4 file is a sequence of comma-separated, double-quoted records. The
//! first field of each record is its descriptor:
//!
//! ```text
//! "GROUP","LOCA"
//! "HEADING","LOCA_ID","LOCA_TYPE"
//! "UNIT","",""
//! "TYPE","ID","PA"
//! "DATA","BH1","CP"
//! ```
//!
//! Each group becomes one [`TabularDataset`](ags_model::TabularDataset) whose
//! first column (`HEADING`) keeps the descriptor of every row, so the UNIT and
//! TYPE rows stay visible ahead of the DATA rows. Cells are kept as text.

mod group;

use std::collections::BTreeSet;

use csv::{ReaderBuilder, StringRecord};

use crate::error::ParseError;
use crate::parser::{ParsedTables, TableParser};

use self::group::GroupBuilder;

pub use self::group::DESCRIPTOR_COLUMN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Descriptor {
    Group,
    Heading,
    Unit,
    Type,
    Data,
}

impl Descriptor {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "GROUP" => Some(Self::Group),
            "HEADING" => Some(Self::Heading),
            "UNIT" => Some(Self::Unit),
            "TYPE" => Some(Self::Type),
            "DATA" => Some(Self::Data),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Group => "GROUP",
            Self::Heading => "HEADING",
            Self::Unit => "UNIT",
            Self::Type => "TYPE",
            Self::Data => "DATA",
        }
    }
}

/// Parser for AGS4 files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ags4Parser;

impl Ags4Parser {
    pub fn new() -> Self {
        Self
    }
}

impl TableParser for Ags4Parser {
    fn format_name(&self) -> &'static str {
        "AGS4"
    }

    fn parse(&self, bytes: &[u8]) -> Result<ParsedTables, ParseError> {
        let text = std::str::from_utf8(bytes).map_err(|err| ParseError::Encoding {
            offset: err.valid_up_to(),
        })?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        parse_ags4(text)
    }
}

fn parse_ags4(text: &str) -> Result<ParsedTables, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut parsed = ParsedTables::default();
    let mut seen_groups = BTreeSet::new();
    let mut current: Option<GroupBuilder> = None;

    for record in reader.records() {
        let record = record.map_err(|err| ParseError::Record {
            line: err.position().map_or(0, csv::Position::line),
            message: err.to_string(),
        })?;
        if is_blank(&record) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        let raw_descriptor = record.get(0).unwrap_or_default().trim();
        let Some(descriptor) = Descriptor::parse(raw_descriptor) else {
            return Err(ParseError::UnknownDescriptor {
                line,
                descriptor: raw_descriptor.to_string(),
            });
        };
        let fields: Vec<String> = record.iter().skip(1).map(str::to_string).collect();

        match descriptor {
            Descriptor::Group => {
                let name = fields.first().map(|name| name.trim()).unwrap_or_default();
                if name.is_empty() {
                    return Err(ParseError::MissingGroupName { line });
                }
                if !seen_groups.insert(name.to_string()) {
                    return Err(ParseError::DuplicateGroup {
                        line,
                        group: name.to_string(),
                    });
                }
                if let Some(done) = current.take() {
                    finish_group(&mut parsed, done)?;
                }
                current = Some(GroupBuilder::new(name.to_string(), line));
            }
            Descriptor::Heading => {
                let group = current.as_mut().ok_or_else(|| ParseError::RowOutsideGroup {
                    line,
                    descriptor: descriptor.as_str().to_string(),
                })?;
                group.set_headings(line, &fields)?;
            }
            Descriptor::Unit | Descriptor::Type | Descriptor::Data => {
                let group = current.as_mut().ok_or_else(|| ParseError::RowOutsideGroup {
                    line,
                    descriptor: descriptor.as_str().to_string(),
                })?;
                group.push_row(line, descriptor.as_str(), fields)?;
            }
        }
    }

    if let Some(done) = current.take() {
        finish_group(&mut parsed, done)?;
    }
    Ok(parsed)
}

fn finish_group(parsed: &mut ParsedTables, group: GroupBuilder) -> Result<(), ParseError> {
    let name = group.name().to_string();
    let (dataset, metadata) = group.finish()?;
    tracing::debug!(
        group = %name,
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "parsed group"
    );
    parsed.datasets.push(dataset);
    parsed.metadata.groups.push(metadata);
    Ok(())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}
