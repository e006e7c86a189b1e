//! Shared fixtures for session integration tests.

#![allow(dead_code)]

use ags_ingest::LoadedFile;
use ags_model::{DatasetMetadata, SourceInfo, TabularDataset};

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

pub fn dataset(name: &str, columns: &[&str], rows: &[&[&str]]) -> TabularDataset {
    let rows = rows.iter().map(|row| strings(row)).collect();
    TabularDataset::new(name, strings(columns), rows).expect("valid dataset")
}

pub fn loaded(file_name: &str, datasets: Vec<TabularDataset>) -> LoadedFile {
    LoadedFile {
        datasets,
        metadata: DatasetMetadata::default(),
        source: SourceInfo::new(file_name, 0),
    }
}

/// Table `A` with 3 rows and table `B` with none, both with two columns.
pub fn scenario() -> LoadedFile {
    loaded(
        "scenario.ags",
        vec![
            dataset(
                "A",
                &["C1", "C2"],
                &[&["1", "x"], &["2", "y"], &["3", "z"]],
            ),
            dataset("B", &["C1", "C2"], &[]),
        ],
    )
}

pub const SITE: &str = r#""GROUP","PROJ"
"HEADING","PROJ_ID","PROJ_NAME"
"UNIT","",""
"TYPE","ID","X"
"DATA","121415","Harbour Road, Phase 2"

"GROUP","LOCA"
"HEADING","LOCA_ID","LOCA_TYPE","LOCA_FDEP"
"UNIT","","","m"
"TYPE","ID","PA","2DP"
"DATA","BH1","CP","12.50"
"DATA","BH2","RC","8.00"
"#;
