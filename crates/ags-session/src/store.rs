//! Session-scoped collection of loaded datasets.

use std::collections::HashMap;
use std::sync::Arc;

use ags_ingest::LoadedFile;
use ags_model::{DatasetMetadata, SourceInfo, TabularDataset};

use crate::error::StoreError;

/// Datasets of the most recently loaded file, in file order.
///
/// The store is only ever replaced as a whole through [`DatasetStore::set`]
/// or emptied through [`DatasetStore::clear`]. Datasets are shared behind
/// `Arc` and never mutated, so cloning a store is cheap.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    datasets: Vec<Arc<TabularDataset>>,
    index: HashMap<String, usize>,
    metadata: DatasetMetadata,
    source: Option<SourceInfo>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a loaded file, rejecting repeated table names.
    pub fn from_loaded(loaded: LoadedFile) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(loaded.datasets.len());
        for (position, dataset) in loaded.datasets.iter().enumerate() {
            if index.insert(dataset.name().to_string(), position).is_some() {
                return Err(StoreError::DuplicateName {
                    name: dataset.name().to_string(),
                });
            }
        }
        Ok(Self {
            datasets: loaded.datasets.into_iter().map(Arc::new).collect(),
            index,
            metadata: loaded.metadata,
            source: Some(loaded.source),
        })
    }

    /// Replaces the whole store with the contents of `loaded`.
    ///
    /// On error the store is left exactly as it was.
    pub fn set(&mut self, loaded: LoadedFile) -> Result<(), StoreError> {
        *self = Self::from_loaded(loaded)?;
        Ok(())
    }

    /// Drops every dataset and forgets the source file.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, name: &str) -> Result<&Arc<TabularDataset>, StoreError> {
        self.index
            .get(name)
            .map(|&position| &self.datasets[position])
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Table names in load order.
    pub fn keys(&self) -> Vec<&str> {
        self.datasets.iter().map(|dataset| dataset.name()).collect()
    }

    pub fn first_key(&self) -> Option<&str> {
        self.datasets.first().map(|dataset| dataset.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TabularDataset>> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// True once a file has been loaded, even if it held no tables.
    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&SourceInfo> {
        self.source.as_ref()
    }

    pub fn metadata(&self) -> &DatasetMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(names: &[&str]) -> LoadedFile {
        LoadedFile {
            datasets: names
                .iter()
                .map(|name| TabularDataset::empty(*name, vec!["HEADING".to_string()]).unwrap())
                .collect(),
            metadata: DatasetMetadata::default(),
            source: SourceInfo::new("site.ags", 10),
        }
    }

    #[test]
    fn keys_keep_load_order() {
        let store = DatasetStore::from_loaded(loaded(&["PROJ", "LOCA", "GEOL"])).unwrap();
        assert_eq!(store.keys(), vec!["PROJ", "LOCA", "GEOL"]);
        assert_eq!(store.first_key(), Some("PROJ"));
        assert!(store.contains("LOCA"));
    }

    #[test]
    fn get_reports_missing_tables() {
        let store = DatasetStore::from_loaded(loaded(&["PROJ"])).unwrap();
        assert_eq!(store.get("PROJ").unwrap().name(), "PROJ");
        assert_eq!(
            store.get("LOCA").unwrap_err(),
            StoreError::NotFound {
                name: "LOCA".to_string()
            }
        );
    }

    #[test]
    fn failed_set_leaves_store_untouched() {
        let mut store = DatasetStore::from_loaded(loaded(&["PROJ"])).unwrap();
        let err = store.set(loaded(&["LOCA", "LOCA"])).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName { .. }));
        assert_eq!(store.keys(), vec!["PROJ"]);
    }

    #[test]
    fn empty_file_is_loaded_but_empty() {
        let store = DatasetStore::from_loaded(loaded(&[])).unwrap();
        assert!(store.is_empty());
        assert!(store.is_loaded());
        assert!(!DatasetStore::new().is_loaded());
    }
}
