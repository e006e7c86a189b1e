//! The active table selection.

use crate::error::SelectionError;
use crate::store::DatasetStore;

/// Name of the active table, if any.
///
/// Kept in step with a [`DatasetStore`]: empty exactly when the store is
/// empty, otherwise always a name the store contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    active: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection matching a freshly replaced store.
    pub fn for_store(store: &DatasetStore) -> Self {
        let mut selection = Self::new();
        selection.on_store_replaced(store);
        selection
    }

    pub fn get(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Selects `name`, which must be one of `store.keys()`.
    ///
    /// The current selection is kept when `name` is unknown.
    pub fn set(&mut self, name: &str, store: &DatasetStore) -> Result<(), SelectionError> {
        if !store.contains(name) {
            return Err(SelectionError::InvalidSelection {
                name: name.to_string(),
                available: store.keys().into_iter().map(str::to_string).collect(),
            });
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Resets to the first table of a replaced store, or to nothing.
    pub fn on_store_replaced(&mut self, store: &DatasetStore) {
        self.active = store.first_key().map(str::to_string);
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn is_none(&self) -> bool {
        self.active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use ags_ingest::LoadedFile;
    use ags_model::{DatasetMetadata, SourceInfo, TabularDataset};

    use super::*;

    fn store(names: &[&str]) -> DatasetStore {
        DatasetStore::from_loaded(LoadedFile {
            datasets: names
                .iter()
                .map(|name| TabularDataset::empty(*name, vec!["HEADING".to_string()]).unwrap())
                .collect(),
            metadata: DatasetMetadata::default(),
            source: SourceInfo::new("site.ags", 0),
        })
        .unwrap()
    }

    #[test]
    fn replacement_selects_first_key() {
        let mut selection = SelectionState::new();
        selection.on_store_replaced(&store(&["PROJ", "LOCA"]));
        assert_eq!(selection.get(), Some("PROJ"));

        selection.on_store_replaced(&store(&[]));
        assert_eq!(selection.get(), None);
    }

    #[test]
    fn unknown_name_keeps_current_selection() {
        let store = store(&["PROJ", "LOCA"]);
        let mut selection = SelectionState::for_store(&store);
        let err = selection.set("GEOL", &store).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidSelection { ref name, .. } if name == "GEOL"));
        assert_eq!(selection.get(), Some("PROJ"));

        selection.set("LOCA", &store).unwrap();
        assert_eq!(selection.get(), Some("LOCA"));
    }

    #[test]
    fn nothing_can_be_selected_in_an_empty_store() {
        let mut selection = SelectionState::new();
        assert!(selection.set("PROJ", &DatasetStore::new()).is_err());
        assert!(selection.is_none());
    }
}
