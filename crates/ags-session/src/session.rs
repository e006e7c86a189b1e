//! The session state machine.
//!
//! A [`Session`] owns one immutable [`SessionSnapshot`] of the dataset store
//! and the selection. Every event (load, select) builds a new snapshot and
//! swaps it in whole, then pushes the recomputed [`ViewProjection`] to
//! subscribers. Events go through `&mut self`, so they apply one at a time.

use std::path::Path;
use std::sync::Arc;

use ags_ingest::{LoadedFile, Loader};

use crate::background::{LoadResult, PendingLoad};
use crate::error::{ExportError, SessionError};
use crate::export::{self, CsvExport};
use crate::projection::{GridOptions, ViewProjection};
use crate::selection::SelectionState;
use crate::store::DatasetStore;

/// What happens to already loaded data when a new upload fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadFailurePolicy {
    /// Discard the store and selection, returning to "no file loaded".
    #[default]
    Clear,
    /// Keep showing the previously loaded file.
    KeepPrevious,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub load_failure_policy: LoadFailurePolicy,
    pub grid: GridOptions,
}

/// Store and selection, always observed together.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub store: DatasetStore,
    pub selection: SelectionState,
}

impl SessionSnapshot {
    fn loaded(store: DatasetStore) -> Self {
        let selection = SelectionState::for_store(&store);
        Self { store, selection }
    }

    pub fn projection(&self, grid: GridOptions) -> ViewProjection {
        ViewProjection::compute(&self.store, &self.selection, grid)
    }
}

/// Identifies a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ViewProjection) + Send>;

pub struct Session {
    loader: Loader,
    config: SessionConfig,
    snapshot: Arc<SessionSnapshot>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    pending: Option<PendingLoad>,
}

impl Session {
    pub fn new(loader: Loader, config: SessionConfig) -> Self {
        Self {
            loader,
            config,
            snapshot: Arc::new(SessionSnapshot::default()),
            observers: Vec::new(),
            next_subscription: 0,
            pending: None,
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Shared handle to the current state; later events never modify it.
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn store(&self) -> &DatasetStore {
        &self.snapshot.store
    }

    pub fn selection(&self) -> &SelectionState {
        &self.snapshot.selection
    }

    pub fn projection(&self) -> ViewProjection {
        self.snapshot.projection(self.config.grid)
    }

    /// Registers `observer`, calling it once now and after every change.
    pub fn subscribe<F>(&mut self, mut observer: F) -> SubscriptionId
    where
        F: FnMut(&ViewProjection) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        observer(&self.projection());
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// True while a background load is running.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Loads an uploaded buffer and returns the number of tables.
    pub fn upload(&mut self, file_name: &str, bytes: &[u8]) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        let result = self.loader.load_bytes(file_name, bytes);
        self.apply_load(result)
    }

    /// Loads a file from disk and returns the number of tables.
    pub fn upload_path(&mut self, path: &Path) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        let result = self.loader.load_path(path);
        self.apply_load(result)
    }

    /// Starts parsing an uploaded buffer on a worker thread.
    ///
    /// Further uploads are rejected with [`SessionError::LoadInProgress`]
    /// until the result has been applied by [`Session::poll_background`] or
    /// [`Session::wait_background`].
    pub fn start_upload(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.pending = Some(PendingLoad::spawn_bytes(
            self.loader.clone(),
            file_name.to_string(),
            bytes,
        ));
        Ok(())
    }

    /// Starts reading and parsing a file on a worker thread.
    pub fn start_upload_path(&mut self, path: &Path) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.pending = Some(PendingLoad::spawn_path(
            self.loader.clone(),
            path.to_path_buf(),
        ));
        Ok(())
    }

    /// Applies a finished background load, if there is one.
    pub fn poll_background(&mut self) -> Option<Result<usize, SessionError>> {
        let result = self.pending.as_ref()?.try_take()?;
        self.pending = None;
        Some(self.apply_load(result))
    }

    /// Blocks until the running background load finishes and applies it.
    pub fn wait_background(&mut self) -> Option<Result<usize, SessionError>> {
        let pending = self.pending.take()?;
        let result = pending.wait();
        Some(self.apply_load(result))
    }

    /// Applies the outcome of a load.
    ///
    /// Success replaces the store and resets the selection in one step.
    /// Failure follows [`SessionConfig::load_failure_policy`] and is returned
    /// to the caller exactly once. Rejected with
    /// [`SessionError::LoadInProgress`] while a background load is pending.
    pub fn apply_load(&mut self, result: LoadResult) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        match result.map_err(SessionError::from).and_then(build_store) {
            Ok(store) => {
                let tables = store.len();
                tracing::info!(
                    file = store.source().map_or("", |source| source.file_name.as_str()),
                    tables,
                    "replaced dataset store"
                );
                self.replace(SessionSnapshot::loaded(store));
                Ok(tables)
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    policy = ?self.config.load_failure_policy,
                    "load failed"
                );
                if self.config.load_failure_policy == LoadFailurePolicy::Clear {
                    self.replace(SessionSnapshot::default());
                }
                Err(error)
            }
        }
    }

    /// Makes `name` the active table.
    pub fn select(&mut self, name: &str) -> Result<(), SessionError> {
        if self.selection().get() == Some(name) {
            return Ok(());
        }
        let mut next = (*self.snapshot).clone();
        if let Err(error) = next.selection.set(name, &next.store) {
            tracing::error!(%error, "rejected selection");
            return Err(error.into());
        }
        tracing::debug!(table = name, "selected table");
        self.replace(next);
        Ok(())
    }

    /// Prepares the CSV export of the active table.
    pub fn export(&self) -> Result<CsvExport, ExportError> {
        export::export(&self.snapshot.store, &self.snapshot.selection)
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::LoadInProgress);
        }
        Ok(())
    }

    fn replace(&mut self, snapshot: SessionSnapshot) {
        self.snapshot = Arc::new(snapshot);
        if self.observers.is_empty() {
            return;
        }
        let projection = self.projection();
        for (_, observer) in &mut self.observers {
            observer(&projection);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Loader::default(), SessionConfig::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("loader", &self.loader)
            .field("config", &self.config)
            .field("tables", &self.snapshot.store.len())
            .field("selection", &self.snapshot.selection.get())
            .field("observers", &self.observers.len())
            .field("loading", &self.pending.is_some())
            .finish()
    }
}

fn build_store(loaded: LoadedFile) -> Result<DatasetStore, SessionError> {
    Ok(DatasetStore::from_loaded(loaded)?)
}
