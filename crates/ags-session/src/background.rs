//! Off-thread file loading.
//!
//! Parsing runs on a worker thread and the result comes back over a channel;
//! the session polls for it and applies it like any other load event.

use std::path::PathBuf;
use std::thread;

use ags_ingest::{LoadError, LoadedFile, Loader};
use crossbeam_channel::{Receiver, TryRecvError, bounded};

/// Outcome delivered by the worker.
pub type LoadResult = Result<LoadedFile, LoadError>;

/// Handle to a load running on a worker thread.
#[derive(Debug)]
pub struct PendingLoad {
    file_name: String,
    receiver: Receiver<LoadResult>,
}

impl PendingLoad {
    /// Parses an uploaded buffer on a worker thread.
    pub fn spawn_bytes(loader: Loader, file_name: String, bytes: Vec<u8>) -> Self {
        let worker_name = file_name.clone();
        Self::spawn(file_name, move || loader.load_bytes(&worker_name, &bytes))
    }

    /// Reads and parses a file on a worker thread.
    pub fn spawn_path(loader: Loader, path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::spawn(file_name, move || loader.load_path(&path))
    }

    fn spawn<F>(file_name: String, job: F) -> Self
    where
        F: FnOnce() -> LoadResult + Send + 'static,
    {
        let (sender, receiver) = bounded(1);
        tracing::debug!(file = %file_name, "starting background load");
        thread::spawn(move || {
            let _ = sender.send(job());
        });
        Self {
            file_name,
            receiver,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the result if the worker has finished.
    pub fn try_take(&self) -> Option<LoadResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(self.interrupted())),
        }
    }

    /// Blocks until the worker has finished.
    pub fn wait(self) -> LoadResult {
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(self.interrupted()))
    }

    fn interrupted(&self) -> LoadError {
        LoadError::Interrupted {
            file_name: self.file_name.clone(),
        }
    }
}
