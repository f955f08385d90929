use super::backend::StorageBackend;
use super::snapshot::Snapshot;
use crate::error::{NestnoteError, Result};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Keeps the serialized blob, not the live snapshot, so a save/load cycle goes
/// through the same JSON path as the file backend.
///
/// Uses `RefCell` for interior mutability since nestnote is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    blob: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already serialized blob, as if a previous session had saved it.
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(raw.into())),
            simulate_write_error: RefCell::new(false),
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// The last saved blob, if any.
    pub fn raw(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn load_snapshot(&self) -> Result<Snapshot> {
        match self.blob.borrow().as_deref() {
            Some(raw) => Snapshot::from_json(raw),
            None => Ok(Snapshot::default()),
        }
    }

    fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(NestnoteError::Store("Simulated write error".to_string()));
        }
        let raw = snapshot.to_json()?;
        *self.blob.borrow_mut() = Some(raw);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://state.json")
    }
}
