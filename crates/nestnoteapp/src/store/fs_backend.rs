use super::backend::StorageBackend;
use super::snapshot::Snapshot;
use crate::error::{NestnoteError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Keeps the state blob as a single JSON file inside a data directory.
pub struct FsBackend {
    root: PathBuf,
    state_file: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            state_file: "state.json".to_string(),
        }
    }

    pub fn with_state_file(mut self, name: &str) -> Self {
        if name.ends_with(".json") {
            self.state_file = name.to_string();
        } else {
            self.state_file = format!("{}.json", name);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn state_path(&self) -> PathBuf {
        self.root.join(&self.state_file)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(NestnoteError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_snapshot(&self) -> Result<Snapshot> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(Snapshot::default());
        }
        let content = fs::read_to_string(path).map_err(NestnoteError::Io)?;
        Snapshot::from_json(&content)
    }

    fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = snapshot.to_json()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".state-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(NestnoteError::Io)?;
        fs::rename(&tmp_path, self.state_path()).map_err(NestnoteError::Io)?;

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.state_path()
    }
}
