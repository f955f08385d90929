use super::fs_backend::FsBackend;
use super::note_store::NoteStore;
use crate::config::NestnoteConfig;
use crate::error::Result;
use std::path::PathBuf;

pub type FileStore = NoteStore<FsBackend>;

impl FileStore {
    /// Opens (and repairs) the state kept in `root`, configured by `config`.
    pub fn open_dir(root: PathBuf, config: &NestnoteConfig) -> Result<Self> {
        let backend = FsBackend::new(root).with_state_file(&config.state_file());
        Ok(NoteStore::open(backend)?.with_config(config))
    }
}
