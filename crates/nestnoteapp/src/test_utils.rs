use crate::api::NestnoteApi;
use crate::config::NestnoteConfig;
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// A file-backed API in a throwaway directory.
pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub api: NestnoteApi<FileStore>,
    pub root: PathBuf,
    pub config: NestnoteConfig,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(NestnoteConfig::default())
    }

    pub fn with_config(config: NestnoteConfig) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::open_dir(root.clone(), &config).expect("failed to open store");
        Self {
            _temp_dir: temp_dir,
            api: NestnoteApi::new(store).with_config(&config),
            root,
            config,
        }
    }

    /// A second API over the same directory and configuration, as a fresh
    /// process would see it.
    pub fn reopen(&self) -> NestnoteApi<FileStore> {
        let store =
            FileStore::open_dir(self.root.clone(), &self.config).expect("failed to reopen store");
        NestnoteApi::new(store).with_config(&self.config)
    }
}
