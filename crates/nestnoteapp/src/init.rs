//! # Initialization
//!
//! Wires a ready-to-use [`NestnoteApi`] from the environment: where the data
//! lives, what the configuration says, and a [`FileStore`] opened on the state
//! file.
//!
//! ## Data Directory Resolution
//!
//! 1. An explicit override (the CLI's `--data <dir>`).
//! 2. The `NESTNOTE_DATA` environment variable.
//! 3. The OS data directory for nestnote (via the `directories` crate).
//!
//! ## Configuration
//!
//! `nestnote.toml` is looked up in the OS config directory first and then in
//! the data directory, merged with [`SearchMode::Merge`] so the data directory
//! overrides global settings key by key. A missing or unreadable file falls
//! back to the compiled defaults.

use crate::api::NestnoteApi;
use crate::config::NestnoteConfig;
use crate::error::{NestnoteError, Result};
use crate::store::fs::FileStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_ENV: &str = "NESTNOTE_DATA";
pub const CONFIG_FILE: &str = "nestnote.toml";

pub struct NestnoteContext {
    pub api: NestnoteApi<FileStore>,
    pub config: NestnoteConfig,
    pub data_dir: PathBuf,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "nestnote", "nestnote")
}

/// Picks the data directory: override, then `env_value`, then the OS default.
pub fn resolve_data_dir(data_override: Option<PathBuf>, env_value: Option<String>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return Ok(PathBuf::from(value));
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NestnoteError::Config("Could not determine a data directory".to_string()))
}

/// Loads `nestnote.toml` from the global config directory and `data_dir`.
pub fn load_config(data_dir: &Path) -> NestnoteConfig {
    let mut search_paths = Vec::new();
    if let Some(dirs) = project_dirs() {
        search_paths.push(SearchPath::Path(dirs.config_dir().to_path_buf()));
    }
    search_paths.push(SearchPath::Path(data_dir.to_path_buf()));

    Clapfig::builder()
        .app_name("nestnote")
        .file_name(CONFIG_FILE)
        .search_paths(search_paths)
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Resolves the data directory, loads configuration and opens the store.
pub fn initialize(data_override: Option<PathBuf>) -> Result<NestnoteContext> {
    let data_dir = resolve_data_dir(data_override, std::env::var(DATA_ENV).ok())?;
    let config = load_config(&data_dir);
    debug!(
        data_dir = %data_dir.display(),
        delete_policy = ?config.delete_policy,
        autosave = config.autosave,
        "Initializing"
    );

    let store = FileStore::open_dir(data_dir.clone(), &config)?;
    let api = NestnoteApi::new(store).with_config(&config);

    Ok(NestnoteContext {
        api,
        config,
        data_dir,
    })
}
