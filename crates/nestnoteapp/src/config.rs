//! # Configuration
//!
//! Nestnote configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `NESTNOTE__DELETE_POLICY`, `NESTNOTE__AUTOSAVE`, etc.
//! 2. **Data-directory Config**: `<data>/nestnote.toml`.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_title` | `New page` | Title for documents created without one |
//! | `delete_policy` | `deep` | `deep` removes the whole subtree, `shallow` only direct children |
//! | `autosave` | `true` | Flush the state file after every mutating API call |
//! | `state_file` | `state.json` | File name of the persisted state blob |
//! | `recent_limit` | `6` | How many documents the "recent" listings show |

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_TITLE;

/// How far a document delete reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// The document and every descendant.
    #[default]
    Deep,
    /// The document and its direct children. Grandchildren stay in the
    /// collection with a parent that no longer exists.
    Shallow,
}

/// Configuration for nestnote, stored in `nestnote.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NestnoteConfig {
    /// Title given to documents created without one
    #[config(default = "New page")]
    pub default_title: String,

    /// "deep" or "shallow"
    #[config(default = "deep")]
    pub delete_policy: DeletePolicy,

    /// Save after every mutating call
    #[config(default = true)]
    pub autosave: bool,

    /// Name of the state file inside the data directory
    #[config(default = "state.json")]
    pub state_file: String,

    /// Number of documents in the recently edited/created listings
    #[config(default = 6)]
    pub recent_limit: usize,
}

impl Default for NestnoteConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            delete_policy: DeletePolicy::Deep,
            autosave: true,
            state_file: "state.json".to_string(),
            recent_limit: 6,
        }
    }
}

impl NestnoteConfig {
    /// The default title, falling back to the built-in one when configured blank.
    pub fn default_title(&self) -> &str {
        if self.default_title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            &self.default_title
        }
    }

    /// State file name, normalized to end in `.json`.
    pub fn state_file(&self) -> String {
        if self.state_file.ends_with(".json") {
            self.state_file.clone()
        } else {
            format!("{}.json", self.state_file)
        }
    }
}
