//! # Nestnote Architecture
//!
//! Nestnote is a **UI-agnostic, block-based note library**: pages nest inside
//! pages, and each page holds an ordered list of typed blocks (paragraphs,
//! headings, lists, checkboxes, dividers and links to sub-pages).
//! The `nestnote` binary is just one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the nestnote CLI, or any other view)               │
//! │  - Parses input, renders results, applies focus hints       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves selectors (titles, id prefixes, positions)      │
//! │  - Autosave policy                                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Editor behavior: seeding, /page, focus, confirmations    │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait over a document/block snapshot           │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the
//! process and never waits on timers. Deferred UI effects (restoring focus,
//! tidying empty blocks) are returned as data or offered as explicit commands.
//!
//! ## Testing Strategy
//!
//! 1. **Store** (`store/*.rs`): invariants of the hierarchy and of block order.
//! 2. **Commands** (`commands/*.rs`): editor behavior against `InMemoryStore`.
//!    This is where the lion's share of testing lives.
//! 3. **API** (`api.rs`): dispatch, selector resolution and autosave.
//! 4. **Integration** (`tests/`): whole editing sessions against a temp directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Editor behavior for each user action
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Document`, `Block`, `BlockType`)
//! - [`markdown`]: Markdown shorthand and `/page` detection
//! - [`display`]: Relative times, dates and title truncation for views
//! - [`config`]: Configuration management
//! - [`init`]: Data directory, configuration loading and store setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod init;
pub mod markdown;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
