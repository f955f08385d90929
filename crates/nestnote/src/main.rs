//! # Nestnote CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/nestnoteapp/`: UI-agnostic library (model, store, commands, API)
//! - `crates/nestnote/`: this CLI, one client of the library
//!
//! ## Data Location
//!
//! State lives in a single JSON file inside the data directory, chosen from
//! `--data`, then `$NESTNOTE_DATA`, then the platform data directory.
//! Configuration is read from `nestnote.toml` in the platform config directory
//! and in the data directory, the latter winning.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
