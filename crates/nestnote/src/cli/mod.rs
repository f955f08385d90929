//! # CLI Behavior
//!
//! This is **one possible UI client** for nestnote, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and output formatting.
//!
//! ## Naked Execution (`nestnote`)
//!
//! Running `nestnote` with no arguments prints the navigation tree, same as `nestnote tree`.
//!
//! ## Selectors
//!
//! Pages are addressed by exact title (case-insensitive) or by an id prefix of at
//! least four characters. Blocks are addressed by their 1-based position in the
//! page, or by an id prefix. Resolution lives in the library API so every client
//! gets the same rules.
//!
//! ## Typing vs. Retyping
//!
//! `nestnote type` behaves like typing into the editor: `# Title` turns the block
//! into a heading, `- item` into a bullet, `/page Notes` into a sub-page.
//! `nestnote retype` changes the type without touching the text.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print results
//! - `render`: Output formatting (tree, page, recent cards, messages, JSON)
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
