//! Interactive chat mode.
//!
//! A line-per-turn REPL with slash commands. Each reply passes through the
//! Harmony extractor before it is printed.

/// Input classification and slash-command autocomplete.
pub mod command;
mod session;
mod ui;

pub use session::ChatSession;
