//! Terminal presentation shared by the chat loop and the CLI commands.
//!
//! Colors only decorate stderr listings and prompts; `Assistant:` replies
//! are printed plain.

use anyhow::Result;
use inquire::InquireError;
use owo_colors::OwoColorize;
use std::fmt::Display;

mod spinner;

pub use spinner::Spinner;

/// Width of the key column in settings listings (`max_history_tokens`).
const KEY_WIDTH: usize = 18;

/// Section titles: the banner, "Configuration", "Available commands".
pub fn heading(text: impl Display) -> String {
    format!("{}", text.bold())
}

/// Setting values the user chose, such as the model name.
pub fn setting(text: impl Display) -> String {
    format!("{}", text.cyan())
}

/// Keys, URLs, paths and descriptions.
pub fn muted(text: impl Display) -> String {
    format!("{}", text.dimmed())
}

/// Slash commands and completion marks.
pub fn accent(text: impl Display) -> String {
    format!("{}", text.green())
}

pub fn hint(text: impl Display) -> String {
    format!("{}", text.dimmed().italic())
}

pub fn error_label(text: impl Display) -> String {
    format!("{}", text.red().bold())
}

/// One indented `key  value` line of a settings listing.
///
/// The key is padded before styling so columns line up regardless of the
/// escape codes around it.
pub fn setting_row(key: &str, value: impl Display) -> String {
    format!("  {} {value}", muted(format!("{key:<KEY_WIDTH$}")))
}

/// Check if the inquire error is a user cancellation (Esc) or interruption (Ctrl+C).
pub const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive flow, treating user cancellation as a clean exit.
///
/// On cancellation a newline is printed to tidy the terminal and `Ok(())`
/// is returned; any other error propagates.
pub fn handle_prompt_cancellation<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match f() {
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(())
        }
        other => other,
    }
}
