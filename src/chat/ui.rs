//! Chat mode UI components.
//!
//! Decorations go to stderr; stdout carries only `Assistant:` lines so a
//! piped session produces clean output.

use crate::config::ChatConfig;
use crate::ui::{accent, error_label, heading, hint, muted, setting, setting_row};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(config: &ChatConfig) {
    eprintln!(
        "{} {} - {} @ {}",
        heading("harmony-chat"),
        muted(format!("v{VERSION}")),
        setting(&config.model),
        muted(&config.base_url)
    );
    eprintln!(
        "{}",
        hint("Chat started. Type 'exit' to quit, /help for commands.")
    );
    eprintln!();
}

pub fn print_goodbye() {
    eprintln!("{}", accent("Goodbye!"));
}

pub fn print_reply(reply: &str) {
    println!("Assistant: {reply}");
}

pub fn print_config(config: &ChatConfig) {
    eprintln!("{}", heading("Configuration"));
    eprintln!("{}", setting_row("model", setting(&config.model)));
    eprintln!("{}", setting_row("base_url", muted(&config.base_url)));
    eprintln!("{}", setting_row("api_key", muted(config.masked_api_key())));
    eprintln!("{}", setting_row("temperature", setting(config.temperature)));
    eprintln!(
        "{}",
        setting_row("max_history_tokens", setting(config.max_history_tokens))
    );
    eprintln!("{}", setting_row("stream", setting(config.stream)));
    eprintln!("{}", setting_row("session", setting(&config.session_id)));
    eprintln!();
}

pub fn print_help() {
    eprintln!("{}", heading("Available commands"));
    for (command, description) in [
        ("/clear", "Forget the conversation so far"),
        ("/config", "Show current configuration"),
        ("/help", "Show this help"),
        ("/quit", "Exit chat (or type 'exit' / 'quit')"),
    ] {
        eprintln!("  {}  {}", accent(format!("{command:<7}")), muted(description));
    }
    eprintln!();
}

pub fn print_cleared() {
    eprintln!("{} Conversation cleared", accent("✓"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", error_label("Error:"));
    eprintln!();
}
