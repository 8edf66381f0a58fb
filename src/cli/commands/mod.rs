//! Subcommand implementations.

/// Chat mode command handler.
pub mod chat;

/// Config display command handler.
pub mod config;

/// Configure command handler.
pub mod configure;

/// Extract command handler.
pub mod extract;
