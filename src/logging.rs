//! Diagnostic logging to stderr.
//!
//! Stdout is reserved for `Assistant:` lines, so every log event goes to
//! stderr. The filter comes from `HARMONY_CHAT_LOG` (same syntax as
//! `RUST_LOG`); `-v`/`-vv` raise the level when it is unset.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "HARMONY_CHAT_LOG";

// HTTP internals are noisy at debug level.
const QUIET_DEPENDENCIES: &str = ",hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn";

/// Builds the filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("{level}{QUIET_DEPENDENCIES}")
}

/// Installs the global subscriber. Safe to call more than once.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
