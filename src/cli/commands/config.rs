//! Config display command handler.

use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, load_config};
use crate::ui::{heading, muted};

/// Prints the resolved configuration and where the config file lives.
pub fn print_config(options: &ResolveOptions) -> Result<()> {
    let config = load_config(options)?;
    let manager = ConfigManager::new()?;

    println!("{}", heading("Resolved configuration"));
    println!("  base_url           = {}", config.base_url);
    println!("  model              = {}", config.model);
    println!("  api_key            = {}", config.masked_api_key());
    println!("  temperature        = {}", config.temperature);
    println!("  max_history_tokens = {}", config.max_history_tokens);
    println!("  stream             = {}", config.stream);
    println!("  session            = {}", config.session_id);
    println!(
        "  system_prompt      = {}",
        if config.system_prompt.is_some() {
            "(custom)"
        } else {
            "(built-in Harmony prompt)"
        }
    );
    println!();

    let path = manager.config_path();
    let status = if path.exists() { "" } else { " (not found)" };
    println!(
        "{} {}{}",
        muted("Config file:"),
        path.display(),
        muted(status)
    );

    Ok(())
}
