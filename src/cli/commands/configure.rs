//! Configure command handler for editing default settings.

use anyhow::{Context, Result, bail};
use inquire::{Confirm, Text};

use crate::config::{
    ChatSection, ConfigManager, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::ui::{accent, handle_prompt_cancellation, heading, muted, setting, setting_row};

/// Runs the configure command.
///
/// Prompts for base URL, model, temperature and streaming, then writes them
/// to the `[chat]` section of the config file. Other keys are preserved.
pub fn run_configure() -> Result<()> {
    handle_prompt_cancellation(run_configure_inner)
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config.chat);

    let base_url = prompt_text(
        "Base URL:",
        config.chat.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        "OpenAI-compatible endpoint including /v1",
    )?;
    let model = prompt_text(
        "Model:",
        config.chat.model.as_deref().unwrap_or(DEFAULT_MODEL),
        "Model name as known to the server",
    )?;
    let temperature = parse_temperature(&prompt_text(
        "Temperature:",
        &config
            .chat
            .temperature
            .unwrap_or(DEFAULT_TEMPERATURE)
            .to_string(),
        "0.0 to 2.0",
    )?)?;
    let stream = Confirm::new("Stream responses?")
        .with_default(config.chat.stream.unwrap_or(false))
        .prompt()?;

    config.chat.base_url = Some(base_url);
    config.chat.model = Some(model);
    config.chat.temperature = Some(temperature);
    config.chat.stream = Some(stream);

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        accent("✓"),
        muted(manager.config_path().display())
    );

    Ok(())
}

fn prompt_text(message: &str, default: &str, help: &str) -> Result<String> {
    let answer = Text::new(message)
        .with_default(default)
        .with_help_message(help)
        .prompt()?;

    let answer = answer.trim();
    if answer.is_empty() {
        bail!("{} cannot be empty", message.trim_end_matches(':'));
    }
    Ok(answer.to_string())
}

fn parse_temperature(input: &str) -> Result<f32> {
    let value: f32 = input
        .trim()
        .parse()
        .with_context(|| format!("Invalid temperature: '{input}'"))?;
    if !(0.0..=2.0).contains(&value) {
        bail!("Temperature must be between 0.0 and 2.0, got {value}");
    }
    Ok(value)
}

fn print_current_defaults(section: &ChatSection) {
    let show = |value: Option<String>| value.map_or_else(|| muted("(not set)"), setting);

    println!("{}", heading("Current defaults"));
    println!("{}", setting_row("base_url", show(section.base_url.clone())));
    println!("{}", setting_row("model", show(section.model.clone())));
    println!(
        "{}",
        setting_row("temperature", show(section.temperature.map(|t| t.to_string())))
    );
    println!(
        "{}",
        setting_row("stream", show(section.stream.map(|s| s.to_string())))
    );
    println!();
}
