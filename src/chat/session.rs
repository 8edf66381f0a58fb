use anyhow::{Context, Result};
use chrono::Local;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::io::{self, BufRead, IsTerminal};
use tracing::{debug, info};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::backend::{ChatClient, ChatRequest};
use crate::config::ChatConfig;
use crate::harmony::{Extraction, Extractor};
use crate::history::Session;
use crate::history::prompt::{build_messages, build_system_prompt};
use crate::ui::{Spinner, is_prompt_cancelled};

/// Where user lines come from.
enum LineSource {
    /// A terminal: inquire prompt with slash-command completion.
    Interactive(RenderConfig<'static>),
    /// Piped stdin, read one line at a time.
    Piped(io::StdinLock<'static>),
}

impl LineSource {
    fn detect() -> Self {
        if io::stdin().is_terminal() {
            Self::Interactive(render_config())
        } else {
            Self::Piped(io::stdin().lock())
        }
    }

    const fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive(_))
    }

    /// Returns `None` at end of input or when the user cancels the prompt.
    fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            Self::Interactive(render_config) => {
                let answer = Text::new("You:")
                    .with_render_config(*render_config)
                    .with_autocomplete(SlashCommandCompleter)
                    .with_help_message("Type 'exit' to quit, /help for commands")
                    .prompt();

                match answer {
                    Ok(line) => Ok(Some(line)),
                    Err(e) if is_prompt_cancelled(&e) => {
                        eprintln!(); // Clear line before goodbye message
                        Ok(None)
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Self::Piped(stdin) => {
                let mut line = String::new();
                let read = stdin
                    .read_line(&mut line)
                    .context("Failed to read from stdin")?;
                Ok((read > 0).then_some(line))
            }
        }
    }
}

fn render_config() -> RenderConfig<'static> {
    let prompt_style = Styled::new("❯")
        .with_fg(Color::LightBlue)
        .with_attr(Attributes::BOLD);
    let mut render_config = RenderConfig::default()
        .with_prompt_prefix(prompt_style)
        .with_answered_prompt_prefix(prompt_style);

    render_config.option = StyleSheet::new().with_fg(Color::Grey);
    render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));
    render_config
}

/// An interactive chat against one backend.
///
/// Owns the conversation history; each turn is sent with the trimmed
/// history and only the extracted final answer is printed and remembered.
pub struct ChatSession {
    config: ChatConfig,
    client: ChatClient,
    extractor: Extractor,
    session: Session,
    system_prompt: String,
}

impl ChatSession {
    pub fn new(config: ChatConfig) -> Self {
        let client = ChatClient::new(config.base_url.clone(), Some(config.api_key.clone()));
        let system_prompt = config
            .system_prompt
            .clone()
            .unwrap_or_else(|| build_system_prompt(Local::now().date_naive()));
        let session = Session::new(config.session_id.clone());

        Self {
            config,
            client,
            extractor: Extractor::default(),
            session,
            system_prompt,
        }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut source = LineSource::detect();
        ui::print_header(&self.config);

        while let Some(line) = source.next_line()? {
            match parse_input(&line) {
                // A blank line carries no turn.
                Input::Empty => {}
                Input::Command(cmd) => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                Input::Text(text) => {
                    let spinner = if source.is_interactive() {
                        Spinner::new("Thinking...")
                    } else {
                        Spinner::hidden()
                    };
                    let result = self.respond(&text).await;
                    spinner.stop();

                    // Backend failures end the turn, not the session.
                    match result {
                        Ok(reply) => ui::print_reply(&reply),
                        Err(e) => ui::print_error(&format!("{e:#}")),
                    }
                }
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Clear => {
                self.session.clear();
                ui::print_cleared();
                true
            }
            SlashCommand::Config => {
                ui::print_config(&self.config);
                true
            }
            SlashCommand::Help => {
                ui::print_help();
                true
            }
            SlashCommand::Quit => false,
        }
    }

    /// Sends one user turn and returns the text to show.
    ///
    /// History is only extended when the backend call succeeds.
    pub async fn respond(&mut self, text: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: build_messages(
                &self.system_prompt,
                &self.session,
                text,
                self.config.max_history_tokens,
            ),
            temperature: self.config.temperature,
            stream: self.config.stream,
        };

        let raw = self.client.complete(&request).await?;
        let extraction = self.extractor.extract(&raw);

        match &extraction {
            Extraction::Withheld(_) => {
                info!(bytes = raw.len(), "response had no final channel; withheld");
            }
            Extraction::PassThrough(_) => debug!("response had no Harmony markers"),
            Extraction::Final(_) | Extraction::Empty => {}
        }

        let reply = extraction.into_text();
        self.session.push_exchange(text, reply.clone());
        Ok(reply)
    }
}
