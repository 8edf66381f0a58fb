use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/clear", "Forget the conversation so far"),
    ("/config", "Show current configuration"),
    ("/help", "Show available commands"),
    ("/quit", "Exit chat"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        Ok(SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        Ok(highlighted_suggestion
            .map(|s| s.split_whitespace().next().unwrap_or_default().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Clear,
    Config,
    Help,
    Quit,
}

/// One line of user input, classified.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    /// A chat turn to send to the model.
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    // Bare exit words end the session like /quit.
    if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
        return Input::Command(SlashCommand::Quit);
    }

    parse_slash_command(input).map_or_else(|| Input::Text(input.to_string()), Input::Command)
}

// Only whole-line matches are commands; anything else starting with `/`
// (a path, a regex) is a chat turn.
fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    match input {
        "/clear" => Some(SlashCommand::Clear),
        "/config" => Some(SlashCommand::Config),
        "/help" => Some(SlashCommand::Help),
        "/quit" | "/exit" | "/q" => Some(SlashCommand::Quit),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_input(""), Input::Empty);
        assert_eq!(parse_input("   \t"), Input::Empty);
    }

    #[test]
    fn test_parse_text_input_is_trimmed() {
        assert_eq!(
            parse_input("  What is Harmony?  "),
            Input::Text("What is Harmony?".to_string())
        );
    }

    #[test]
    fn test_bare_exit_words_quit_case_insensitively() {
        for word in ["exit", "quit", "EXIT", "Quit", "  qUiT  "] {
            assert_eq!(parse_input(word), Input::Command(SlashCommand::Quit), "{word}");
        }
    }

    #[test]
    fn test_exit_inside_sentence_is_text() {
        assert_eq!(
            parse_input("how do I exit vim"),
            Input::Text("how do I exit vim".to_string())
        );
        assert_eq!(parse_input("exit now"), Input::Text("exit now".to_string()));
    }

    #[test]
    fn test_parse_slash_commands() {
        assert_eq!(parse_input("/clear"), Input::Command(SlashCommand::Clear));
        assert_eq!(parse_input("/config"), Input::Command(SlashCommand::Config));
        assert_eq!(parse_input("/help"), Input::Command(SlashCommand::Help));
        for quit in ["/quit", "/exit", "/q"] {
            assert_eq!(parse_input(quit), Input::Command(SlashCommand::Quit));
        }
    }

    #[test]
    fn test_unknown_slash_line_is_text() {
        assert_eq!(
            parse_input("/model gpt-oss"),
            Input::Text("/model gpt-oss".to_string())
        );
    }

    #[test]
    fn test_path_like_input_is_text() {
        assert_eq!(
            parse_input("/etc/hosts is read-only, why?"),
            Input::Text("/etc/hosts is read-only, why?".to_string())
        );
        assert_eq!(
            parse_input("/help me write a regex"),
            Input::Text("/help me write a regex".to_string())
        );
    }

    #[test]
    fn test_completer_no_suggestions_for_regular_text() {
        let mut completer = SlashCommandCompleter;
        assert!(completer.get_suggestions("hello").unwrap().is_empty());
    }

    #[test]
    fn test_completer_suggestions_filter_by_prefix() {
        let mut completer = SlashCommandCompleter;

        assert_eq!(completer.get_suggestions("/").unwrap().len(), SLASH_COMMANDS.len());

        let suggestions = completer.get_suggestions("/c").unwrap();
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].starts_with("/clear"));
        assert!(suggestions[1].starts_with("/config"));
    }

    #[test]
    fn test_completer_completion() {
        let mut completer = SlashCommandCompleter;
        let suggestion = "/config  Show current configuration".to_string();
        let completion = completer.get_completion("/co", Some(suggestion)).unwrap();
        assert_eq!(completion, Some("/config".to_string()));

        assert!(completer.get_completion("/x", None).unwrap().is_none());
    }
}
