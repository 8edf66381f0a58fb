use chrono::NaiveDate;

use super::{Session, Turn, trim_to_budget};

pub const SYSTEM_PROMPT_TEMPLATE: &str = "You are ChatGPT, a large language model trained by OpenAI.\n\
     Knowledge cutoff: 2024-06\n\
     Current date: {current_date}\n\n\
     Reasoning: medium\n\n\
     # Valid channels: analysis, commentary, final. Channel must be included for every message.\n\
     Only return a single assistant message on the final channel. Do NOT output analysis.\n";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(today: NaiveDate) -> String {
    // {current_date} is a placeholder for string replacement, not a format argument
    SYSTEM_PROMPT_TEMPLATE.replace("{current_date}", &today.format("%Y-%m-%d").to_string())
}

/// Assembles the message list for one request.
///
/// The system prompt is always first and the new user turn always last;
/// prior history fills whatever remains of `budget`.
pub fn build_messages(
    system: &str,
    session: &Session,
    user_input: &str,
    budget: usize,
) -> Vec<Turn> {
    let system = Turn::system(system);
    let user = Turn::user(user_input);

    let remaining = budget
        .saturating_sub(system.estimated_tokens())
        .saturating_sub(user.estimated_tokens());

    let mut messages = vec![system];
    messages.extend_from_slice(trim_to_budget(session.history(), remaining));
    messages.push(user);
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Role;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 13).unwrap_or_default()
    }

    #[test]
    fn test_build_system_prompt() {
        let prompt = build_system_prompt(date());
        assert!(prompt.contains("Current date: 2025-08-13"));
        assert!(prompt.contains("final channel"));
        assert!(!prompt.contains("{current_date}"));
    }

    #[test]
    fn test_system_prompt_template_has_placeholder() {
        assert!(SYSTEM_PROMPT_TEMPLATE.contains("{current_date}"));
    }

    #[test]
    fn test_build_messages_with_empty_history() {
        let session = Session::new("cli");
        let messages = build_messages("sys", &session, "Hi", 3000);

        assert_eq!(messages, vec![Turn::system("sys"), Turn::user("Hi")]);
    }

    #[test]
    fn test_build_messages_includes_history_in_order() {
        let mut session = Session::new("cli");
        session.push_exchange("What is 2+2?", "4");

        let messages = build_messages("sys", &session, "And 3+3?", 3000);
        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();

        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(messages[1].content, "What is 2+2?");
        assert_eq!(messages[3].content, "And 3+3?");
    }

    #[test]
    fn test_build_messages_drops_history_over_budget() {
        let mut session = Session::new("cli");
        session.push_exchange("x".repeat(400), "y".repeat(400));

        let messages = build_messages("sys", &session, "new", 50);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1], Turn::user("new"));
    }

    #[test]
    fn test_build_messages_keeps_user_turn_when_budget_exhausted() {
        let session = Session::new("cli");
        let messages = build_messages("sys", &session, &"z".repeat(1000), 10);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::User);
    }
}
