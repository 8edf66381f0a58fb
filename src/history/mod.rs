//! In-memory conversation history.
//!
//! A [`Session`] owns the ordered turns of one conversation. It lives for the
//! process lifetime and is written only by the chat loop.

pub mod prompt;

use serde::Serialize;
use tracing::debug;

/// Rough characters-per-token ratio used for budget estimates.
const CHARS_PER_TOKEN: usize = 4;

/// Fixed cost charged per message for role and framing tokens.
const MESSAGE_OVERHEAD_TOKENS: usize = 4;

/// Author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Approximate token cost of this turn.
    pub fn estimated_tokens(&self) -> usize {
        self.content.chars().count().div_ceil(CHARS_PER_TOKEN) + MESSAGE_OVERHEAD_TOKENS
    }
}

/// A conversation identified by `id`.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    history: Vec<Turn>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Records a completed exchange.
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.history.push(Turn::user(user));
        self.history.push(Turn::assistant(assistant));
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

/// Returns the newest suffix of `turns` that fits in `budget` tokens.
///
/// The suffix always starts on a user turn, so an assistant reply is never
/// sent without the question that produced it.
pub fn trim_to_budget(turns: &[Turn], budget: usize) -> &[Turn] {
    let mut used = 0;
    let mut start = turns.len();

    for (index, turn) in turns.iter().enumerate().rev() {
        let cost = turn.estimated_tokens();
        if used + cost > budget {
            break;
        }
        used += cost;
        start = index;
    }

    let kept = &turns[start..];
    let first_user = kept
        .iter()
        .position(|turn| turn.role == Role::User)
        .unwrap_or(kept.len());

    if start > 0 || first_user > 0 {
        debug!(
            dropped = start + first_user,
            kept = kept.len() - first_user,
            "trimmed history to token budget"
        );
    }

    &kept[first_user..]
}
