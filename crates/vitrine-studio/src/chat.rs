//! Session-scoped chat thread
//!
//! The assistant answers questions about the current artifact. The
//! thread is append-ordered and capped: once full, the oldest turns fall
//! off so prompts stay bounded. Nothing here survives the session.

use serde::{Deserialize, Serialize};

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person driving the session.
    User,
    /// The model's answer.
    Assistant,
}

impl ChatRole {
    /// Label used when formatting the thread into a prompt.
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Assistant => "Assistant",
        }
    }
}

/// One turn of conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Speaker.
    pub role: ChatRole,
    /// What was said.
    pub content: String,
}

impl ChatTurn {
    /// A user turn.
    #[inline]
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// An assistant turn.
    #[inline]
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Append-ordered conversation with a turn cap.
#[derive(Debug, Clone)]
pub struct ChatThread {
    turns: Vec<ChatTurn>,
    max_turns: usize,
}

impl ChatThread {
    /// Empty thread keeping at most `max_turns` turns.
    #[inline]
    #[must_use]
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: Vec::new(),
            max_turns,
        }
    }

    /// Append a turn, dropping the oldest once over the cap.
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
        if self.turns.len() > self.max_turns {
            let excess = self.turns.len() - self.max_turns;
            self.turns.drain(..excess);
        }
    }

    /// Append a user turn.
    #[inline]
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(ChatTurn::user(content));
    }

    /// Append an assistant turn.
    #[inline]
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(ChatTurn::assistant(content));
    }

    /// All retained turns, oldest first.
    #[inline]
    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Retained turn count.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether nothing has been said.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
