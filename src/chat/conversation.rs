//! Ordered message sequence for the active chat view.

use crate::api::{ApiError, ChatMessage, ChatResponse, DEFAULT_SESSION, Sender};
use crate::auth::{AuthStore, Storage};
use crate::i18n::{Language, translations};

/// An in-flight turn.
///
/// Consumed by [`Conversation::complete_turn`], so each turn yields exactly
/// one bot message.
#[derive(Debug)]
#[must_use = "a pending turn must be completed"]
pub struct PendingTurn {
    text: String,
}

impl PendingTurn {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The message sequence of one chat view plus its pending gate and error.
#[derive(Debug, Clone)]
pub struct Conversation {
    session_name: String,
    messages: Vec<ChatMessage>,
    pending: bool,
    error: Option<String>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION)
    }
}

impl Conversation {
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            session_name: session_name.into(),
            messages: Vec::new(),
            pending: false,
            error: None,
        }
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// The error text of the last failed turn.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Opens a turn: appends the user's message and raises the pending gate.
    ///
    /// Returns `None` without side effects when the trimmed input is empty or
    /// another turn is still pending.
    pub fn begin_turn(&mut self, input: &str) -> Option<PendingTurn> {
        let text = input.trim();
        if text.is_empty() || self.pending {
            return None;
        }

        self.messages.push(ChatMessage::now(text, Sender::User));
        self.pending = true;
        self.error = None;

        Some(PendingTurn {
            text: text.to_string(),
        })
    }

    /// Closes a turn with exactly one bot message.
    ///
    /// Failures append the localized generic failure text; the error itself
    /// is kept in [`error`](Self::error).
    #[allow(clippy::needless_pass_by_value)]
    pub fn complete_turn(
        &mut self,
        turn: PendingTurn,
        outcome: Result<ChatResponse, ApiError>,
        language: Language,
    ) -> &ChatMessage {
        tracing::debug!(
            session = %self.session_name,
            chars = turn.text.chars().count(),
            ok = outcome.is_ok(),
            "turn completed"
        );

        let text = match outcome {
            Ok(reply) => reply.response,
            Err(e) => {
                if e.is_connection() {
                    tracing::warn!(error = %e, "chat request could not reach the server");
                }
                self.error = Some(e.to_string());
                translations(language).chat.send_failed.to_string()
            }
        };

        self.pending = false;
        self.messages.push(ChatMessage::now(text, Sender::Bot));
        &self.messages[self.messages.len() - 1]
    }

    /// Runs a full turn against the API using the store's session.
    ///
    /// Returns the bot message, or `None` when the input was rejected.
    pub async fn submit<S: Storage>(
        &mut self,
        auth: &AuthStore<S>,
        input: &str,
        language: Language,
    ) -> Option<&ChatMessage> {
        let turn = self.begin_turn(input)?;
        let outcome = auth
            .api()
            .send_message(
                turn.text(),
                auth.username(),
                auth.token(),
                &self.session_name,
                Some(language),
            )
            .await;
        Some(self.complete_turn(turn, outcome, language))
    }

    /// Starts over: clears messages, the pending gate and the error.
    pub fn new_chat(&mut self) {
        self.messages.clear();
        self.pending = false;
        self.error = None;
    }

    /// Switches to another named session, replacing the sequence with
    /// `messages`.
    pub fn load_session(&mut self, session_name: impl Into<String>, messages: Vec<ChatMessage>) {
        self.session_name = session_name.into();
        self.messages = messages;
        self.pending = false;
        self.error = None;
    }
}
