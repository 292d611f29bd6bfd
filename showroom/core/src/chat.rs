//! Stylist Chat Session
//!
//! An append-only transcript seeded with one bot greeting. Each non-blank
//! user message is appended immediately and schedules exactly one bot reply,
//! produced by a [`Responder`] and delivered no earlier than the reply delay.
//!
//! Replies are appended in the order they complete. Every pending reply is
//! held as a [`TaskHandle`], so [`ChatSession::teardown`] (or dropping the
//! session) guarantees nothing lands in a disposed transcript.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::events::ShowroomEvent;
use crate::notify::{Notification, Notifier};
use crate::scheduler::{Scheduler, TaskHandle};

/// First message in every transcript
pub const GREETING: &str = "Hi there! I'm your smart stylist. What's your style preference today?";

/// The stylist's only answer
pub const SCRIPTED_REPLY: &str = "Based on your style, I recommend checking out our new collection of casual wear. Here are some items that might interest you.";

/// Who wrote a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The visitor
    User,
    /// The stylist
    Bot,
}

/// One transcript entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message body
    pub text: String,
    /// Author
    pub sender: Sender,
}

impl ChatMessage {
    /// A message from the visitor
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    /// A message from the stylist
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

/// Produces the stylist's reply to a transcript
///
/// Implement this to put something smarter behind the chat.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Name for logs (e.g. "scripted")
    fn name(&self) -> &str;

    /// Reply to the transcript, whose last entry is the user's new message
    async fn respond(&self, transcript: &[ChatMessage]) -> anyhow::Result<String>;
}

/// Answers every message with the same text
#[derive(Clone, Debug)]
pub struct ScriptedResponder {
    reply: String,
}

impl ScriptedResponder {
    /// Responder that always answers with `reply`
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for ScriptedResponder {
    fn default() -> Self {
        Self::new(SCRIPTED_REPLY)
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn respond(&self, _transcript: &[ChatMessage]) -> anyhow::Result<String> {
        Ok(self.reply.clone())
    }
}

/// Identifies one scheduled reply
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplyId(u64);

/// Transcript, compose buffer and pending replies
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    compose: String,
    responder: Arc<dyn Responder>,
    scheduler: Scheduler,
    notifier: Notifier,
    reply_delay: Duration,
    next_reply: u64,
    pending: HashMap<ReplyId, TaskHandle>,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("messages", &self.transcript.len())
            .field("responder", &self.responder.name())
            .field("reply_delay", &self.reply_delay)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl ChatSession {
    /// Start a session whose transcript holds only `greeting`
    pub fn new(
        scheduler: Scheduler,
        notifier: Notifier,
        responder: Arc<dyn Responder>,
        greeting: impl Into<String>,
        reply_delay: Duration,
    ) -> Self {
        Self {
            transcript: vec![ChatMessage::bot(greeting)],
            compose: String::new(),
            responder,
            scheduler,
            notifier,
            reply_delay,
            next_reply: 0,
            pending: HashMap::new(),
        }
    }

    /// Messages so far, oldest first
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// The unsent input
    #[must_use]
    pub fn compose(&self) -> &str {
        &self.compose
    }

    /// Number of replies still on their way
    #[must_use]
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Whether the stylist is "typing"
    #[must_use]
    pub fn is_awaiting_reply(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Append a character to the compose buffer
    pub fn push_char(&mut self, c: char) {
        self.compose.push(c);
    }

    /// Remove the last character of the compose buffer
    pub fn pop_char(&mut self) {
        self.compose.pop();
    }

    /// Replace the compose buffer
    pub fn set_compose(&mut self, text: impl Into<String>) {
        self.compose = text.into();
    }

    /// Send the compose buffer
    ///
    /// A blank buffer is left as it is and nothing is sent.
    pub fn send_compose(&mut self) -> Option<ReplyId> {
        let text = std::mem::take(&mut self.compose);
        let id = self.send(&text);
        if id.is_none() {
            self.compose = text;
        }
        id
    }

    /// Send a user message
    ///
    /// Returns `None` without touching anything when `text` is blank.
    /// Otherwise the message is appended, the compose buffer cleared and a
    /// reply scheduled.
    pub fn send(&mut self, text: &str) -> Option<ReplyId> {
        if text.trim().is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage::user(text));
        self.compose.clear();

        let reply_id = ReplyId(self.next_reply);
        self.next_reply += 1;

        let responder = Arc::clone(&self.responder);
        let snapshot = self.transcript.clone();
        let delay = self.reply_delay;
        let handle = self.scheduler.spawn(async move {
            let (result, ()) = tokio::join!(responder.respond(&snapshot), tokio::time::sleep(delay));
            ShowroomEvent::ChatReply {
                reply_id,
                result: result.map_err(|e| e.to_string()),
            }
        });
        self.pending.insert(reply_id, handle);

        tracing::debug!(?reply_id, messages = self.transcript.len(), "Chat message sent");
        Some(reply_id)
    }

    /// Apply a reply completion
    ///
    /// Completions for replies that are no longer pending are ignored.
    pub fn on_reply(&mut self, reply_id: ReplyId, result: Result<String, String>) {
        if self.pending.remove(&reply_id).is_none() {
            tracing::debug!(?reply_id, "Ignoring reply that is no longer pending");
            return;
        }

        match result {
            Ok(text) => {
                self.transcript.push(ChatMessage::bot(text));
                tracing::debug!(?reply_id, messages = self.transcript.len(), "Stylist replied");
            }
            Err(error) => {
                tracing::warn!(?reply_id, responder = self.responder.name(), %error, "Stylist reply failed");
                self.notifier.emit(Notification::destructive(
                    "Stylist unavailable",
                    "The stylist couldn't answer just now. Please try again.",
                ));
            }
        }
    }

    /// Cancel every pending reply
    pub fn teardown(&mut self) {
        let cancelled = self.pending.len();
        for (_, handle) in self.pending.drain() {
            handle.cancel();
        }
        if cancelled > 0 {
            tracing::info!(cancelled, "Cancelled pending stylist replies");
        }
    }
}
