use std::path::Path;

use bon::Builder;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::Result;

/// The author of a message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    /// Instructions that frame the whole conversation.
    System,
    /// The human side of the conversation.
    User,
    /// The model's replies.
    Assistant,
    /// Tool output. None of the bundled families has a label for it, so it
    /// goes through each family's fallback path.
    Tool,
}

/// A single role-tagged turn. Content is stored raw; trimming is up to the
/// formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Message {
    /// Author of the turn.
    role: Role,
    /// Raw, untrimmed text.
    #[builder(into)]
    content: String,
}

impl Message {
    /// Creates a message with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a [`Role::System`] message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a [`Role::User`] message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a [`Role::Assistant`] message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a [`Role::Tool`] message.
    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(Role::Tool, content)
    }

    /// Author of the message.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Raw content, exactly as stored.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// An ordered chat transcript.
///
/// Order is turn order and is preserved exactly by every formatter. An empty
/// conversation is valid and means there is no history yet.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref, IntoIterator,
)]
#[into_iterator(owned, ref)]
pub struct Conversation {
    /// Messages in turn order.
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates an empty conversation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message to the end of the transcript.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Appends a new message built from `role` and `content`.
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.append(Message::new(role, content));
    }

    /// Moves every message of `other` onto the end of this transcript.
    ///
    /// This is how a turn produced by
    /// [`HistoryFormatter::wrap_as_turn`](crate::HistoryFormatter::wrap_as_turn)
    /// is folded back into the running history.
    pub fn extend_from(&mut self, other: Conversation) {
        self.messages.extend(other.messages);
    }

    /// The messages in turn order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether there is no history yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Parses a conversation from its JSON form,
    /// `{"messages": [{"role": "user", "content": "..."}]}`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Json`](crate::PromptError::Json) when the input
    /// is not a valid conversation document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a conversation JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Io`](crate::PromptError::Io) if the file cannot
    /// be read and [`PromptError::Json`](crate::PromptError::Json) if it is
    /// not a valid conversation document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the conversation as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Json`](crate::PromptError::Json) if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<Vec<Message>> for Conversation {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl From<Message> for Conversation {
    fn from(message: Message) -> Self {
        Self {
            messages: vec![message],
        }
    }
}

impl FromIterator<Message> for Conversation {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl Extend<Message> for Conversation {
    fn extend<I: IntoIterator<Item = Message>>(&mut self, iter: I) {
        self.messages.extend(iter);
    }
}
