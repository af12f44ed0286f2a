use std::fmt::Debug;

use bon::Builder;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};

use crate::conversation::{Conversation, Message, Role};

/// Turns a [`Conversation`] into the literal prompt text of one model family.
///
/// Implementations hold only immutable configuration, so a single instance
/// can be used from many threads. Sessions that want their own instance
/// should call [`duplicate`](HistoryFormatter::duplicate) (or `clone` a
/// `Box<dyn HistoryFormatter>`) instead of sharing one.
pub trait HistoryFormatter: Send + Sync + Debug + DynClone {
    /// Human readable family name. Informational only.
    fn name(&self) -> &'static str;

    /// Renders the whole conversation as a prompt.
    ///
    /// The output depends only on `history` and the formatter's own options.
    /// An empty conversation always renders as an empty string, even when
    /// the formatter is configured to append an assistant header.
    fn render(&self, history: &Conversation) -> String;

    /// Returns a new, independent instance configured exactly like this one.
    fn duplicate(&self) -> Box<dyn HistoryFormatter>;

    /// Wraps freshly generated text into a new one-message conversation.
    ///
    /// The text is kept verbatim; the caller appends the result onto its
    /// running history.
    fn wrap_as_turn(&self, role: Role, text: &str) -> Conversation {
        Conversation::from(Message::new(role, text))
    }
}

dyn_clone::clone_trait_object!(HistoryFormatter);

/// Construction options shared by the header-style families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct FormatterOptions {
    /// Append an open assistant header after the last message so the model
    /// starts writing the assistant's reply.
    #[builder(default = true)]
    pub add_assistant_header: bool,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            add_assistant_header: true,
        }
    }
}

/// Maps a role to the label used by header-style families.
///
/// Roles without a label of their own are rendered as `user`.
pub(crate) fn header_role_label(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        other => {
            log::debug!("No header label for role {other}, rendering as user");
            "user"
        }
    }
}
