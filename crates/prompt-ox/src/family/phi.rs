//! Microsoft Phi-3 / Phi-4 role-tag chat format.
//!
//! ```text
//! <|system|>
//! {system}<|end|>
//! <|user|>
//! {user}<|end|>
//! <|assistant|>
//! ```

use crate::conversation::Conversation;
use crate::formatter::{FormatterOptions, HistoryFormatter, header_role_label};

/// Opens a role tag.
pub const ROLE_OPEN: &str = "<|";
/// Closes a role tag; content starts on the next line.
pub const ROLE_CLOSE: &str = "|>\n";
/// Terminates every turn.
pub const END_OF_TURN: &str = "<|end|>\n";

/// Renders conversations in the Phi chat format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhiFormatter {
    /// Append the open assistant header after the last turn.
    add_assistant_header: bool,
}

impl PhiFormatter {
    /// Creates a formatter, optionally ending with an open assistant header.
    #[must_use]
    pub fn new(add_assistant_header: bool) -> Self {
        Self {
            add_assistant_header,
        }
    }
}

impl Default for PhiFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl From<FormatterOptions> for PhiFormatter {
    fn from(options: FormatterOptions) -> Self {
        Self::new(options.add_assistant_header)
    }
}

impl HistoryFormatter for PhiFormatter {
    fn name(&self) -> &'static str {
        "Phi"
    }

    fn render(&self, history: &Conversation) -> String {
        if history.is_empty() {
            return String::new();
        }

        let mut prompt = String::with_capacity(256);

        for message in history {
            prompt.push_str(ROLE_OPEN);
            prompt.push_str(header_role_label(message.role()));
            prompt.push_str(ROLE_CLOSE);
            prompt.push_str(message.content().trim());
            prompt.push_str(END_OF_TURN);
        }

        if self.add_assistant_header {
            prompt.push_str(ROLE_OPEN);
            prompt.push_str("assistant");
            prompt.push_str(ROLE_CLOSE);
        }

        prompt
    }

    fn duplicate(&self) -> Box<dyn HistoryFormatter> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Message;

    #[test]
    fn test_full_exchange() {
        let history = Conversation::from(vec![
            Message::system("You are a helpful AI assistant."),
            Message::user("What is 2+2?"),
            Message::assistant("4"),
            Message::user("And 3+3?"),
        ]);

        let prompt = PhiFormatter::default().render(&history);
        let expected = concat!(
            "<|system|>\nYou are a helpful AI assistant.<|end|>\n",
            "<|user|>\nWhat is 2+2?<|end|>\n",
            "<|assistant|>\n4<|end|>\n",
            "<|user|>\nAnd 3+3?<|end|>\n",
            "<|assistant|>\n",
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_header_disabled_ends_with_terminator() {
        let history = Conversation::from(Message::user("Hello"));
        let prompt = PhiFormatter::new(false).render(&history);
        assert_eq!(prompt, "<|user|>\nHello<|end|>\n");
    }

    #[test]
    fn test_tool_role_renders_as_user() {
        let history = Conversation::from(Message::tool(" result "));
        let prompt = PhiFormatter::new(false).render(&history);
        assert_eq!(prompt, "<|user|>\nresult<|end|>\n");
    }

    #[test]
    fn test_empty_history_skips_header() {
        assert_eq!(PhiFormatter::default().render(&Conversation::new()), "");
    }
}
