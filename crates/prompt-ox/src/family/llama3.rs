//! Meta Llama 3.x (3.1, 3.2, 3.3) header-token chat format.
//!
//! ```text
//! <|start_header_id|>system<|end_header_id|>
//!
//! {system}<|eot_id|><|start_header_id|>user<|end_header_id|>
//!
//! {user}<|eot_id|><|start_header_id|>assistant<|end_header_id|>
//!
//! ```

use crate::conversation::Conversation;
use crate::formatter::{FormatterOptions, HistoryFormatter, header_role_label};

/// Opens a role header.
pub const START_HEADER: &str = "<|start_header_id|>";
/// Closes a role header, followed by the blank line before content.
pub const END_HEADER: &str = "<|end_header_id|>\n\n";
/// Terminates every turn.
pub const END_OF_TURN: &str = "<|eot_id|>";

/// Renders conversations in the Llama3 chat format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Llama3Formatter {
    /// Append the open assistant header after the last turn.
    add_assistant_header: bool,
}

impl Llama3Formatter {
    /// Creates a formatter, optionally ending with an open assistant header.
    #[must_use]
    pub fn new(add_assistant_header: bool) -> Self {
        Self {
            add_assistant_header,
        }
    }
}

impl Default for Llama3Formatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl From<FormatterOptions> for Llama3Formatter {
    fn from(options: FormatterOptions) -> Self {
        Self::new(options.add_assistant_header)
    }
}

impl HistoryFormatter for Llama3Formatter {
    fn name(&self) -> &'static str {
        "Llama3"
    }

    fn render(&self, history: &Conversation) -> String {
        if history.is_empty() {
            return String::new();
        }

        let mut prompt = String::with_capacity(256);

        for message in history {
            prompt.push_str(START_HEADER);
            prompt.push_str(header_role_label(message.role()));
            prompt.push_str(END_HEADER);
            prompt.push_str(message.content().trim());
            prompt.push_str(END_OF_TURN);
        }

        if self.add_assistant_header {
            prompt.push_str(START_HEADER);
            prompt.push_str("assistant");
            prompt.push_str(END_HEADER);
        }

        prompt
    }

    fn duplicate(&self) -> Box<dyn HistoryFormatter> {
        Box::new(*self)
    }
}
