//! ChatML as used by Qwen 1.5, 2 and 3.
//!
//! ```text
//! <|im_start|>system
//! {system}<|im_end|>
//! <|im_start|>user
//! {user}<|im_end|>
//! <|im_start|>assistant
//! ```

use crate::conversation::Conversation;
use crate::formatter::{FormatterOptions, HistoryFormatter, header_role_label};

/// Opens a turn; the role label follows directly.
pub const IM_START: &str = "<|im_start|>";
/// Closes a turn.
pub const IM_END: &str = "<|im_end|>";

/// Renders conversations in the Qwen chat format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QwenFormatter {
    /// Append the open assistant header after the last turn.
    add_assistant_header: bool,
}

impl QwenFormatter {
    /// Creates a formatter, optionally ending with an open assistant header.
    #[must_use]
    pub fn new(add_assistant_header: bool) -> Self {
        Self {
            add_assistant_header,
        }
    }
}

impl Default for QwenFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl From<FormatterOptions> for QwenFormatter {
    fn from(options: FormatterOptions) -> Self {
        Self::new(options.add_assistant_header)
    }
}

impl HistoryFormatter for QwenFormatter {
    fn name(&self) -> &'static str {
        "Qwen"
    }

    fn render(&self, history: &Conversation) -> String {
        if history.is_empty() {
            return String::new();
        }

        let mut prompt = String::with_capacity(256);

        for message in history {
            prompt.push_str(IM_START);
            prompt.push_str(header_role_label(message.role()));
            prompt.push('\n');
            prompt.push_str(message.content().trim());
            prompt.push_str(IM_END);
            prompt.push('\n');
        }

        if self.add_assistant_header {
            prompt.push_str(IM_START);
            prompt.push_str("assistant\n");
        }

        prompt
    }

    fn duplicate(&self) -> Box<dyn HistoryFormatter> {
        Box::new(*self)
    }
}
