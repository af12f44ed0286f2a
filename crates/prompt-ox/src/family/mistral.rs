//! Mistral Instruct `[INST]` bracket format.
//!
//! ```text
//! <s>[INST] {system}
//!
//! {user} [/INST] {assistant}</s> [INST] {user} [/INST]
//! ```
//!
//! A leading system message shares its instruction block with the first user
//! turn. The format has no assistant header: the unanswered `[/INST]` of the
//! last user turn is what prompts the model. Messages with any role other
//! than user or assistant after the leading system message are dropped.

use crate::conversation::{Conversation, Role};
use crate::formatter::HistoryFormatter;

/// Sequence start, emitted only before a leading system block.
pub const BOS: &str = "<s>";
/// Opens an instruction block.
pub const INST_OPEN: &str = "[INST] ";
/// Closes an instruction block.
pub const INST_CLOSE: &str = "[/INST]";
/// Ends an assistant reply.
pub const EOS: &str = "</s>";

/// Renders conversations in the Mistral chat format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MistralFormatter;

impl MistralFormatter {
    /// Creates the formatter; it has no options.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HistoryFormatter for MistralFormatter {
    fn name(&self) -> &'static str {
        "Mistral"
    }

    fn render(&self, history: &Conversation) -> String {
        let messages = history.messages();
        let Some(first) = messages.first() else {
            return String::new();
        };

        let mut prompt = String::with_capacity(256);
        let mut rest = messages;

        if first.role() == Role::System {
            prompt.push_str(BOS);
            prompt.push_str(INST_OPEN);
            prompt.push_str(first.content().trim());
            prompt.push_str("\n\n");

            match messages.get(1) {
                Some(next) if next.role() == Role::User => {
                    prompt.push_str(next.content().trim());
                    prompt.push(' ');
                    prompt.push_str(INST_CLOSE);
                    rest = &messages[2..];
                }
                _ => {
                    prompt.push_str(INST_CLOSE);
                    rest = &messages[1..];
                }
            }
        }

        for message in rest {
            match message.role() {
                Role::User => {
                    prompt.push(' ');
                    prompt.push_str(INST_OPEN);
                    prompt.push_str(message.content().trim());
                    prompt.push(' ');
                    prompt.push_str(INST_CLOSE);
                }
                Role::Assistant => {
                    prompt.push(' ');
                    prompt.push_str(message.content().trim());
                    prompt.push_str(EOS);
                }
                other => {
                    log::debug!("Skipping {other} message, no Mistral equivalent");
                }
            }
        }

        prompt
    }

    fn duplicate(&self) -> Box<dyn HistoryFormatter> {
        Box::new(*self)
    }
}
