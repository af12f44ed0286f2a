#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Chat prompt formatting for locally hosted model families.
//!
//! A [`Conversation`] is rendered into the literal prompt text a model family
//! was trained on by a [`HistoryFormatter`]. Every family shares the same
//! contract, so a caller can swap the active formatter without touching the
//! rest of its inference loop.
//!
//! ```rust
//! use prompt_ox::{Conversation, FormatterOptions, Message, ModelFamily};
//!
//! let mut history = Conversation::new();
//! history.append(Message::system("You are helpful."));
//! history.append(Message::user("Hi"));
//!
//! let formatter = ModelFamily::Qwen.formatter(FormatterOptions::default());
//! let prompt = formatter.render(&history);
//! assert!(prompt.ends_with("<|im_start|>assistant\n"));
//! ```

pub mod conversation;
pub mod error;
pub mod family;
pub mod formatter;

pub use conversation::{Conversation, Message, Role};
pub use error::{PromptError, Result};
pub use family::{
    Llama3Formatter, MistralFormatter, ModelFamily, PhiFormatter, QwenFormatter,
};
pub use formatter::{FormatterOptions, HistoryFormatter};
