pub mod llama3;
pub mod mistral;
pub mod phi;
pub mod qwen;

pub use llama3::Llama3Formatter;
pub use mistral::MistralFormatter;
pub use phi::PhiFormatter;
pub use qwen::QwenFormatter;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{PromptError, Result};
use crate::formatter::{FormatterOptions, HistoryFormatter};

/// Model families with a bundled formatter.
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
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ModelFamily {
    /// Meta Llama 3.x header tokens.
    #[strum(to_string = "llama3", serialize = "llama-3")]
    Llama3,
    /// Microsoft Phi-3 / Phi-4 role tags.
    #[strum(to_string = "phi", serialize = "phi3", serialize = "phi4")]
    Phi,
    /// ChatML as used by Qwen.
    #[strum(
        to_string = "qwen",
        serialize = "chatml",
        serialize = "qwen2",
        serialize = "qwen3"
    )]
    Qwen,
    /// Mistral Instruct brackets.
    #[strum(to_string = "mistral")]
    Mistral,
}

impl ModelFamily {
    /// Parses a family identifier such as `llama3`, `chatml` or `Mistral`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::UnknownFamily`] if the identifier is not recognised.
    pub fn from_name(name: &str) -> Result<Self> {
        name.trim()
            .parse()
            .map_err(|_| PromptError::UnknownFamily(name.to_string()))
    }

    /// Guesses the family from a model identifier or GGUF file name,
    /// e.g. `Meta-Llama-3.1-8B-Instruct-Q4_K_M.gguf` or `qwen2.5-7b-instruct`.
    #[must_use]
    pub fn detect(model_name: &str) -> Option<Self> {
        let normalized: String = model_name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let family = if normalized.contains("qwen") {
            Some(Self::Qwen)
        } else if is_llama3(model_name) {
            Some(Self::Llama3)
        } else if normalized.contains("phi3") || normalized.contains("phi4") {
            Some(Self::Phi)
        } else if normalized.contains("mistral") || normalized.contains("mixtral") {
            Some(Self::Mistral)
        } else {
            None
        };

        log::debug!("Detected family {family:?} for model {model_name}");
        family
    }

    /// Builds a fresh formatter for this family.
    ///
    /// Mistral has no assistant header and ignores `options`.
    #[must_use]
    pub fn formatter(self, options: FormatterOptions) -> Box<dyn HistoryFormatter> {
        match self {
            Self::Llama3 => Box::new(Llama3Formatter::from(options)),
            Self::Phi => Box::new(PhiFormatter::from(options)),
            Self::Qwen => Box::new(QwenFormatter::from(options)),
            Self::Mistral => Box::new(MistralFormatter::new()),
        }
    }

    /// Whether the family's formatter honours
    /// [`FormatterOptions::add_assistant_header`].
    #[must_use]
    pub fn supports_assistant_header(self) -> bool {
        !matches!(self, Self::Mistral)
    }
}

/// Looks for a `llama` marker followed by version 3 (`llama3`, `llama-3.1`),
/// rejecting longer numbers (`llama-30b`) and the Llama 2 based `codellama`.
fn is_llama3(model_name: &str) -> bool {
    const SEPARATORS: [char; 3] = ['-', '_', ' '];

    let lower = model_name.to_lowercase();
    lower.match_indices("llama").any(|(start, marker)| {
        let before = lower[..start].trim_end_matches(SEPARATORS);
        let mut version = lower[start + marker.len()..]
            .trim_start_matches(SEPARATORS)
            .chars();

        !before.ends_with("code")
            && version.next() == Some('3')
            && !version.next().is_some_and(|c| c.is_ascii_digit())
    })
}
