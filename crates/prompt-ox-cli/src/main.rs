//! Command line front end for `prompt-ox`.
//!
//! Usage:
//! ```bash
//! # Render a conversation file as a Llama 3 prompt
//! prompt-ox render --family llama3 --input history.json
//!
//! # Read the conversation from stdin, without the trailing assistant header
//! cat history.json | prompt-ox render --family qwen --no-assistant-header
//!
//! # Append generated text as an assistant turn and print the new history
//! prompt-ox wrap --family phi --input history.json "Paris."
//!
//! # Guess the family from a model file name
//! prompt-ox detect Meta-Llama-3.1-8B-Instruct-Q4_K_M.gguf
//! ```

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use prompt_ox::{Conversation, FormatterOptions, ModelFamily, Role};
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(name = "prompt-ox")]
#[command(about = "Render conversations into model family chat prompts")]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the prompt for a conversation
    Render {
        /// Model family: llama3, phi, qwen (chatml) or mistral
        #[arg(short, long, value_parser = parse_family)]
        family: ModelFamily,

        /// Conversation JSON file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Do not append the assistant header after the last message
        #[arg(long)]
        no_assistant_header: bool,
    },
    /// Append text as a new turn and print the resulting conversation JSON
    Wrap {
        #[arg(short, long, value_parser = parse_family)]
        family: ModelFamily,

        /// Conversation JSON file, `-` for stdin. Starts empty when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Role of the new turn
        #[arg(short, long, default_value = "assistant", value_parser = parse_role)]
        role: Role,

        /// Text of the new turn, kept verbatim
        text: String,
    },
    /// Guess the model family from a model identifier or file name
    Detect { model: String },
    /// List supported model families
    Families,
}

fn parse_family(value: &str) -> Result<ModelFamily, String> {
    ModelFamily::from_name(value).map_err(|e| e.to_string())
}

fn parse_role(value: &str) -> Result<Role, String> {
    value
        .parse()
        .map_err(|_| format!("Unknown role: {value}"))
}

fn load_conversation(path: &Path) -> Result<Conversation> {
    let history = if path == Path::new("-") {
        let mut json = String::new();
        io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read conversation from stdin")?;
        Conversation::from_json(&json).context("Invalid conversation on stdin")?
    } else {
        Conversation::load(path)
            .with_context(|| format!("Failed to load conversation from {}", path.display()))?
    };

    log::debug!("Loaded {} messages from {}", history.len(), path.display());
    Ok(history)
}

fn run(command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Render {
            family,
            input,
            no_assistant_header,
        } => {
            let options = FormatterOptions::builder()
                .add_assistant_header(!no_assistant_header)
                .build();
            if no_assistant_header && !family.supports_assistant_header() {
                log::warn!("{family} has no assistant header, --no-assistant-header ignored");
            }

            let history = load_conversation(&input)?;
            let formatter = family.formatter(options);
            let prompt = formatter.render(&history);
            log::debug!("{} rendered {} bytes", formatter.name(), prompt.len());
            write!(out, "{prompt}")?;
        }
        Command::Wrap {
            family,
            input,
            role,
            text,
        } => {
            let mut history = match input {
                Some(path) => load_conversation(&path)?,
                None => Conversation::new(),
            };
            let formatter = family.formatter(FormatterOptions::default());
            history.extend_from(formatter.wrap_as_turn(role, &text));
            writeln!(out, "{}", history.to_json_pretty()?)?;
        }
        Command::Detect { model } => {
            let family = ModelFamily::detect(&model)
                .ok_or_else(|| anyhow!("Could not detect a model family for {model}"))?;
            writeln!(out, "{family}")?;
        }
        Command::Families => {
            for family in ModelFamily::iter() {
                let header = if family.supports_assistant_header() {
                    "assistant header on by default"
                } else {
                    "no assistant header"
                };
                writeln!(out, "{family}\t{header}")?;
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("prompt-ox").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli.command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn write_history(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("prompt-ox-{}-{name}.json", std::process::id()));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_render_from_file() {
        let path = write_history(
            "render",
            r#"{"messages":[{"role":"system","content":"S"},{"role":"user","content":"U"}]}"#,
        );
        let output = run_to_string(&[
            "render",
            "--family",
            "mistral",
            "--input",
            path.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(output, "<s>[INST] S\n\nU [/INST]");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_conversation_from_file() {
        let path = write_history(
            "load",
            r#"{"messages":[{"role":"user","content":"Q"},{"role":"assistant","content":"A"}]}"#,
        );
        let history = load_conversation(&path).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.messages()[1].role(), Role::Assistant);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_conversation_missing_file_names_path() {
        let path = std::env::temp_dir().join("prompt-ox-does-not-exist.json");
        let err = load_conversation(&path).unwrap_err();
        assert!(err.to_string().contains("prompt-ox-does-not-exist.json"));
    }

    #[test]
    fn test_render_without_assistant_header() {
        let path = write_history("no-header", r#"{"messages":[{"role":"user","content":"Hi"}]}"#);
        let output = run_to_string(&[
            "render",
            "-f",
            "chatml",
            "-i",
            path.to_str().unwrap(),
            "--no-assistant-header",
        ])
        .unwrap();
        assert_eq!(output, "<|im_start|>user\nHi<|im_end|>\n");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_wrap_starts_from_empty_history() {
        let output = run_to_string(&["wrap", "--family", "llama3", "  Paris. "]).unwrap();
        let history = Conversation::from_json(&output).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.messages()[0].role(), Role::Assistant);
        assert_eq!(history.messages()[0].content(), "  Paris. ");
    }

    #[test]
    fn test_unknown_family_is_rejected() {
        let err = Cli::try_parse_from(["prompt-ox", "render", "--family", "gemma"]).unwrap_err();
        assert!(err.to_string().contains("Unknown model family"));
    }

    #[test]
    fn test_detect() {
        assert_eq!(run_to_string(&["detect", "phi-4-mini"]).unwrap(), "phi\n");
        assert!(run_to_string(&["detect", "gemma-2-9b"]).is_err());
    }

    #[test]
    fn test_families_lists_all() {
        let output = run_to_string(&["families"]).unwrap();
        assert_eq!(output.lines().count(), 4);
        assert!(output.contains("mistral\tno assistant header"));
    }
}
