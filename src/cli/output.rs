use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::error::{JobError, Result, StructuredError};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable formatted output with colors (default)
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
    /// Tab-separated text without colors
    Plain,
}

impl OutputFormat {
    /// Parse a format name as written in configuration.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }

    #[must_use]
    pub const fn use_colors(&self) -> bool {
        matches!(self, Self::Human)
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| JobError::Serialization(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

/// Emit `value` as JSON, or through the text renderers.
pub fn emit_formatted<T: Serialize>(
    value: &T,
    format: OutputFormat,
    human_fn: impl FnOnce(&T) -> String,
    plain_fn: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Human => println!("{}", human_fn(value)),
        OutputFormat::Json => emit_json(value)?,
        OutputFormat::Plain => println!("{}", plain_fn(value)),
    }
    Ok(())
}

/// Machine-readable error envelope printed on stdout.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: StructuredError,
}

impl From<&JobError> for ErrorResponse {
    fn from(err: &JobError) -> Self {
        Self {
            success: false,
            error: err.to_structured(),
        }
    }
}

/// Report `err` either as a JSON envelope on stdout or as text on stderr.
pub fn emit_error(err: &JobError, machine: bool) {
    if machine {
        let payload = serde_json::to_string(&ErrorResponse::from(err)).unwrap_or_else(|_| {
            format!(r#"{{"success":false,"error":{{"message":{:?}}}}}"#, err.to_string())
        });
        println!("{payload}");
    } else {
        let structured = err.to_structured();
        eprintln!("{} {}", "error:".red().bold(), structured);
        eprintln!("  {} {}", "hint:".dimmed(), structured.suggestion);
    }
}

/// Line-oriented builder for human output.
pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 18,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(text.bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(text.bold().to_string());
        self.lines.push("-".repeat(text.chars().count().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        self.lines.push(format!("{} {value}", padded.dimmed()));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}
