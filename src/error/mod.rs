//! Error handling for jobstats.
//!
//! This module provides:
//! - [`JobError`]: The main error enum for all jobstats operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestion and context
//!
//! The analytics themselves never fail. Errors only come from reading
//! batches, parsing arguments, loading configuration and writing output.

mod codes;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;

/// Main error type for jobstats operations.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot read listings from {source_name}: {reason}")]
    InputUnreadable { source_name: String, reason: String },

    #[error("Malformed listing batch {source_name}: {reason}")]
    InvalidInput { source_name: String, reason: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl JobError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) | Self::Serialization(_) => ErrorCode::SerializationError,
            Self::InputUnreadable { .. } => ErrorCode::InputUnreadable,
            Self::InvalidInput { .. } => ErrorCode::InputMalformed,
            Self::InvalidTimestamp(_) => ErrorCode::TimestampInvalid,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigNotFound,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::InputUnreadable { source_name, .. } | Self::InvalidInput { source_name, .. } => {
                Some(serde_json::json!({ "source": source_name }))
            }
            Self::InvalidTimestamp(value) => Some(serde_json::json!({ "value": value })),
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_job_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "INPUT_MALFORMED")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 102)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    pub recoverable: bool,

    /// Error category (e.g., "input", "config")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            numeric_code: code.numeric(),
            message: message.into(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    /// Create a structured error from a [`JobError`].
    #[must_use]
    pub fn from_job_error(err: &JobError) -> Self {
        let code = err.code();
        let context = err.context();
        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion: suggest_for_error(code, context.as_ref()),
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    /// Add context to this error.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.suggestion = suggest_for_error(self.code, Some(&context));
        self.context = Some(context);
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<JobError> for StructuredError {
    fn from(err: JobError) -> Self {
        Self::from_job_error(&err)
    }
}

/// Context-aware suggestion; falls back to the static one for the code.
fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    let source = context
        .and_then(|c| c.get("source"))
        .and_then(Value::as_str);
    match (code, source) {
        (ErrorCode::InputUnreadable, Some("-")) => {
            "Nothing could be read from stdin. Pipe a listing batch or pass a file path".to_string()
        }
        (ErrorCode::InputUnreadable, Some(path)) => {
            format!("Check that '{path}' exists and is readable")
        }
        (ErrorCode::InputMalformed, Some(path)) => format!(
            "'{path}' must hold a provider page ({{\"count\", \"results\"}}) or a JSON array of listings"
        ),
        _ => code.suggestion().to_string(),
    }
}

/// Result type alias using [`JobError`].
pub type Result<T> = std::result::Result<T, JobError>;
