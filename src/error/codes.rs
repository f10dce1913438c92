//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Input errors
//! - 3xx: Config errors
//! - 6xx: Serialization errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for JSON output.
///
/// Each variant maps to a numeric code (e.g., `InputMalformed` -> E102).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Input errors (1xx)
    // ========================================
    /// E101: A listing batch could not be read
    InputUnreadable,
    /// E102: A listing batch is not a provider page or listing array
    InputMalformed,
    /// E103: A timestamp argument could not be parsed
    TimestampInvalid,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file not found
    ConfigNotFound,
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,

    // ========================================
    // Serialization errors (6xx)
    // ========================================
    /// E601: Output could not be encoded
    SerializationError,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Unexpected internal failure
    InternalError,
    /// E902: Filesystem or stream failure
    IoError,
}

impl ErrorCode {
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::InputUnreadable => 101,
            Self::InputMalformed => 102,
            Self::TimestampInvalid => 103,

            Self::ConfigNotFound => 301,
            Self::ConfigInvalid => 302,

            Self::SerializationError => 601,

            Self::InternalError => 901,
            Self::IoError => 902,
        }
    }

    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::InputUnreadable => "Check that the batch file exists and is readable, or pipe listings on stdin",
            Self::InputMalformed => "Each batch must be a provider page ({\"count\", \"results\"}) or a JSON array of listings",
            Self::TimestampInvalid => "Pass timestamps in RFC 3339 form, e.g. 2024-05-01T12:00:00Z",

            Self::ConfigNotFound => "Create ~/.config/jobstats/config.toml or pass --config <path>",
            Self::ConfigInvalid => "Run `jobstats config` to see current values. Check TOML syntax in config file",

            Self::SerializationError => "The data could not be encoded. Re-run with -vv for details",

            Self::InternalError => "This is a bug. Re-run with -vvv and report the log output",
            Self::IoError => "Check file permissions and that the output stream is still open",
        }
    }

    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InputUnreadable | Self::InputMalformed | Self::TimestampInvalid => "input",
            Self::ConfigNotFound | Self::ConfigInvalid => "config",
            Self::SerializationError => "serialization",
            Self::InternalError | Self::IoError => "internal",
        }
    }

    /// Whether the user can fix the condition without a code change.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InternalError)
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::InputUnreadable,
            Self::InputMalformed,
            Self::TimestampInvalid,
            Self::ConfigNotFound,
            Self::ConfigInvalid,
            Self::SerializationError,
            Self::InternalError,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
