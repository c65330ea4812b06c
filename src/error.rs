//! Error types for the Rackforge CLI.
//!
//! This module provides the error hierarchy for all operations: profile
//! configuration, drive/layout/partition parsing, and Rackforge API calls.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the Rackforge CLI.
#[derive(Debug, Error)]
pub enum RackforgeError {
    /// Profile and input-file errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rackforge API errors.
    #[error("Rackforge API error: {0}")]
    Api(#[from] ApiError),

    /// Drive/layout/partition configuration errors.
    #[error("Storage configuration error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Profile and input-file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration or input file was not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// A configuration or input file could not be parsed.
    #[error("Failed to parse {location}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Source file of the error.
        location: String,
    },

    /// The requested profile does not exist in the settings file.
    #[error("Unknown profile: {name}")]
    UnknownProfile {
        /// Name of the missing profile.
        name: String,
    },

    /// No API token could be resolved from flags, environment or profile.
    #[error("No API token configured; run 'rackforge config set-token' or set RACKFORGE_API_TOKEN")]
    MissingToken,

    /// A required argument was supplied neither as a flag nor via --input.
    #[error("Missing required argument: {name}")]
    MissingArgument {
        /// Name of the missing argument.
        name: String,
    },

    /// An invalid field mask was passed to --fields.
    #[error("Unknown field '{field}'; valid fields: {allowed}")]
    InvalidFieldMask {
        /// The unrecognized field name.
        field: String,
        /// Comma-separated list of valid field names.
        allowed: String,
    },
}

/// Rackforge API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Description of the auth failure.
        message: String,
    },

    /// API request failed with a non-success status.
    #[error("API request failed: {status} - {message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("Not found: {path}")]
    NotFound {
        /// Request path that returned 404.
        path: String,
    },

    /// Network error.
    #[error("Network error: {message}")]
    NetworkError {
        /// Description of the network error.
        message: String,
    },

    /// The API returned a body that could not be decoded.
    #[error("Invalid response from API: {message}")]
    InvalidResponse {
        /// Description of the response issue.
        message: String,
    },
}

/// Drive/layout/partition configuration errors.
///
/// Two kinds exist, distinguished by [`StorageError::kind`]: parse errors
/// (a token could not be read as the expected primitive) and validation
/// errors (well-formed input violating a required invariant). Every parse
/// entry point is all-or-nothing; a failure discards whatever was parsed
/// so far for that call.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A flag token could not be interpreted as an integer.
    #[error("can't parse {what} '{value}' as an integer")]
    Parse {
        /// What was being parsed (e.g. "drive slot position").
        what: &'static str,
        /// The offending token value.
        value: String,
    },

    /// A layout descriptor carried no `slot` token.
    #[error("slots not passed for layout '{raw}'")]
    LayoutMissingSlots {
        /// The raw layout descriptor string.
        raw: String,
    },

    /// A layout descriptor carried no `raid` token.
    #[error("raid not passed for layout '{raw}'")]
    LayoutMissingRaid {
        /// The raw layout descriptor string.
        raw: String,
    },

    /// A partition descriptor carried no `slot` token.
    #[error("no slot specified for partition: '{raw}'")]
    PartitionMissingSlot {
        /// The raw partition descriptor string.
        raw: String,
    },

    /// No layout's slot set matches a partition group's slot set exactly.
    #[error("can't apply partition: no layout found with slots: {slots:?}")]
    NoMatchingLayout {
        /// The partition group's sorted slot positions.
        slots: Vec<u32>,
    },

    /// Partition flags were supplied but no layout exists anywhere.
    #[error("partition given but layout is empty")]
    PartitionWithoutLayout,

    /// Strict policy only: a descriptor carried an unrecognized key.
    #[error("unknown key '{key}' in '{raw}'")]
    UnknownKey {
        /// The unrecognized key.
        key: String,
        /// The raw descriptor string.
        raw: String,
    },

    /// Strict policy only: a descriptor carried a token without '='.
    #[error("malformed token '{token}' in '{raw}'")]
    MalformedToken {
        /// The token lacking a '=' separator.
        token: String,
        /// The raw descriptor string.
        raw: String,
    },
}

/// The kind of a [`StorageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// A value could not be read as the expected primitive.
    Parse,
    /// Structurally readable input violating a required invariant.
    Validation,
}

/// Result type alias for Rackforge operations.
pub type Result<T> = std::result::Result<T, RackforgeError>;

impl RackforgeError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl ApiError {
    /// Creates a request-failed error.
    #[must_use]
    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates an invalid-response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

impl StorageError {
    /// Classifies this error as a parse or a validation failure.
    #[must_use]
    pub const fn kind(&self) -> StorageErrorKind {
        match self {
            Self::Parse { .. } | Self::MalformedToken { .. } => StorageErrorKind::Parse,
            Self::LayoutMissingSlots { .. }
            | Self::LayoutMissingRaid { .. }
            | Self::PartitionMissingSlot { .. }
            | Self::NoMatchingLayout { .. }
            | Self::PartitionWithoutLayout
            | Self::UnknownKey { .. } => StorageErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_messages_are_stable() {
        let err = StorageError::LayoutMissingRaid {
            raw: String::from("slot=1"),
        };
        assert_eq!(err.to_string(), "raid not passed for layout 'slot=1'");

        let err = StorageError::LayoutMissingSlots {
            raw: String::from("raid=5"),
        };
        assert_eq!(err.to_string(), "slots not passed for layout 'raid=5'");

        let err = StorageError::PartitionMissingSlot {
            raw: String::from("target=/boot"),
        };
        assert_eq!(
            err.to_string(),
            "no slot specified for partition: 'target=/boot'"
        );
    }

    #[test]
    fn test_storage_error_kinds() {
        let parse = StorageError::Parse {
            what: "slot",
            value: String::from("x"),
        };
        assert_eq!(parse.kind(), StorageErrorKind::Parse);

        let validation = StorageError::PartitionWithoutLayout;
        assert_eq!(validation.kind(), StorageErrorKind::Validation);
    }
}
