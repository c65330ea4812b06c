//! Shared `key=value` token handling for layout and partition descriptors.

use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::StorageError;

/// Policy for unrecognized or malformed tokens in a descriptor string.
///
/// The lenient policy reproduces the long-standing flag behavior: unknown
/// keys and tokens without a `=` separator are skipped without error, and
/// only the required fields of each descriptor are checked. The strict
/// policy rejects both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenPolicy {
    /// Skip unknown keys and tokens without `=`.
    #[default]
    Lenient,
    /// Reject unknown keys and tokens without `=`.
    Strict,
}

impl TokenPolicy {
    /// Handles a `key=value` token whose key is not recognized.
    pub(crate) fn on_unknown_key(self, key: &str, raw: &str) -> Result<(), StorageError> {
        match self {
            Self::Lenient => Ok(()),
            Self::Strict => Err(StorageError::UnknownKey {
                key: key.to_string(),
                raw: raw.to_string(),
            }),
        }
    }

    /// Handles a token that carries no `=` separator.
    pub(crate) fn on_bare_token(self, token: &str, raw: &str) -> Result<(), StorageError> {
        match self {
            Self::Lenient => Ok(()),
            Self::Strict => Err(StorageError::MalformedToken {
                token: token.to_string(),
                raw: raw.to_string(),
            }),
        }
    }
}

/// Parses an integer token value, naming the offending input on failure.
pub(crate) fn parse_int<T>(what: &'static str, value: &str) -> Result<T, StorageError>
where
    T: FromStr<Err = ParseIntError>,
{
    value.parse().map_err(|_| StorageError::Parse {
        what,
        value: value.to_string(),
    })
}
