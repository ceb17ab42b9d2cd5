//! Share code value object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque random token identifying a shared diary.
///
/// The same code serves as the direct lookup key for a diary and as the
/// redemption token carried by invitation links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareCode(String);

impl ShareCode {
    /// Wrap an existing code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ShareCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for ShareCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}
