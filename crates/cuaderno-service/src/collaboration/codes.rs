//! Share code generation.

use rand::{Rng, distributions::Alphanumeric};

use cuaderno_core::config::InvitationConfig;
use cuaderno_entity::diary::ShareCode;

/// Codes shorter than this are too guessable to act as bearer tokens.
const MIN_LENGTH: usize = 20;

/// Generates random share codes for shared diaries.
#[derive(Debug, Clone)]
pub struct ShareCodeGenerator {
    length: usize,
}

impl ShareCodeGenerator {
    /// Create a generator producing codes of the given length, clamped to
    /// the minimum.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(MIN_LENGTH),
        }
    }

    /// Create a generator from the invitation configuration.
    pub fn from_config(config: &InvitationConfig) -> Self {
        Self::new(config.share_code_length)
    }

    /// Generate a fresh alphanumeric share code.
    pub fn generate(&self) -> ShareCode {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();
        ShareCode::new(code)
    }
}

impl Default for ShareCodeGenerator {
    fn default() -> Self {
        Self::from_config(&InvitationConfig::default())
    }
}
