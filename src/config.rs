//! Decoding options shared by a vector and the values it produces.

use serde::{Deserialize, Serialize};

/// What to do when a map row repeats a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuplicateKeyPolicy {
    /// Fail with `MalformedMap`.
    #[default]
    Reject,
    /// Keep the last value at the key's first position.
    LastWins,
}

/// Configuration for column vector construction and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Handling of repeated map keys (default: `Reject`).
    pub duplicate_keys: DuplicateKeyPolicy,
    /// Check every stored slot against the column type at construction
    /// (default: true).
    pub verify_layout: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeyPolicy::Reject,
            verify_layout: true,
        }
    }
}

impl DecodeConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicate map key policy.
    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Enables or disables slot verification at construction.
    #[must_use]
    pub fn with_verify_layout(mut self, verify: bool) -> Self {
        self.verify_layout = verify;
        self
    }
}
