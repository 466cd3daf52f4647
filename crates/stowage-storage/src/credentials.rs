//! Generated credentials for new local backends.

use rand::distr::Alphanumeric;
use rand::Rng;
use stowage_core::constants::{DEFAULT_API_KEY_LENGTH, DEFAULT_API_SECRET_LENGTH};
use stowage_core::StowageConfig;

/// Lengths of generated API keys and secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub api_key_length: usize,
    pub api_secret_length: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        CredentialPolicy {
            api_key_length: DEFAULT_API_KEY_LENGTH,
            api_secret_length: DEFAULT_API_SECRET_LENGTH,
        }
    }
}

impl From<&StowageConfig> for CredentialPolicy {
    fn from(config: &StowageConfig) -> Self {
        CredentialPolicy {
            api_key_length: config.api_key_length,
            api_secret_length: config.api_secret_length,
        }
    }
}

impl CredentialPolicy {
    /// Fresh random `(api_key, api_secret)` pair.
    pub fn generate(&self) -> (String, String) {
        (
            random_token(self.api_key_length),
            random_token(self.api_secret_length),
        )
    }
}

fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
