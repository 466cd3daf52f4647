//! Configuration module
//!
//! Settings are read from the environment (after loading an optional `.env`
//! file). Every value has a default so a fresh node can bootstrap against an
//! empty registry.

use std::env;
use std::path::PathBuf;

use anyhow::Context;

use crate::constants::{DEFAULT_API_KEY_LENGTH, DEFAULT_API_SECRET_LENGTH, DEFAULT_NAMESPACE_PREFIX};

const DEFAULT_REGISTRY_PATH: &str = "stowage-registry.json";

/// Stowage configuration
#[derive(Clone, Debug)]
pub struct StowageConfig {
    pub registry_path: PathBuf,
    pub namespace_prefix: String,
    pub api_key_length: usize,
    pub api_secret_length: usize,
}

impl Default for StowageConfig {
    fn default() -> Self {
        StowageConfig {
            registry_path: PathBuf::from(DEFAULT_REGISTRY_PATH),
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            api_key_length: DEFAULT_API_KEY_LENGTH,
            api_secret_length: DEFAULT_API_SECRET_LENGTH,
        }
    }
}

impl StowageConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StowageConfig::default();

        let registry_path = lookup("STOWAGE_REGISTRY_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.registry_path);

        let namespace_prefix = lookup("STOWAGE_NAMESPACE_PREFIX")
            .unwrap_or(defaults.namespace_prefix);

        let api_key_length =
            parse_length(&lookup, "STOWAGE_API_KEY_LENGTH", defaults.api_key_length)?;
        let api_secret_length = parse_length(
            &lookup,
            "STOWAGE_API_SECRET_LENGTH",
            defaults.api_secret_length,
        )?;

        let config = StowageConfig {
            registry_path,
            namespace_prefix,
            api_key_length,
            api_secret_length,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.api_key_length == 0 {
            return Err(anyhow::anyhow!("STOWAGE_API_KEY_LENGTH must be positive"));
        }
        if self.api_secret_length <= self.api_key_length {
            return Err(anyhow::anyhow!(
                "STOWAGE_API_SECRET_LENGTH ({}) must be greater than STOWAGE_API_KEY_LENGTH ({})",
                self.api_secret_length,
                self.api_key_length
            ));
        }
        if !self.namespace_prefix.is_empty() && !self.namespace_prefix.ends_with('.') {
            return Err(anyhow::anyhow!("STOWAGE_NAMESPACE_PREFIX must end with '.'"));
        }
        Ok(())
    }
}

fn parse_length<F>(lookup: &F, key: &str, default: usize) -> Result<usize, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("{} must be a number", key)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = StowageConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.registry_path, PathBuf::from("stowage-registry.json"));
        assert_eq!(config.namespace_prefix, "stowage.grpc.");
        assert_eq!(config.api_key_length, 16);
        assert_eq!(config.api_secret_length, 24);
    }

    #[test]
    fn reads_overrides() {
        let config = StowageConfig::from_lookup(lookup(&[
            ("STOWAGE_REGISTRY_PATH", "/etc/stowage/registry.json"),
            ("STOWAGE_NAMESPACE_PREFIX", "acme."),
            ("STOWAGE_API_KEY_LENGTH", "20"),
            ("STOWAGE_API_SECRET_LENGTH", "40"),
        ]))
        .unwrap();
        assert_eq!(
            config.registry_path,
            PathBuf::from("/etc/stowage/registry.json")
        );
        assert_eq!(config.namespace_prefix, "acme.");
        assert_eq!(config.api_key_length, 20);
        assert_eq!(config.api_secret_length, 40);
    }

    #[test]
    fn secret_must_be_longer_than_key() {
        let result = StowageConfig::from_lookup(lookup(&[
            ("STOWAGE_API_KEY_LENGTH", "24"),
            ("STOWAGE_API_SECRET_LENGTH", "24"),
        ]));
        assert!(result.is_err());

        let result = StowageConfig::from_lookup(lookup(&[("STOWAGE_API_KEY_LENGTH", "abc")]));
        assert!(result.is_err());
    }
}
