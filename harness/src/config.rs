//! Configuration loaded from environment variables.

use crate::runner::Profile;
use std::env;

/// Which reporters receive the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn text(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

/// Harness configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Profiles to run, in order
    pub profiles: Vec<String>,
    /// Transcript, structured summary, or both
    pub format: OutputFormat,
    /// Forces the pretty flag on every case when set
    pub pretty: Option<bool>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profiles: Vec<String> = lookup("SKIPCHECK_PROFILES")
            .unwrap_or_else(|| "current,legacy".to_string())
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }
        if let Some(unknown) = profiles
            .iter()
            .find(|p| !Profile::NAMES.contains(&p.as_str()))
        {
            return Err(ConfigError::UnknownProfile(unknown.clone()));
        }

        let format = match lookup("SKIPCHECK_FORMAT").as_deref().map(str::trim) {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some("both") => OutputFormat::Both,
            Some(other) => return Err(ConfigError::InvalidFormat(other.to_string())),
        };

        let pretty = match lookup("SKIPCHECK_PRETTY") {
            None => None,
            Some(value) => Some(
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidPretty(value.clone()))?,
            ),
        };

        Ok(Self {
            profiles,
            format,
            pretty,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SKIPCHECK_PROFILES must name at least one profile")]
    NoProfiles,

    #[error("Unknown profile '{0}' (expected one of: current, legacy, reflective-only)")]
    UnknownProfile(String),

    #[error("Invalid SKIPCHECK_FORMAT value '{0}' (expected text, json or both)")]
    InvalidFormat(String),

    #[error("Invalid SKIPCHECK_PRETTY value '{0}' (expected true or false)")]
    InvalidPretty(String),
}
