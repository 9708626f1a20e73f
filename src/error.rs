use thiserror::Error;

use crate::domain::{DomainError, Provider, Sport};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("no team alias table configured for sport '{sport}'")]
    MissingAliasTable { sport: Sport },
}

/// Provider fetch errors with structured variants.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider}: http request failed: {source}")]
    Http {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: unexpected response status {status}")]
    Status { provider: Provider, status: u16 },

    #[error("{provider}: failed to decode payload: {reason}")]
    Decode { provider: Provider, reason: String },

    #[error("{provider}: missing API key (set the {env} environment variable)")]
    MissingApiKey { provider: Provider, env: String },
}

/// Top-level error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
