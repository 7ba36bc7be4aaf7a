/// Error type for configuration lookups and loading. Captures missing table
/// entries as well as failures loading tables from JSON or the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No table entry exists for the requested item on the given chain.
    #[error("no {what} configured for chain {chain_id}")]
    ConfigurationMissing {
        /// The item that was looked up.
        what: String,
        /// The chain ID on which the lookup happened.
        chain_id: u64,
    },
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing environment variable
    #[error("failed to parse environment variable: {0}")]
    Parse(#[from] std::num::ParseIntError),
    /// Error parsing hex from environment variable
    #[error("failed to parse hex: {0}")]
    Hex(#[from] alloy::hex::FromHexError),
    /// Error parsing JSON
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }

    /// Missing table entry for a chain.
    pub fn configuration_missing(what: impl Into<String>, chain_id: u64) -> Self {
        ConfigError::ConfigurationMissing { what: what.into(), chain_id }
    }
}
