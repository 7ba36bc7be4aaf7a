//! Helpers for loading configuration from environment variables.

use crate::ConfigError;
use alloy::primitives::Address;
use std::env;

/// Load a variable from the environment
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::missing(key))
}

/// Load a variable from the environment
pub fn load_string_opt(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Load a variable from the environment
pub fn load_u64(key: &str) -> Result<u64, ConfigError> {
    let val = load_string(key)?;
    val.parse::<u64>().map_err(Into::into)
}

/// Load a variable from the environment
pub fn load_address(key: &str) -> Result<Address, ConfigError> {
    load_string(key)?.parse().map_err(Into::into)
}

/// Load an optional address from the environment. An unset variable is
/// `Ok(None)`, a malformed one is an error.
pub fn load_address_opt(key: &str) -> Result<Option<Address>, ConfigError> {
    load_string_opt(key).map(|val| val.parse().map_err(Into::into)).transpose()
}
