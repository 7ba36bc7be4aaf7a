/// Arbitrum One chain constants.
pub mod arbitrum;

/// Base chain constants.
pub mod base;

/// Ethereum mainnet chain constants.
pub mod mainnet;

/// Test utilities for chains.
pub mod test_utils;
