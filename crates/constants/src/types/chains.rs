use crate::ChainConstants;
use std::str::FromStr;

/// The list of known chains as a string.
#[cfg(not(any(test, feature = "test-utils")))]
const KNOWN_CHAINS: &str = "mainnet, base, arbitrum";
#[cfg(any(test, feature = "test-utils"))]
const KNOWN_CHAINS: &str = "mainnet, base, arbitrum, test";

/// Error type for parsing struct from a chain name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseChainError {
    /// The chain name is not supported.
    #[error("chain name {0} is not parseable. supported chains: {KNOWN_CHAINS}")]
    ChainNotSupported(String),
}

/// Chains with hard-coded reactor tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KnownChains {
    /// Ethereum mainnet.
    Mainnet,
    /// Base.
    Base,
    /// Arbitrum One.
    Arbitrum,
    /// Test chain.
    #[cfg(any(test, feature = "test-utils"))]
    Test,
}

impl KnownChains {
    /// Get the hard-coded constants for this chain.
    pub const fn constants(&self) -> ChainConstants {
        match self {
            Self::Mainnet => ChainConstants::mainnet(),
            Self::Base => ChainConstants::base(),
            Self::Arbitrum => ChainConstants::arbitrum(),
            #[cfg(any(test, feature = "test-utils"))]
            Self::Test => ChainConstants::test(),
        }
    }

    /// Look up a known chain by chain ID.
    pub const fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            crate::mainnet::CHAIN_ID => Some(Self::Mainnet),
            crate::base::CHAIN_ID => Some(Self::Base),
            crate::arbitrum::CHAIN_ID => Some(Self::Arbitrum),
            #[cfg(any(test, feature = "test-utils"))]
            crate::test_utils::CHAIN_ID => Some(Self::Test),
            _ => None,
        }
    }
}

impl FromStr for KnownChains {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            #[cfg(any(test, feature = "test-utils"))]
            "test" => Ok(Self::Test),
            "mainnet" | "ethereum" => Ok(Self::Mainnet),
            "base" => Ok(Self::Base),
            "arbitrum" | "arbitrum-one" => Ok(Self::Arbitrum),
            _ => Err(ParseChainError::ChainNotSupported(s)),
        }
    }
}
