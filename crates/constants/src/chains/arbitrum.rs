//! Constants for Arbitrum One.

use crate::{ChainConstants, OrderType, ReactorAddresses, ResolverAddresses};
use alloy::primitives::{address, Address};

/// Chain ID for Arbitrum One.
pub const CHAIN_ID: u64 = 42161;

/// Cosigned V2 Dutch reactor.
pub const DUTCH_V2_REACTOR: Address = address!("0x1bd1aAdc9E230626C44a139d7E70d842749351eb");
/// Cosigned V3 Dutch reactor.
pub const DUTCH_V3_REACTOR: Address = address!("0xB274d5F4b833b61B340b654d600A864fB604a87c");

/// Reactor table for Arbitrum One.
pub const REACTORS: ReactorAddresses = ReactorAddresses::new()
    .with(OrderType::DutchV2, DUTCH_V2_REACTOR)
    .with(OrderType::DutchV3, DUTCH_V3_REACTOR);

/// Arbitrum One constants.
pub const ARBITRUM: ChainConstants =
    ChainConstants::new(CHAIN_ID, crate::PERMIT2_ADDRESS, None, REACTORS, ResolverAddresses::new());
