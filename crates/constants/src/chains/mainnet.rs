//! Constants for Ethereum mainnet.

use crate::{ChainConstants, OrderType, ReactorAddresses, ResolverAddresses};
use alloy::primitives::{address, Address};

/// Chain ID for Ethereum mainnet.
pub const CHAIN_ID: u64 = 1;

/// Exclusive Dutch reactor. Also settles limit orders.
pub const DUTCH_REACTOR: Address = address!("0x6000da47483062A0D734Ba3dc7576Ce6A0B645C4");
/// Cosigned V2 Dutch reactor.
pub const DUTCH_V2_REACTOR: Address = address!("0x00000011F84B9aa48e5f8aA8B9897600006289Be");
/// Relay reactor.
pub const RELAY_REACTOR: Address = address!("0x0000000000A4e21E2597DCac987455c48b12edBF");
/// Order quoter.
pub const ORDER_QUOTER: Address = address!("0x54539967a06Fc0E3C3ED0ee320Eb67362D13C5fF");

/// Reactor table for mainnet.
pub const REACTORS: ReactorAddresses = ReactorAddresses::new()
    .with(OrderType::Dutch, DUTCH_REACTOR)
    .with(OrderType::DutchV2, DUTCH_V2_REACTOR)
    .with(OrderType::Relay, RELAY_REACTOR);

/// Mainnet constants.
pub const MAINNET: ChainConstants = ChainConstants::new(
    CHAIN_ID,
    crate::PERMIT2_ADDRESS,
    Some(ORDER_QUOTER),
    REACTORS,
    ResolverAddresses::new(),
);
