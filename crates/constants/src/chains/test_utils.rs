//! Constants for local testing. Every address is a repeated byte so that
//! failures are easy to read.

use crate::{ChainConstants, OrderType, ReactorAddresses, ResolverAddresses};
use alloy::primitives::Address;

/// Chain ID for the test chain.
pub const CHAIN_ID: u64 = 31337;

/// Permit2 on the test chain.
pub const PERMIT2: Address = crate::PERMIT2_ADDRESS;

/// Exclusive Dutch reactor.
pub const DUTCH_REACTOR: Address = Address::repeat_byte(0x11);
/// Cosigned V2 Dutch reactor.
pub const DUTCH_V2_REACTOR: Address = Address::repeat_byte(0x12);
/// Cosigned V3 Dutch reactor.
pub const DUTCH_V3_REACTOR: Address = Address::repeat_byte(0x13);
/// Priority reactor.
pub const PRIORITY_REACTOR: Address = Address::repeat_byte(0x14);
/// Hybrid reactor.
pub const HYBRID_REACTOR: Address = Address::repeat_byte(0x15);
/// Relay reactor.
pub const RELAY_REACTOR: Address = Address::repeat_byte(0x16);

/// V3 Dutch auction resolver.
pub const DUTCH_V3_RESOLVER: Address = Address::repeat_byte(0x21);
/// Priority auction resolver.
pub const PRIORITY_RESOLVER: Address = Address::repeat_byte(0x22);
/// Hybrid auction resolver.
pub const HYBRID_RESOLVER: Address = Address::repeat_byte(0x23);

/// Order quoter.
pub const ORDER_QUOTER: Address = Address::repeat_byte(0x31);

/// Reactor table for the test chain.
pub const REACTORS: ReactorAddresses = ReactorAddresses::new()
    .with(OrderType::Dutch, DUTCH_REACTOR)
    .with(OrderType::DutchV2, DUTCH_V2_REACTOR)
    .with(OrderType::DutchV3, DUTCH_V3_REACTOR)
    .with(OrderType::Priority, PRIORITY_REACTOR)
    .with(OrderType::Hybrid, HYBRID_REACTOR)
    .with(OrderType::Relay, RELAY_REACTOR);

/// Resolver table for the test chain.
pub const RESOLVERS: ResolverAddresses = ResolverAddresses::new()
    .with(OrderType::DutchV3, DUTCH_V3_RESOLVER)
    .with(OrderType::Priority, PRIORITY_RESOLVER)
    .with(OrderType::Hybrid, HYBRID_RESOLVER);

/// Test chain constants.
pub const TEST_CONSTANTS: ChainConstants =
    ChainConstants::new(CHAIN_ID, PERMIT2, Some(ORDER_QUOTER), REACTORS, RESOLVERS);
