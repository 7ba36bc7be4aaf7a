//! Constants for Base.

use crate::{ChainConstants, OrderType, ReactorAddresses, ResolverAddresses};
use alloy::primitives::{address, Address};

/// Chain ID for Base.
pub const CHAIN_ID: u64 = 8453;

/// Priority order reactor.
pub const PRIORITY_REACTOR: Address = address!("0x000000001Ec5656dcdB24D90DFa42742738De729");

/// Reactor table for Base.
pub const REACTORS: ReactorAddresses =
    ReactorAddresses::new().with(OrderType::Priority, PRIORITY_REACTOR);

/// Base constants.
pub const BASE: ChainConstants =
    ChainConstants::new(CHAIN_ID, crate::PERMIT2_ADDRESS, None, REACTORS, ResolverAddresses::new());
