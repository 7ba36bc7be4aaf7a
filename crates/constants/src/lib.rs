//! Reactor system constants.
//!
//! This crate contains the per-chain address tables used to route serialized
//! orders: which settlement reactor serves each order type, which auction
//! resolvers are known, and where Permit2 and the order quoter live.
//!

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod chains;
pub use chains::{arbitrum, base, mainnet, test_utils};

pub mod env_utils;

mod types;
pub use types::{
    ChainConstants, ConfigError, KnownChains, OrderType, ParseChainError, ParseOrderTypeError,
    ReactorAddresses, ResolverAddresses,
};

use alloy::primitives::{address, Address};

/// The canonical Permit2 deployment. Permit2 lives at the same address on
/// every supported chain.
pub const PERMIT2_ADDRESS: Address = address!("0x000000000022D473030F116dDEE9F6B43aC78BA3");
