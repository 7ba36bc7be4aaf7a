//! Reactor order routing, nonce management, and validation.
//!
//! - [`OrderTypeRegistry`] classifies serialized orders by the resolver or
//!   reactor address they name, and decodes them into
//!   [`reactor_types::OrderVariant`]s.
//! - [`NonceAllocator`] hands out Permit2 unordered nonces from a
//!   [`NonceBitmapSource`], caching bitmaps per owner.
//! - [`OrderValidator`] dry-runs orders through the order quoter using a
//!   [`BatchCaller`] and classifies the results into
//!   [`reactor_types::ValidationOutcome`]s.
//!
//! [`Permit2Source`] and [`EthCallBatcher`] implement the collaborator
//! traits over any alloy [`Provider`](alloy::providers::Provider).

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

mod impls;
pub use impls::{EthCallBatcher, Permit2Source};

pub mod nonce;
pub use nonce::{NonceAllocator, NonceAllocatorConfig, NonceCache, NonceError};

mod registry;
pub use registry::{OrderDecoder, OrderTypeRegistry, RegistryError};

mod traits;
pub use traits::{BatchCall, BatchCaller, CallResult, NonceBitmapSource};

pub mod validation;
pub use validation::{ChainHead, OrderValidator, ValidationEntry, ValidationError};
