//! Order value objects and resolution math for reactor-settled orders.
//!
//! - [`decay`] holds the pure decay and scaling algorithms.
//! - [`OrderVariant`] wraps every supported order family, validated once at
//!   construction, and resolves it to concrete amounts against a
//!   [`ResolutionContext`].
//! - [`ValidationOutcome`] is the taxonomy order dry-runs are classified into.

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
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod decay;

mod error;
pub use error::{FieldError, OrderDecodeError, PriceCurveError, ResolutionError};

mod order;
pub use order::{
    CosignedOrder, DutchOrder, DutchV2Order, DutchV3Order, HybridOrder, OrderVariant,
    PriorityOrder, RelayOrder, ResolutionContext, ResolvedInput, ResolvedOrder, ResolvedOutput,
    TokenAmount,
};

mod validation;
pub use validation::ValidationOutcome;
