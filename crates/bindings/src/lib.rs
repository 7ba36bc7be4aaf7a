#![doc = include_str!("../README.md")]
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

mod bindings;
pub use bindings::{
    errors, DutchInput, DutchOutput, ExclusiveDutchOrder, FeeEscalator, HybridCosignerData,
    HybridInput, HybridOrder, HybridOutput, IOrderQuoter, IPermit2, InputToken,
    NonlinearDutchDecay, OrderInfo, OutputToken, PriorityCosignerData, PriorityInput,
    PriorityOrder, PriorityOutput, RelayInput, RelayOrder, RelayOrderInfo, ResolvedOrder,
    V2CosignerData, V2DutchOrder, V3CosignerData, V3DutchInput, V3DutchOrder, V3DutchOutput,
};
