//! Decay and scaling algorithms. Every function here is pure and matches the
//! rounding of the settlement contracts.

mod curve;
pub use curve::{shares_scaling_direction, HybridPriceCurve, PriceCurveElement, MAX_SCALING_FACTOR};

mod linear;
pub use linear::{linear_time_decay, LinearDecay};

pub mod math;
pub use math::{BPS, GWEI, MPS, WAD};

mod piecewise;
pub use piecewise::{
    bounded_piecewise_block_decay, piecewise_block_decay, CurveSegment, PiecewiseCurve,
    MAX_SEGMENTS,
};

mod priority;
pub use priority::{priority_fee_scaling, ScalingRole};
