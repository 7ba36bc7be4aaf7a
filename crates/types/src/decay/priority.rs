use crate::{
    decay::math::{mul_div_down, mul_div_up, MPS},
    ResolutionError,
};
use alloy::primitives::U256;

/// Whether a scaled amount is paid by the swapper or received by them. The
/// two sides round in opposite directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingRole {
    /// The amount is paid by the swapper and scales down.
    Input,
    /// The amount is received by the swapper and scales up.
    Output,
}

/// Scale `amount` by the priority fee paid above the baseline.
///
/// Inputs shrink by `fee * mps_per_priority_fee_wei` parts per ten million,
/// rounding down, and collapse to zero once that product reaches `MPS`.
/// Outputs grow by the same amount, rounding up.
pub fn priority_fee_scaling(
    amount: U256,
    mps_per_priority_fee_wei: U256,
    priority_fee_wei: U256,
    role: ScalingRole,
) -> Result<U256, ResolutionError> {
    let scaled = priority_fee_wei.checked_mul(mps_per_priority_fee_wei);
    match role {
        ScalingRole::Input => match scaled {
            Some(scaled) if scaled < MPS => {
                mul_div_down(amount, MPS - scaled, MPS).ok_or(ResolutionError::Overflow)
            }
            _ => Ok(U256::ZERO),
        },
        ScalingRole::Output => {
            let numerator = scaled
                .and_then(|scaled| scaled.checked_add(MPS))
                .ok_or(ResolutionError::Overflow)?;
            mul_div_up(amount, numerator, MPS).ok_or(ResolutionError::Overflow)
        }
    }
}
