use crate::{
    decay::math::{bound, bounded_sub, mul_div_down},
    FieldError, ResolutionError,
};
use alloy::primitives::{I256, U256};
use reactor_bindings::NonlinearDutchDecay;

/// Maximum number of segments a piecewise curve may hold. Offsets are packed
/// as 16 `u16`s into a single word.
pub const MAX_SEGMENTS: usize = 16;

/// A single checkpoint on a piecewise curve. The resolved amount at the
/// checkpoint is `start_amount - relative_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSegment {
    /// Blocks after the decay start block.
    pub relative_block: u16,
    /// Amount subtracted from the start amount at this checkpoint. Negative
    /// values increase the amount.
    pub relative_amount: I256,
}

impl CurveSegment {
    /// Create a new segment.
    pub const fn new(relative_block: u16, relative_amount: I256) -> Self {
        Self { relative_block, relative_amount }
    }
}

/// A block-based piecewise linear decay curve.
///
/// Offsets strictly increase across segments. This is checked once at
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PiecewiseCurve {
    segments: Vec<CurveSegment>,
}

impl PiecewiseCurve {
    /// Create a new curve, validating segment count and ordering.
    pub fn new(segments: Vec<CurveSegment>) -> Result<Self, FieldError> {
        if segments.len() > MAX_SEGMENTS {
            return Err(FieldError::InvalidDecayCurve("more than 16 segments"));
        }
        if segments.windows(2).any(|pair| pair[0].relative_block >= pair[1].relative_block) {
            return Err(FieldError::InvalidDecayCurve("block offsets must strictly increase"));
        }
        Ok(Self { segments })
    }

    /// Get the segments.
    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// True if the curve has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Pack the curve into its on-chain representation.
    pub fn to_packed(&self) -> NonlinearDutchDecay {
        let offsets: Vec<u16> = self.segments.iter().map(|s| s.relative_block).collect();
        NonlinearDutchDecay {
            relativeBlocks: NonlinearDutchDecay::pack_blocks(&offsets),
            relativeAmounts: self.segments.iter().map(|s| s.relative_amount).collect(),
        }
    }

    /// Locate the bracketing checkpoints for `block_delta`, as
    /// `(start_block, end_block, start_relative, end_relative)`. Before the
    /// first checkpoint the bracket starts at block 0 with no change; at or
    /// past the last it collapses onto the last checkpoint.
    fn locate(&self, block_delta: u64) -> (u64, u64, I256, I256) {
        let Some(first) = self.segments.first() else {
            return (0, 0, I256::ZERO, I256::ZERO);
        };
        if u64::from(first.relative_block) >= block_delta {
            return (0, first.relative_block.into(), I256::ZERO, first.relative_amount);
        }
        for pair in self.segments.windows(2) {
            if u64::from(pair[1].relative_block) >= block_delta {
                return (
                    pair[0].relative_block.into(),
                    pair[1].relative_block.into(),
                    pair[0].relative_amount,
                    pair[1].relative_amount,
                );
            }
        }
        // non-empty, checked above
        let last = self.segments[self.segments.len() - 1];
        (last.relative_block.into(), last.relative_block.into(), last.relative_amount, last.relative_amount)
    }

    /// The relative amount at `block_delta` blocks after the decay start.
    pub fn relative_amount_at(&self, block_delta: u64) -> Result<I256, ResolutionError> {
        let (start_block, end_block, start, end) = self.locate(block_delta);
        signed_interpolate(start_block, end_block, block_delta, start, end)
    }
}

impl TryFrom<&NonlinearDutchDecay> for PiecewiseCurve {
    type Error = FieldError;

    fn try_from(curve: &NonlinearDutchDecay) -> Result<Self, Self::Error> {
        if curve.relativeAmounts.len() > MAX_SEGMENTS {
            return Err(FieldError::InvalidDecayCurve("more than 16 segments"));
        }
        let segments = curve
            .relativeAmounts
            .iter()
            .enumerate()
            .map(|(i, amount)| CurveSegment::new(curve.block_offset(i), *amount))
            .collect();
        Self::new(segments)
    }
}

/// Interpolate between two signed amounts. The distance moved is rounded
/// toward zero.
fn signed_interpolate(
    start_block: u64,
    end_block: u64,
    current_block: u64,
    start: I256,
    end: I256,
) -> Result<I256, ResolutionError> {
    if current_block >= end_block {
        return Ok(end);
    }
    let elapsed = U256::from(current_block.saturating_sub(start_block));
    let duration = U256::from(end_block - start_block);

    let diff = end.checked_sub(start).ok_or(ResolutionError::Overflow)?;
    let moved =
        mul_div_down(diff.unsigned_abs(), elapsed, duration).ok_or(ResolutionError::Overflow)?;
    let moved = I256::checked_from_sign_and_abs(diff.sign(), moved).ok_or(ResolutionError::Overflow)?;
    start.checked_add(moved).ok_or(ResolutionError::Overflow)
}

/// Resolve a piecewise block decay at `current_block`.
///
/// Returns `start_amount` when the curve is empty or decay has not started.
/// A negative result clamps to zero and an overflowing one to `U256::MAX`.
pub fn piecewise_block_decay(
    curve: &PiecewiseCurve,
    start_amount: U256,
    decay_start_block: u64,
    current_block: u64,
) -> Result<U256, ResolutionError> {
    if curve.is_empty() || decay_start_block >= current_block {
        return Ok(start_amount);
    }
    bounded_piecewise_block_decay(
        curve,
        start_amount,
        decay_start_block,
        current_block,
        U256::ZERO,
        U256::MAX,
    )
}

/// Resolve a piecewise block decay at `current_block`, clamping the result
/// into `[min, max]`.
pub fn bounded_piecewise_block_decay(
    curve: &PiecewiseCurve,
    start_amount: U256,
    decay_start_block: u64,
    current_block: u64,
    min: U256,
    max: U256,
) -> Result<U256, ResolutionError> {
    if curve.is_empty() || decay_start_block >= current_block {
        return Ok(bound(start_amount, min, max));
    }
    let relative = curve.relative_amount_at(current_block - decay_start_block)?;
    Ok(bounded_sub(start_amount, relative, min, max))
}
