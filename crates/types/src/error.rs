use alloy::primitives::Address;

/// A static order field violates an invariant. Raised when building an order
/// value from its decoded struct, before any resolution happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The order deadline is before the end of the decay window.
    #[error("deadline is before the decay end time")]
    DeadlineBeforeEndTime,
    /// The decay window ends before it starts.
    #[error("decay end time is before the decay start time")]
    EndTimeBeforeStartTime,
    /// Both the input and at least one output decay.
    #[error("input and outputs may not both decay")]
    InputAndOutputDecay,
    /// An input decays downward or an output decays upward.
    #[error("decay direction is incorrect for input or output")]
    IncorrectAmounts,
    /// A piecewise decay curve is malformed.
    #[error("invalid decay curve: {0}")]
    InvalidDecayCurve(&'static str),
    /// The cosigner input override is above the base input.
    #[error("cosigner input override exceeds the base input")]
    InvalidCosignerInput,
    /// A cosigner output override is below the base output, or the override
    /// list has the wrong length.
    #[error("invalid cosigner output override")]
    InvalidCosignerOutput,
    /// Both the input and at least one output scale with the priority fee.
    #[error("input and outputs may not both scale with the priority fee")]
    InputOutputScaling,
    /// Hybrid order scaling parameters are malformed.
    #[error("invalid price curve parameters")]
    InvalidPriceCurveParameters,
}

/// Errors composing or evaluating a hybrid price curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PriceCurveError {
    /// A supplemental element scales in the opposite direction to the base
    /// element it is merged with.
    #[error("supplemental curve element {index} scales against the base curve")]
    DirectionMismatch {
        /// Index of the offending element.
        index: usize,
    },
    /// A merged scaling factor is negative or wider than 240 bits.
    #[error("merged scaling factor at element {index} is out of range")]
    OutOfRange {
        /// Index of the offending element.
        index: usize,
    },
    /// The current curve factor scales against the order's scaling factor.
    #[error("curve scaling factor disagrees with the order's scaling direction")]
    ScalingDirectionMismatch,
}

/// Errors produced when resolving an order at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// An order field is invalid.
    #[error(transparent)]
    OrderFieldInvalid(#[from] FieldError),
    /// Price curve composition failed.
    #[error(transparent)]
    PriceCurve(#[from] PriceCurveError),
    /// The cosignature did not recover to the order's cosigner.
    #[error("cosignature invalid: expected {expected}, recovered {recovered:?}")]
    CosignatureInvalid {
        /// The cosigner named by the order.
        expected: Address,
        /// The recovered signer, if recovery succeeded.
        recovered: Option<Address>,
    },
    /// The auction target block has not been reached.
    #[error("order is not fillable until block {target_block} (current {current_block})")]
    NotYetFillable {
        /// The block the order becomes fillable at.
        target_block: u64,
        /// The block the resolution was attempted at.
        current_block: u64,
    },
    /// The exclusive filler holds sole filling rights and the order carries
    /// no override.
    #[error("only {exclusive_filler} may fill during the exclusivity period")]
    ExclusiveFillerOnly {
        /// The exclusive filler.
        exclusive_filler: Address,
    },
    /// An intermediate amount overflowed 256 bits.
    #[error("arithmetic overflow during resolution")]
    Overflow,
}

/// Errors decoding an order from its ABI encoding.
#[derive(Debug, thiserror::Error)]
pub enum OrderDecodeError {
    /// The bytes are not a valid ABI encoding of the order struct.
    #[error(transparent)]
    Abi(#[from] alloy::sol_types::Error),
    /// The decoded order violates a field invariant.
    #[error(transparent)]
    Field(#[from] FieldError),
}
