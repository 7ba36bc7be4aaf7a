use core::fmt;

/// The outcome of dry-running an order against its reactor.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum ValidationOutcome {
    /// The order can be filled now.
    #[serde(rename = "OK")]
    Ok,
    /// The order's deadline has passed.
    Expired,
    /// The order's nonce has been used, by a fill or a cancellation.
    NonceUsed,
    /// The swapper lacks the balance or allowance to pay the input.
    InsufficientFunds,
    /// The swapper's signature is invalid.
    InvalidSignature,
    /// A static order field is invalid.
    InvalidOrderFields,
    /// The additional validation contract rejected the order.
    ValidationFailed,
    /// The order is in its exclusivity period and the filler is not the
    /// exclusive filler.
    ExclusivityPeriod,
    /// The order's auction has not started.
    OrderNotFillableYet,
    /// The fill transaction's gas price is invalid.
    InvalidGasPrice,
    /// The cosignature is invalid.
    InvalidCosignature,
    /// The revert was not recognized.
    UnknownError,
}

impl ValidationOutcome {
    /// True if the order can be filled.
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// True if the outcome will never change for this order.
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Expired
                | Self::NonceUsed
                | Self::InvalidSignature
                | Self::InvalidOrderFields
                | Self::InvalidCosignature
        )
    }

    /// The canonical name of the outcome.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Expired => "Expired",
            Self::NonceUsed => "NonceUsed",
            Self::InsufficientFunds => "InsufficientFunds",
            Self::InvalidSignature => "InvalidSignature",
            Self::InvalidOrderFields => "InvalidOrderFields",
            Self::ValidationFailed => "ValidationFailed",
            Self::ExclusivityPeriod => "ExclusivityPeriod",
            Self::OrderNotFillableYet => "OrderNotFillableYet",
            Self::InvalidGasPrice => "InvalidGasPrice",
            Self::InvalidCosignature => "InvalidCosignature",
            Self::UnknownError => "UnknownError",
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
