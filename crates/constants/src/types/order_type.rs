use core::fmt;
use std::str::FromStr;

/// Error type for parsing an [`OrderType`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order type: {0}")]
pub struct ParseOrderTypeError(String);

/// The order family a serialized order belongs to. Each family is settled by
/// its own reactor contract (or resolved by its own auction resolver) and
/// resolved by its own decay algorithm.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum OrderType {
    /// Exclusive Dutch order with linear time decay.
    Dutch,
    /// Cosigned Dutch order with linear time decay.
    #[serde(rename = "Dutch_V2")]
    DutchV2,
    /// Cosigned Dutch order with piecewise block decay.
    #[serde(rename = "Dutch_V3")]
    DutchV3,
    /// Priority-fee scaled order.
    Priority,
    /// Price-curve order scaled by both a block curve and the priority fee.
    Hybrid,
    /// Relay order with an escalating fee.
    Relay,
    /// A Dutch order with no decay.
    Limit,
}

impl OrderType {
    /// All order types, in declaration order.
    pub const ALL: [OrderType; 7] = [
        OrderType::Dutch,
        OrderType::DutchV2,
        OrderType::DutchV3,
        OrderType::Priority,
        OrderType::Hybrid,
        OrderType::Relay,
        OrderType::Limit,
    ];

    /// The canonical name of the order type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderType::Dutch => "Dutch",
            OrderType::DutchV2 => "Dutch_V2",
            OrderType::DutchV3 => "Dutch_V3",
            OrderType::Priority => "Priority",
            OrderType::Hybrid => "Hybrid",
            OrderType::Relay => "Relay",
            OrderType::Limit => "Limit",
        }
    }

    /// True if orders of this type carry cosigner data.
    pub const fn is_cosigned(&self) -> bool {
        matches!(
            self,
            OrderType::DutchV2 | OrderType::DutchV3 | OrderType::Priority | OrderType::Hybrid
        )
    }

    /// The order type whose reactor settles this type. Limit orders are
    /// settled by the Dutch reactor.
    pub const fn settlement_type(&self) -> OrderType {
        match self {
            OrderType::Limit => OrderType::Dutch,
            other => *other,
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ParseOrderTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        OrderType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseOrderTypeError(trimmed.to_string()))
    }
}
