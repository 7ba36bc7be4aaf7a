mod context;
pub use context::{ResolutionContext, ResolvedInput, ResolvedOrder, ResolvedOutput, TokenAmount};

mod cosign;
pub use cosign::CosignedOrder;

mod dutch;
pub use dutch::{DutchOrder, DutchV2Order};

mod exclusivity;

mod hybrid;
pub use hybrid::HybridOrder;

mod priority;
pub use priority::PriorityOrder;

mod relay;
pub use relay::RelayOrder;

mod v3;
pub use v3::DutchV3Order;

use crate::ResolutionError;
use alloy::primitives::{Address, Bytes, B256, U256};
use reactor_bindings::OrderInfo;
use reactor_constants::OrderType;

/// A decoded, validated order of any supported family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderVariant {
    /// Exclusive Dutch order.
    Dutch(DutchOrder),
    /// Cosigned V2 Dutch order.
    DutchV2(DutchV2Order),
    /// Cosigned V3 Dutch order.
    DutchV3(DutchV3Order),
    /// Priority order.
    Priority(PriorityOrder),
    /// Hybrid order.
    Hybrid(HybridOrder),
    /// Relay order.
    Relay(RelayOrder),
}

impl OrderVariant {
    /// The order's type tag. A Dutch order with no decay is a
    /// [`OrderType::Limit`] order.
    pub fn order_type(&self) -> OrderType {
        match self {
            Self::Dutch(order) if order.is_limit() => OrderType::Limit,
            Self::Dutch(_) => OrderType::Dutch,
            Self::DutchV2(_) => OrderType::DutchV2,
            Self::DutchV3(_) => OrderType::DutchV3,
            Self::Priority(_) => OrderType::Priority,
            Self::Hybrid(_) => OrderType::Hybrid,
            Self::Relay(_) => OrderType::Relay,
        }
    }

    /// Get the order info.
    pub const fn info(&self) -> &OrderInfo {
        match self {
            Self::Dutch(order) => order.info(),
            Self::DutchV2(order) => order.info(),
            Self::DutchV3(order) => order.info(),
            Self::Priority(order) => order.info(),
            Self::Hybrid(order) => order.info(),
            Self::Relay(order) => order.info(),
        }
    }

    /// Get the reactor the order names.
    pub const fn reactor(&self) -> Address {
        self.info().reactor
    }

    /// Get the swapper.
    pub const fn swapper(&self) -> Address {
        self.info().swapper
    }

    /// Get the Permit2 nonce.
    pub const fn nonce(&self) -> U256 {
        self.info().nonce
    }

    /// Get the deadline, saturating at `u64::MAX`.
    pub fn deadline(&self) -> u64 {
        self.info().deadline()
    }

    /// True if the deadline is before `timestamp`.
    pub fn is_expired_at(&self, timestamp: u64) -> bool {
        self.deadline() < timestamp
    }

    /// Get the exclusive filler, if the order has one.
    pub fn exclusive_filler(&self) -> Option<Address> {
        match self {
            Self::Dutch(order) => order.exclusive_filler(),
            Self::DutchV2(order) => order.exclusive_filler(),
            Self::DutchV3(order) => order.exclusive_filler(),
            Self::Priority(_) | Self::Hybrid(_) | Self::Relay(_) => None,
        }
    }

    /// The first block the order can be filled at, for orders that name one.
    pub fn block_requirement(&self) -> Option<u64> {
        match self {
            Self::Priority(order) => Some(order.target_block()),
            Self::Hybrid(order) => Some(order.target_block()),
            _ => None,
        }
    }

    /// Get the cosigned view of the order, if it is cosigned.
    pub fn as_cosigned(&self) -> Option<&dyn CosignedOrder> {
        match self {
            Self::DutchV2(order) => Some(order),
            Self::DutchV3(order) => Some(order),
            Self::Priority(order) => Some(order),
            Self::Hybrid(order) => Some(order),
            Self::Dutch(_) | Self::Relay(_) => None,
        }
    }

    /// Verify the cosignature against the externally computed order hash.
    /// Orders without a cosigner always pass.
    pub fn verify_cosignature(&self, order_hash: B256, chain_id: u64) -> Result<(), ResolutionError> {
        self.as_cosigned().map_or(Ok(()), |order| order.verify_cosignature(order_hash, chain_id))
    }

    /// ABI-encode the order.
    pub fn encode(&self) -> Bytes {
        match self {
            Self::Dutch(order) => order.encode(),
            Self::DutchV2(order) => order.encode(),
            Self::DutchV3(order) => order.encode(),
            Self::Priority(order) => order.encode(),
            Self::Hybrid(order) => order.encode(),
            Self::Relay(order) => order.encode(),
        }
    }

    /// Resolve the order against `ctx`.
    pub fn resolve(&self, ctx: &ResolutionContext) -> Result<ResolvedOrder, ResolutionError> {
        match self {
            Self::Dutch(order) => order.resolve(ctx),
            Self::DutchV2(order) => order.resolve(ctx),
            Self::DutchV3(order) => order.resolve(ctx),
            Self::Priority(order) => order.resolve(ctx),
            Self::Hybrid(order) => order.resolve(ctx),
            Self::Relay(order) => order.resolve(ctx),
        }
    }
}

macro_rules! impl_from_order {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for OrderVariant {
                fn from(order: $ty) -> Self {
                    Self::$variant(order)
                }
            }
        )*
    };
}

impl_from_order! {
    Dutch => DutchOrder,
    DutchV2 => DutchV2Order,
    DutchV3 => DutchV3Order,
    Priority => PriorityOrder,
    Hybrid => HybridOrder,
    Relay => RelayOrder,
}
