use crate::{
    decay::linear_time_decay,
    order::{ResolutionContext, ResolvedInput, ResolvedOrder, TokenAmount},
    FieldError, OrderDecodeError, ResolutionError,
};
use alloy::{primitives::Bytes, sol_types::SolValue};
use reactor_bindings::OrderInfo;

/// A relay order. The input is fixed and the filler is paid an escalating
/// fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOrder {
    inner: reactor_bindings::RelayOrder,
    info: OrderInfo,
}

impl TryFrom<reactor_bindings::RelayOrder> for RelayOrder {
    type Error = FieldError;

    fn try_from(inner: reactor_bindings::RelayOrder) -> Result<Self, Self::Error> {
        let fee = &inner.fee;
        if fee.endTime < fee.startTime {
            return Err(FieldError::EndTimeBeforeStartTime);
        }
        if inner.info.deadline < fee.endTime {
            return Err(FieldError::DeadlineBeforeEndTime);
        }
        if fee.startAmount > fee.endAmount {
            return Err(FieldError::IncorrectAmounts);
        }
        let info = inner.info.into();
        Ok(Self { inner, info })
    }
}

impl RelayOrder {
    /// Decode and validate an ABI-encoded order.
    pub fn decode(bytes: &[u8]) -> Result<Self, OrderDecodeError> {
        Ok(Self::try_from(reactor_bindings::RelayOrder::abi_decode(bytes)?)?)
    }

    /// ABI-encode the order.
    pub fn encode(&self) -> Bytes {
        self.inner.abi_encode().into()
    }

    /// Get the underlying struct.
    pub const fn as_sol(&self) -> &reactor_bindings::RelayOrder {
        &self.inner
    }

    /// Unwrap the underlying struct.
    pub fn into_sol(self) -> reactor_bindings::RelayOrder {
        self.inner
    }

    /// Get the order info. Relay orders carry no additional validation.
    pub const fn info(&self) -> &OrderInfo {
        &self.info
    }

    /// Resolve the fee at `ctx.timestamp()`.
    pub fn resolve(&self, ctx: &ResolutionContext) -> Result<ResolvedOrder, ResolutionError> {
        let fee = &self.inner.fee;
        let input = &self.inner.input;
        Ok(ResolvedOrder {
            info: self.info.clone(),
            input: ResolvedInput { token: input.token, amount: input.amount, max_amount: input.amount },
            outputs: Vec::new(),
            fee: Some(TokenAmount {
                token: fee.token,
                amount: linear_time_decay(
                    fee.startAmount,
                    fee.endAmount,
                    fee.startTime.saturating_to(),
                    fee.endTime.saturating_to(),
                    ctx.timestamp(),
                ),
            }),
        })
    }
}
