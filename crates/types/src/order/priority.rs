use crate::{
    decay::{priority_fee_scaling, ScalingRole},
    order::{CosignedOrder, ResolutionContext, ResolvedInput, ResolvedOrder, ResolvedOutput},
    FieldError, OrderDecodeError, ResolutionError,
};
use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolValue,
};
use reactor_bindings::OrderInfo;

/// A priority order. Amounts scale with the priority fee the filler pays
/// above the order's baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityOrder {
    inner: reactor_bindings::PriorityOrder,
}

impl TryFrom<reactor_bindings::PriorityOrder> for PriorityOrder {
    type Error = FieldError;

    fn try_from(inner: reactor_bindings::PriorityOrder) -> Result<Self, Self::Error> {
        if !inner.input.mpsPerPriorityFeeWei.is_zero()
            && inner.outputs.iter().any(|output| !output.mpsPerPriorityFeeWei.is_zero())
        {
            return Err(FieldError::InputOutputScaling);
        }
        Ok(Self { inner })
    }
}

impl PriorityOrder {
    /// Decode and validate an ABI-encoded order.
    pub fn decode(bytes: &[u8]) -> Result<Self, OrderDecodeError> {
        Ok(Self::try_from(reactor_bindings::PriorityOrder::abi_decode(bytes)?)?)
    }

    /// ABI-encode the order.
    pub fn encode(&self) -> Bytes {
        self.inner.abi_encode().into()
    }

    /// Get the underlying struct.
    pub const fn as_sol(&self) -> &reactor_bindings::PriorityOrder {
        &self.inner
    }

    /// Unwrap the underlying struct.
    pub fn into_sol(self) -> reactor_bindings::PriorityOrder {
        self.inner
    }

    /// Get the order info.
    pub const fn info(&self) -> &OrderInfo {
        &self.inner.info
    }

    /// The block the auction opens at: the cosigner's target block when set,
    /// otherwise the order's start block.
    pub fn target_block(&self) -> u64 {
        let target = self.inner.cosignerData.auctionTargetBlock;
        let target = if target.is_zero() { self.inner.auctionStartBlock } else { target };
        target.saturating_to()
    }

    /// The priority fee above the order's baseline, floored at zero.
    pub fn priority_fee_above_baseline(&self, ctx: &ResolutionContext) -> U256 {
        ctx.priority_fee_wei().saturating_sub(self.inner.baselinePriorityFeeWei)
    }

    /// Resolve the order at `ctx.block_number()` with `ctx.priority_fee_wei()`.
    pub fn resolve(&self, ctx: &ResolutionContext) -> Result<ResolvedOrder, ResolutionError> {
        let target_block = self.target_block();
        if ctx.block_number() < target_block {
            return Err(ResolutionError::NotYetFillable {
                target_block,
                current_block: ctx.block_number(),
            });
        }
        let fee = self.priority_fee_above_baseline(ctx);

        let input = &self.inner.input;
        let input = ResolvedInput {
            token: input.token,
            amount: priority_fee_scaling(
                input.amount,
                input.mpsPerPriorityFeeWei,
                fee,
                ScalingRole::Input,
            )?,
            max_amount: input.amount,
        };
        let outputs = self
            .inner
            .outputs
            .iter()
            .map(|output| {
                Ok(ResolvedOutput {
                    token: output.token,
                    amount: priority_fee_scaling(
                        output.amount,
                        output.mpsPerPriorityFeeWei,
                        fee,
                        ScalingRole::Output,
                    )?,
                    recipient: output.recipient,
                })
            })
            .collect::<Result<Vec<_>, ResolutionError>>()?;

        Ok(ResolvedOrder { info: self.inner.info.clone(), input, outputs, fee: None })
    }
}

impl CosignedOrder for PriorityOrder {
    fn cosigner(&self) -> Address {
        self.inner.cosigner
    }

    fn cosignature(&self) -> &Bytes {
        &self.inner.cosignature
    }

    fn encoded_cosigner_data(&self) -> Vec<u8> {
        self.inner.cosignerData.abi_encode()
    }
}
