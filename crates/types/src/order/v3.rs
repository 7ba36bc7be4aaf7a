use crate::{
    decay::{
        bounded_piecewise_block_decay,
        math::{bounded_add, bounded_sub, mul_div_down, mul_div_up},
        PiecewiseCurve, GWEI,
    },
    order::{
        dutch::{check_output_overrides, with_override},
        exclusivity::apply_exclusivity,
        CosignedOrder, ResolutionContext, ResolvedInput, ResolvedOrder, ResolvedOutput,
    },
    FieldError, OrderDecodeError, ResolutionError,
};
use alloy::{
    primitives::{Address, Bytes, I256, U256},
    sol_types::SolValue,
};
use reactor_bindings::{OrderInfo, V3DutchOrder};

/// A cosigned Dutch order with block-based piecewise decay and base-fee
/// adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutchV3Order {
    inner: V3DutchOrder,
    input_curve: PiecewiseCurve,
    output_curves: Vec<PiecewiseCurve>,
}

impl TryFrom<V3DutchOrder> for DutchV3Order {
    type Error = FieldError;

    fn try_from(inner: V3DutchOrder) -> Result<Self, Self::Error> {
        let input_curve = PiecewiseCurve::try_from(&inner.baseInput.curve)?;
        let output_curves = inner
            .baseOutputs
            .iter()
            .map(|output| PiecewiseCurve::try_from(&output.curve))
            .collect::<Result<Vec<_>, _>>()?;

        let data = &inner.cosignerData;
        if !data.inputOverride.is_zero() && data.inputOverride > inner.baseInput.startAmount {
            return Err(FieldError::InvalidCosignerInput);
        }
        check_output_overrides(
            &data.outputOverrides,
            inner.baseOutputs.iter().map(|output| output.startAmount),
        )?;

        Ok(Self { inner, input_curve, output_curves })
    }
}

/// Convert a base-fee change into an amount change. Increases round down and
/// decreases round up in magnitude.
fn gas_adjustment(adjustment_per_gwei: U256, gas_delta: I256) -> Result<I256, ResolutionError> {
    let magnitude = gas_delta.unsigned_abs();
    let adjusted = if gas_delta.is_negative() {
        mul_div_up(adjustment_per_gwei, magnitude, GWEI)
    } else {
        mul_div_down(adjustment_per_gwei, magnitude, GWEI)
    }
    .ok_or(ResolutionError::Overflow)?;
    I256::checked_from_sign_and_abs(gas_delta.sign(), adjusted).ok_or(ResolutionError::Overflow)
}

impl DutchV3Order {
    /// Decode and validate an ABI-encoded order.
    pub fn decode(bytes: &[u8]) -> Result<Self, OrderDecodeError> {
        Ok(Self::try_from(V3DutchOrder::abi_decode(bytes)?)?)
    }

    /// ABI-encode the order.
    pub fn encode(&self) -> Bytes {
        self.inner.abi_encode().into()
    }

    /// Get the underlying struct.
    pub const fn as_sol(&self) -> &V3DutchOrder {
        &self.inner
    }

    /// Unwrap the underlying struct.
    pub fn into_sol(self) -> V3DutchOrder {
        self.inner
    }

    /// Get the order info.
    pub const fn info(&self) -> &OrderInfo {
        &self.inner.info
    }

    /// Get the exclusive filler chosen by the cosigner, if any.
    pub fn exclusive_filler(&self) -> Option<Address> {
        Some(self.inner.cosignerData.exclusiveFiller).filter(|filler| !filler.is_zero())
    }

    /// Get the block decay starts at.
    pub fn decay_start_block(&self) -> u64 {
        self.inner.cosignerData.decayStartBlock.saturating_to()
    }

    /// Get the input decay curve.
    pub const fn input_curve(&self) -> &PiecewiseCurve {
        &self.input_curve
    }

    /// Get the output decay curves.
    pub fn output_curves(&self) -> &[PiecewiseCurve] {
        &self.output_curves
    }

    /// The signed base-fee change since signing, if the context carries a
    /// base fee.
    fn gas_delta(&self, ctx: &ResolutionContext) -> Result<Option<I256>, ResolutionError> {
        let Some(base_fee) = ctx.base_fee_wei() else { return Ok(None) };
        let current = I256::try_from(base_fee).map_err(|_| ResolutionError::Overflow)?;
        let starting =
            I256::try_from(self.inner.startingBaseFee).map_err(|_| ResolutionError::Overflow)?;
        current.checked_sub(starting).map(Some).ok_or(ResolutionError::Overflow)
    }

    /// Resolve the order at `ctx.block_number()`.
    ///
    /// Cosigner overrides are applied first, then the base-fee adjustment,
    /// then the decay curves. Inputs stay within `[0, maxAmount]` and outputs
    /// at or above `minAmount`.
    pub fn resolve(&self, ctx: &ResolutionContext) -> Result<ResolvedOrder, ResolutionError> {
        let data = &self.inner.cosignerData;
        let decay_start = self.decay_start_block();
        let block = ctx.block_number();
        let gas_delta = self.gas_delta(ctx)?;

        let base_input = &self.inner.baseInput;
        let mut input_start = with_override(base_input.startAmount, Some(&data.inputOverride));
        if let Some(delta) = gas_delta.filter(|_| !base_input.adjustmentPerGweiBaseFee.is_zero()) {
            let adjustment = gas_adjustment(base_input.adjustmentPerGweiBaseFee, delta)?;
            input_start = bounded_add(input_start, adjustment, U256::ZERO, base_input.maxAmount);
        }
        let input = ResolvedInput {
            token: base_input.token,
            amount: bounded_piecewise_block_decay(
                &self.input_curve,
                input_start,
                decay_start,
                block,
                U256::ZERO,
                base_input.maxAmount,
            )?,
            max_amount: base_input.maxAmount,
        };

        let mut outputs = Vec::with_capacity(self.inner.baseOutputs.len());
        for (i, (output, curve)) in self.inner.baseOutputs.iter().zip(&self.output_curves).enumerate()
        {
            let mut start = with_override(output.startAmount, data.outputOverrides.get(i));
            if let Some(delta) = gas_delta.filter(|_| !output.adjustmentPerGweiBaseFee.is_zero()) {
                let adjustment = gas_adjustment(output.adjustmentPerGweiBaseFee, delta)?;
                start = bounded_sub(start, adjustment, output.minAmount, U256::MAX);
            }
            outputs.push(ResolvedOutput {
                token: output.token,
                amount: bounded_piecewise_block_decay(
                    curve,
                    start,
                    decay_start,
                    block,
                    output.minAmount,
                    U256::MAX,
                )?,
                recipient: output.recipient,
            });
        }

        apply_exclusivity(
            &mut outputs,
            data.exclusiveFiller,
            data.exclusivityOverrideBps,
            decay_start,
            block,
            ctx.filler(),
        )?;

        Ok(ResolvedOrder { info: self.inner.info.clone(), input, outputs, fee: None })
    }
}

impl CosignedOrder for DutchV3Order {
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
