use crate::{
    decay::linear_time_decay,
    order::{
        exclusivity::apply_exclusivity, CosignedOrder, ResolutionContext, ResolvedInput,
        ResolvedOrder, ResolvedOutput,
    },
    FieldError, OrderDecodeError, ResolutionError,
};
use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolValue,
};
use reactor_bindings::{DutchInput, DutchOutput, ExclusiveDutchOrder, OrderInfo, V2DutchOrder};

fn check_decay_directions(input: &DutchInput, outputs: &[DutchOutput]) -> Result<(), FieldError> {
    if input.startAmount > input.endAmount {
        return Err(FieldError::IncorrectAmounts);
    }
    if outputs.iter().any(|output| output.startAmount < output.endAmount) {
        return Err(FieldError::IncorrectAmounts);
    }
    Ok(())
}

fn check_window(start: U256, end: U256, deadline: U256) -> Result<(), FieldError> {
    if end < start {
        return Err(FieldError::EndTimeBeforeStartTime);
    }
    if deadline < end {
        return Err(FieldError::DeadlineBeforeEndTime);
    }
    Ok(())
}

fn decay_input(input: &DutchInput, start: u64, end: u64, at: u64) -> ResolvedInput {
    ResolvedInput {
        token: input.token,
        amount: linear_time_decay(input.startAmount, input.endAmount, start, end, at),
        max_amount: input.startAmount.max(input.endAmount),
    }
}

fn decay_outputs(outputs: &[DutchOutput], start: u64, end: u64, at: u64) -> Vec<ResolvedOutput> {
    outputs
        .iter()
        .map(|output| ResolvedOutput {
            token: output.token,
            amount: linear_time_decay(output.startAmount, output.endAmount, start, end, at),
            recipient: output.recipient,
        })
        .collect()
}

/// An exclusive Dutch order, decaying linearly over time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutchOrder {
    inner: ExclusiveDutchOrder,
}

impl TryFrom<ExclusiveDutchOrder> for DutchOrder {
    type Error = FieldError;

    fn try_from(inner: ExclusiveDutchOrder) -> Result<Self, Self::Error> {
        check_window(inner.decayStartTime, inner.decayEndTime, inner.info.deadline)?;
        if inner.input.decays() && inner.outputs.iter().any(DutchOutput::decays) {
            return Err(FieldError::InputAndOutputDecay);
        }
        check_decay_directions(&inner.input, &inner.outputs)?;
        Ok(Self { inner })
    }
}

impl DutchOrder {
    /// Decode and validate an ABI-encoded order.
    pub fn decode(bytes: &[u8]) -> Result<Self, OrderDecodeError> {
        Ok(Self::try_from(ExclusiveDutchOrder::abi_decode(bytes)?)?)
    }

    /// ABI-encode the order.
    pub fn encode(&self) -> Bytes {
        self.inner.abi_encode().into()
    }

    /// Get the underlying struct.
    pub const fn as_sol(&self) -> &ExclusiveDutchOrder {
        &self.inner
    }

    /// Unwrap the underlying struct.
    pub fn into_sol(self) -> ExclusiveDutchOrder {
        self.inner
    }

    /// Get the order info.
    pub const fn info(&self) -> &OrderInfo {
        &self.inner.info
    }

    /// Get the exclusive filler, if any.
    pub fn exclusive_filler(&self) -> Option<Address> {
        Some(self.inner.exclusiveFiller).filter(|filler| !filler.is_zero())
    }

    /// Get the decay window as `(start, end)` timestamps.
    pub fn decay_window(&self) -> (u64, u64) {
        (self.inner.decayStartTime.saturating_to(), self.inner.decayEndTime.saturating_to())
    }

    /// True if neither the input nor any output decays. Such an order is a
    /// limit order.
    pub fn is_limit(&self) -> bool {
        !self.inner.input.decays() && !self.inner.outputs.iter().any(DutchOutput::decays)
    }

    /// Resolve the order at `ctx.timestamp()`.
    pub fn resolve(&self, ctx: &ResolutionContext) -> Result<ResolvedOrder, ResolutionError> {
        let (start, end) = self.decay_window();
        let at = ctx.timestamp();
        let mut outputs = decay_outputs(&self.inner.outputs, start, end, at);
        apply_exclusivity(
            &mut outputs,
            self.inner.exclusiveFiller,
            self.inner.exclusivityOverrideBps,
            start,
            at,
            ctx.filler(),
        )?;
        Ok(ResolvedOrder {
            info: self.inner.info.clone(),
            input: decay_input(&self.inner.input, start, end, at),
            outputs,
            fee: None,
        })
    }
}

/// A cosigned Dutch order. The cosigner picks the decay window and
/// exclusivity, and may improve the starting amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutchV2Order {
    inner: V2DutchOrder,
}

impl TryFrom<V2DutchOrder> for DutchV2Order {
    type Error = FieldError;

    fn try_from(inner: V2DutchOrder) -> Result<Self, Self::Error> {
        let data = &inner.cosignerData;
        check_window(data.decayStartTime, data.decayEndTime, inner.info.deadline)?;
        check_decay_directions(&inner.baseInput, &inner.baseOutputs)?;

        if !data.inputOverride.is_zero() && data.inputOverride > inner.baseInput.startAmount {
            return Err(FieldError::InvalidCosignerInput);
        }
        check_output_overrides(
            &data.outputOverrides,
            inner.baseOutputs.iter().map(|output| output.startAmount),
        )?;
        Ok(Self { inner })
    }
}

/// Output overrides are either absent or one per output, and never lower an
/// output. Zero means no override.
pub(crate) fn check_output_overrides(
    overrides: &[U256],
    base: impl ExactSizeIterator<Item = U256>,
) -> Result<(), FieldError> {
    if overrides.is_empty() {
        return Ok(());
    }
    if overrides.len() != base.len() {
        return Err(FieldError::InvalidCosignerOutput);
    }
    if overrides.iter().zip(base).any(|(o, base)| !o.is_zero() && *o < base) {
        return Err(FieldError::InvalidCosignerOutput);
    }
    Ok(())
}

/// Apply a cosigner override, where zero means no override.
pub(crate) fn with_override(base: U256, cosigned: Option<&U256>) -> U256 {
    match cosigned {
        Some(amount) if !amount.is_zero() => *amount,
        _ => base,
    }
}

impl DutchV2Order {
    /// Decode and validate an ABI-encoded order.
    pub fn decode(bytes: &[u8]) -> Result<Self, OrderDecodeError> {
        Ok(Self::try_from(V2DutchOrder::abi_decode(bytes)?)?)
    }

    /// ABI-encode the order.
    pub fn encode(&self) -> Bytes {
        self.inner.abi_encode().into()
    }

    /// Get the underlying struct.
    pub const fn as_sol(&self) -> &V2DutchOrder {
        &self.inner
    }

    /// Unwrap the underlying struct.
    pub fn into_sol(self) -> V2DutchOrder {
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

    /// Get the cosigned decay window as `(start, end)` timestamps.
    pub fn decay_window(&self) -> (u64, u64) {
        let data = &self.inner.cosignerData;
        (data.decayStartTime.saturating_to(), data.decayEndTime.saturating_to())
    }

    /// The input after applying the cosigner override.
    fn cosigned_input(&self) -> DutchInput {
        let mut input = self.inner.baseInput;
        input.startAmount =
            with_override(input.startAmount, Some(&self.inner.cosignerData.inputOverride));
        input
    }

    /// The outputs after applying the cosigner overrides.
    fn cosigned_outputs(&self) -> Vec<DutchOutput> {
        let overrides = &self.inner.cosignerData.outputOverrides;
        self.inner
            .baseOutputs
            .iter()
            .enumerate()
            .map(|(i, output)| DutchOutput {
                startAmount: with_override(output.startAmount, overrides.get(i)),
                ..*output
            })
            .collect()
    }

    /// Resolve the order at `ctx.timestamp()`.
    pub fn resolve(&self, ctx: &ResolutionContext) -> Result<ResolvedOrder, ResolutionError> {
        let (start, end) = self.decay_window();
        let at = ctx.timestamp();
        let data = &self.inner.cosignerData;

        let mut outputs = decay_outputs(&self.cosigned_outputs(), start, end, at);
        apply_exclusivity(
            &mut outputs,
            data.exclusiveFiller,
            data.exclusivityOverrideBps,
            start,
            at,
            ctx.filler(),
        )?;
        Ok(ResolvedOrder {
            info: self.inner.info.clone(),
            input: decay_input(&self.cosigned_input(), start, end, at),
            outputs,
            fee: None,
        })
    }
}

impl CosignedOrder for DutchV2Order {
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
