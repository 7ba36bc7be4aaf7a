use crate::{
    decay::{
        math::{mul_wad_down, mul_wad_up},
        shares_scaling_direction, HybridPriceCurve, MAX_SCALING_FACTOR, WAD,
    },
    order::{CosignedOrder, ResolutionContext, ResolvedInput, ResolvedOrder, ResolvedOutput},
    FieldError, OrderDecodeError, PriceCurveError, ResolutionError,
};
use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolValue,
};
use reactor_bindings::OrderInfo;

/// A hybrid order. Amounts scale with both a block-based price curve and the
/// priority fee paid above the baseline.
///
/// An order scaling factor at or above [`WAD`] makes the order exact-in: the
/// input is fixed at its maximum and outputs scale up from their minimums.
/// Below [`WAD`] the order is exact-out: outputs are fixed at their minimums
/// and the input scales down from its maximum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridOrder {
    inner: reactor_bindings::HybridOrder,
    curve: HybridPriceCurve,
}

impl TryFrom<reactor_bindings::HybridOrder> for HybridOrder {
    type Error = FieldError;

    fn try_from(inner: reactor_bindings::HybridOrder) -> Result<Self, Self::Error> {
        let scaling_factor = inner.scalingFactor;
        if scaling_factor.is_zero() || scaling_factor > MAX_SCALING_FACTOR {
            return Err(FieldError::InvalidPriceCurveParameters);
        }
        let curve = HybridPriceCurve::from_packed(&inner.priceCurve);
        if curve
            .elements()
            .iter()
            .any(|element| !shares_scaling_direction(scaling_factor, element.scaling_factor))
        {
            return Err(FieldError::InvalidPriceCurveParameters);
        }
        Ok(Self { inner, curve })
    }
}

impl HybridOrder {
    /// Decode and validate an ABI-encoded order.
    pub fn decode(bytes: &[u8]) -> Result<Self, OrderDecodeError> {
        Ok(Self::try_from(reactor_bindings::HybridOrder::abi_decode(bytes)?)?)
    }

    /// ABI-encode the order.
    pub fn encode(&self) -> Bytes {
        self.inner.abi_encode().into()
    }

    /// Get the underlying struct.
    pub const fn as_sol(&self) -> &reactor_bindings::HybridOrder {
        &self.inner
    }

    /// Unwrap the underlying struct.
    pub fn into_sol(self) -> reactor_bindings::HybridOrder {
        self.inner
    }

    /// Get the order info.
    pub const fn info(&self) -> &OrderInfo {
        &self.inner.info
    }

    /// Get the swapper's price curve, before cosigner supplements.
    pub const fn price_curve(&self) -> &HybridPriceCurve {
        &self.curve
    }

    /// True if the input is fixed and outputs scale.
    pub fn is_exact_in(&self) -> bool {
        self.inner.scalingFactor >= WAD
    }

    /// The block the auction opens at: the cosigner's target block when set,
    /// otherwise the order's start block.
    pub fn target_block(&self) -> u64 {
        let target = self.inner.cosignerData.auctionTargetBlock;
        let target = if target.is_zero() { self.inner.auctionStartBlock } else { target };
        target.saturating_to()
    }

    /// The price curve after merging the cosigner's supplemental curve.
    pub fn effective_curve(&self) -> Result<HybridPriceCurve, PriceCurveError> {
        self.curve.merge(&self.inner.cosignerData.supplementalPriceCurve)
    }

    /// Resolve the order at `ctx.block_number()` with `ctx.priority_fee_wei()`.
    pub fn resolve(&self, ctx: &ResolutionContext) -> Result<ResolvedOrder, ResolutionError> {
        let target_block = self.target_block();
        let current_block = ctx.block_number();
        if target_block > current_block {
            return Err(ResolutionError::NotYetFillable { target_block, current_block });
        }

        let curve = self.effective_curve()?;
        let current = curve.scaling_factor_at(current_block - target_block);
        let scaling_factor = self.inner.scalingFactor;
        if !shares_scaling_direction(scaling_factor, current) {
            return Err(PriceCurveError::ScalingDirectionMismatch.into());
        }
        let fee = ctx.priority_fee_wei().saturating_sub(self.inner.baselinePriorityFeeWei);

        let max_input = self.inner.input.maxAmount;
        let (input_amount, outputs) = if self.is_exact_in() {
            let multiplier = (scaling_factor - WAD)
                .checked_mul(fee)
                .and_then(|scaled| scaled.checked_add(current))
                .ok_or(ResolutionError::Overflow)?;
            let outputs = self
                .inner
                .outputs
                .iter()
                .map(|output| {
                    Ok(ResolvedOutput {
                        token: output.token,
                        amount: mul_wad_up(output.minAmount, multiplier)
                            .ok_or(ResolutionError::Overflow)?,
                        recipient: output.recipient,
                    })
                })
                .collect::<Result<Vec<_>, ResolutionError>>()?;
            (max_input, outputs)
        } else {
            let multiplier = current.saturating_sub((WAD - scaling_factor).saturating_mul(fee));
            let input = mul_wad_down(max_input, multiplier).ok_or(ResolutionError::Overflow)?;
            let outputs = self
                .inner
                .outputs
                .iter()
                .map(|output| ResolvedOutput {
                    token: output.token,
                    amount: output.minAmount,
                    recipient: output.recipient,
                })
                .collect();
            (input, outputs)
        };

        Ok(ResolvedOrder {
            info: self.inner.info.clone(),
            input: ResolvedInput {
                token: self.inner.input.token,
                amount: input_amount,
                max_amount: max_input,
            },
            outputs,
            fee: None,
        })
    }
}

impl CosignedOrder for HybridOrder {
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::decay::PriceCurveElement;
    use reactor_bindings::{HybridCosignerData, HybridInput, HybridOutput};

    const fn bps(n: u64) -> U256 {
        // 1 bps of WAD
        U256::from_limbs([n * 100_000_000_000_000, 0, 0, 0])
    }

    fn order(scaling_factor: U256, curve: &[(u16, U256)]) -> reactor_bindings::HybridOrder {
        reactor_bindings::HybridOrder {
            input: HybridInput { token: Address::repeat_byte(0xaa), maxAmount: U256::from(1_000_000) },
            outputs: vec![HybridOutput {
                token: Address::repeat_byte(0xbb),
                minAmount: U256::from(1_000_000),
                recipient: Address::repeat_byte(0xcc),
            }],
            auctionStartBlock: U256::from(100),
            baselinePriorityFeeWei: U256::from(1),
            scalingFactor: scaling_factor,
            priceCurve: curve
                .iter()
                .map(|(d, f)| PriceCurveElement::new(*d, *f).encode())
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn exact_in_follows_curve() {
        let order =
            HybridOrder::try_from(order(WAD + bps(1), &[(10, WAD + bps(100))])).unwrap();
        assert!(order.is_exact_in());

        let at = |block| order.resolve(&ResolutionContext::new(0, block)).unwrap();
        // 1% up at the target block, half that five blocks in, flat at the end
        assert_eq!(at(100).outputs[0].amount, U256::from(1_010_000));
        assert_eq!(at(105).outputs[0].amount, U256::from(1_005_000));
        assert_eq!(at(200).outputs[0].amount, U256::from(1_000_000));
        assert_eq!(at(105).input.amount, U256::from(1_000_000));
    }

    #[test]
    fn exact_in_priority_fee() {
        let order = HybridOrder::try_from(order(WAD + U256::from(1_000), &[])).unwrap();
        // fee above baseline = 10, multiplier = WAD + 1000 * 10
        let ctx = ResolutionContext::new(0, 100).with_priority_fee(U256::from(11));
        let expected = mul_wad_up(U256::from(1_000_000), WAD + U256::from(10_000)).unwrap();
        assert_eq!(order.resolve(&ctx).unwrap().outputs[0].amount, expected);
        assert_eq!(expected, U256::from(1_000_001));
    }

    #[test]
    fn exact_out_scales_input_down() {
        let order =
            HybridOrder::try_from(order(WAD - bps(1), &[(10, WAD - bps(100))])).unwrap();
        assert!(!order.is_exact_in());

        let resolved = order.resolve(&ResolutionContext::new(0, 100)).unwrap();
        assert_eq!(resolved.input.amount, U256::from(990_000));
        assert_eq!(resolved.input.max_amount, U256::from(1_000_000));
        assert_eq!(resolved.outputs[0].amount, U256::from(1_000_000));

        // a huge priority fee saturates the multiplier at zero
        let ctx = ResolutionContext::new(0, 200).with_priority_fee(U256::MAX);
        assert_eq!(order.resolve(&ctx).unwrap().input.amount, U256::ZERO);
    }

    #[test]
    fn cosigner_target_and_supplement() {
        let mut sol = order(WAD + bps(1), &[(10, WAD + bps(100))]);
        sol.cosignerData = HybridCosignerData {
            auctionTargetBlock: U256::from(90),
            supplementalPriceCurve: vec![WAD + bps(50)],
        };
        let order = HybridOrder::try_from(sol).unwrap();
        assert_eq!(order.target_block(), 90);
        let resolved = order.resolve(&ResolutionContext::new(0, 90)).unwrap();
        assert_eq!(resolved.outputs[0].amount, U256::from(1_015_000));
    }

    #[test]
    fn not_fillable_before_target() {
        let order = HybridOrder::try_from(order(WAD, &[])).unwrap();
        assert_eq!(
            order.resolve(&ResolutionContext::new(0, 50)),
            Err(ResolutionError::NotYetFillable { target_block: 100, current_block: 50 })
        );
    }

    #[test]
    fn supplement_against_direction() {
        let mut sol = order(WAD + bps(1), &[(10, WAD + bps(100))]);
        sol.cosignerData.supplementalPriceCurve = vec![WAD - bps(1)];
        let order = HybridOrder::try_from(sol).unwrap();
        assert_eq!(
            order.resolve(&ResolutionContext::new(0, 100)),
            Err(ResolutionError::PriceCurve(PriceCurveError::DirectionMismatch { index: 0 }))
        );
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            HybridOrder::try_from(order(U256::ZERO, &[])),
            Err(FieldError::InvalidPriceCurveParameters)
        );
        assert_eq!(
            HybridOrder::try_from(order(WAD + bps(1), &[(10, WAD - bps(1))])),
            Err(FieldError::InvalidPriceCurveParameters)
        );
    }
}
