use crate::{
    decay::{math::mul_div_up, BPS},
    order::ResolvedOutput,
    ResolutionError,
};
use alloy::primitives::{Address, U256};

/// True if `filler` may fill without the exclusivity override at
/// `current`, where exclusivity lasts through `exclusivity_end` inclusive.
/// An unknown filler is treated as having filling rights.
pub(crate) fn has_filling_rights(
    exclusive_filler: Address,
    exclusivity_end: u64,
    current: u64,
    filler: Option<Address>,
) -> bool {
    exclusive_filler.is_zero()
        || current > exclusivity_end
        || filler.map_or(true, |filler| filler == exclusive_filler)
}

/// Apply the exclusivity override to `outputs`. Without filling rights each
/// output is scaled up by `override_bps`, rounding up. An override of zero
/// means strict exclusivity.
pub(crate) fn apply_exclusivity(
    outputs: &mut [ResolvedOutput],
    exclusive_filler: Address,
    override_bps: U256,
    exclusivity_end: u64,
    current: u64,
    filler: Option<Address>,
) -> Result<(), ResolutionError> {
    if has_filling_rights(exclusive_filler, exclusivity_end, current, filler) {
        return Ok(());
    }
    if override_bps.is_zero() {
        return Err(ResolutionError::ExclusiveFillerOnly { exclusive_filler });
    }
    let numerator = BPS.checked_add(override_bps).ok_or(ResolutionError::Overflow)?;
    for output in outputs.iter_mut() {
        output.amount =
            mul_div_up(output.amount, numerator, BPS).ok_or(ResolutionError::Overflow)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn outputs() -> Vec<ResolvedOutput> {
        vec![ResolvedOutput { token: Address::ZERO, amount: U256::from(1001), recipient: Address::ZERO }]
    }

    #[test]
    fn override_scales_up() {
        let exclusive = Address::repeat_byte(1);
        let mut outs = outputs();
        apply_exclusivity(&mut outs, exclusive, U256::from(100), 10, 10, Some(Address::repeat_byte(2)))
            .unwrap();
        // 1001 * 1.01 = 1011.01
        assert_eq!(outs[0].amount, U256::from(1012));
    }

    #[test]
    fn rights_holders_unchanged() {
        let exclusive = Address::repeat_byte(1);
        for (current, filler) in
            [(11, Some(Address::repeat_byte(2))), (5, Some(exclusive)), (5, None)]
        {
            let mut outs = outputs();
            apply_exclusivity(&mut outs, exclusive, U256::from(100), 10, current, filler).unwrap();
            assert_eq!(outs, outputs());
        }
    }

    #[test]
    fn strict_exclusivity() {
        let exclusive = Address::repeat_byte(1);
        let mut outs = outputs();
        assert_eq!(
            apply_exclusivity(&mut outs, exclusive, U256::ZERO, 10, 3, Some(Address::repeat_byte(2))),
            Err(ResolutionError::ExclusiveFillerOnly { exclusive_filler: exclusive })
        );
    }
}
