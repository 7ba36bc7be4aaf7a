use crate::{
    decay::{linear::interpolate, math::WAD},
    PriceCurveError,
};
use alloy::primitives::U256;

/// Largest scaling factor a packed element can hold, `2^240 - 1`.
pub const MAX_SCALING_FACTOR: U256 = U256::from_limbs([u64::MAX, u64::MAX, u64::MAX, 0xffff_ffff_ffff]);

const SCALING_FACTOR_BITS: usize = 240;

/// A single price curve element: a 16-bit duration in blocks and a 240-bit
/// scaling factor relative to [`WAD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceCurveElement {
    /// Number of blocks the element spans. Zero marks an instantaneous step.
    pub duration: u16,
    /// Scaling factor at the start of the element.
    pub scaling_factor: U256,
}

impl PriceCurveElement {
    /// Create a new element. The scaling factor is truncated to 240 bits when
    /// packed.
    pub const fn new(duration: u16, scaling_factor: U256) -> Self {
        Self { duration, scaling_factor }
    }

    /// Pack the element into a single word, duration in the top 16 bits.
    pub fn encode(&self) -> U256 {
        (U256::from(self.duration) << SCALING_FACTOR_BITS) | (self.scaling_factor & MAX_SCALING_FACTOR)
    }

    /// Unpack an element from a single word.
    pub fn decode(word: U256) -> Self {
        let duration = (word >> SCALING_FACTOR_BITS).as_limbs()[0] as u16;
        Self { duration, scaling_factor: word & MAX_SCALING_FACTOR }
    }
}

/// True if `a` and `b` deviate from [`WAD`] in the same direction. `WAD`
/// itself is neutral and shares a direction with anything.
pub fn shares_scaling_direction(a: U256, b: U256) -> bool {
    if a == WAD || b == WAD {
        return true;
    }
    (a > WAD) == (b > WAD)
}

/// A hybrid order's block-based price curve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HybridPriceCurve {
    elements: Vec<PriceCurveElement>,
}

impl HybridPriceCurve {
    /// Create a curve from unpacked elements.
    pub const fn new(elements: Vec<PriceCurveElement>) -> Self {
        Self { elements }
    }

    /// Decode a curve from packed words.
    pub fn from_packed(words: &[U256]) -> Self {
        Self { elements: words.iter().copied().map(PriceCurveElement::decode).collect() }
    }

    /// Pack the curve into words.
    pub fn to_packed(&self) -> Vec<U256> {
        self.elements.iter().map(PriceCurveElement::encode).collect()
    }

    /// Get the elements.
    pub fn elements(&self) -> &[PriceCurveElement] {
        &self.elements
    }

    /// True if the curve has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total number of blocks covered by the curve.
    pub fn total_duration(&self) -> u64 {
        self.elements.iter().map(|e| u64::from(e.duration)).sum()
    }

    /// Merge a cosigner's supplemental curve into this one.
    ///
    /// Each merged factor is `base + supplemental - WAD`, keeping the base
    /// element's duration. A supplemental factor above
    /// [`MAX_SCALING_FACTOR`] is out of range. Supplemental entries past the
    /// end of the base curve are ignored. An empty supplemental curve leaves
    /// the curve unchanged.
    pub fn merge(&self, supplemental: &[U256]) -> Result<Self, PriceCurveError> {
        if supplemental.is_empty() {
            return Ok(self.clone());
        }
        let mut elements = self.elements.clone();
        for (index, (element, word)) in elements.iter_mut().zip(supplemental).enumerate() {
            let supplemental = *word;
            if supplemental > MAX_SCALING_FACTOR {
                return Err(PriceCurveError::OutOfRange { index });
            }
            if !shares_scaling_direction(element.scaling_factor, supplemental) {
                return Err(PriceCurveError::DirectionMismatch { index });
            }
            let merged = element
                .scaling_factor
                .checked_add(supplemental)
                .and_then(|sum| sum.checked_sub(WAD))
                .filter(|merged| *merged <= MAX_SCALING_FACTOR)
                .ok_or(PriceCurveError::OutOfRange { index })?;
            element.scaling_factor = merged;
        }
        Ok(Self { elements })
    }

    /// The scaling factor `blocks_passed` blocks after the auction target
    /// block.
    ///
    /// Within an element the factor moves linearly from the element's factor
    /// toward the next element's factor, or toward [`WAD`] after the last
    /// element. A zero-duration element applies only at exactly its start
    /// block. Past the end of the curve, and for an empty curve, the factor is
    /// [`WAD`].
    pub fn scaling_factor_at(&self, blocks_passed: u64) -> U256 {
        let mut start = 0u64;
        for (i, element) in self.elements.iter().enumerate() {
            if element.duration == 0 {
                if blocks_passed == start {
                    return element.scaling_factor;
                }
                continue;
            }
            let duration = u64::from(element.duration);
            if blocks_passed < start + duration {
                let next = self.elements.get(i + 1).map_or(WAD, |next| next.scaling_factor);
                return interpolate(element.scaling_factor, next, blocks_passed - start, duration);
            }
            start += duration;
        }
        WAD
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn wad_plus(bips: i64) -> U256 {
        let delta = WAD / U256::from(10_000) * U256::from(bips.unsigned_abs());
        if bips >= 0 {
            WAD + delta
        } else {
            WAD - delta
        }
    }

    #[test]
    fn element_packing() {
        let element = PriceCurveElement::new(12, wad_plus(50));
        let word = element.encode();
        assert_eq!(word >> 240, U256::from(12));
        assert_eq!(PriceCurveElement::decode(word), element);
    }

    #[test]
    fn walks_segments() {
        let curve = HybridPriceCurve::new(vec![
            PriceCurveElement::new(10, wad_plus(100)),
            PriceCurveElement::new(10, wad_plus(50)),
        ]);
        assert_eq!(curve.total_duration(), 20);
        assert_eq!(curve.scaling_factor_at(0), wad_plus(100));
        assert_eq!(curve.scaling_factor_at(5), wad_plus(75));
        assert_eq!(curve.scaling_factor_at(10), wad_plus(50));
        assert_eq!(curve.scaling_factor_at(15), wad_plus(25));
        assert_eq!(curve.scaling_factor_at(20), WAD);
        assert_eq!(curve.scaling_factor_at(1_000), WAD);
    }

    #[test]
    fn zero_duration_steps() {
        let curve = HybridPriceCurve::new(vec![
            PriceCurveElement::new(0, wad_plus(500)),
            PriceCurveElement::new(10, wad_plus(100)),
        ]);
        assert_eq!(curve.scaling_factor_at(0), wad_plus(500));
        assert_eq!(curve.scaling_factor_at(1), wad_plus(90));
        assert_eq!(HybridPriceCurve::default().scaling_factor_at(0), WAD);
    }

    #[test]
    fn merge_composes_deviations() {
        let base = HybridPriceCurve::new(vec![
            PriceCurveElement::new(10, wad_plus(100)),
            PriceCurveElement::new(5, wad_plus(40)),
        ]);
        let merged = base.merge(&[wad_plus(20), WAD, wad_plus(900)]).unwrap();
        assert_eq!(
            merged.elements(),
            &[PriceCurveElement::new(10, wad_plus(120)), PriceCurveElement::new(5, wad_plus(40))]
        );
        assert_eq!(base.merge(&[]).unwrap(), base);
    }

    #[test]
    fn merge_rejects_direction_flip() {
        let base = HybridPriceCurve::new(vec![PriceCurveElement::new(10, wad_plus(100))]);
        assert_eq!(
            base.merge(&[wad_plus(-10)]),
            Err(PriceCurveError::DirectionMismatch { index: 0 })
        );
        let neutral = HybridPriceCurve::new(vec![PriceCurveElement::new(10, WAD)]);
        assert!(neutral.merge(&[wad_plus(-10)]).is_ok());
    }

    #[test]
    fn merge_rejects_out_of_range() {
        let base = HybridPriceCurve::new(vec![PriceCurveElement::new(1, U256::from(1))]);
        assert_eq!(
            base.merge(&[U256::from(2)]),
            Err(PriceCurveError::OutOfRange { index: 0 })
        );
        let high = HybridPriceCurve::new(vec![PriceCurveElement::new(1, MAX_SCALING_FACTOR)]);
        assert_eq!(
            high.merge(&[MAX_SCALING_FACTOR]),
            Err(PriceCurveError::OutOfRange { index: 0 })
        );
    }

    #[test]
    fn merge_rejects_oversized_supplement() {
        let base = HybridPriceCurve::new(vec![PriceCurveElement::new(10, wad_plus(5))]);
        let oversized = (U256::from(1) << 240usize) + WAD;
        assert_eq!(base.merge(&[oversized]), Err(PriceCurveError::OutOfRange { index: 0 }));
        assert_eq!(
            base.merge(&[MAX_SCALING_FACTOR + U256::from(1)]),
            Err(PriceCurveError::OutOfRange { index: 0 })
        );

        let neutral = HybridPriceCurve::new(vec![PriceCurveElement::new(10, WAD)]);
        assert_eq!(neutral.merge(&[U256::MAX]), Err(PriceCurveError::OutOfRange { index: 0 }));
    }

    #[test]
    fn zero_duration_between_segments() {
        let a = wad_plus(200);
        let b = wad_plus(400);
        let c = wad_plus(100);
        let curve = HybridPriceCurve::new(vec![
            PriceCurveElement::new(10, a),
            PriceCurveElement::new(0, b),
            PriceCurveElement::new(10, c),
        ]);
        assert_eq!(curve.total_duration(), 20);
        assert_eq!(curve.scaling_factor_at(0), a);
        // the first segment interpolates toward the step
        assert_eq!(curve.scaling_factor_at(5), wad_plus(300));
        assert_eq!(curve.scaling_factor_at(10), b);
        assert_eq!(curve.scaling_factor_at(15), wad_plus(50));
        assert_eq!(curve.scaling_factor_at(20), WAD);
    }

    #[test]
    fn merge_with_longer_supplement_and_terminal_step() {
        let base = HybridPriceCurve::new(vec![
            PriceCurveElement::new(10, wad_plus(100)),
            PriceCurveElement::new(0, wad_plus(300)),
        ]);
        let merged = base.merge(&[wad_plus(10), wad_plus(20), wad_plus(-5000)]).unwrap();
        assert_eq!(
            merged.elements(),
            &[PriceCurveElement::new(10, wad_plus(110)), PriceCurveElement::new(0, wad_plus(320))]
        );
        assert_eq!(merged.scaling_factor_at(0), wad_plus(110));
        assert_eq!(merged.scaling_factor_at(5), wad_plus(215));
        // the terminal step applies only at its own start block
        assert_eq!(merged.scaling_factor_at(10), wad_plus(320));
        assert_eq!(merged.scaling_factor_at(11), WAD);
    }

    proptest! {
        #[test]
        fn packing_round_trip(duration in any::<u16>(), limbs in any::<[u64; 4]>()) {
            let scaling_factor = U256::from_limbs(limbs) & MAX_SCALING_FACTOR;
            let element = PriceCurveElement::new(duration, scaling_factor);
            prop_assert_eq!(PriceCurveElement::decode(element.encode()), element);
        }
    }
}
