//! Fixed-point helpers. Products are widened to 512 bits so the
//! multiplication never overflows before the division.

use alloy::primitives::{I256, U256, U512};

/// `1e18`, the fixed-point baseline for scaling factors.
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// `1e7`, the base for priority-fee scaling ("milli-bips").
pub const MPS: U256 = U256::from_limbs([10_000_000, 0, 0, 0]);

/// `1e4`, basis points.
pub const BPS: U256 = U256::from_limbs([10_000, 0, 0, 0]);

/// One gwei in wei.
pub const GWEI: U256 = U256::from_limbs([1_000_000_000, 0, 0, 0]);

const fn widen(x: U256) -> U512 {
    let [a, b, c, d] = x.into_limbs();
    U512::from_limbs([a, b, c, d, 0, 0, 0, 0])
}

fn narrow(x: U512) -> Option<U256> {
    let limbs = x.into_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return None;
    }
    Some(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// `floor(x * y / d)`. `None` if `d` is zero or the quotient overflows.
pub fn mul_div_down(x: U256, y: U256, d: U256) -> Option<U256> {
    if d.is_zero() {
        return None;
    }
    narrow(widen(x) * widen(y) / widen(d))
}

/// `ceil(x * y / d)`. `None` if `d` is zero or the quotient overflows.
pub fn mul_div_up(x: U256, y: U256, d: U256) -> Option<U256> {
    if d.is_zero() {
        return None;
    }
    let product = widen(x) * widen(y);
    let d = widen(d);
    let quotient = product / d;
    let quotient = if (product % d).is_zero() { quotient } else { quotient + U512::from(1u8) };
    narrow(quotient)
}

/// `floor(x * y / WAD)`.
pub fn mul_wad_down(x: U256, y: U256) -> Option<U256> {
    mul_div_down(x, y, WAD)
}

/// `ceil(x * y / WAD)`.
pub fn mul_wad_up(x: U256, y: U256) -> Option<U256> {
    mul_div_up(x, y, WAD)
}

/// Clamp `x` into `[min, max]`.
pub fn bound(x: U256, min: U256, max: U256) -> U256 {
    x.max(min).min(max)
}

/// `x - delta`, clamped into `[min, max]`. Underflow clamps to `min` and
/// overflow to `max`.
pub fn bounded_sub(x: U256, delta: I256, min: U256, max: U256) -> U256 {
    let magnitude = delta.unsigned_abs();
    let raw = if delta.is_negative() {
        x.checked_add(magnitude).unwrap_or(max)
    } else {
        x.checked_sub(magnitude).unwrap_or(min)
    };
    bound(raw, min, max)
}

/// `x + delta`, clamped into `[min, max]`. Underflow clamps to `min` and
/// overflow to `max`.
pub fn bounded_add(x: U256, delta: I256, min: U256, max: U256) -> U256 {
    let magnitude = delta.unsigned_abs();
    let raw = if delta.is_negative() {
        x.checked_sub(magnitude).unwrap_or(min)
    } else {
        x.checked_add(magnitude).unwrap_or(max)
    };
    bound(raw, min, max)
}

#[cfg(test)]
mod test {
    use super::*;

    fn signed(x: i64) -> I256 {
        I256::try_from(x).unwrap()
    }

    #[test]
    fn rounding_direction() {
        let x = U256::from(10);
        let y = U256::from(10);
        let d = U256::from(3);
        assert_eq!(mul_div_down(x, y, d), Some(U256::from(33)));
        assert_eq!(mul_div_up(x, y, d), Some(U256::from(34)));
        assert_eq!(mul_div_up(x, y, U256::from(4)), Some(U256::from(25)));
        assert_eq!(mul_div_down(x, y, U256::ZERO), None);
    }

    #[test]
    fn wide_intermediate() {
        // MAX * MAX / MAX fits once the product is widened.
        assert_eq!(mul_div_down(U256::MAX, U256::MAX, U256::MAX), Some(U256::MAX));
        assert_eq!(mul_div_down(U256::MAX, U256::from(2), U256::from(1)), None);
        assert_eq!(mul_wad_up(U256::from(3), WAD / U256::from(2)), Some(U256::from(2)));
        assert_eq!(mul_wad_down(U256::from(3), WAD / U256::from(2)), Some(U256::from(1)));
    }

    #[test]
    fn bounded_arithmetic() {
        let min = U256::from(5);
        let max = U256::from(100);
        let x = U256::from(50);
        assert_eq!(bounded_sub(x, signed(60), min, max), min);
        assert_eq!(bounded_sub(x, signed(-60), min, max), max);
        assert_eq!(bounded_sub(x, signed(10), min, max), U256::from(40));
        assert_eq!(bounded_add(x, signed(-10), min, max), U256::from(40));
        assert_eq!(bounded_add(U256::MAX, I256::ONE, U256::ZERO, U256::MAX), U256::MAX);
        assert_eq!(bounded_sub(U256::ZERO, I256::MAX, U256::ZERO, U256::MAX), U256::ZERO);
    }
}
