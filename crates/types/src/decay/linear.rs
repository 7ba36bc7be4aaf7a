use crate::{decay::math::mul_div_down, FieldError};
use alloy::primitives::U256;

/// Linear decay of an amount over a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearDecay {
    start_amount: U256,
    end_amount: U256,
    decay_start_time: u64,
    decay_end_time: u64,
}

impl LinearDecay {
    /// Create a new decay, rejecting a window that ends before it starts.
    pub const fn new(
        start_amount: U256,
        end_amount: U256,
        decay_start_time: u64,
        decay_end_time: u64,
    ) -> Result<Self, FieldError> {
        if decay_end_time < decay_start_time {
            return Err(FieldError::EndTimeBeforeStartTime);
        }
        Ok(Self { start_amount, end_amount, decay_start_time, decay_end_time })
    }

    /// Get the start amount.
    pub const fn start_amount(&self) -> U256 {
        self.start_amount
    }

    /// Get the end amount.
    pub const fn end_amount(&self) -> U256 {
        self.end_amount
    }

    /// Get the decay window as `(start, end)`.
    pub const fn window(&self) -> (u64, u64) {
        (self.decay_start_time, self.decay_end_time)
    }

    /// Resolve the amount at `at_time`.
    pub fn resolve(&self, at_time: u64) -> U256 {
        linear_time_decay(
            self.start_amount,
            self.end_amount,
            self.decay_start_time,
            self.decay_end_time,
            at_time,
        )
    }
}

/// Resolve a linear decay from `start_amount` at `decay_start_time` to
/// `end_amount` at `decay_end_time`, evaluated at `at_time`.
///
/// The amount is `start_amount` up to and including the start time and
/// `end_amount` from the end time on. In between, it moves from the start
/// toward the end by `|start - end| * elapsed / duration`, rounded down.
pub fn linear_time_decay(
    start_amount: U256,
    end_amount: U256,
    decay_start_time: u64,
    decay_end_time: u64,
    at_time: u64,
) -> U256 {
    if at_time >= decay_end_time {
        return end_amount;
    }
    if at_time <= decay_start_time || start_amount == end_amount {
        return start_amount;
    }
    interpolate(
        start_amount,
        end_amount,
        at_time - decay_start_time,
        decay_end_time - decay_start_time,
    )
}

/// Move from `start` toward `end` by `elapsed / duration` of the distance,
/// rounding the distance moved down.
pub(crate) fn interpolate(start: U256, end: U256, elapsed: u64, duration: u64) -> U256 {
    if duration == 0 || elapsed >= duration {
        return end;
    }
    let elapsed = U256::from(elapsed);
    let duration = U256::from(duration);
    if start > end {
        let diff = start - end;
        // elapsed < duration, so the delta is below diff
        start - mul_div_down(diff, elapsed, duration).unwrap_or(diff)
    } else {
        let diff = end - start;
        start + mul_div_down(diff, elapsed, duration).unwrap_or(diff)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decays_down() {
        let decay = LinearDecay::new(U256::from(2000), U256::from(1000), 100, 200).unwrap();
        assert_eq!(decay.resolve(0), U256::from(2000));
        assert_eq!(decay.resolve(100), U256::from(2000));
        assert_eq!(decay.resolve(150), U256::from(1500));
        assert_eq!(decay.resolve(133), U256::from(1670));
        assert_eq!(decay.resolve(200), U256::from(1000));
        assert_eq!(decay.resolve(u64::MAX), U256::from(1000));
    }

    #[test]
    fn decays_up() {
        let decay = LinearDecay::new(U256::from(1000), U256::from(2000), 100, 200).unwrap();
        assert_eq!(decay.resolve(133), U256::from(1330));
        assert_eq!(decay.resolve(199), U256::from(1990));
    }

    #[test]
    fn zero_length_window() {
        let decay = LinearDecay::new(U256::from(10), U256::from(5), 100, 100).unwrap();
        assert_eq!(decay.resolve(99), U256::from(10));
        assert_eq!(decay.resolve(100), U256::from(5));
        assert_eq!(
            LinearDecay::new(U256::ZERO, U256::ZERO, 101, 100),
            Err(FieldError::EndTimeBeforeStartTime)
        );
    }

    proptest! {
        #[test]
        fn endpoints_and_monotonic(
            start in any::<u128>(),
            end in any::<u128>(),
            decay_start in 0u64..1_000_000,
            len in 0u64..1_000_000,
            a in 0u64..3_000_000,
            b in 0u64..3_000_000,
        ) {
            let (start, end) = (U256::from(start), U256::from(end));
            let decay = LinearDecay::new(start, end, decay_start, decay_start + len).unwrap();
            if len > 0 {
                prop_assert_eq!(decay.resolve(decay_start), start);
            }
            prop_assert_eq!(decay.resolve(decay_start + len), end);

            let (lo, hi) = (a.min(b), a.max(b));
            let (x, y) = (decay.resolve(lo), decay.resolve(hi));
            if start >= end {
                prop_assert!(x >= y);
            } else {
                prop_assert!(x <= y);
            }
            prop_assert!(x >= start.min(end) && x <= start.max(end));
        }
    }
}
