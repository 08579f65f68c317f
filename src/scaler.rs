// Binary Arithmetic Coder: a context-adaptive arithmetic coding library
// Copyright (C) 2025  Yair Ziv
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::error::CoderError;

/// Maps a real-valued probability `p1 in [0, 1]` to an integer in
/// `[0, 2^precision]`, the probability mass assigned to the 1 symbol when
/// the interval is partitioned. `p1 == 1.0` scales to exactly
/// `2^precision`, which `Interval::midpoint` treats as "the 0-subinterval
/// is empty" rather than a value to clamp away.
///
/// Uses truncation toward zero, matching `floor(p1 * 2^precision)`.
/// Encoder and decoder must call this with identical arguments to agree on
/// bit-for-bit identical partitions.
pub fn scale(p1: f64, precision: u32) -> Result<u128, CoderError> {
    if !p1.is_finite() || !(0.0..=1.0).contains(&p1) {
        return Err(CoderError::InvalidProbability(p1));
    }

    let scaled = p1 * (1u128 << precision) as f64;
    Ok(scaled as u128)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn zero_probability_scales_to_zero() {
        assert_eq!(scale(0.0, 16).unwrap(), 0);
    }

    #[test]
    fn one_probability_scales_to_two_pow_precision() {
        assert_eq!(scale(1.0, 16).unwrap(), 1 << 16);
    }

    #[test]
    fn one_half_scales_to_half_of_range() {
        assert_eq!(scale(0.5, 16).unwrap(), 1 << 15);
    }

    #[test]
    fn truncates_toward_zero() {
        // 0.1 * 2^8 = 25.6, truncated to 25.
        assert_eq!(scale(0.1, 8).unwrap(), 25);
    }

    #[test]
    fn rejects_probability_above_one() {
        assert!(matches!(
            scale(1.5, 16),
            Err(CoderError::InvalidProbability(_))
        ));
    }

    #[test]
    fn rejects_negative_probability() {
        assert!(matches!(
            scale(-0.1, 16),
            Err(CoderError::InvalidProbability(_))
        ));
    }

    #[test]
    fn rejects_non_finite_probability() {
        assert!(matches!(
            scale(f64::NAN, 16),
            Err(CoderError::InvalidProbability(_))
        ));
        assert!(matches!(
            scale(f64::INFINITY, 16),
            Err(CoderError::InvalidProbability(_))
        ));
    }

    #[test]
    fn deterministic_across_calls() {
        for _ in 0..100 {
            assert_eq!(scale(0.37, 24).unwrap(), scale(0.37, 24).unwrap());
        }
    }
}
