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

/// Largest `precision` this coder supports. Chosen so that `range * p1s`
/// (the widest intermediate product in the partition step, each factor up
/// to `2^precision`) still fits in `u128`.
pub const MAX_PRECISION: u32 = 63;

/// In arithmetic coding, we use an integer representation of fractional
/// values to achieve pseudo-infinite precision with finite bits.
///
/// An integer's bits are treated like bits after a decimal point. For
/// example 0101<sub>2</sub> (5<sub>10</sub>) is treated as if it were
/// 0.0101<sub>2</sub> (0.3125<sub>10</sub>).
///
/// `BitsSystem` holds the constants vital to arithmetic coding in this
/// integer representation, for a `precision` chosen at runtime by the
/// caller rather than fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitsSystem {
    precision: u32,
    /// Largest possible value in the integer representation, 0.11..1:
    max: u128,
    /// Half in the integer representation, 0.10..0:
    half: u128,
    /// One fourth in the integer representation, 0.010..0:
    one_fourth: u128,
    /// Three fourths in the integer representation, 0.110..0:
    three_fourths: u128,
}

impl BitsSystem {
    /// Builds a `BitsSystem` for the given `precision`. Fails fast if
    /// `precision` is out of the supported range.
    pub fn new(precision: u32) -> Result<Self, CoderError> {
        if !(2..=MAX_PRECISION).contains(&precision) {
            return Err(CoderError::InvalidPrecision(precision));
        }

        let max = (1u128 << precision) - 1;
        let half = 1u128 << (precision - 1);
        let one_fourth = 1u128 << (precision - 2);
        let three_fourths = 3u128 << (precision - 2);

        Ok(Self {
            precision,
            max,
            half,
            one_fourth,
            three_fourths,
        })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn max(&self) -> u128 {
        self.max
    }

    pub fn half(&self) -> u128 {
        self.half
    }

    pub fn one_fourth(&self) -> u128 {
        self.one_fourth
    }

    pub fn three_fourths(&self) -> u128 {
        self.three_fourths
    }
}
