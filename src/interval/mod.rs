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

pub mod bits_system;

pub use self::bits_system::BitsSystem;
use crate::error::CoderError;
use log::debug;
use std::fmt::{Display, Formatter};

/// The `[low, high]` interval an arithmetic coder narrows as it processes
/// bits, plus the `BitsSystem` constants derived from its `precision`.
#[derive(Debug, Clone)]
pub struct Interval {
    low: u128,
    high: u128,
    system: BitsSystem,
}

impl Interval {
    /// Forms a new Interval representing the full range `[0, 2^precision - 1]`.
    pub fn new(precision: u32) -> Result<Self, CoderError> {
        let system = BitsSystem::new(precision)?;
        Ok(Self {
            low: 0,
            high: system.max(),
            system,
        })
    }

    /// Computes the partition point between the 0-subinterval
    /// `[low, midpoint]` and the 1-subinterval `[midpoint + 1, high]` for a
    /// scaled probability `p1_scaled` (as returned by `scaler::scale`).
    ///
    /// Returns `None` when `p1_scaled` assigns the entire interval to the
    /// 1-subinterval (`p1 == 1` exactly), which would otherwise require a
    /// midpoint one below `low` — unrepresentable once `low` reaches 0.
    /// `select` treats `None` as "the 0-subinterval is empty": a `false`
    /// bit can never legally land there.
    pub fn midpoint(&self, p1_scaled: u128) -> Option<u128> {
        let range = self.high - self.low + 1;
        let term = (range * p1_scaled) >> self.system.precision();
        if term >= range {
            None
        } else {
            Some(self.high - term)
        }
    }

    /// Narrows the interval to the subinterval for `bit`, given the
    /// `midpoint` computed for the same `p1_scaled`.
    pub fn select(&mut self, bit: bool, midpoint: Option<u128>) -> Result<(), CoderError> {
        match (bit, midpoint) {
            (false, None) => {
                return Err(CoderError::ModelViolation(
                    "observed a 0 bit but the model assigned p1 = 1 (0-subinterval is empty)"
                        .to_string(),
                ));
            }
            (true, None) => {
                // The whole interval already belongs to the 1-subinterval.
            }
            (false, Some(mid)) => self.high = mid,
            (true, Some(mid)) => self.low = mid + 1,
        }
        debug!("Interval: narrowed to {}", self);
        self.validate()
    }

    pub fn get_state(&self) -> IntervalState {
        match () {
            // Check convergence:
            _ if self.low >= self.system.half() => IntervalState::Converging(true),
            _ if self.high < self.system.half() => IntervalState::Converging(false),

            // Check near-convergence:
            _ if self.low >= self.system.one_fourth()
                && self.high < self.system.three_fourths() =>
            {
                IntervalState::NearConvergence
            }

            // Default:
            _ => IntervalState::NoConvergence,
        }
    }

    /// Applies the E1 renormalization shift (top-half, MSB = 0):
    /// `low` shifts in a 0 bit, `high` shifts in a 1 bit.
    pub fn shift_e1(&mut self) {
        self.low <<= 1;
        self.high = (self.high << 1) | 1;
    }

    /// Applies the E2 renormalization shift (bottom-half, MSB = 1):
    /// subtract `half` from both bounds, then shift as in E1.
    pub fn shift_e2(&mut self) {
        self.low = (self.low - self.system.half()) << 1;
        self.high = ((self.high - self.system.half()) << 1) | 1;
    }

    /// Applies the E3 renormalization shift (middle straddle): subtract
    /// `one_fourth` from both bounds, then shift as in E1.
    pub fn shift_e3(&mut self) {
        self.low = (self.low - self.system.one_fourth()) << 1;
        self.high = ((self.high - self.system.one_fourth()) << 1) | 1;
    }

    pub fn low(&self) -> u128 {
        self.low
    }

    pub fn high(&self) -> u128 {
        self.high
    }

    pub fn system(&self) -> &BitsSystem {
        &self.system
    }

    /// Validates the boundaries invariant `low <= high`, returning a
    /// `ModelViolation` if it was broken.
    fn validate(&self) -> Result<(), CoderError> {
        if self.low > self.high {
            Err(CoderError::ModelViolation(format!(
                "low ({}) > high ({}), interval is empty",
                self.low, self.high
            )))
        } else {
            Ok(())
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let bits = self.system.precision() as usize;
        write!(f, "[{:0bits$b}, {:0bits$b}]", self.low, self.high, bits = bits)
    }
}

/// The state of an interval, based on its boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalState {
    /// The interval's lower and upper boundaries both have the same
    /// Most-Significant Bit, which means the interval converges to a
    /// value. The value held by the variant is **true** if the MSB is 1
    /// (the E2 case), and **false** if it's 0 (E1).
    Converging(bool),

    /// The interval nearly converges - a special case that happens when
    /// low = 01XX...X and high = 10YY...Y (the E3 straddle).
    NearConvergence,

    /// The interval's boundaries do not converge or nearly converge, which
    /// is the default state — the renormalization loop exits here.
    NoConvergence,
}
