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

use crate::context::ContextWindow;
use crate::error::CoderError;
use crate::interval::{Interval, IntervalState};
use crate::model::ProbabilityModel;
use crate::scaler::scale;

/// Drives the decode-side state machine, re-entrant on the same partition
/// logic as the encoder but testing `value` against `midpoint` instead of
/// consuming an explicit input bit.
pub struct Decoder<'b, M: ProbabilityModel> {
    interval: Interval,
    context: ContextWindow,
    value: u128,
    input: &'b [bool],
    pos: usize,
    model: M,
}

impl<'b, M: ProbabilityModel> Decoder<'b, M> {
    pub fn new(
        model: M,
        encoded_bits: &'b [bool],
        precision: u32,
        context_window: usize,
    ) -> Result<Self, CoderError> {
        let interval = Interval::new(precision)?;
        let mut pos = 0usize;
        let mut value: u128 = 0;
        for _ in 0..precision {
            value = (value << 1) | (Self::bit_at(encoded_bits, pos) as u128);
            pos += 1;
        }

        Ok(Self {
            interval,
            context: ContextWindow::new(context_window),
            value,
            input: encoded_bits,
            pos,
            model,
        })
    }

    fn bit_at(bits: &[bool], idx: usize) -> bool {
        // Right-pad with zeros once the input is exhausted.
        bits.get(idx).copied().unwrap_or(false)
    }

    /// Decodes the next bit: partition exactly as the encoder does, decide
    /// which side of the midpoint `value` falls on, update context,
    /// renormalize.
    pub fn decode_bit(&mut self) -> Result<bool, CoderError> {
        if self.value < self.interval.low() || self.value > self.interval.high() {
            return Err(CoderError::ModelViolation(format!(
                "value {} outside interval [{}, {}]",
                self.value,
                self.interval.low(),
                self.interval.high()
            )));
        }

        let p1 = self.model.p1(self.context.as_slice());
        let p1_scaled = scale(p1, self.interval.system().precision())?;
        let midpoint = self.interval.midpoint(p1_scaled);

        // `None` means the 0-subinterval is empty, so `value` (already
        // checked to lie within the interval) can only belong to the 1
        // symbol.
        let bit = match midpoint {
            Some(mid) => self.value > mid,
            None => true,
        };
        self.interval.select(bit, midpoint)?;
        self.context.append(bit);
        self.renormalize();
        Ok(bit)
    }

    fn renormalize(&mut self) {
        loop {
            match self.interval.get_state() {
                IntervalState::Converging(false) => {
                    self.interval.shift_e1();
                    self.shift_value(0);
                }
                IntervalState::Converging(true) => {
                    let half = self.interval.system().half();
                    self.interval.shift_e2();
                    self.shift_value(half);
                }
                IntervalState::NearConvergence => {
                    let one_fourth = self.interval.system().one_fourth();
                    self.interval.shift_e3();
                    self.shift_value(one_fourth);
                }
                IntervalState::NoConvergence => break,
            }
        }
    }

    fn shift_value(&mut self, offset: u128) {
        self.value = (self.value - offset) << 1;
        self.value |= self.next_input_bit() as u128;
    }

    fn next_input_bit(&mut self) -> bool {
        let bit = Self::bit_at(self.input, self.pos);
        self.pos += 1;
        bit
    }
}

/// Decodes `sequence_length` bits from `encoded_bits` under `model`.
pub fn decode(
    encoded_bits: &[bool],
    model: impl ProbabilityModel,
    sequence_length: usize,
    precision: u32,
    context_window: usize,
) -> Result<Vec<bool>, CoderError> {
    let mut decoder = Decoder::new(model, encoded_bits, precision, context_window)?;
    let mut out = Vec::with_capacity(sequence_length);
    for _ in 0..sequence_length {
        out.push(decoder.decode_bit()?);
    }
    Ok(out)
}
