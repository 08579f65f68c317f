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
use log::debug;

/// Drives the encode-side state machine: `INIT -> { PARTITION -> RENORM* }
/// x N -> TERMINATE`.
pub struct Encoder<M: ProbabilityModel> {
    interval: Interval,
    context: ContextWindow,
    /// Number of E3 shifts deferred since the last E1/E2 emission.
    outstanding_bits: usize,
    output: Vec<bool>,
    model: M,
}

impl<M: ProbabilityModel> Encoder<M> {
    pub fn new(model: M, precision: u32, context_window: usize) -> Result<Self, CoderError> {
        Ok(Self {
            interval: Interval::new(precision)?,
            context: ContextWindow::new(context_window),
            outstanding_bits: 0,
            output: Vec::new(),
            model,
        })
    }

    /// Processes one input bit: partition, update context, renormalize.
    pub fn encode_bit(&mut self, bit: bool) -> Result<(), CoderError> {
        let p1 = self.model.p1(self.context.as_slice());
        let p1_scaled = scale(p1, self.interval.system().precision())?;
        let midpoint = self.interval.midpoint(p1_scaled);

        self.interval.select(bit, midpoint)?;
        self.context.append(bit);
        self.renormalize();
        Ok(())
    }

    fn renormalize(&mut self) {
        loop {
            match self.interval.get_state() {
                IntervalState::Converging(false) => {
                    self.emit(false);
                    self.interval.shift_e1();
                }
                IntervalState::Converging(true) => {
                    self.emit(true);
                    self.interval.shift_e2();
                }
                IntervalState::NearConvergence => {
                    self.outstanding_bits += 1;
                    debug!("Encoder: E3 straddle, outstanding_bits = {}", self.outstanding_bits);
                    self.interval.shift_e3();
                }
                IntervalState::NoConvergence => break,
            }
        }
    }

    /// Emits `bit`, followed by `outstanding_bits` copies of `!bit` (the
    /// bit-follow resolution of any deferred E3 straddles), then clears
    /// the counter.
    fn emit(&mut self, bit: bool) {
        self.output.push(bit);
        for _ in 0..self.outstanding_bits {
            self.output.push(!bit);
        }
        self.outstanding_bits = 0;
    }

    /// Returns the bits emitted so far, without flushing termination.
    /// Lets callers observe that a common input prefix always produces
    /// the same emitted prefix, regardless of what follows it.
    pub fn emitted_so_far(&self) -> &[bool] {
        &self.output
    }

    /// Flushes enough bits to uniquely identify the final interval, then
    /// pads with zeros until the stream is at least `precision` bits long.
    pub fn finish(mut self) -> Vec<bool> {
        if self.interval.low() < self.interval.system().one_fourth() {
            self.emit(false);
            self.output.push(true);
        } else {
            self.emit(true);
        }

        let precision = self.interval.system().precision() as usize;
        while self.output.len() < precision {
            self.output.push(false);
        }

        self.output
    }
}

/// Encodes `bits` under `model`, returning the compressed bitstream.
pub fn encode(
    bits: &[bool],
    model: impl ProbabilityModel,
    precision: u32,
    context_window: usize,
) -> Result<Vec<bool>, CoderError> {
    let mut encoder = Encoder::new(model, precision, context_window)?;
    for &bit in bits {
        encoder.encode_bit(bit)?;
    }
    Ok(encoder.finish())
}
