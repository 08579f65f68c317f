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

/// A conditional probability model: given the most recent `context_window`
/// bits (oldest first), returns the probability that the next bit is 1.
///
/// Must be deterministic and side-effect-free within one coding session —
/// the encoder and decoder each call it once per bit and must agree on the
/// exact same `p1` for the exact same context.
pub trait ProbabilityModel {
    fn p1(&self, context: &[bool]) -> f64;
}

impl<F: Fn(&[bool]) -> f64> ProbabilityModel for F {
    fn p1(&self, context: &[bool]) -> f64 {
        self(context)
    }
}

/// A model that always returns the same probability, regardless of
/// context. Useful as a baseline for Bernoulli sources and boundary tests.
#[derive(Debug, Clone, Copy)]
pub struct ConstantModel(pub f64);

impl ProbabilityModel for ConstantModel {
    fn p1(&self, _context: &[bool]) -> f64 {
        self.0
    }
}

/// A context-dependent (but still stateless) model: estimates `p1` as the
/// Laplace-smoothed fraction of 1 bits in the context window.
///
/// Unlike an internally-adaptive model, this carries no hidden state of
/// its own — every call recomputes its estimate purely from the context
/// the coder passes in, so it stays a pure function of its input and
/// produces identical results for encoder and decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextFrequencyModel;

impl ProbabilityModel for ContextFrequencyModel {
    fn p1(&self, context: &[bool]) -> f64 {
        let ones = context.iter().filter(|&&b| b).count() as f64;
        let len = context.len() as f64;
        (ones + 1.0) / (len + 2.0)
    }
}
