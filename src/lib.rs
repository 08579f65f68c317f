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

//! A context-adaptive binary arithmetic coder: losslessly compresses and
//! decompresses a finite bit sequence using a conditional probability
//! model `P(bit_i = 1 | context_i)` supplied by the caller.
//!
//! The core is the finite-precision interval refinement, renormalization,
//! and underflow ("E3 / scale") bit-handling logic in [`interval`] and
//! [`coder`]. The probability model itself is an external collaborator
//! (see [`model::ProbabilityModel`]); byte-level packing for
//! byte-oriented callers lives in [`bytes`].

pub mod bit_buffer;
pub mod bytes;
pub mod coder;
pub mod context;
pub mod error;
pub mod interval;
pub mod model;
pub mod scaler;

pub use coder::{decode, encode};
pub use error::CoderError;
pub use model::{ConstantModel, ContextFrequencyModel, ProbabilityModel};

#[cfg(test)]
mod round_trip_tests;
