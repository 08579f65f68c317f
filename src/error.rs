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

use thiserror::Error;

/// Errors produced by the coder. Every session is all-or-nothing: none of
/// these are recoverable mid-session.
#[derive(Debug, Error, PartialEq)]
pub enum CoderError {
    /// `precision` was rejected before any bit was processed.
    #[error(
        "precision must satisfy 2 <= precision <= {max}, got {0}",
        max = crate::interval::bits_system::MAX_PRECISION
    )]
    InvalidPrecision(u32),

    /// `p1_func` returned a value outside `[0, 1]` (or non-finite).
    #[error("probability model returned {0}, which is not a valid probability in [0, 1]")]
    InvalidProbability(f64),

    /// The decoder's interval became empty, or `value` fell outside
    /// `[low, high]`. Indicates the decoder's model disagrees with the
    /// encoder's, or the encoded stream is corrupted.
    #[error("model violation during decode: {0}")]
    ModelViolation(String),

    /// Byte-aligned variant only: the caller-supplied `bit_length` exceeds
    /// the bits actually available in the byte buffer.
    #[error("bit_length {bit_length} exceeds available {available} bits in buffer")]
    LengthMismatch { bit_length: usize, available: usize },
}
