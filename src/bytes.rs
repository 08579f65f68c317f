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

//! Byte-level boundary glue: packing/unpacking bits to whole bytes for
//! callers whose external surface is byte-oriented. Not part of the coder
//! core — built on top of it using `BitBuffer` / `BitIterator`, keeping
//! byte packing separate from the coding logic.

use crate::bit_buffer::bit_iter::BitIterator;
use crate::bit_buffer::BitBuffer;
use crate::error::CoderError;
use crate::model::ProbabilityModel;

/// Encodes `bits` and packs the result into whole bytes (MSB-first),
/// zero-padding the final byte if needed.
pub fn encode_bytes(
    bits: &[bool],
    model: impl ProbabilityModel,
    precision: u32,
    context_window: usize,
) -> Result<Vec<u8>, CoderError> {
    let encoded = crate::coder::encode(bits, model, precision, context_window)?;
    let mut buffer = BitBuffer::new();
    for bit in encoded {
        buffer.append(bit);
    }
    let mut bytes: Vec<u8> = buffer.get_complete_bytes().collect();
    if let Some(leftover) = buffer.get_leftover_bits() {
        bytes.push(leftover);
    }
    Ok(bytes)
}

/// Unpacks `bytes` into bits (MSB-first) and decodes `sequence_length` of
/// them, given the exact `bit_length` of the encoded stream (discarding
/// trailing pad below that). Fails with `LengthMismatch` if `bit_length`
/// exceeds the bits actually available in `bytes`.
pub fn decode_bytes(
    bytes: &[u8],
    bit_length: usize,
    model: impl ProbabilityModel,
    sequence_length: usize,
    precision: u32,
    context_window: usize,
) -> Result<Vec<bool>, CoderError> {
    let available = bytes.len() * 8;
    if bit_length > available {
        return Err(CoderError::LengthMismatch {
            bit_length,
            available,
        });
    }

    let bits: Vec<bool> = BitIterator::from(bytes.iter().copied())
        .take(bit_length)
        .collect();
    crate::coder::decode(&bits, model, sequence_length, precision, context_window)
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::model::ConstantModel;

    #[test]
    fn round_trips_through_byte_packing() {
        let bits = [
            true, false, true, true, false, false, true, false, true, true, true, false,
        ];
        let encoded = encode_bytes(&bits, ConstantModel(0.3), 24, 6).unwrap();
        let decoded = decode_bytes(
            &encoded,
            encoded.len() * 8,
            ConstantModel(0.3),
            bits.len(),
            24,
            6,
        )
        .unwrap();
        assert_eq!(decoded, bits);
    }

    #[test]
    fn rejects_bit_length_longer_than_buffer() {
        let result = decode_bytes(&[0u8; 2], 100, ConstantModel(0.5), 5, 16, 4);
        assert!(matches!(
            result,
            Err(CoderError::LengthMismatch {
                bit_length: 100,
                available: 16
            })
        ));
    }
}
