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

//! End-to-end round-trip scenarios covering a range of precisions, context
//! windows, and probability distributions, plus the invariants and laws the
//! coder is expected to hold (determinism, trailing-zero independence,
//! context isolation).

use crate::coder::{decode, encode};
use crate::coder::encoder::Encoder;
use crate::error::CoderError;
use crate::model::ConstantModel;

/// A small deterministic xorshift64 generator, used only to produce
/// repeatable Bernoulli sequences for these tests without adding a
/// dependency on a randomness crate.
struct Xorshift64(u64);

impl Xorshift64 {
    fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn bernoulli_sequence(length: usize, p: f64, seed: u64) -> Vec<bool> {
    let mut rng = Xorshift64::new(seed);
    (0..length).map(|_| rng.next_f64() < p).collect()
}

fn round_trip(bits: &[bool], p: f64, precision: u32, context_window: usize) -> Vec<bool> {
    let encoded = encode(bits, ConstantModel(p), precision, context_window).unwrap();
    decode(&encoded, ConstantModel(p), bits.len(), precision, context_window).unwrap()
}

// --- seed scenarios ------------------------------------------------------

#[test]
fn scenario_1_bernoulli_0_2_length_10000() {
    let bits = bernoulli_sequence(10_000, 0.2, 1);
    assert_eq!(round_trip(&bits, 0.2, 32, 10), bits);
}

#[test]
fn scenario_2_alternating_p_half_length_10000() {
    let bits: Vec<bool> = (0..10_000).map(|i| i % 2 == 0).collect();
    let encoded = encode(&bits, ConstantModel(0.5), 32, 10).unwrap();
    let decoded = decode(&encoded, ConstantModel(0.5), bits.len(), 32, 10).unwrap();
    assert_eq!(decoded, bits);
    // Close to optimal (1 bit/symbol) plus O(precision) overhead.
    assert!(encoded.len() < bits.len() + 200);
}

#[test]
fn scenario_3_constant_edge_cases() {
    let all_zeros = vec![false; 1000];
    assert_eq!(round_trip(&all_zeros, 0.0, 32, 10), all_zeros);

    let all_ones = vec![true; 1000];
    assert_eq!(round_trip(&all_ones, 1.0, 32, 10), all_ones);

    let alternating: Vec<bool> = (0..1000).map(|i| i % 2 == 0).collect();
    assert_eq!(round_trip(&alternating, 0.5, 32, 10), alternating);
}

#[test]
fn scenario_4_all_precisions_round_trip() {
    for precision in [16, 24, 40] {
        let bits = bernoulli_sequence(1000, 0.2, 2);
        assert_eq!(round_trip(&bits, 0.2, precision, 10), bits, "precision={precision}");
    }
}

#[test]
fn scenario_5_all_context_windows_round_trip() {
    for context_window in [5, 15, 20] {
        let bits = bernoulli_sequence(1000, 0.2, 3);
        assert_eq!(
            round_trip(&bits, 0.2, 32, context_window),
            bits,
            "context_window={context_window}"
        );
    }
}

#[test]
fn scenario_6_compression_ratio_below_one() {
    let bits = bernoulli_sequence(100_000, 0.1, 4);
    let encoded = encode(&bits, ConstantModel(0.1), 32, 10).unwrap();
    let ratio = encoded.len() as f64 / bits.len() as f64;
    // Entropy of Bernoulli(0.1) is ~0.469 bits/symbol; allow generous slack
    // above that for the fixed O(precision) overhead and test stability.
    assert!(ratio < 0.52, "compression ratio {ratio} not tight enough");
}

// --- boundary behaviors --------------------------------------------------

#[test]
fn empty_input_round_trips_to_empty_output() {
    let encoded = encode(&[], ConstantModel(0.5), 32, 10).unwrap();
    assert!(encoded.len() >= 32);
    let decoded = decode(&encoded, ConstantModel(0.5), 0, 32, 10).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn length_one_round_trips() {
    for bit in [false, true] {
        assert_eq!(round_trip(&[bit], 0.4, 32, 10), vec![bit]);
    }
}

#[test]
fn test_short_sequences() {
    // Every length from 1 to 32 bits, spanning the full range around
    // `precision` (32), where off-by-one bugs in padding/termination tend
    // to surface.
    for length in 1..=32 {
        let bits = bernoulli_sequence(length, 0.3, 100 + length as u64);
        assert_eq!(round_trip(&bits, 0.3, 32, 10), bits, "length={length}");
    }
}

#[test]
fn length_exactly_precision_round_trips() {
    let bits = bernoulli_sequence(32, 0.3, 5);
    assert_eq!(round_trip(&bits, 0.3, 32, 10), bits);
}

#[test]
fn length_precision_minus_one_round_trips() {
    let bits = bernoulli_sequence(31, 0.3, 6);
    assert_eq!(round_trip(&bits, 0.3, 32, 10), bits);
}

#[test]
fn model_mismatch_still_round_trips() {
    // Sampled from p=0.3 but encoded/decoded as if p=0.7: the code is
    // longer than optimal, but correctness must not depend on the model
    // being accurate.
    let bits = bernoulli_sequence(10_000, 0.3, 7);
    assert_eq!(round_trip(&bits, 0.7, 32, 10), bits);
}

#[test]
fn encoding_a_zero_bit_under_a_p1_equals_one_model_is_rejected() {
    // Symmetric to the reverse case (a 1 bit under p1 = 0): the model
    // claims bit = 1 with certainty, so observing a 0 must surface as a
    // model violation instead of silently succeeding or panicking.
    let result = encode(&[false], ConstantModel(1.0), 16, 4);
    assert!(matches!(result, Err(CoderError::ModelViolation(_))));
}

// --- laws ----------------------------------------------------------------

#[test]
fn determinism_law() {
    let bits = bernoulli_sequence(500, 0.4, 8);
    let a = encode(&bits, ConstantModel(0.4), 24, 10).unwrap();
    let b = encode(&bits, ConstantModel(0.4), 24, 10).unwrap();
    assert_eq!(a, b);
}

#[test]
fn independence_of_trailing_zeros_law() {
    let bits = bernoulli_sequence(500, 0.4, 9);
    let encoded = encode(&bits, ConstantModel(0.4), 24, 10).unwrap();

    let mut extended = encoded.clone();
    extended.extend(std::iter::repeat(false).take(64));

    let decoded_short = decode(&encoded, ConstantModel(0.4), bits.len(), 24, 10).unwrap();
    let decoded_long = decode(&extended, ConstantModel(0.4), bits.len(), 24, 10).unwrap();
    assert_eq!(decoded_short, decoded_long);
    assert_eq!(decoded_short, bits);
}

#[test]
fn context_isolation_law() {
    // Two sequences that share a common prefix of length i + W must
    // produce identical encoder output for that shared prefix, regardless
    // of what follows it.
    let context_window = 8;
    let prefix_len = 40; // i + W, i.e. enough bits that context is full
    let common_prefix = bernoulli_sequence(prefix_len, 0.3, 10);

    let mut seq_a = common_prefix.clone();
    seq_a.extend(bernoulli_sequence(50, 0.3, 11));
    let mut seq_b = common_prefix.clone();
    seq_b.extend(bernoulli_sequence(50, 0.3, 12));
    assert_ne!(seq_a, seq_b, "test setup should diverge after the prefix");

    let mut prefix_encoder = Encoder::new(ConstantModel(0.3), 24, context_window).unwrap();
    for &bit in &common_prefix {
        prefix_encoder.encode_bit(bit).unwrap();
    }
    let prefix_output = prefix_encoder.emitted_so_far().to_vec();

    let encoded_a = encode(&seq_a, ConstantModel(0.3), 24, context_window).unwrap();
    let encoded_b = encode(&seq_b, ConstantModel(0.3), 24, context_window).unwrap();

    assert!(encoded_a.starts_with(&prefix_output));
    assert!(encoded_b.starts_with(&prefix_output));
}

// --- context-dependent model ---------------------------------------------

#[test]
fn round_trips_with_context_dependent_model() {
    use crate::model::ContextFrequencyModel;

    let bits = bernoulli_sequence(5000, 0.35, 13);
    let encoded = encode(&bits, ContextFrequencyModel, 32, 12).unwrap();
    let decoded = decode(&encoded, ContextFrequencyModel, bits.len(), 32, 12).unwrap();
    assert_eq!(decoded, bits);
}

#[test]
fn zero_width_context_window_is_supported() {
    let bits = bernoulli_sequence(2000, 0.25, 14);
    assert_eq!(round_trip(&bits, 0.25, 24, 0), bits);
}
