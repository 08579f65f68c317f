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

mod model_choice;

use self::model_choice::ModelChoice;
use anyhow::Context;
use bin_arith_coder::bit_buffer::bit_iter::BitIterator;
use bin_arith_coder::bit_buffer::BitBuffer;
use bin_arith_coder::bytes;
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, IsTerminal, Read, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compresses a file/piped data using context-adaptive arithmetic coding
    Compress(CodecArgs),
    /// Decompresses a stream previously produced by `compress`
    Decompress(CodecArgs),
    /// Demonstrates encoding and decoding a synthetic Bernoulli sequence
    Demo(DemoArgs),
}

/// CLI arguments shared by compression and decompression
#[derive(Args)]
pub struct CodecArgs {
    /// Path to the file that will be read. If not specified, input must be piped in
    file: Option<PathBuf>,

    /// Number of fractional bits used for the interval arithmetic
    #[arg(long, default_value_t = 32)]
    precision: u32,

    /// Number of preceding bits fed to the probability model as context
    #[arg(long, default_value_t = 10)]
    context_window: usize,

    /// Probability model: `constant:<p>` or `context-freq`
    #[arg(long, default_value = "constant:0.5")]
    model: ModelChoice,
}

/// CLI arguments for the `demo` subcommand
#[derive(Args)]
pub struct DemoArgs {
    /// Number of bits to generate for the demonstration sequence
    #[arg(long, default_value_t = 10_000)]
    length: usize,

    /// Bernoulli parameter used to both generate and model the sequence
    #[arg(long, default_value_t = 0.2)]
    p: f64,

    /// Number of fractional bits used for the interval arithmetic
    #[arg(long, default_value_t = 32)]
    precision: u32,

    /// Number of preceding bits fed to the probability model as context
    #[arg(long, default_value_t = 10)]
    context_window: usize,

    /// Seed for the demonstration sequence's deterministic PRNG
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

/// When trying to read input to compress/decompress, the following errors may occur
#[derive(Debug, Error)]
pub enum InputFileError {
    #[error("No path to an input file was provided, nor was it piped into the command")]
    MissingInputFile,
    #[error("Failed to read the provided input file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Reads all bytes from the chosen source, either stdin or a file path.
fn read_input_bytes(file: Option<&PathBuf>) -> Result<Vec<u8>, InputFileError> {
    let mut buf = Vec::new();
    match file {
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(InputFileError::MissingInputFile);
            }
            BufReader::new(stdin.lock()).read_to_end(&mut buf)?;
        }
        Some(path) => {
            BufReader::new(File::open(path)?).read_to_end(&mut buf)?;
        }
    }
    Ok(buf)
}

/// The on-disk framing this CLI wraps around the coder's core bit-level
/// output: the decoder needs to know exactly how many bits were encoded and
/// how many bits the original sequence had, neither of which the arithmetic
/// code itself carries — both are explicit arguments to `decode`.
fn write_header<W: Write>(mut out: W, sequence_length: u64, bit_length: u64) -> std::io::Result<()> {
    out.write_all(&sequence_length.to_le_bytes())?;
    out.write_all(&bit_length.to_le_bytes())
}

fn read_header<R: Read>(mut input: R) -> std::io::Result<(u64, u64)> {
    let mut sequence_length_buf = [0u8; 8];
    let mut bit_length_buf = [0u8; 8];
    input.read_exact(&mut sequence_length_buf)?;
    input.read_exact(&mut bit_length_buf)?;
    Ok((
        u64::from_le_bytes(sequence_length_buf),
        u64::from_le_bytes(bit_length_buf),
    ))
}

fn run_compress(args: &CodecArgs) -> anyhow::Result<()> {
    let input = read_input_bytes(args.file.as_ref())?;
    let bits: Vec<bool> = BitIterator::from(input.iter().copied()).collect();
    info!("Compressing {} input bits", bits.len());

    let model = args.model.build();
    let encoded = bytes::encode_bytes(&bits, model, args.precision, args.context_window)?;
    let bit_length = (encoded.len() as u64) * 8;
    debug!("Encoded to {} bytes ({} bits)", encoded.len(), bit_length);

    let stdout = std::io::stdout();
    let mut handle = std::io::BufWriter::new(stdout.lock());
    write_header(&mut handle, bits.len() as u64, bit_length)?;
    handle.write_all(&encoded)?;
    handle.flush()?;
    Ok(())
}

fn run_decompress(args: &CodecArgs) -> anyhow::Result<()> {
    let input = read_input_bytes(args.file.as_ref())?;
    let mut cursor = input.as_slice();
    let (sequence_length, bit_length) =
        read_header(&mut cursor).context("input is too short to contain a valid header")?;

    let model = args.model.build();
    let decoded_bits = bytes::decode_bytes(
        cursor,
        bit_length as usize,
        model,
        sequence_length as usize,
        args.precision,
        args.context_window,
    )?;

    let mut buffer = BitBuffer::new();
    for bit in decoded_bits {
        buffer.append(bit);
    }
    let decoded_bytes: Vec<u8> = buffer.get_complete_bytes().collect();

    let stdout = std::io::stdout();
    let mut handle = std::io::BufWriter::new(stdout.lock());
    handle.write_all(&decoded_bytes)?;
    handle.flush()?;
    Ok(())
}

/// A small deterministic xorshift64 generator, used so the demo's "random"
/// Bernoulli sequence is reproducible across runs given the same seed.
struct Xorshift64(u64);

impl Xorshift64 {
    fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn run_demo(args: &DemoArgs) -> anyhow::Result<()> {
    let mut rng = Xorshift64::new(args.seed);
    let bit_sequence: Vec<bool> = (0..args.length).map(|_| rng.next_f64() < args.p).collect();

    let p = args.p;
    let model = move |_: &[bool]| p;

    let encoded = bin_arith_coder::encode(&bit_sequence, model, args.precision, args.context_window)?;
    let decoded = bin_arith_coder::decode(
        &encoded,
        model,
        bit_sequence.len(),
        args.precision,
        args.context_window,
    )?;

    let original_size = bit_sequence.len();
    let encoded_size = encoded.len();
    let compression_rate = if original_size > 0 {
        encoded_size as f64 / original_size as f64
    } else {
        f64::INFINITY
    };

    let differences: Vec<(usize, bool, bool)> = bit_sequence
        .iter()
        .zip(decoded.iter())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, (&a, &b))| (i, a, b))
        .take(10)
        .collect();

    println!("compression_rate: {compression_rate:.4}");
    println!("match: {}", differences.is_empty() && bit_sequence.len() == decoded.len());
    println!("first_10_differences: {differences:?}");
    Ok(())
}

/// Runs the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.commands {
        Commands::Compress(args) => run_compress(&args),
        Commands::Decompress(args) => run_decompress(&args),
        Commands::Demo(args) => run_demo(&args),
    }
}
