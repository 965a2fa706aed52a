//! G.722 command line encoder/decoder
//!
//! Converts raw little-endian 16-bit PCM to a raw G.722 stream and back.

use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use g722_core::{G722Bitrate, G722Decoder, G722Encoder, G722Options};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// G.722 wideband codec tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode raw 16-bit PCM into G.722
    Encode(StreamArgs),
    /// Decode G.722 into raw 16-bit PCM
    Decode(StreamArgs),
}

#[derive(Args, Debug)]
struct StreamArgs {
    /// Input file (raw 16-bit PCM for encode, G.722 for decode)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Bitrate in bits per second (48000, 56000 or 64000)
    #[arg(short, long, default_value_t = 64000)]
    bitrate: u32,

    /// Concatenate sub-8-bit codes across bytes
    #[arg(long)]
    packed: bool,

    /// PCM is sampled at 8 kHz instead of 16 kHz
    #[arg(long)]
    eight_k: bool,

    /// Print statistics
    #[arg(short, long)]
    stats: bool,
}

impl StreamArgs {
    fn codec_params(&self) -> Result<(G722Bitrate, G722Options)> {
        let bitrate = G722Bitrate::from_bps(self.bitrate)?;
        let options = G722Options {
            eight_k: self.eight_k,
            packed: self.packed,
        };
        Ok((bitrate, options))
    }
}

fn read_file(path: &PathBuf) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut data))
        .with_context(|| format!("failed to read {}", path.display()))?;
    info!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

fn write_file(path: &PathBuf, data: &[u8]) -> Result<()> {
    File::create(path)
        .and_then(|mut file| file.write_all(data))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn encode(args: &StreamArgs) -> Result<Vec<u8>> {
    let (bitrate, options) = args.codec_params()?;
    let mut input = read_file(&args.input)?;

    // Whole samples, and whole sample pairs at 16 kHz
    let unit = if options.eight_k { 2 } else { 4 };
    if input.len() % unit != 0 {
        warn!("Input size is not a multiple of {} bytes, truncating", unit);
        input.truncate(input.len() - input.len() % unit);
    }

    let pcm: Vec<i16> = input
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();

    let mut encoder = G722Encoder::new(bitrate, options);
    let mut coded = encoder.encode_to_vec(&pcm)?;
    let mut tail = [0u8; 1];
    let flushed = encoder.flush(&mut tail)?;
    coded.extend_from_slice(&tail[..flushed]);
    Ok(coded)
}

fn decode(args: &StreamArgs) -> Result<Vec<u8>> {
    let (bitrate, options) = args.codec_params()?;
    let input = read_file(&args.input)?;

    let mut decoder = G722Decoder::new(bitrate, options);
    let pcm = decoder.decode_to_vec(&input)?;
    Ok(pcm.iter().flat_map(|s| s.to_le_bytes()).collect())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let (args, encoding) = match &cli.command {
        Command::Encode(args) => (args, true),
        Command::Decode(args) => (args, false),
    };

    let start_time = Instant::now();
    let output = if encoding { encode(args)? } else { decode(args)? };
    let elapsed = start_time.elapsed();

    write_file(&args.output, &output)?;

    if args.stats {
        let input_len = std::fs::metadata(&args.input)?.len() as f64;
        println!("Statistics:");
        println!("  Processing time: {:.2?}", elapsed);
        println!("  Input size: {} bytes", input_len);
        println!("  Output size: {} bytes", output.len());
        if !output.is_empty() {
            println!("  Size ratio: {:.2}", input_len / output.len() as f64);
        }
        let throughput = input_len / elapsed.as_secs_f64().max(1e-9) / 1_000_000.0;
        println!("  Throughput: {:.2} MB/s", throughput);
    }

    Ok(())
}
