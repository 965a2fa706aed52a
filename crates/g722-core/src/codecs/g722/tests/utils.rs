//! G.722 Test Utilities
//!
//! Signal generators, full-stream helpers and a delay-compensated SNR
//! measurement.

use crate::codecs::g722::{decode, encode, encoded_len, flush, open, G722State};
use crate::types::{G722Bitrate, G722Options};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Round-trip delay of the two QMF banks, in 16 kHz samples
pub const CODEC_DELAY: usize = 22;

/// One sinusoidal component: amplitude, frequency in Hz, phase in radians
pub type Tone = (f64, f64, f64);

/// Three tones spread across both sub-bands
pub const MULTI_TONE: [Tone; 3] = [(3000.0, 300.0, 0.0), (2000.0, 1200.0, 1.0), (800.0, 2500.0, 0.0)];

/// Sum of sinusoids, truncated to 16-bit
pub fn tones(parts: &[Tone], len: usize, sample_rate: f64) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let t = i as f64 / sample_rate;
            let v: f64 = parts
                .iter()
                .map(|&(amp, freq, phase)| amp * (2.0 * PI * freq * t + phase).sin())
                .sum();
            v as i16
        })
        .collect()
}

/// Single sine wave at 16 kHz
pub fn sine(freq: f64, amplitude: f64, len: usize) -> Vec<i16> {
    tones(&[(amplitude, freq, 0.0)], len, 16000.0)
}

/// Uniform white noise with a fixed seed
pub fn noise(len: usize, amplitude: i16, seed: u64) -> Vec<i16> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-amplitude..=amplitude)).collect()
}

/// Encode a whole signal on a fresh stream, flushing any packed remainder
pub fn encode_stream(bitrate: G722Bitrate, options: G722Options, pcm: &[i16]) -> (Vec<u8>, G722State) {
    let mut state = open(bitrate, options);
    let mut out = vec![0u8; encoded_len(&state, pcm.len()) + 1];
    let mut written = encode(&mut state, pcm, &mut out).unwrap();
    written += flush(&mut state, &mut out[written..]).unwrap();
    out.truncate(written);
    (out, state)
}

/// Decode a whole stream on a fresh decoder
pub fn decode_stream(bitrate: G722Bitrate, options: G722Options, data: &[u8]) -> (Vec<i16>, G722State) {
    let mut state = open(bitrate, options);
    let mut out = vec![0i16; data.len() * 2 * 8];
    let written = decode(&mut state, data, &mut out).unwrap();
    out.truncate(written);
    (out, state)
}

/// Encode then decode on fresh states
pub fn round_trip(bitrate: G722Bitrate, options: G722Options, pcm: &[i16]) -> Vec<i16> {
    let (coded, _) = encode_stream(bitrate, options, pcm);
    decode_stream(bitrate, options, &coded).0
}

/// Best SNR in dB over lags `0..=max_lag`, ignoring the first `skip` samples
///
/// Returns the SNR together with the lag that produced it.
pub fn snr_db(reference: &[i16], decoded: &[i16], max_lag: usize, skip: usize) -> (f64, usize) {
    let mut best = (f64::NEG_INFINITY, 0);
    for lag in 0..=max_lag {
        let mut signal = 0f64;
        let mut error = 0f64;
        let end = reference.len().min(decoded.len().saturating_sub(lag));
        for i in skip..end {
            let r = reference[i] as f64;
            let d = r - decoded[i + lag] as f64;
            signal += r * r;
            error += d * d;
        }
        let snr = if error == 0.0 {
            f64::INFINITY
        } else {
            10.0 * (signal / error).log10()
        };
        if snr > best.0 {
            best = (snr, lag);
        }
    }
    best
}

/// Options for unpacked 16 kHz operation
pub fn wideband() -> G722Options {
    G722Options::default()
}

/// Options for packed 16 kHz operation
pub fn packed() -> G722Options {
    G722Options {
        packed: true,
        ..G722Options::default()
    }
}

/// Options for unpacked 8 kHz operation
pub fn narrowband() -> G722Options {
    G722Options {
        eight_k: true,
        ..G722Options::default()
    }
}
