//! G.722 Wideband Audio Codec Implementation
//!
//! Sub-band ADPCM coding of 16 kHz audio at 48, 56 or 64 kbit/s, per
//! ITU-T Recommendation G.722.
//!
//! # Architecture
//!
//! - `codec`: stream operations and the encoder/decoder/frame wrappers
//! - `qmf`: QMF analysis and synthesis filters
//! - `adpcm`: per-band quantization and predictor adaptation
//! - `bitpack`: code composition and the packed wire format
//! - `basic_ops`: saturating fixed-point helpers
//! - `tables`: quantization tables and constants
//! - `state`: state structures
//!
//! # Example
//!
//! ```
//! use g722_core::codecs::g722::{decode, encode, open};
//! use g722_core::{G722Bitrate, G722Options};
//!
//! let mut encoder = open(G722Bitrate::Rate64000, G722Options::default());
//! let mut decoder = open(G722Bitrate::Rate64000, G722Options::default());
//!
//! let pcm = [0i16, 1000, -1000, 5000, -5000, 16000, -16000, 0];
//! let mut coded = [0u8; 4];
//! let bytes = encode(&mut encoder, &pcm, &mut coded)?;
//!
//! let mut out = [0i16; 8];
//! let samples = decode(&mut decoder, &coded[..bytes], &mut out)?;
//! assert_eq!(samples, 8);
//! assert_eq!(encoder.low, decoder.low);
//! # Ok::<(), g722_core::CodecError>(())
//! ```

pub mod adpcm;
pub mod basic_ops;
pub mod bitpack;
pub mod codec;
pub mod qmf;
pub mod state;
pub mod tables;

#[cfg(test)]
mod tests;

pub use codec::{
    close, decode, decoded_len, encode, encoded_len, flush, open, G722Codec, G722Decoder,
    G722Encoder,
};
pub use state::{BandKind, BandState, G722State, QmfState};
