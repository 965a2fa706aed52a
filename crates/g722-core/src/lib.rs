//! # G722-Core: G.722 Wideband Audio Codec
//!
//! A fixed-point implementation of ITU-T G.722 sub-band ADPCM for VoIP
//! applications. 16 kHz linear PCM is split into two sub-bands by a QMF,
//! each band is coded with its own adaptive quantizer and predictor, and the
//! codes are emitted at 64, 56 or 48 kbit/s.
//!
//! ## Features
//!
//! - **All three rates**: 8, 7 or 6 bits per sample pair
//! - **Packed wire format**: sub-8-bit codes concatenated across octets
//! - **8 kHz mode**: narrowband PCM in and out, QMF bypassed
//! - **Value-type state**: every stream owns a fixed-size state, no globals,
//!   no allocation in the stream API
//!
//! ## Usage
//!
//! ```rust
//! use g722_core::{AudioCodec, CodecConfig};
//! use g722_core::codecs::g722::G722Codec;
//!
//! // 64 kbit/s, 20 ms frames at 16 kHz
//! let config = CodecConfig::g722();
//! let mut codec = G722Codec::new(config)?;
//!
//! let samples = vec![0i16; 320];
//! let encoded = codec.encode(&samples)?;
//! let decoded = codec.decode(&encoded)?;
//! assert_eq!(decoded.len(), samples.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! For streaming over caller-owned buffers use [`codecs::g722::open`],
//! [`codecs::g722::encode`] and [`codecs::g722::decode`] directly.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codecs;
pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use codecs::g722::{G722Codec, G722Decoder, G722Encoder, G722State};
pub use error::{CodecError, ErrorCategory, Result};
pub use types::{
    AudioCodec, AudioCodecExt, CodecConfig, CodecInfo, G722Bitrate, G722Options, SampleRateMode,
};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported codec names
pub const SUPPORTED_CODECS: &[&str] = &["G722"];

/// Initialize the codec library
///
/// Installs a default `tracing` subscriber if none is set. Safe to call
/// multiple times.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps room for future setup steps.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    tracing::info!("G722-Core v{} initialized", VERSION);
    tracing::info!("Supported bitrates: {:?}", G722Bitrate::SUPPORTED);

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        supported_codecs: SUPPORTED_CODECS.to_vec(),
        supported_bitrates: G722Bitrate::SUPPORTED.to_vec(),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// List of supported codec names
    pub supported_codecs: Vec<&'static str>,
    /// Supported bitrates in bits per second
    pub supported_bitrates: Vec<u32>,
}
