//! Core types and traits for the codec library
//!
//! This module defines the frame-oriented codec traits, the G.722 operating
//! parameters (bitrate, sample-rate mode, wire options) and the
//! configuration builder used to create a [`crate::codecs::g722::G722Codec`].

use crate::error::{CodecError, Result};
use std::fmt;
use tracing::debug;

/// Primary trait for audio codecs
///
/// This trait defines the core operations a frame-based codec implements:
/// encoding, decoding, and state management.
pub trait AudioCodec: Send + Sync {
    /// Encode one frame of audio samples
    ///
    /// # Arguments
    ///
    /// * `samples` - Input audio samples as 16-bit PCM
    ///
    /// # Errors
    ///
    /// Returns an error if the frame does not match the configured frame size
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>>;

    /// Decode one frame of compressed data
    ///
    /// # Errors
    ///
    /// Returns an error if the payload does not hold a whole frame
    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>>;

    /// Get codec information
    fn info(&self) -> CodecInfo;

    /// Reset codec state
    ///
    /// This clears all internal state and prepares the codec for fresh input.
    /// Useful for handling stream discontinuities.
    fn reset(&mut self) -> Result<()>;

    /// Get the expected frame size in samples
    fn frame_size(&self) -> usize;
}

/// Extended trait for codecs with caller-owned buffers
pub trait AudioCodecExt: AudioCodec {
    /// Encode into a pre-allocated output buffer
    ///
    /// Returns the number of bytes written.
    fn encode_to_buffer(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize>;

    /// Decode into a pre-allocated output buffer
    ///
    /// Returns the number of samples written.
    fn decode_to_buffer(&mut self, data: &[u8], output: &mut [i16]) -> Result<usize>;

    /// Get maximum encoded size for a given input size
    fn max_encoded_size(&self, input_samples: usize) -> usize;

    /// Get maximum decoded size for a given input size
    fn max_decoded_size(&self, input_bytes: usize) -> usize;
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name
    pub name: &'static str,
    /// Audio sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u8,
    /// Bitrate in bits per second
    pub bitrate: u32,
    /// Frame size in samples
    pub frame_size: usize,
    /// RTP payload type (if standard)
    pub payload_type: Option<u8>,
    /// RTP timestamp clock rate advertised in SDP
    ///
    /// G.722 is signalled with an 8000 Hz clock regardless of its audio rate.
    pub rtp_clock_rate: u32,
}

/// G.722 bitrates, one per low-band code width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum G722Bitrate {
    /// 48 kbit/s, 6 bits per code
    Rate48000,
    /// 56 kbit/s, 7 bits per code
    Rate56000,
    /// 64 kbit/s, 8 bits per code
    Rate64000,
}

impl G722Bitrate {
    /// Bitrates accepted by [`G722Bitrate::from_bps`]
    pub const SUPPORTED: [u32; 3] = [48000, 56000, 64000];

    /// Create from a bitrate in bits per second
    pub fn from_bps(bitrate: u32) -> Result<Self> {
        match bitrate {
            48000 => Ok(Self::Rate48000),
            56000 => Ok(Self::Rate56000),
            64000 => Ok(Self::Rate64000),
            _ => Err(CodecError::InvalidBitrate {
                bitrate,
                supported: Self::SUPPORTED.to_vec(),
            }),
        }
    }

    /// Create from the number of bits carried per code
    pub fn from_bits_per_sample(bits: u8) -> Result<Self> {
        match bits {
            6 => Ok(Self::Rate48000),
            7 => Ok(Self::Rate56000),
            8 => Ok(Self::Rate64000),
            _ => Err(CodecError::InvalidBitsPerSample { bits }),
        }
    }

    /// Bitrate in bits per second
    pub fn bps(self) -> u32 {
        match self {
            Self::Rate48000 => 48000,
            Self::Rate56000 => 56000,
            Self::Rate64000 => 64000,
        }
    }

    /// Bits carried by each code (low-band bits plus two high-band bits)
    pub fn bits_per_sample(self) -> u8 {
        match self {
            Self::Rate48000 => 6,
            Self::Rate56000 => 7,
            Self::Rate64000 => 8,
        }
    }

    /// Low-band bits that survive truncation at this rate
    pub fn low_band_bits(self) -> u8 {
        self.bits_per_sample() - 2
    }
}

impl Default for G722Bitrate {
    fn default() -> Self {
        Self::Rate64000
    }
}

impl fmt::Display for G722Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.bps())
    }
}

/// Audio sampling mode of a G.722 stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRateMode {
    /// Narrowband: 8 kHz PCM, QMF bypassed, one sample per code
    EightK,
    /// Wideband: 16 kHz PCM, one sample pair per code
    SixteenK,
}

impl SampleRateMode {
    /// PCM sample rate in Hz
    pub fn hz(self) -> u32 {
        match self {
            Self::EightK => 8000,
            Self::SixteenK => 16000,
        }
    }

    /// PCM samples consumed per code
    pub fn samples_per_code(self) -> usize {
        match self {
            Self::EightK => 1,
            Self::SixteenK => 2,
        }
    }
}

impl fmt::Display for SampleRateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.hz())
    }
}

/// Options passed to [`crate::codecs::g722::open`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct G722Options {
    /// Process 8 kHz PCM, bypassing the QMF
    pub eight_k: bool,
    /// Concatenate sub-8-bit codes across byte boundaries
    pub packed: bool,
}

impl G722Options {
    /// Sampling mode selected by these options
    pub fn mode(&self) -> SampleRateMode {
        if self.eight_k {
            SampleRateMode::EightK
        } else {
            SampleRateMode::SixteenK
        }
    }
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CodecConfig {
    /// PCM sample rate in Hz (8000 or 16000)
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u8,
    /// Bitrate in bits per second
    pub bitrate: u32,
    /// Frame size in milliseconds
    pub frame_size_ms: f32,
    /// Packed wire format for 48/56 kbit/s
    pub packed: bool,
}

impl CodecConfig {
    /// Default frame duration in milliseconds
    pub const DEFAULT_FRAME_MS: f32 = 20.0;

    /// Codes per millisecond, independent of the sampling mode
    const CODES_PER_MS: f32 = 8.0;

    /// Create the default G.722 configuration: 16 kHz, 64 kbit/s, 20 ms
    pub fn g722() -> Self {
        Self {
            sample_rate: SampleRateMode::SixteenK.hz(),
            channels: 1,
            bitrate: G722Bitrate::default().bps(),
            frame_size_ms: Self::DEFAULT_FRAME_MS,
            packed: false,
        }
    }

    /// Set sample rate
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Select 8 kHz (`true`) or 16 kHz (`false`) operation
    pub fn with_eight_k(mut self, eight_k: bool) -> Self {
        self.sample_rate = if eight_k {
            SampleRateMode::EightK.hz()
        } else {
            SampleRateMode::SixteenK.hz()
        };
        self
    }

    /// Set channel count
    pub fn with_channels(mut self, channels: u8) -> Self {
        self.channels = channels;
        self
    }

    /// Set bitrate
    pub fn with_bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = bitrate;
        self
    }

    /// Request the packed wire format
    pub fn with_packed(mut self, packed: bool) -> Self {
        self.packed = packed;
        self
    }

    /// Set frame size in milliseconds
    pub fn with_frame_size_ms(mut self, frame_size_ms: f32) -> Self {
        self.frame_size_ms = frame_size_ms;
        self
    }

    /// Validated bitrate
    pub fn g722_bitrate(&self) -> Result<G722Bitrate> {
        G722Bitrate::from_bps(self.bitrate)
    }

    /// Sampling mode for the configured sample rate
    pub fn mode(&self) -> Result<SampleRateMode> {
        match self.sample_rate {
            8000 => Ok(SampleRateMode::EightK),
            16000 => Ok(SampleRateMode::SixteenK),
            rate => Err(CodecError::InvalidSampleRate {
                rate,
                supported: vec![8000, 16000],
            }),
        }
    }

    /// Options for [`crate::codecs::g722::open`]
    pub fn options(&self) -> G722Options {
        G722Options {
            eight_k: self.sample_rate == SampleRateMode::EightK.hz(),
            packed: self.packed,
        }
    }

    /// Number of codes in one frame
    pub fn codes_per_frame(&self) -> Result<usize> {
        let codes = self.frame_size_ms * Self::CODES_PER_MS;
        if !codes.is_finite() || codes < 1.0 || (codes - codes.round()).abs() > 1e-3 {
            return Err(CodecError::invalid_config(format!(
                "frame size {}ms is not a positive multiple of 0.125ms",
                self.frame_size_ms
            )));
        }
        Ok(codes.round() as usize)
    }

    /// Frame size in PCM samples
    pub fn frame_size(&self) -> Result<usize> {
        Ok(self.codes_per_frame()? * self.mode()?.samples_per_code())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let bitrate = self.g722_bitrate()?;
        self.mode()?;

        if self.channels != 1 {
            return Err(CodecError::InvalidChannelCount {
                channels: self.channels,
                supported: vec![1],
            });
        }

        let codes = self.codes_per_frame()?;
        let bits = bitrate.bits_per_sample() as usize;
        if self.packed && (codes * bits) % 8 != 0 {
            return Err(CodecError::invalid_config(format!(
                "packed frame of {} codes at {} bits does not fill whole octets",
                codes, bits
            )));
        }

        debug!(
            "Validated G.722 config: {}Hz, {}, {}ms frames, packed={}",
            self.sample_rate, bitrate, self.frame_size_ms, self.packed
        );
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::g722()
    }
}
