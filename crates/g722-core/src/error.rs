//! Error handling for the G.722 codec
//!
//! All errors are detected at the call boundary, before any codec state is
//! touched, so a failed call leaves the stream exactly as it was.

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Bits per sample outside {6, 7, 8}
    #[error("Invalid bits per sample: {bits} (supported: 6, 7, 8)")]
    InvalidBitsPerSample { bits: u8 },

    /// Bitrate outside {48000, 56000, 64000}
    #[error("Invalid bitrate: {bitrate}bps (supported: {supported:?})")]
    InvalidBitrate { bitrate: u32, supported: Vec<u32> },

    /// Input length inconsistent with the sample/code ratio
    #[error("Buffer length mismatch: {details}")]
    BufferLengthMismatch { details: String },

    /// Output buffer too small for operation
    #[error("Buffer too small: need {needed}, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Frame does not match the configured frame size
    #[error("Invalid frame size: expected {expected}, got {actual}")]
    InvalidFrameSize { expected: usize, actual: usize },

    /// Invalid codec configuration
    #[error("Invalid codec configuration: {details}")]
    InvalidConfig { details: String },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}Hz (supported: {supported:?})")]
    InvalidSampleRate { rate: u32, supported: Vec<u32> },

    /// Invalid channel count
    #[error("Invalid channel count: {channels} (supported: {supported:?})")]
    InvalidChannelCount { channels: u8, supported: Vec<u8> },

}

impl CodecError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new buffer length mismatch error
    pub fn length_mismatch(details: impl Into<String>) -> Self {
        Self::BufferLengthMismatch {
            details: details.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// Recoverable errors can succeed on a later call with different buffers
    /// against the same stream; configuration errors cannot.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidBitsPerSample { .. }
            | Self::InvalidBitrate { .. }
            | Self::InvalidConfig { .. }
            | Self::InvalidSampleRate { .. }
            | Self::InvalidChannelCount { .. } => false,

            Self::BufferLengthMismatch { .. }
            | Self::BufferTooSmall { .. }
            | Self::InvalidFrameSize { .. } => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidBitsPerSample { .. }
            | Self::InvalidBitrate { .. }
            | Self::InvalidConfig { .. }
            | Self::InvalidSampleRate { .. }
            | Self::InvalidChannelCount { .. } => ErrorCategory::Configuration,

            Self::BufferLengthMismatch { .. } | Self::InvalidFrameSize { .. } => {
                ErrorCategory::Processing
            }

            Self::BufferTooSmall { .. } => ErrorCategory::Memory,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and parameter errors
    Configuration,
    /// Audio processing errors
    Processing,
    /// Buffer sizing errors
    Memory,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Processing => write!(f, "Processing"),
            Self::Memory => write!(f, "Memory"),
        }
    }
}
