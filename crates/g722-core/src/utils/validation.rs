//! Call-boundary validation for codec operations
//!
//! Every check here runs before any codec state is modified.

use crate::error::{CodecError, Result};
use crate::types::SampleRateMode;

/// Validate that a PCM buffer holds whole codes for the sampling mode
pub fn validate_pcm_length(samples: usize, mode: SampleRateMode) -> Result<()> {
    let per_code = mode.samples_per_code();
    if samples % per_code != 0 {
        return Err(CodecError::length_mismatch(format!(
            "{} samples is not a whole number of {}-sample codes at {}",
            samples, per_code, mode
        )));
    }
    Ok(())
}

/// Validate that an output buffer can hold `needed` elements
pub fn validate_output_capacity(needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(CodecError::BufferTooSmall { needed, actual });
    }
    Ok(())
}

/// Validate frame size against the configured size
pub fn validate_frame_size(expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(CodecError::InvalidFrameSize { expected, actual });
    }
    Ok(())
}
