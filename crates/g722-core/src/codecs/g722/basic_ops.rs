//! G.722 Basic Operations
//!
//! Fixed-point helpers shared by the QMF and ADPCM blocks. Intermediate
//! results are carried in 32 bits and clamped back to the 16-bit range
//! (saturation, never wraparound), as ITU-T G.722 requires.

/// Largest value representable in the 16-bit signal domain
pub const MAX_16: i32 = i16::MAX as i32;

/// Smallest value representable in the 16-bit signal domain
pub const MIN_16: i32 = i16::MIN as i32;

/// Upper limit of a reconstructed sub-band sample (15-bit domain)
pub const SUB_BAND_MAX: i32 = 16383;

/// Lower limit of a reconstructed sub-band sample (15-bit domain)
pub const SUB_BAND_MIN: i32 = -16384;

/// Saturate a 32-bit intermediate to the 16-bit range
#[inline]
pub fn saturate(value: i32) -> i16 {
    value.clamp(MIN_16, MAX_16) as i16
}

/// 16-bit addition with saturation
#[inline]
pub fn sat_add16(a: i16, b: i16) -> i16 {
    saturate(a as i32 + b as i32)
}

/// 16-bit subtraction with saturation
#[inline]
pub fn sat_sub16(a: i16, b: i16) -> i16 {
    saturate(a as i32 - b as i32)
}

/// Left shift with saturation to the 16-bit range
///
/// Shifts of 16 or more saturate any non-zero input.
#[inline]
pub fn sat_shift_left(value: i16, shift: u32) -> i16 {
    if value == 0 {
        return 0;
    }
    let shifted = (value as i64) << shift.min(17);
    shifted.clamp(MIN_16 as i64, MAX_16 as i64) as i16
}

/// Clamp a reconstructed sub-band sample to `[-16384, 16383]`
#[inline]
pub fn limit_sub_band(value: i32) -> i16 {
    value.clamp(SUB_BAND_MIN, SUB_BAND_MAX) as i16
}

/// Sign of a 16-bit value as used by the predictor adaptation: 0 or -1
#[inline]
pub fn sign_of(value: i16) -> i32 {
    (value as i32) >> 15
}

/// One's-complement magnitude: `x` for `x >= 0`, `-(x + 1)` otherwise
#[inline]
pub fn ones_complement_magnitude(value: i16) -> i32 {
    let value = value as i32;
    if value >= 0 {
        value
    } else {
        -(value + 1)
    }
}
