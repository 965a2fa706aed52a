//! G.722 QMF (Quadrature Mirror Filter) Implementation
//!
//! The 24-tap QMF is evaluated in polyphase form: each branch is a 12-tap
//! circular delay line convolved with the coefficient table, forward or
//! reversed.

use super::basic_ops::saturate;
use super::state::QmfState;
use super::tables::{QMF_COEFFS_FWD, QMF_COEFFS_REV, QMF_TAPS};

/// Shift removing the analysis filter gain
const ANALYSIS_SHIFT: u32 = 14;

/// Shift removing the synthesis filter gain
const SYNTHESIS_SHIFT: u32 = 11;

/// Circular dot product `Σ buf[(pos + i) mod 12] * taps[i]`
///
/// With `pos` pointing at the oldest entry this pairs the oldest sample with
/// `taps[0]`.
#[inline]
pub fn circular_dot(buf: &[i16; QMF_TAPS], taps: &[i16; QMF_TAPS], pos: usize) -> i32 {
    let (newer, older) = buf.split_at(pos);
    older
        .iter()
        .chain(newer.iter())
        .zip(taps.iter())
        .map(|(&x, &t)| x as i32 * t as i32)
        .sum()
}

/// QMF analysis filter (encoder)
///
/// Consumes one even and one odd wideband sample and returns the low-band
/// and high-band samples `(xlow, xhigh)`.
pub fn analysis(qmf: &mut QmfState, even: i16, odd: i16) -> (i16, i16) {
    qmf.even_samples[qmf.position] = even;
    qmf.odd_samples[qmf.position] = odd;
    qmf.position = (qmf.position + 1) % QMF_TAPS;

    let even_sum = circular_dot(&qmf.even_samples, &QMF_COEFFS_FWD, qmf.position);
    let odd_sum = circular_dot(&qmf.odd_samples, &QMF_COEFFS_REV, qmf.position);

    let xlow = saturate((odd_sum + even_sum) >> ANALYSIS_SHIFT);
    let xhigh = saturate((odd_sum - even_sum) >> ANALYSIS_SHIFT);
    (xlow, xhigh)
}

/// QMF synthesis filter (decoder)
///
/// Takes one reconstructed low-band and high-band sample and returns two
/// wideband output samples.
pub fn synthesis(qmf: &mut QmfState, rlow: i16, rhigh: i16) -> [i16; 2] {
    // Sub-band samples are limited to 15 bits, so neither sum nor difference overflows
    qmf.even_samples[qmf.position] = saturate(rlow as i32 + rhigh as i32);
    qmf.odd_samples[qmf.position] = saturate(rlow as i32 - rhigh as i32);
    qmf.position = (qmf.position + 1) % QMF_TAPS;

    let first = circular_dot(&qmf.odd_samples, &QMF_COEFFS_REV, qmf.position);
    let second = circular_dot(&qmf.even_samples, &QMF_COEFFS_FWD, qmf.position);

    [
        saturate(first >> SYNTHESIS_SHIFT),
        saturate(second >> SYNTHESIS_SHIFT),
    ]
}
