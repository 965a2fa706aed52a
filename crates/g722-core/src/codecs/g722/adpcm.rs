//! G.722 ADPCM Implementation
//!
//! Sub-band ADPCM coders. Quantization differs per band, but both bands
//! share one adaptation routine ([`adapt`]) parameterized by [`BandKind`].
//! The encoder runs the same adaptation on the same quantized difference
//! the decoder will see, which keeps the two states in lockstep.

use super::basic_ops::{
    limit_sub_band, ones_complement_magnitude, sat_add16, sat_sub16, saturate, sign_of,
};
use super::state::BandState;
use super::tables::{
    COEFF_LEAK, IHN, IHP, ILB, ILN, ILP, LOG_SCALE_LEAK, POLE_A1_BOUND, POLE_A2_LEAK,
    POLE_A2_LIMIT, Q2, Q6, Q6_INTERVALS, QM2, QM4, QM5, QM6,
};
use crate::types::G722Bitrate;

/// Quantize one low-band sample (QUANTL) and adapt the band
///
/// Returns the 6-bit low-band code.
pub fn quantize_low(band: &mut BandState, xlow: i16) -> u8 {
    let el = sat_sub16(xlow, band.predicted_signal);
    let wd = ones_complement_magnitude(el);
    let det = band.quant_step as i32;

    let interval = (1..Q6_INTERVALS)
        .find(|&i| wd < (Q6[i] * det) >> 12)
        .unwrap_or(Q6_INTERVALS);
    let code = if el < 0 { ILN[interval] } else { ILP[interval] };

    // The adaptation path always uses the 4-bit truncation
    let index = (code >> 2) as usize;
    let dq = saturate((det * QM4[index]) >> 15);
    adapt(band, index, dq);
    code
}

/// Quantize one high-band sample (QUANTH) and adapt the band
///
/// Returns the 2-bit high-band code.
pub fn quantize_high(band: &mut BandState, xhigh: i16) -> u8 {
    let eh = sat_sub16(xhigh, band.predicted_signal);
    let wd = ones_complement_magnitude(eh);
    let det = band.quant_step as i32;

    let interval = if wd >= (Q2 * det) >> 12 { 2 } else { 1 };
    let code = if eh < 0 { IHN[interval] } else { IHP[interval] };

    let dq = saturate((det * QM2[code as usize]) >> 15);
    adapt(band, code as usize, dq);
    code
}

/// Reconstruct one low-band sample from its received code
///
/// `code` holds only the low-band bits that survive at `bitrate`. The
/// reconstruction uses the widest inverse quantizer available, while
/// adaptation uses the 4-bit one the encoder used.
pub fn dequantize_low(band: &mut BandState, code: u8, bitrate: G722Bitrate) -> i16 {
    let det = band.quant_step as i32;
    let (level, index) = match bitrate {
        G722Bitrate::Rate64000 => {
            let code = (code & 0x3f) as usize;
            (QM6[code], code >> 2)
        }
        G722Bitrate::Rate56000 => {
            let code = (code & 0x1f) as usize;
            (QM5[code], code >> 1)
        }
        G722Bitrate::Rate48000 => {
            let code = (code & 0x0f) as usize;
            (QM4[code], code)
        }
    };

    let recon = limit_sub_band(band.predicted_signal as i32 + ((det * level) >> 15));
    let dq = saturate((det * QM4[index]) >> 15);
    adapt(band, index, dq);
    recon
}

/// Reconstruct one high-band sample from its 2-bit code
pub fn dequantize_high(band: &mut BandState, code: u8) -> i16 {
    let code = (code & 0x03) as usize;
    let det = band.quant_step as i32;

    let dq = saturate((det * QM2[code]) >> 15);
    let recon = limit_sub_band(band.predicted_signal as i32 + dq as i32);
    adapt(band, code, dq);
    recon
}

/// Adapt a band after one quantized difference
///
/// `index` is the adaptation index (4-bit low-band code or 2-bit high-band
/// code) and `dq` the quantized difference both sides agree on.
pub fn adapt(band: &mut BandState, index: usize, dq: i16) {
    update_scale(band, index);
    update_predictor(band, dq);
}

/// LOGSCL/SCALEL (low) and LOGSCH/SCALEH (high)
fn update_scale(band: &mut BandState, index: usize) {
    let kind = band.kind;
    let nb = ((band.log_scale_accum * LOG_SCALE_LEAK) >> 7) + kind.scale_step(index);
    band.log_scale_accum = nb.clamp(0, kind.max_log_scale());

    let mantissa = ILB[((band.log_scale_accum >> 6) & 31) as usize];
    let shift = kind.scale_shift() - (band.log_scale_accum >> 11);
    let step = if shift < 0 {
        mantissa << -shift
    } else {
        mantissa >> shift
    };
    band.quant_step = saturate(step << 2);
}

/// Pole and zero predictor adaptation followed by the next prediction
fn update_predictor(band: &mut BandState, dq: i16) {
    let recon = sat_add16(band.predicted_signal, dq);
    let partial = sat_add16(band.partial_recon_zero, dq);

    let sg0 = sign_of(partial);
    let sg1 = sign_of(band.pole_history_partial[0]);
    let sg2 = sign_of(band.pole_history_partial[1]);
    let a1 = band.predictor_pole[0] as i32;
    let a2 = band.predictor_pole[1] as i32;

    // UPPOL2
    let wd1 = saturate(a1 << 2) as i32;
    let wd2 = (if sg0 == sg1 { -wd1 } else { wd1 }).min(32767);
    let wd3 = (if sg0 == sg2 { 128 } else { -128 }) + (wd2 >> 7) + ((a2 * POLE_A2_LEAK) >> 15);
    let new_a2 = wd3.clamp(-POLE_A2_LIMIT, POLE_A2_LIMIT);

    // UPPOL1
    let wd1 = if sg0 == sg1 { 192 } else { -192 };
    let limit = saturate(POLE_A1_BOUND - new_a2) as i32;
    let new_a1 = (saturate(wd1 + ((a1 * COEFF_LEAK) >> 15)) as i32).clamp(-limit, limit);

    // UPZERO
    let step = if dq == 0 { 0 } else { 128 };
    let dq_sign = sign_of(dq);
    let mut new_zero = [0i16; 6];
    for (i, coeff) in new_zero.iter_mut().enumerate() {
        let nudge = if sign_of(band.zero_history[i + 1]) == dq_sign {
            step
        } else {
            -step
        };
        *coeff = saturate(nudge + ((band.predictor_zero[i] as i32 * COEFF_LEAK) >> 15));
    }

    // DELAYA
    band.zero_history.copy_within(1..6, 2);
    band.zero_history[1] = dq;
    band.zero_history[0] = dq;
    band.pole_history_recon = [recon, band.pole_history_recon[0]];
    band.pole_history_partial = [partial, band.pole_history_partial[0]];
    band.predictor_pole = [new_a1 as i16, new_a2 as i16];
    band.predictor_zero = new_zero;

    // FILTEP
    let pole = band
        .predictor_pole
        .iter()
        .zip(band.pole_history_recon.iter())
        .map(|(&a, &r)| (a as i32 * sat_add16(r, r) as i32) >> 15)
        .sum::<i32>();
    band.partial_recon_pole = saturate(pole);

    // FILTEZ
    let zero = band
        .predictor_zero
        .iter()
        .zip(band.zero_history[1..].iter())
        .map(|(&b, &d)| (b as i32 * sat_add16(d, d) as i32) >> 15)
        .sum::<i32>();
    band.partial_recon_zero = saturate(zero);

    // PREDIC
    band.predicted_signal = sat_add16(band.partial_recon_pole, band.partial_recon_zero);
}
