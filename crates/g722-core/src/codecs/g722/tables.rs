//! G.722 Tables and Constants
//!
//! Quantizer, scale-factor and QMF tables from ITU-T G.722. Block names in
//! the comments (QUANTL, INVQAL, LOGSCL, ...) follow the recommendation.

/// QMF coefficients, forward orientation (h0..h11 of the 24-tap filter pair)
pub const QMF_COEFFS_FWD: [i16; 12] = [
    3, -11, 12, 32, -210, 951, 3876, -805, 362, -156, 53, -11,
];

/// QMF coefficients, reversed orientation
pub const QMF_COEFFS_REV: [i16; 12] = [
    -11, 53, -156, 362, -805, 3876, 951, -210, 32, 12, -11, 3,
];

/// Number of taps in each polyphase branch of the QMF
pub const QMF_TAPS: usize = 12;

/// Low-band decision levels (QUANTL), scaled by the quantizer step `>> 12`
///
/// Only entries 1..30 are used as thresholds.
pub const Q6: [i32; 32] = [
    0, 35, 72, 110, 150, 190, 233, 276, 323, 370, 422, 473, 530, 587, 650, 714, 786, 858, 940,
    1023, 1121, 1219, 1339, 1458, 1612, 1765, 1980, 2195, 2557, 2919, 0, 0,
];

/// Number of usable low-band decision intervals
pub const Q6_INTERVALS: usize = 30;

/// Low-band code for a negative difference, by decision interval
pub const ILN: [u8; 32] = [
    0, 63, 62, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11,
    10, 9, 8, 7, 6, 5, 4, 0,
];

/// Low-band code for a positive difference, by decision interval
pub const ILP: [u8; 32] = [
    0, 61, 60, 59, 58, 57, 56, 55, 54, 53, 52, 51, 50, 49, 48, 47, 46, 45, 44, 43, 42, 41, 40, 39,
    38, 37, 36, 35, 34, 33, 32, 0,
];

/// 4-bit inverse quantizer (INVQAL), drives the low-band adaptation path
pub const QM4: [i32; 16] = [
    0, -20456, -12896, -8968, -6288, -4240, -2584, -1200, 20456, 12896, 8968, 6288, 4240, 2584,
    1200, 0,
];

/// 5-bit inverse quantizer (INVQBL at 56 kbit/s)
pub const QM5: [i32; 32] = [
    -280, -280, -23352, -17560, -14120, -11664, -9752, -8184, -6864, -5712, -4696, -3784, -2960,
    -2208, -1520, -880, 23352, 17560, 14120, 11664, 9752, 8184, 6864, 5712, 4696, 3784, 2960, 2208,
    1520, 880, 280, -280,
];

/// 6-bit inverse quantizer (INVQBL at 64 kbit/s)
pub const QM6: [i32; 64] = [
    -136, -136, -136, -136, -24808, -21904, -19008, -16704, -14984, -13512, -12280, -11192, -10232,
    -9360, -8576, -7856, -7192, -6576, -6000, -5456, -4944, -4464, -4008, -3576, -3168, -2776,
    -2400, -2032, -1688, -1360, -1040, -728, 24808, 21904, 19008, 16704, 14984, 13512, 12280,
    11192, 10232, 9360, 8576, 7856, 7192, 6576, 6000, 5456, 4944, 4464, 4008, 3576, 3168, 2776,
    2400, 2032, 1688, 1360, 1040, 728, 432, 136, -432, -136,
];

/// Low-band log scale-factor multipliers (LOGSCL)
pub const WL: [i32; 8] = [-60, -30, 58, 172, 334, 538, 1198, 3042];

/// Maps a 4-bit low-band code to its `WL` entry
pub const RL42: [usize; 16] = [0, 7, 6, 5, 4, 3, 2, 1, 7, 6, 5, 4, 3, 2, 1, 0];

/// Inverse-log table (SCALEL/SCALEH), indexed by bits 6..10 of the log scale factor
pub const ILB: [i32; 32] = [
    2048, 2093, 2139, 2186, 2233, 2282, 2332, 2383, 2435, 2489, 2543, 2599, 2656, 2714, 2774, 2834,
    2896, 2960, 3025, 3091, 3158, 3228, 3298, 3371, 3444, 3520, 3597, 3676, 3756, 3838, 3922, 4008,
];

/// High-band decision level (QUANTH), scaled by the quantizer step `>> 12`
pub const Q2: i32 = 564;

/// High-band code for a negative difference, by decision interval
pub const IHN: [u8; 3] = [0, 1, 0];

/// High-band code for a positive difference, by decision interval
pub const IHP: [u8; 3] = [0, 3, 2];

/// 2-bit inverse quantizer (INVQAH)
pub const QM2: [i32; 4] = [-7408, -1616, 7408, 1616];

/// High-band log scale-factor multipliers (LOGSCH)
pub const WH: [i32; 3] = [0, -214, 798];

/// Maps a 2-bit high-band code to its `WH` entry
pub const RH2: [usize; 4] = [2, 1, 2, 1];

/// Leak factor applied to the log scale factor, `127 / 128`
pub const LOG_SCALE_LEAK: i32 = 127;

/// Pole coefficient a2 leak factor (`32512 / 32768`)
pub const POLE_A2_LEAK: i32 = 32512;

/// Pole coefficient a1 and zero coefficient leak factor (`32640 / 32768`)
pub const COEFF_LEAK: i32 = 32640;

/// Limit on |a2|
pub const POLE_A2_LIMIT: i32 = 12288;

/// a1 is kept inside `±(POLE_A1_BOUND - a2)`
pub const POLE_A1_BOUND: i32 = 15360;
