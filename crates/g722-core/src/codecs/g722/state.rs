//! G.722 State Management
//!
//! State structures for one G.722 stream. Every stream owns its state by
//! value; nothing is shared between instances.

use super::bitpack::BitPacker;
use super::tables::{RH2, RL42, WH, WL};
use crate::types::{G722Bitrate, G722Options, SampleRateMode};
use tracing::{debug, warn};

/// Selects the constants that distinguish the two sub-band ADPCM coders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandKind {
    /// 0-4 kHz band, 6-bit quantizer
    Low,
    /// 4-8 kHz band, 2-bit quantizer
    High,
}

impl BandKind {
    /// Quantizer step size of a freshly opened stream
    pub fn initial_step(self) -> i16 {
        match self {
            Self::Low => 32,
            Self::High => 8,
        }
    }

    /// Upper clamp of the log scale-factor accumulator
    pub fn max_log_scale(self) -> i32 {
        match self {
            Self::Low => 18432,
            Self::High => 22528,
        }
    }

    /// Shift applied when converting the log scale factor back to linear
    pub fn scale_shift(self) -> i32 {
        match self {
            Self::Low => 8,
            Self::High => 10,
        }
    }

    /// Log scale-factor increment for an adaptation index
    ///
    /// The index is the 4-bit low-band code or the 2-bit high-band code.
    pub fn scale_step(self, index: usize) -> i32 {
        match self {
            Self::Low => WL[RL42[index]],
            Self::High => WH[RH2[index]],
        }
    }
}

/// ADPCM state for a single sub-band
///
/// Encoder and decoder hold one of these per band. Fed the same codes, the
/// two copies stay bit-identical; comparing them is the loopback check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandState {
    /// Which band's constants apply
    pub kind: BandKind,
    /// Pole predictor coefficients (a1, a2)
    pub predictor_pole: [i16; 2],
    /// Zero predictor coefficients (b1..b6)
    pub predictor_zero: [i16; 6],
    /// Quantized difference history: slot 0 is the newest value, 1..=6 feed the zero predictor
    pub zero_history: [i16; 7],
    /// Previous two reconstructed signal values (r1, r2)
    pub pole_history_recon: [i16; 2],
    /// Previous two partial reconstructions (p1, p2)
    pub pole_history_partial: [i16; 2],
    /// Predictor output `s` for the next sample
    pub predicted_signal: i16,
    /// Pole-predictor contribution `sp`
    pub partial_recon_pole: i16,
    /// Zero-predictor contribution `sz`
    pub partial_recon_zero: i16,
    /// Logarithmic scale factor `nb`
    pub log_scale_accum: i32,
    /// Linear quantizer step `det`
    pub quant_step: i16,
}

impl BandState {
    /// Create a band state with all history cleared and the initial step size
    pub fn new(kind: BandKind) -> Self {
        Self {
            kind,
            predictor_pole: [0; 2],
            predictor_zero: [0; 6],
            zero_history: [0; 7],
            pole_history_recon: [0; 2],
            pole_history_partial: [0; 2],
            predicted_signal: 0,
            partial_recon_pole: 0,
            partial_recon_zero: 0,
            log_scale_accum: 0,
            quant_step: kind.initial_step(),
        }
    }

    /// Reset the band to its initial values
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}

/// QMF delay lines
///
/// On the encoder side `even_samples`/`odd_samples` hold the last 12 even and
/// odd wideband input samples. On the decoder side they hold the last 12
/// sums and differences of the reconstructed sub-band samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QmfState {
    /// Even input samples, or `rlow + rhigh` when synthesizing
    pub even_samples: [i16; 12],
    /// Odd input samples, or `rlow - rhigh` when synthesizing
    pub odd_samples: [i16; 12],
    /// Write position shared by both delay lines
    pub position: usize,
}

impl QmfState {
    /// Create empty delay lines
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the delay lines
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete state of one G.722 stream
///
/// Created by [`super::open`], advanced by [`super::encode`] or
/// [`super::decode`], and released by [`super::close`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct G722State {
    /// Low-band ADPCM state
    pub low: BandState,
    /// High-band ADPCM state
    pub high: BandState,
    /// QMF delay lines
    pub qmf: QmfState,
    /// Bit accumulator for the packed wire format
    pub packer: BitPacker,
    bitrate: G722Bitrate,
    mode: SampleRateMode,
    packed: bool,
}

impl G722State {
    /// Create a freshly initialized stream state
    ///
    /// Packing is only meaningful below 8 bits per code; a packed request at
    /// 64 kbit/s is accepted and ignored.
    pub fn new(bitrate: G722Bitrate, options: G722Options) -> Self {
        let packed = options.packed && bitrate.bits_per_sample() < 8;
        if options.packed && !packed {
            warn!("Packed G.722 requested at {}, codes are already octets", bitrate);
        }

        let mode = options.mode();
        debug!(
            "Opening G.722 state: {}, {}, packed={}",
            bitrate, mode, packed
        );

        Self {
            low: BandState::new(BandKind::Low),
            high: BandState::new(BandKind::High),
            qmf: QmfState::new(),
            packer: BitPacker::new(bitrate.bits_per_sample()),
            bitrate,
            mode,
            packed,
        }
    }

    /// Return to the freshly opened state, keeping bitrate and options
    pub fn reset(&mut self) {
        self.low.reset();
        self.high.reset();
        self.qmf.reset();
        self.packer.reset();
        debug!("Reset G.722 state ({}, {})", self.bitrate, self.mode);
    }

    /// Configured bitrate
    pub fn bitrate(&self) -> G722Bitrate {
        self.bitrate
    }

    /// Bits per code
    pub fn bits_per_sample(&self) -> u8 {
        self.bitrate.bits_per_sample()
    }

    /// Sampling mode
    pub fn mode(&self) -> SampleRateMode {
        self.mode
    }

    /// Whether codes are concatenated across byte boundaries
    pub fn is_packed(&self) -> bool {
        self.packed
    }
}
