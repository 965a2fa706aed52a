//! G.722 Codec Implementation
//!
//! Stream-level operations over caller-owned buffers ([`open`], [`encode`],
//! [`decode`], [`flush`], [`close`]) plus the owning wrappers built on them:
//! [`G722Encoder`], [`G722Decoder`] and the frame-oriented [`G722Codec`].

use super::adpcm::{dequantize_high, dequantize_low, quantize_high, quantize_low};
use super::basic_ops::sat_shift_left;
use super::bitpack::{compose_code, split_code};
use super::qmf;
use super::state::G722State;
use crate::error::Result;
use crate::types::{
    AudioCodec, AudioCodecExt, CodecConfig, CodecInfo, G722Bitrate, G722Options, SampleRateMode,
};
use crate::utils::validation::{validate_frame_size, validate_output_capacity, validate_pcm_length};
use bytes::Bytes;
use tracing::{debug, trace};

/// Static RTP payload type for G.722
pub const G722_PAYLOAD_TYPE: u8 = 9;

/// RTP clock rate signalled for G.722
pub const G722_RTP_CLOCK_RATE: u32 = 8000;

/// Open a new stream
///
/// Every stream owns its state; independent streams never interact.
pub fn open(bitrate: G722Bitrate, options: G722Options) -> G722State {
    G722State::new(bitrate, options)
}

/// Release a stream
pub fn close(state: G722State) {
    debug!("Closing G.722 state ({}, {})", state.bitrate(), state.mode());
}

/// Bytes the next [`encode`] call writes for `samples` PCM samples
pub fn encoded_len(state: &G722State, samples: usize) -> usize {
    let codes = samples / state.mode().samples_per_code();
    if state.is_packed() {
        state.packer.packed_len(codes)
    } else {
        codes
    }
}

/// Samples the next [`decode`] call writes for `bytes` coded bytes
pub fn decoded_len(state: &G722State, bytes: usize) -> usize {
    let codes = if state.is_packed() {
        state.packer.unpacked_len(bytes)
    } else {
        bytes
    };
    codes * state.mode().samples_per_code()
}

/// Encode PCM samples
///
/// In 16 kHz mode `pcm` must hold whole sample pairs. Returns the number of
/// bytes written to `out`. In packed mode a trailing partial code stays in
/// the accumulator until the next call or [`flush`].
///
/// # Errors
///
/// Fails without touching `state` when `pcm` holds a partial sample pair or
/// `out` cannot hold [`encoded_len`] bytes.
pub fn encode(state: &mut G722State, pcm: &[i16], out: &mut [u8]) -> Result<usize> {
    validate_pcm_length(pcm.len(), state.mode())?;
    validate_output_capacity(encoded_len(state, pcm.len()), out.len())?;

    let packed = state.is_packed();
    let mut written = 0;
    for chunk in pcm.chunks_exact(state.mode().samples_per_code()) {
        let code = encode_code(state, chunk);
        let octet = if packed {
            state.packer.pack(code)
        } else {
            Some(code)
        };
        if let Some(octet) = octet {
            out[written] = octet;
            written += 1;
        }
    }

    trace!("G.722 encoded {} samples into {} bytes", pcm.len(), written);
    Ok(written)
}

/// Decode coded bytes
///
/// Returns the number of samples written to `out`. In packed mode every
/// complete code is decoded; leftover bits wait for the next call.
///
/// # Errors
///
/// Fails without touching `state` when `out` cannot hold [`decoded_len`]
/// samples.
pub fn decode(state: &mut G722State, data: &[u8], out: &mut [i16]) -> Result<usize> {
    validate_output_capacity(decoded_len(state, data.len()), out.len())?;

    let mut written = 0;
    if state.is_packed() {
        let mut pos = 0;
        while let Some(code) = state.packer.unpack(data, &mut pos) {
            written += decode_code(state, code, &mut out[written..]);
        }
    } else {
        for &code in data {
            written += decode_code(state, code, &mut out[written..]);
        }
    }

    trace!("G.722 decoded {} bytes into {} samples", data.len(), written);
    Ok(written)
}

/// Write out a pending partial octet of a packed encoding stream
///
/// The unused high bits are zero. When they span at least one code width a
/// decoder reads them as one extra all-zero code; callers that need exact
/// sample counts should end streams on whole octets. Returns the number of
/// bytes written, 0 when nothing is pending.
///
/// # Errors
///
/// Fails when a byte is pending and `out` is empty.
pub fn flush(state: &mut G722State, out: &mut [u8]) -> Result<usize> {
    if !state.is_packed() || state.packer.pending_bits() == 0 {
        return Ok(0);
    }
    validate_output_capacity(1, out.len())?;

    match state.packer.flush() {
        Some(octet) => {
            out[0] = octet;
            Ok(1)
        }
        None => Ok(0),
    }
}

fn encode_code(state: &mut G722State, chunk: &[i16]) -> u8 {
    let bits = state.bits_per_sample();
    match state.mode() {
        SampleRateMode::SixteenK => {
            let (xlow, xhigh) = qmf::analysis(&mut state.qmf, chunk[0], chunk[1]);
            let low = quantize_low(&mut state.low, xlow);
            let high = quantize_high(&mut state.high, xhigh);
            compose_code(low, high, bits)
        }
        SampleRateMode::EightK => {
            let low = quantize_low(&mut state.low, chunk[0] >> 1);
            compose_code(low, 0, bits)
        }
    }
}

fn decode_code(state: &mut G722State, code: u8, out: &mut [i16]) -> usize {
    let bitrate = state.bitrate();
    let (low, high) = split_code(code, bitrate.bits_per_sample());
    let rlow = dequantize_low(&mut state.low, low, bitrate);

    match state.mode() {
        SampleRateMode::SixteenK => {
            let rhigh = dequantize_high(&mut state.high, high);
            let [first, second] = qmf::synthesis(&mut state.qmf, rlow, rhigh);
            out[0] = first;
            out[1] = second;
            2
        }
        SampleRateMode::EightK => {
            out[0] = sat_shift_left(rlow, 1);
            1
        }
    }
}

/// Owning G.722 encoder
#[derive(Debug, Clone)]
pub struct G722Encoder {
    state: G722State,
}

impl G722Encoder {
    /// Create an encoder
    pub fn new(bitrate: G722Bitrate, options: G722Options) -> Self {
        Self {
            state: open(bitrate, options),
        }
    }

    /// Encode into a caller buffer, see [`encode`]
    pub fn encode(&mut self, pcm: &[i16], out: &mut [u8]) -> Result<usize> {
        encode(&mut self.state, pcm, out)
    }

    /// Encode into a new vector
    pub fn encode_to_vec(&mut self, pcm: &[i16]) -> Result<Vec<u8>> {
        let mut out = vec![0u8; encoded_len(&self.state, pcm.len())];
        let written = encode(&mut self.state, pcm, &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// Emit any pending partial octet, see [`flush`]
    pub fn flush(&mut self, out: &mut [u8]) -> Result<usize> {
        flush(&mut self.state, out)
    }

    /// Return to the freshly opened state
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Current stream state
    pub fn state(&self) -> &G722State {
        &self.state
    }

    /// Consume the encoder, returning its state
    pub fn into_state(self) -> G722State {
        self.state
    }
}

/// Owning G.722 decoder
#[derive(Debug, Clone)]
pub struct G722Decoder {
    state: G722State,
}

impl G722Decoder {
    /// Create a decoder
    pub fn new(bitrate: G722Bitrate, options: G722Options) -> Self {
        Self {
            state: open(bitrate, options),
        }
    }

    /// Decode into a caller buffer, see [`decode`]
    pub fn decode(&mut self, data: &[u8], out: &mut [i16]) -> Result<usize> {
        decode(&mut self.state, data, out)
    }

    /// Decode into a new vector
    pub fn decode_to_vec(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        let mut out = vec![0i16; decoded_len(&self.state, data.len())];
        let written = decode(&mut self.state, data, &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// Return to the freshly opened state
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Current stream state
    pub fn state(&self) -> &G722State {
        &self.state
    }

    /// Consume the decoder, returning its state
    pub fn into_state(self) -> G722State {
        self.state
    }
}

/// Frame-oriented G.722 codec
///
/// Pairs an encoder and a decoder and enforces the configured frame size.
///
/// # Example
/// ```
/// use g722_core::codecs::g722::G722Codec;
/// use g722_core::{AudioCodec, CodecConfig};
///
/// let mut codec = G722Codec::new(CodecConfig::g722()).unwrap();
///
/// // 20 ms at 16 kHz
/// let input_frame = vec![0i16; 320];
/// let encoded = codec.encode(&input_frame).unwrap();
/// assert_eq!(encoded.len(), 160);
///
/// let decoded = codec.decode(&encoded).unwrap();
/// assert_eq!(decoded.len(), 320);
/// ```
#[derive(Debug, Clone)]
pub struct G722Codec {
    config: CodecConfig,
    bitrate: G722Bitrate,
    frame_size: usize,
    encoded_frame_size: usize,
    encoder: G722Encoder,
    decoder: G722Decoder,
}

impl G722Codec {
    /// Create a codec from a configuration
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;

        let bitrate = config.g722_bitrate()?;
        let options = config.options();
        let codes = config.codes_per_frame()?;
        let frame_size = config.frame_size()?;
        let encoder = G722Encoder::new(bitrate, options);
        let encoded_frame_size = encoded_len(encoder.state(), frame_size);

        debug!(
            "Created G.722 codec: {}, {} samples -> {} bytes per frame ({} codes)",
            bitrate, frame_size, encoded_frame_size, codes
        );

        Ok(Self {
            config,
            bitrate,
            frame_size,
            encoded_frame_size,
            encoder,
            decoder: G722Decoder::new(bitrate, options),
        })
    }

    /// Configuration the codec was created with
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Coded bytes per frame
    pub fn encoded_frame_size(&self) -> usize {
        self.encoded_frame_size
    }

    /// Encode one frame into an RTP-ready payload
    pub fn encode_bytes(&mut self, samples: &[i16]) -> Result<Bytes> {
        self.encode(samples).map(Bytes::from)
    }

    /// Encoder stream state
    pub fn encoder_state(&self) -> &G722State {
        self.encoder.state()
    }

    /// Decoder stream state
    pub fn decoder_state(&self) -> &G722State {
        self.decoder.state()
    }
}

impl AudioCodec for G722Codec {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        validate_frame_size(self.frame_size, samples.len())?;
        self.encoder.encode_to_vec(samples)
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        validate_frame_size(self.encoded_frame_size, data.len())?;
        self.decoder.decode_to_vec(data)
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: "G722",
            sample_rate: self.config.sample_rate,
            channels: 1,
            bitrate: self.bitrate.bps(),
            frame_size: self.frame_size,
            payload_type: Some(G722_PAYLOAD_TYPE),
            rtp_clock_rate: G722_RTP_CLOCK_RATE,
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.encoder.reset();
        self.decoder.reset();
        Ok(())
    }

    fn frame_size(&self) -> usize {
        self.frame_size
    }
}

impl AudioCodecExt for G722Codec {
    fn encode_to_buffer(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize> {
        validate_frame_size(self.frame_size, samples.len())?;
        self.encoder.encode(samples, output)
    }

    fn decode_to_buffer(&mut self, data: &[u8], output: &mut [i16]) -> Result<usize> {
        validate_frame_size(self.encoded_frame_size, data.len())?;
        self.decoder.decode(data, output)
    }

    fn max_encoded_size(&self, input_samples: usize) -> usize {
        encoded_len(self.encoder.state(), input_samples)
    }

    fn max_decoded_size(&self, input_bytes: usize) -> usize {
        decoded_len(self.decoder.state(), input_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    const SCENARIO: [i16; 8] = [0, 1000, -1000, 5000, -5000, 16000, -16000, 0];

    fn options(eight_k: bool, packed: bool) -> G722Options {
        G722Options { eight_k, packed }
    }

    #[test]
    fn test_encode_decode_scenario() {
        let mut enc = open(G722Bitrate::Rate64000, G722Options::default());
        let mut coded = [0u8; 4];
        assert_eq!(encode(&mut enc, &SCENARIO, &mut coded).unwrap(), 4);
        assert_eq!(coded, [250, 122, 250, 27]);

        let mut dec = open(G722Bitrate::Rate64000, G722Options::default());
        let mut pcm = [0i16; 8];
        assert_eq!(decode(&mut dec, &coded, &mut pcm).unwrap(), 8);
        assert_eq!(pcm, [0, -1, -1, 0, -1, -1, 0, 0]);

        assert_eq!(enc.low, dec.low);
        assert_eq!(enc.high, dec.high);
        close(enc);
        close(dec);
    }

    #[test]
    fn test_truncated_rates() {
        let mut state = open(G722Bitrate::Rate56000, G722Options::default());
        let mut coded = [0u8; 4];
        encode(&mut state, &SCENARIO, &mut coded).unwrap();
        assert_eq!(coded, [125, 61, 125, 13]);

        let mut state = open(G722Bitrate::Rate48000, G722Options::default());
        encode(&mut state, &SCENARIO, &mut coded).unwrap();
        assert_eq!(coded, [62, 30, 62, 6]);

        let mut dec = open(G722Bitrate::Rate56000, G722Options::default());
        let mut pcm = [0i16; 8];
        decode(&mut dec, &[125, 61, 125, 13], &mut pcm).unwrap();
        assert_eq!(pcm, [0, 0, 0, 0, -1, -1, 0, 0]);
    }

    #[test]
    fn test_eight_k_mode() {
        let mut enc = open(G722Bitrate::Rate64000, options(true, false));
        assert_eq!(encoded_len(&enc, 8), 8);
        let mut coded = [0u8; 8];
        assert_eq!(encode(&mut enc, &SCENARIO, &mut coded).unwrap(), 8);
        assert_eq!(coded, [58, 32, 4, 32, 4, 32, 4, 31]);

        let mut dec = open(G722Bitrate::Rate64000, options(true, false));
        let mut pcm = [0i16; 8];
        assert_eq!(decode(&mut dec, &coded, &mut pcm).unwrap(), 8);
        assert_eq!(pcm, [2, 48, -134, 364, -1032, 2804, -7690, -46]);
        assert_eq!(enc.low, dec.low);
        assert_eq!(enc.low.quant_step, 12912);
        // High band is never touched at 8 kHz
        assert_eq!(enc.high, open(G722Bitrate::Rate64000, options(true, false)).high);
    }

    #[test]
    fn test_packed_six_bit() {
        let mut enc = open(G722Bitrate::Rate48000, options(false, true));
        assert_eq!(encoded_len(&enc, 8), 3);
        let mut coded = [0u8; 3];
        assert_eq!(encode(&mut enc, &SCENARIO, &mut coded).unwrap(), 3);
        assert_eq!(coded, [190, 231, 27]);
        assert_eq!(flush(&mut enc, &mut [0u8; 1]).unwrap(), 0);

        let mut dec = open(G722Bitrate::Rate48000, options(false, true));
        assert_eq!(decoded_len(&dec, 3), 8);
        let mut pcm = [0i16; 8];
        assert_eq!(decode(&mut dec, &coded, &mut pcm).unwrap(), 8);
        assert_eq!(pcm, [0, -1, -1, 0, -1, -1, 0, 0]);
    }

    #[test]
    fn test_packed_seven_bit_with_flush() {
        let mut enc = open(G722Bitrate::Rate56000, options(false, true));
        let mut coded = [0u8; 4];
        assert_eq!(encode(&mut enc, &SCENARIO, &mut coded).unwrap(), 3);
        assert_eq!(&coded[..3], &[253, 94, 191]);
        assert_eq!(enc.packer.pending_bits(), 4);

        assert_eq!(flush(&mut enc, &mut coded[3..]).unwrap(), 1);
        assert_eq!(coded[3], 0x01);
        assert_eq!(enc.packer.pending_bits(), 0);

        // Three octets hold three whole codes; the fourth completes with the flushed byte
        let mut dec = open(G722Bitrate::Rate56000, options(false, true));
        let mut pcm = [0i16; 8];
        assert_eq!(decode(&mut dec, &coded[..3], &mut pcm).unwrap(), 6);
        assert_eq!(decode(&mut dec, &coded[3..], &mut pcm[6..]).unwrap(), 2);
        assert_eq!(pcm, [0, 0, 0, 0, -1, -1, 0, 0]);
    }

    #[test]
    fn test_packed_ignored_at_64k() {
        let mut packed = open(G722Bitrate::Rate64000, options(false, true));
        let mut plain = open(G722Bitrate::Rate64000, G722Options::default());
        let mut a = [0u8; 4];
        let mut b = [0u8; 4];
        encode(&mut packed, &SCENARIO, &mut a).unwrap();
        encode(&mut plain, &SCENARIO, &mut b).unwrap();
        assert_eq!(a, b);
        assert_eq!(flush(&mut packed, &mut []).unwrap(), 0);
    }

    #[test]
    fn test_errors_leave_state_untouched() {
        let mut state = open(G722Bitrate::Rate64000, G722Options::default());
        let fresh = state.clone();

        let mut coded = [0u8; 4];
        let err = encode(&mut state, &SCENARIO[..7], &mut coded).unwrap_err();
        assert!(matches!(err, CodecError::BufferLengthMismatch { .. }));
        assert_eq!(state, fresh);

        let err = encode(&mut state, &SCENARIO, &mut coded[..3]).unwrap_err();
        assert_eq!(err, CodecError::BufferTooSmall { needed: 4, actual: 3 });
        assert_eq!(state, fresh);

        let mut pcm = [0i16; 7];
        let err = decode(&mut state, &[250, 122, 250, 27], &mut pcm).unwrap_err();
        assert_eq!(err, CodecError::BufferTooSmall { needed: 8, actual: 7 });
        assert_eq!(state, fresh);
    }

    #[test]
    fn test_flush_needs_room() {
        let mut enc = open(G722Bitrate::Rate56000, options(false, true));
        let mut coded = [0u8; 1];
        encode(&mut enc, &[100, 200], &mut coded).unwrap();
        assert_eq!(enc.packer.pending_bits(), 7);
        assert!(flush(&mut enc, &mut []).is_err());
        assert_eq!(enc.packer.pending_bits(), 7);
    }

    #[test]
    fn test_empty_buffers() {
        let mut state = open(G722Bitrate::Rate64000, G722Options::default());
        assert_eq!(encode(&mut state, &[], &mut []).unwrap(), 0);
        assert_eq!(decode(&mut state, &[], &mut []).unwrap(), 0);
    }

    #[test]
    fn test_encoder_decoder_wrappers() {
        let mut encoder = G722Encoder::new(G722Bitrate::Rate64000, G722Options::default());
        let coded = encoder.encode_to_vec(&SCENARIO).unwrap();
        assert_eq!(coded, vec![250, 122, 250, 27]);

        let mut decoder = G722Decoder::new(G722Bitrate::Rate64000, G722Options::default());
        assert_eq!(decoder.decode_to_vec(&coded).unwrap(), vec![0, -1, -1, 0, -1, -1, 0, 0]);
        assert_eq!(encoder.state().low, decoder.state().low);

        encoder.reset();
        assert_eq!(encoder.encode_to_vec(&SCENARIO).unwrap(), coded);
        assert_eq!(encoder.into_state().bitrate(), G722Bitrate::Rate64000);
    }

    #[test]
    fn test_codec_frames() {
        let mut codec = G722Codec::new(CodecConfig::g722()).unwrap();
        assert_eq!(codec.frame_size(), 320);
        assert_eq!(codec.encoded_frame_size(), 160);

        let info = codec.info();
        assert_eq!(info.name, "G722");
        assert_eq!(info.sample_rate, 16000);
        assert_eq!(info.payload_type, Some(9));
        assert_eq!(info.rtp_clock_rate, 8000);

        let frame = vec![0i16; 320];
        let payload = codec.encode_bytes(&frame).unwrap();
        assert_eq!(payload.len(), 160);
        assert_eq!(payload[0], 0xfa);
        assert_eq!(codec.decode(&payload).unwrap().len(), 320);

        assert!(matches!(
            codec.encode(&frame[..318]),
            Err(CodecError::InvalidFrameSize { expected: 320, actual: 318 })
        ));
        assert!(codec.decode(&payload[..10]).is_err());
    }

    #[test]
    fn test_codec_packed_frames() {
        let config = CodecConfig::g722().with_bitrate(48000).with_packed(true);
        let mut codec = G722Codec::new(config).unwrap();
        assert_eq!(codec.encoded_frame_size(), 120);
        assert_eq!(codec.max_encoded_size(320), 120);
        assert_eq!(codec.max_decoded_size(120), 320);

        let frame: Vec<i16> = (0..320).map(|i| ((i * 37) % 2000 - 1000) as i16).collect();
        let mut coded = vec![0u8; 120];
        assert_eq!(codec.encode_to_buffer(&frame, &mut coded).unwrap(), 120);
        let mut pcm = vec![0i16; 320];
        assert_eq!(codec.decode_to_buffer(&coded, &mut pcm).unwrap(), 320);
        assert_eq!(codec.encoder_state().low, codec.decoder_state().low);
        assert_eq!(codec.encoder_state().high, codec.decoder_state().high);

        codec.reset().unwrap();
        assert_eq!(codec.encoder_state().packer.pending_bits(), 0);
    }

    #[test]
    fn test_codec_eight_k_frames() {
        let config = CodecConfig::g722().with_eight_k(true).with_frame_size_ms(10.0);
        let mut codec = G722Codec::new(config).unwrap();
        assert_eq!(codec.frame_size(), 80);
        assert_eq!(codec.info().sample_rate, 8000);
        assert_eq!(codec.encode(&[0i16; 80]).unwrap().len(), 80);
    }
}
