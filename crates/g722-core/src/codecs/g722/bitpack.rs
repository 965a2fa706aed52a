//! G.722 Bit Packing
//!
//! Each code carries the high-band bits above the (possibly truncated)
//! low-band bits. Unpacked streams hold one code per octet. Packed streams
//! concatenate codes LSB-first through a running accumulator, so a 6-bit
//! stream fits four codes in three octets.

/// Mask for the two high-band bits once shifted down
const HIGH_BAND_MASK: u8 = 0x03;

/// Build the code for one sample pair
///
/// `low_code` is the full 6-bit low-band code and `high_code` the 2-bit
/// high-band code; the result keeps only the top `bits_per_sample` bits.
#[inline]
pub fn compose_code(low_code: u8, high_code: u8, bits_per_sample: u8) -> u8 {
    let full = ((high_code & HIGH_BAND_MASK) << 6) | (low_code & 0x3f);
    full >> (8 - bits_per_sample)
}

/// Split a received code into its low-band and high-band parts
///
/// The low-band part keeps `bits_per_sample - 2` bits.
#[inline]
pub fn split_code(code: u8, bits_per_sample: u8) -> (u8, u8) {
    let low_bits = bits_per_sample - 2;
    let low = code & ((1u8 << low_bits) - 1);
    let high = (code >> low_bits) & HIGH_BAND_MASK;
    (low, high)
}

/// Running bit accumulator for the packed wire format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPacker {
    bits_per_sample: u8,
    accumulator: u32,
    bit_count: u32,
}

impl BitPacker {
    /// Create an empty accumulator for codes of `bits_per_sample` bits
    pub fn new(bits_per_sample: u8) -> Self {
        Self {
            bits_per_sample,
            accumulator: 0,
            bit_count: 0,
        }
    }

    /// Drop any pending bits
    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.bit_count = 0;
    }

    /// Bits held in the accumulator
    pub fn pending_bits(&self) -> u32 {
        self.bit_count
    }

    /// Append a code; returns an octet once eight bits are available
    #[inline]
    pub fn pack(&mut self, code: u8) -> Option<u8> {
        self.accumulator |= (code as u32) << self.bit_count;
        self.bit_count += self.bits_per_sample as u32;
        if self.bit_count >= 8 {
            let octet = (self.accumulator & 0xff) as u8;
            self.accumulator >>= 8;
            self.bit_count -= 8;
            Some(octet)
        } else {
            None
        }
    }

    /// Emit the trailing partial octet, zero padded in its high bits
    pub fn flush(&mut self) -> Option<u8> {
        if self.bit_count == 0 {
            return None;
        }
        let octet = (self.accumulator & 0xff) as u8;
        self.reset();
        Some(octet)
    }

    /// Take the next complete code, pulling octets from `input` at `*pos`
    ///
    /// Returns `None` when the accumulator and the remaining input together
    /// hold less than one code; leftover bits stay for the next call.
    #[inline]
    pub fn unpack(&mut self, input: &[u8], pos: &mut usize) -> Option<u8> {
        let bits = self.bits_per_sample as u32;
        if self.bit_count < bits {
            let octet = *input.get(*pos)?;
            *pos += 1;
            self.accumulator |= (octet as u32) << self.bit_count;
            self.bit_count += 8;
        }
        let code = (self.accumulator & ((1 << bits) - 1)) as u8;
        self.accumulator >>= bits;
        self.bit_count -= bits;
        Some(code)
    }

    /// Octets produced by packing `codes` more codes
    pub fn packed_len(&self, codes: usize) -> usize {
        (self.bit_count as usize + codes * self.bits_per_sample as usize) / 8
    }

    /// Codes available after appending `octets` more octets
    pub fn unpacked_len(&self, octets: usize) -> usize {
        (self.bit_count as usize + octets * 8) / self.bits_per_sample as usize
    }
}
