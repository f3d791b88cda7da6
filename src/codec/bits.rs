//! Big-endian bit packing across byte boundaries.
//!
//! Mnemonics pack 11-bit indices back to back, so a single index usually
//! straddles two or three bytes. These helpers keep that arithmetic in one
//! place.

use zeroize::Zeroize;

/// Appends values MSB-first into a growing byte buffer.
///
/// The buffer is zeroized on drop since it routinely holds entropy.
#[derive(Default)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Creates a writer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            bit_len: 0,
        }
    }

    /// Appends the low `width` bits of `value`, most significant first.
    pub fn push(&mut self, value: u32, width: usize) {
        debug_assert!(width <= 32);
        for shift in (0..width).rev() {
            let bit = (value >> shift) & 1;
            if self.bit_len % 8 == 0 {
                self.data.push(0);
            }
            if bit == 1 {
                let last = self.data.len() - 1;
                self.data[last] |= 0x80 >> (self.bit_len % 8);
            }
            self.bit_len += 1;
        }
    }

    /// Appends whole bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        if self.bit_len % 8 == 0 {
            self.data.extend_from_slice(bytes);
            self.bit_len += bytes.len() * 8;
        } else {
            for &byte in bytes {
                self.push(u32::from(byte), 8);
            }
        }
    }

    /// Number of bits written.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Written bytes; a trailing partial byte is zero-padded.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Drop for BitWriter {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

/// Reads values MSB-first from a byte slice.
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at bit 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Reads the next `width` bits as an unsigned integer.
    ///
    /// Returns `None` without advancing if fewer than `width` bits remain.
    pub fn read(&mut self, width: usize) -> Option<u32> {
        debug_assert!(width <= 32);
        if self.remaining() < width {
            return None;
        }
        let mut value = 0u32;
        for _ in 0..width {
            let byte = self.data[self.position / 8];
            let bit = (byte >> (7 - self.position % 8)) & 1;
            value = (value << 1) | u32::from(bit);
            self.position += 1;
        }
        Some(value)
    }

    /// Bits left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }
}
