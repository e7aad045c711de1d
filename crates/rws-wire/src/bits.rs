use std::fmt;
use std::ops::Range;

use crate::error::WireError;

/// Widest field a single read or write may cover.
pub const MAX_FIELD_WIDTH: usize = 64;

/// An owned, ordered sequence of bits.
///
/// Bytes expand most-significant bit first, and fixed-width fields are
/// big-endian, so `Bits::from_bytes(&[0b1010_0000])` reads back as
/// `"10100000"` and `read_uint(0, 3)` yields `0b101`.
///
/// ```text
///   byte 0x01            byte 0x02
///   0 0 0 0 0 0 0 1      0 0 0 0 0 0 1 0
///   ▲                                   ▲
///   bit 0                               bit 15
/// ```
///
/// The sequence never pads itself implicitly. A caller that wants to read
/// past the end must ask for it through [`padded_to`](Self::padded_to);
/// the one exception is [`to_bytes`](Self::to_bytes), which zero-fills the
/// final partial byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bits(Vec<bool>);

impl Bits {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self(Vec::with_capacity(bits))
    }

    /// Expand bytes into bits, eight per byte, MSB first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            for shift in (0..8).rev() {
                bits.push((byte >> shift) & 1 == 1);
            }
        }
        Self(bits)
    }

    /// Encode `value` as a big-endian field of exactly `width` bits.
    ///
    /// # Errors
    ///
    /// - [`WireError::WidthTooLarge`] if `width` exceeds 64.
    /// - [`WireError::Overflow`] if `value >= 2^width`.
    pub fn from_uint(value: u64, width: usize) -> Result<Self, WireError> {
        let mut bits = Self::with_capacity(width);
        bits.push_uint(value, width)?;
        Ok(bits)
    }

    /// Pack the bits back into bytes, zero-padding the final group.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | (u8::from(bit) << (7 - i)))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend_from(&mut self, other: &Bits) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Copy out a sub-range of the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] if the range ends past the sequence.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, WireError> {
        if range.end > self.0.len() || range.start > range.end {
            return Err(WireError::OutOfRange {
                offset: range.start,
                width: range.end.saturating_sub(range.start),
                len: self.0.len(),
            });
        }
        Ok(Self(self.0[range].to_vec()))
    }

    /// Return a copy extended with zero bits up to `len`.
    ///
    /// Sequences already at least `len` long are returned unchanged.
    #[must_use]
    pub fn padded_to(&self, len: usize) -> Self {
        let mut bits = self.0.clone();
        if bits.len() < len {
            bits.resize(len, false);
        }
        Self(bits)
    }

    /// Read a big-endian unsigned field of `width` bits at `offset`.
    ///
    /// # Errors
    ///
    /// - [`WireError::WidthTooLarge`] if `width` exceeds 64.
    /// - [`WireError::OutOfRange`] if `offset + width` runs past the end.
    pub fn read_uint(&self, offset: usize, width: usize) -> Result<u64, WireError> {
        if width > MAX_FIELD_WIDTH {
            return Err(WireError::WidthTooLarge { width });
        }
        let end = offset.checked_add(width).filter(|&end| end <= self.0.len());
        let Some(end) = end else {
            return Err(WireError::OutOfRange {
                offset,
                width,
                len: self.0.len(),
            });
        };

        Ok(self.0[offset..end]
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)))
    }

    /// Append `value` as a big-endian field of exactly `width` bits.
    ///
    /// # Errors
    ///
    /// - [`WireError::WidthTooLarge`] if `width` exceeds 64.
    /// - [`WireError::Overflow`] if `value >= 2^width`. Nothing is appended.
    pub fn push_uint(&mut self, value: u64, width: usize) -> Result<(), WireError> {
        if width > MAX_FIELD_WIDTH {
            return Err(WireError::WidthTooLarge { width });
        }
        if width < MAX_FIELD_WIDTH && value >> width != 0 {
            return Err(WireError::Overflow { value, width });
        }

        self.0.reserve(width);
        for shift in (0..width).rev() {
            self.0.push((value >> shift) & 1 == 1);
        }
        Ok(())
    }
}

impl FromIterator<bool> for Bits {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_expand_msb_first() {
        let bits = Bits::from_bytes(&[0x01, 0x80]);
        assert_eq!(bits.to_string(), "0000000110000000");
    }

    #[test]
    fn to_bytes_zero_pads_final_group() {
        let bits: Bits = [true, false, true].into_iter().collect();
        assert_eq!(bits.to_bytes(), vec![0b1010_0000]);
    }

    #[test]
    fn to_bytes_of_empty_is_empty() {
        assert!(Bits::new().to_bytes().is_empty());
    }

    #[test]
    fn bytes_survive_expansion() {
        let payload = b"grass";
        assert_eq!(Bits::from_bytes(payload).to_bytes(), payload.to_vec());
    }

    #[test]
    fn read_uint_is_big_endian() {
        let bits = Bits::from_bytes(&[0b1011_0010]);
        assert_eq!(bits.read_uint(0, 3).unwrap(), 0b101);
        assert_eq!(bits.read_uint(3, 5).unwrap(), 0b10010);
        assert_eq!(bits.read_uint(0, 0).unwrap(), 0);
    }

    #[test]
    fn read_uint_past_end_is_out_of_range() {
        let bits = Bits::from_bytes(&[0xFF]);
        assert_eq!(
            bits.read_uint(4, 6),
            Err(WireError::OutOfRange {
                offset: 4,
                width: 6,
                len: 8
            })
        );
    }

    #[test]
    fn padded_read_succeeds() {
        let bits = Bits::from_bytes(&[0xFF]).padded_to(14);
        assert_eq!(bits.len(), 14);
        assert_eq!(bits.read_uint(4, 10).unwrap(), 0b11_1100_0000);
    }

    #[test]
    fn padded_to_never_shrinks() {
        let bits = Bits::from_bytes(&[0xAA, 0xBB]);
        assert_eq!(bits.padded_to(3), bits);
    }

    #[test]
    fn from_uint_zero_fills_to_width() {
        assert_eq!(Bits::from_uint(5, 6).unwrap().to_string(), "000101");
        assert_eq!(Bits::from_uint(0, 4).unwrap().to_string(), "0000");
    }

    #[test]
    fn from_uint_rejects_overflow() {
        assert_eq!(
            Bits::from_uint(64, 6),
            Err(WireError::Overflow {
                value: 64,
                width: 6
            })
        );
    }

    #[test]
    fn full_width_u64_fits() {
        let bits = Bits::from_uint(u64::MAX, 64).unwrap();
        assert_eq!(bits.read_uint(0, 64).unwrap(), u64::MAX);
    }

    #[test]
    fn oversized_width_rejected() {
        assert_eq!(
            Bits::new().push_uint(1, 65),
            Err(WireError::WidthTooLarge { width: 65 })
        );
        assert_eq!(
            Bits::new().read_uint(0, 65),
            Err(WireError::WidthTooLarge { width: 65 })
        );
    }

    #[test]
    fn failed_push_leaves_sequence_untouched() {
        let mut bits = Bits::from_uint(1, 2).unwrap();
        assert!(bits.push_uint(8, 3).is_err());
        assert_eq!(bits.len(), 2);
    }

    #[test]
    fn slice_bounds_checked() {
        let bits = Bits::from_bytes(&[0xF0]);
        assert_eq!(bits.slice(2..6).unwrap().to_string(), "1100");
        assert!(matches!(
            bits.slice(4..9),
            Err(WireError::OutOfRange { .. })
        ));
    }
}
