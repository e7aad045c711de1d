use crate::bits::Bits;
use crate::error::WireError;

// The framing convention shared by the carrier codecs:
//
//   1. capacity is measured in the header's unit (bits or bytes) once the
//      header itself has been paid for;
//   2. the requested payload is clamped to that capacity;
//   3. the clamped count is written big-endian in front of the payload;
//   4. carriers are filled in discovery order with a monotonic cursor,
//      and the final carrier is zero-padded to its full width.
//
// A decoder reads the header first and then knows exactly how much of what
// follows is payload and how much is padding or untouched cover.

/// Length prefix for the grass codec: 22 bits counting payload *bits*.
pub const FIELD_LENGTH_HEADER: LengthHeader = LengthHeader::new(22);

/// Length prefix for the fractional codec: 32 bits counting payload
/// *bytes*, spread one byte per carrier.
pub const FRACTIONAL_LENGTH_HEADER: LengthHeader = LengthHeader::new(32);

/// A fixed-width, big-endian length prefix.
///
/// ```text
/// ┌────────────────────────┬──────────────────────────────────┐
/// │ length (width bits)    │ payload (length units)           │
/// └────────────────────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthHeader {
    width: usize,
}

impl LengthHeader {
    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    pub const fn width(self) -> usize {
        self.width
    }

    /// Largest length this header can declare.
    pub fn max_value(self) -> u64 {
        if self.width >= 64 {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }

    /// Clamp a requested payload size to the capacity left after the header.
    pub fn clamp(self, requested: usize, capacity: usize) -> Clamp {
        Clamp {
            requested,
            stored: requested.min(capacity),
        }
    }

    /// Build the framed bit sequence: header, then the first `stored`
    /// bits of `payload`.
    ///
    /// # Errors
    ///
    /// - [`WireError::Overflow`] if `stored` exceeds [`max_value`](Self::max_value).
    /// - [`WireError::OutOfRange`] if `payload` holds fewer than `stored` bits.
    pub fn frame(self, stored: usize, payload: &Bits) -> Result<Bits, WireError> {
        let mut framed = Bits::with_capacity(self.width + stored);
        framed.push_uint(stored as u64, self.width)?;
        framed.extend_from(&payload.slice(0..stored)?);
        Ok(framed)
    }

    /// Byte-oriented variant of [`frame`](Self::frame): `stored` counts
    /// payload bytes and the result is packed back into bytes.
    ///
    /// Headers whose width is not a multiple of 8 leave the payload
    /// misaligned, so callers should only use this with byte-wide headers.
    ///
    /// # Errors
    ///
    /// - [`WireError::Overflow`] if `stored` exceeds [`max_value`](Self::max_value).
    /// - [`WireError::OutOfRange`] if `payload` holds fewer than `stored` bytes.
    pub fn frame_bytes(self, stored: usize, payload: &[u8]) -> Result<Vec<u8>, WireError> {
        let Some(body) = payload.get(..stored) else {
            return Err(WireError::OutOfRange {
                offset: 0,
                width: stored * 8,
                len: payload.len() * 8,
            });
        };
        let mut framed = Bits::from_uint(stored as u64, self.width)?;
        framed.extend_from(&Bits::from_bytes(body));
        Ok(framed.to_bytes())
    }

    /// Parse the header from the front of `bits`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] if `bits` is shorter than the header.
    pub fn read(self, bits: &Bits) -> Result<u64, WireError> {
        bits.read_uint(0, self.width)
    }

    /// Parse the header from the front of a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OutOfRange`] if `bytes` is shorter than the header.
    pub fn read_bytes(self, bytes: &[u8]) -> Result<u64, WireError> {
        self.read(&Bits::from_bytes(bytes))
    }
}

/// Outcome of fitting a payload into the available capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clamp {
    pub requested: usize,
    pub stored: usize,
}

impl Clamp {
    pub fn is_clamped(self) -> bool {
        self.stored < self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_header_limits() {
        assert_eq!(FIELD_LENGTH_HEADER.width(), 22);
        assert_eq!(FIELD_LENGTH_HEADER.max_value(), 4_194_303);
        assert_eq!(FRACTIONAL_LENGTH_HEADER.max_value(), u64::from(u32::MAX));
    }

    #[test]
    fn clamp_keeps_small_payloads() {
        let clamp = FIELD_LENGTH_HEADER.clamp(16, 188);
        assert_eq!(clamp.stored, 16);
        assert!(!clamp.is_clamped());
    }

    #[test]
    fn clamp_cuts_to_capacity() {
        let clamp = FIELD_LENGTH_HEADER.clamp(800, 118);
        assert_eq!(clamp.stored, 118);
        assert!(clamp.is_clamped());
    }

    #[test]
    fn frame_prepends_header() {
        let payload = Bits::from_bytes(&[0x01, 0x02]);
        let framed = FIELD_LENGTH_HEADER.frame(16, &payload).unwrap();
        assert_eq!(framed.len(), 38);
        assert_eq!(FIELD_LENGTH_HEADER.read(&framed).unwrap(), 16);
        assert_eq!(framed.slice(22..38).unwrap(), payload);
    }

    #[test]
    fn frame_truncates_to_stored() {
        let payload = Bits::from_bytes(&[0xFF, 0xFF]);
        let framed = LengthHeader::new(4).frame(3, &payload).unwrap();
        assert_eq!(framed.to_string(), "0011111");
    }

    #[test]
    fn frame_rejects_length_beyond_header() {
        let payload = Bits::from_bytes(&[0u8; 4]);
        assert_eq!(
            LengthHeader::new(4).frame(16, &payload),
            Err(WireError::Overflow {
                value: 16,
                width: 4
            })
        );
    }

    #[test]
    fn frame_bytes_puts_count_big_endian() {
        let framed = FRACTIONAL_LENGTH_HEADER.frame_bytes(1, &[0xFF, 0xEE]).unwrap();
        assert_eq!(framed, vec![0, 0, 0, 1, 0xFF]);
        assert_eq!(FRACTIONAL_LENGTH_HEADER.read_bytes(&framed).unwrap(), 1);
    }

    #[test]
    fn frame_bytes_rejects_short_payload() {
        assert!(matches!(
            FRACTIONAL_LENGTH_HEADER.frame_bytes(3, &[1]),
            Err(WireError::OutOfRange { .. })
        ));
    }

    #[test]
    fn read_short_header_is_out_of_range() {
        let bits = Bits::from_uint(3, 10).unwrap();
        assert!(matches!(
            FIELD_LENGTH_HEADER.read(&bits),
            Err(WireError::OutOfRange { .. })
        ));
    }
}
