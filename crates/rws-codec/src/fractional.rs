use rws_wire::FRACTIONAL_LENGTH_HEADER;
use tracing::{debug, warn};

use crate::carrier::{DecimalEdit, DecimalView};
use crate::decimal::{DecimalText, format_fixed};
use crate::error::CodecError;
use crate::report::{DecodedPayload, EncodeReport};
use crate::scheme::SchemeKind;

/// Carriers reserved at the front for the 32-bit byte count.
pub const HEADER_CARRIERS: usize = FRACTIONAL_LENGTH_HEADER.width() / 8;

/// Fractional digits that hold one byte, as thousandths.
pub const FRACTION_PLACES: usize = 3;

const SCALE: i128 = 1000;

/// Hides one byte per decimal leaf, in the thousandths of its value.
///
/// The integer part of each value is kept and the fraction is replaced by
/// the byte's value in thousandths:
///
/// ```text
///   carrier   0       1       2       3       4       5
///   before    12.5    0.75    -3.2    1.0     44.12   7.9
///   after     12.000  0.000   -4.000  1.001   44.255  7.9
///             └──── byte count = 1 (big-endian) ───┘ └ 0xFF  untouched
/// ```
///
/// "Integer part" means the floor, so a negative value's integer digits
/// shift by one (`-3.2` has floor `-4`). Decoding takes the fraction above
/// the floor, which recovers the same byte.
pub struct FractionalCodec;

impl FractionalCodec {
    /// Payload bytes the carriers can hold once the header is paid for.
    pub fn capacity_bytes<C>(carriers: &[C]) -> usize {
        carriers.len().saturating_sub(HEADER_CARRIERS)
    }

    /// Hide `payload` in `carriers`, clamping it to their capacity.
    ///
    /// Nothing is written unless every carrier that needs rewriting holds a
    /// parseable decimal.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InsufficientCarriers`] with fewer than four carriers.
    /// - [`CodecError::MalformedCarrier`] if a carrier to be rewritten is not
    ///   a decimal.
    pub fn encode<C: DecimalEdit>(
        carriers: &mut [C],
        payload: &[u8],
    ) -> Result<EncodeReport, CodecError> {
        if carriers.len() < HEADER_CARRIERS {
            return Err(CodecError::InsufficientCarriers {
                needed: HEADER_CARRIERS,
                available: carriers.len(),
            });
        }

        let capacity = Self::capacity_bytes(carriers);
        let clamp = FRACTIONAL_LENGTH_HEADER.clamp(payload.len(), capacity);
        let framed = FRACTIONAL_LENGTH_HEADER.frame_bytes(clamp.stored, payload)?;

        let plan = carriers
            .iter()
            .zip(&framed)
            .enumerate()
            .map(|(index, (carrier, &byte))| Self::rewrite(index, carrier, byte))
            .collect::<Result<Vec<_>, _>>()?;

        let carriers_used = plan.len();
        for (carrier, text) in carriers.iter_mut().zip(plan) {
            carrier.set_text(text);
        }

        if clamp.is_clamped() {
            warn!(
                requested_bytes = clamp.requested,
                stored_bytes = clamp.stored,
                "payload clamped to fractional capacity"
            );
        }
        debug!(
            stored_bytes = clamp.stored,
            carriers_used,
            "fractional encode complete"
        );

        Ok(EncodeReport {
            scheme: SchemeKind::Fractional,
            requested_bits: clamp.requested * 8,
            stored_bits: clamp.stored * 8,
            capacity_bits: capacity * 8,
            carriers_used,
            spilled_bits: 0,
        })
    }

    /// Recover the payload hidden by [`encode`](Self::encode).
    ///
    /// The header is trusted. A corrupted header that declares more bytes
    /// than there are carriers yields a truncated payload rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InsufficientCarriers`] with fewer than four carriers.
    /// - [`CodecError::MalformedCarrier`] if a carrier is not a decimal
    ///   with at least three fractional digits.
    /// - [`CodecError::Overflow`] if a carrier's thousandths exceed 255.
    pub fn decode<C: DecimalView>(carriers: &[C]) -> Result<DecodedPayload, CodecError> {
        if carriers.len() < HEADER_CARRIERS {
            return Err(CodecError::InsufficientCarriers {
                needed: HEADER_CARRIERS,
                available: carriers.len(),
            });
        }

        let header = carriers[..HEADER_CARRIERS]
            .iter()
            .enumerate()
            .map(|(index, carrier)| read_byte(index, carrier))
            .collect::<Result<Vec<_>, _>>()?;
        let declared = FRACTIONAL_LENGTH_HEADER.read_bytes(&header)? as usize;

        let decoded = Self::decode_with_len(carriers, declared)?;
        if decoded.is_truncated() {
            warn!(
                declared_bytes = declared,
                recovered_bytes = decoded.bytes.len(),
                "fractional carriers exhausted before declared length"
            );
        }
        Ok(DecodedPayload {
            carriers_used: decoded.carriers_used + HEADER_CARRIERS,
            ..decoded
        })
    }

    /// Read `len` payload bytes from the carriers after the header slots,
    /// without consulting the header.
    ///
    /// # Errors
    ///
    /// As [`decode`](Self::decode), except that fewer than four carriers
    /// simply yields an empty, truncated payload.
    pub fn decode_with_len<C: DecimalView>(
        carriers: &[C],
        len: usize,
    ) -> Result<DecodedPayload, CodecError> {
        let bytes = carriers
            .iter()
            .enumerate()
            .skip(HEADER_CARRIERS)
            .take(len)
            .map(|(index, carrier)| read_byte(index, carrier))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(recovered_bytes = bytes.len(), "fractional decode complete");
        Ok(DecodedPayload {
            declared_bits: len.saturating_mul(8),
            recovered_bits: bytes.len() * 8,
            carriers_used: bytes.len(),
            bytes,
        })
    }

    /// New text for one carrier: its floor plus `byte` thousandths.
    fn rewrite<C: DecimalView>(index: usize, carrier: &C, byte: u8) -> Result<String, CodecError> {
        let text = carrier
            .text()
            .ok_or_else(|| CodecError::malformed(index, "value", "", "element has no text"))?;
        let decimal = DecimalText::parse(&text)
            .ok_or_else(|| CodecError::malformed(index, "value", &*text, "not a decimal"))?;
        let scaled = decimal
            .floor()
            .and_then(|floor| floor.checked_mul(SCALE))
            .and_then(|floor| floor.checked_add(i128::from(byte)))
            .ok_or_else(|| CodecError::malformed(index, "value", &*text, "decimal out of range"))?;
        Ok(format_fixed(scaled, FRACTION_PLACES))
    }
}

/// Thousandths above the floor of one carrier's value.
fn read_byte<C: DecimalView>(index: usize, carrier: &C) -> Result<u8, CodecError> {
    let text = carrier
        .text()
        .ok_or_else(|| CodecError::malformed(index, "value", "", "element has no text"))?;
    let Some(decimal) = DecimalText::parse(&text) else {
        return Err(CodecError::malformed(index, "value", &*text, "not a decimal"));
    };
    if decimal.fraction_digits() < FRACTION_PLACES {
        return Err(CodecError::malformed(
            index,
            "value",
            &*text,
            "fewer than 3 fractional digits",
        ));
    }
    let scaled = decimal
        .scaled_rounded(FRACTION_PLACES)
        .ok_or_else(|| CodecError::malformed(index, "value", &*text, "decimal out of range"))?;
    let thousandths = scaled.rem_euclid(SCALE);
    u8::try_from(thousandths).map_err(|_| CodecError::Overflow {
        index,
        field: "value",
        value: thousandths,
        width: 8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::FloatCell;

    fn cells(values: &[&str]) -> Vec<FloatCell> {
        values.iter().map(|v| FloatCell::new(v)).collect()
    }

    fn texts(cells: &[FloatCell]) -> Vec<&str> {
        cells.iter().map(|c| c.0.as_str()).collect()
    }

    #[test]
    fn single_byte_layout() {
        let mut floats = cells(&["12.5", "0.75", "-3.2", "1.0", "44.12", "7.9"]);
        let report = FractionalCodec::encode(&mut floats, &[0xFF]).unwrap();
        assert_eq!(report.stored_bits, 8);
        assert_eq!(report.carriers_used, 5);
        assert_eq!(
            texts(&floats),
            ["12.000", "0.000", "-4.000", "1.001", "44.255", "7.9"]
        );
        assert_eq!(FractionalCodec::decode(&floats).unwrap().bytes, vec![0xFF]);
    }

    #[test]
    fn negative_values_keep_their_byte() {
        let mut floats = cells(&["1.5", "1.5", "1.5", "1.5", "-0.5", "-7.25"]);
        FractionalCodec::encode(&mut floats, &[0xFF, 0x00]).unwrap();
        assert_eq!(floats[4].0, "-0.745");
        assert_eq!(floats[5].0, "-8.000");
        assert_eq!(FractionalCodec::decode(&floats).unwrap().bytes, vec![0xFF, 0x00]);
    }

    #[test]
    fn exponent_and_bare_fraction_carriers() {
        let mut floats = cells(&["1.5", "-.5", "1.5E-05", "2.5", "3.5", "4.5"]);
        let report = FractionalCodec::encode(&mut floats, &[0xAB]).unwrap();
        assert_eq!(report.carriers_used, 5);
        assert_eq!(
            texts(&floats),
            ["1.000", "-1.000", "0.000", "2.001", "3.171", "4.5"]
        );
        assert_eq!(FractionalCodec::decode(&floats).unwrap().bytes, vec![0xAB]);
    }

    #[test]
    fn rounding_absorbs_float_noise() {
        let floats = cells(&["3.000", "0.000", "0.000", "0.0009999", "9.2549999"]);
        assert_eq!(FractionalCodec::decode(&floats).unwrap().bytes, vec![0xFF]);
    }

    #[test]
    fn oversized_payload_is_clamped() {
        let mut floats = cells(&["0.5"; 7]);
        let report = FractionalCodec::encode(&mut floats, b"hello").unwrap();
        assert!(report.is_clamped());
        assert_eq!(report.stored_bits, 24);
        assert_eq!(FractionalCodec::decode(&floats).unwrap().bytes, b"hel");
    }

    #[test]
    fn too_few_carriers() {
        let mut floats = cells(&["0.5"; 3]);
        assert!(matches!(
            FractionalCodec::encode(&mut floats, b"x"),
            Err(CodecError::InsufficientCarriers { needed: 4, available: 3 })
        ));
        assert!(matches!(
            FractionalCodec::decode(&floats),
            Err(CodecError::InsufficientCarriers { .. })
        ));
    }

    #[test]
    fn corrupted_header_truncates() {
        let floats = cells(&["0.000", "0.000", "0.000", "0.009", "1.104", "2.105"]);
        let decoded = FractionalCodec::decode(&floats).unwrap();
        assert!(decoded.is_truncated());
        assert_eq!(decoded.declared_bits, 72);
        assert_eq!(decoded.bytes, b"hi");
    }

    #[test]
    fn known_length_skips_header() {
        let floats = cells(&["9.999", "9.999", "9.999", "9.999", "1.104", "2.105"]);
        let decoded = FractionalCodec::decode_with_len(&floats, 2).unwrap();
        assert_eq!(decoded.bytes, b"hi");
        assert!(!decoded.is_truncated());
    }

    #[test]
    fn short_fraction_is_malformed() {
        let floats = cells(&["0.000", "0.000", "0.000", "0.1"]);
        assert!(matches!(
            FractionalCodec::decode(&floats),
            Err(CodecError::MalformedCarrier { index: 3, .. })
        ));
    }

    #[test]
    fn thousandths_above_byte_overflow() {
        let floats = cells(&["0.000", "0.000", "0.000", "0.256"]);
        assert!(matches!(
            FractionalCodec::decode(&floats),
            Err(CodecError::Overflow { index: 3, value: 256, .. })
        ));
    }

    #[test]
    fn failed_encode_writes_nothing() {
        let mut floats = cells(&["0.5", "0.5", "0.5", "0.5", "abc"]);
        let before = floats.clone();
        assert!(matches!(
            FractionalCodec::encode(&mut floats, b"z"),
            Err(CodecError::MalformedCarrier { index: 4, .. })
        ));
        assert_eq!(floats, before);
    }
}
