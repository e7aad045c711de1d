use rws_wire::{Bits, FIELD_LENGTH_HEADER};
use tracing::{debug, warn};

use crate::carrier::{GrassEdit, GrassField, GrassView};
use crate::decimal::{DecimalText, format_fixed};
use crate::error::CodecError;
use crate::report::{DecodedPayload, EncodeReport};
use crate::scheme::SchemeKind;

pub const ID_BITS: usize = 18;
pub const HEALTH_BITS: usize = 6;
pub const GROWTH_BITS: usize = 26;
pub const AGE_BITS: usize = 20;

/// Bits carried by a grass thing that has an `age` element.
pub const BITS_WITH_AGE: usize = ID_BITS + HEALTH_BITS + GROWTH_BITS + AGE_BITS;

/// Bits carried by a grass thing without one.
pub const BITS_WITHOUT_AGE: usize = ID_BITS + HEALTH_BITS + GROWTH_BITS;

/// Stored health is `bits + HEALTH_OFFSET`, keeping every value in the
/// range the game itself produces.
pub const HEALTH_OFFSET: i128 = 5;

/// Growth is written as `bits / 10^GROWTH_PLACES`.
pub const GROWTH_PLACES: usize = 8;

/// Hides a payload in the sub-fields of grass things.
///
/// Each carrier holds one 70-bit window of the framed stream (50 bits when
/// its `age` element is missing):
///
/// ```text
///  bit 0            18       24                        50                 70
///  ┌────────────────┬────────┬─────────────────────────┬──────────────────┐
///  │ id suffix      │ health │ growth × 10^8           │ age (optional)   │
///  └────────────────┴────────┴─────────────────────────┴──────────────────┘
/// ```
///
/// The stream starts with a 22-bit big-endian count of payload bits, so a
/// decoder knows where payload ends and padding begins. Carriers are filled
/// in the order given; the last one touched is zero-padded to its full
/// width and every carrier after it is left exactly as it was.
///
/// # Usage
///
/// ```rust
/// use rws_codec::{FieldCodec, Grass};
///
/// let mut cover = vec![
///     Grass::new("PlantGrass", 4410, 85, "0.39108412", Some(231_004)),
///     Grass::new("PlantTallGrass", 4411, 60, "1", None),
/// ];
/// let report = FieldCodec::encode(&mut cover, b"hi").unwrap();
/// assert_eq!(report.stored_bits, 16);
///
/// let decoded = FieldCodec::decode(&cover).unwrap();
/// assert_eq!(decoded.bytes, b"hi");
/// ```
pub struct FieldCodec;

/// New text for one carrier, computed before anything is written.
struct GrassWrite {
    id: String,
    health: String,
    growth: String,
    age: Option<String>,
}

impl FieldCodec {
    /// Raw bits a single carrier holds: 70, or 50 without an `age`.
    pub fn carrier_bits<C: GrassView>(carrier: &C) -> usize {
        if carrier.field(GrassField::Age).is_some() {
            BITS_WITH_AGE
        } else {
            BITS_WITHOUT_AGE
        }
    }

    /// Payload bits the carriers can hold once the length header is paid for.
    pub fn capacity_bits<C: GrassView>(carriers: &[C]) -> usize {
        carriers
            .iter()
            .map(Self::carrier_bits)
            .sum::<usize>()
            .saturating_sub(FIELD_LENGTH_HEADER.width())
    }

    /// Hide `payload` in `carriers`, clamping it to their capacity.
    ///
    /// All new field values are computed first and only then written, so
    /// an error leaves every carrier untouched.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InsufficientCarriers`] if `carriers` is empty.
    /// - [`CodecError::MalformedCarrier`] if a carrier that must be rewritten
    ///   lacks its `def` element or another required sub-field.
    /// - [`CodecError::Wire`] with [`rws_wire::WireError::Overflow`] if the clamped
    ///   size exceeds what the 22-bit header can declare.
    pub fn encode<C: GrassEdit>(
        carriers: &mut [C],
        payload: &[u8],
    ) -> Result<EncodeReport, CodecError> {
        if carriers.is_empty() {
            return Err(CodecError::InsufficientCarriers {
                needed: 1,
                available: 0,
            });
        }

        let payload_bits = Bits::from_bytes(payload);
        let capacity = Self::capacity_bits(carriers);
        let clamp = FIELD_LENGTH_HEADER.clamp(payload_bits.len(), capacity);
        let framed = FIELD_LENGTH_HEADER.frame(clamp.stored, &payload_bits)?;

        let mut plan = Vec::new();
        let mut cursor = 0;
        for (index, carrier) in carriers.iter().enumerate() {
            if cursor >= framed.len() {
                break;
            }
            let (write, next) = Self::plan_carrier(index, carrier, &framed, cursor)?;
            plan.push(write);
            cursor = next;
        }

        let carriers_used = plan.len();
        for (index, (carrier, write)) in carriers.iter_mut().zip(plan).enumerate() {
            Self::apply(index, carrier, write)?;
        }

        if clamp.is_clamped() {
            warn!(
                requested_bits = clamp.requested,
                stored_bits = clamp.stored,
                "payload clamped to grass capacity"
            );
        }
        debug!(
            stored_bits = clamp.stored,
            carriers_used,
            carriers_total = carriers.len(),
            "grass encode complete"
        );

        Ok(EncodeReport {
            scheme: SchemeKind::Field,
            requested_bits: clamp.requested,
            stored_bits: clamp.stored,
            capacity_bits: capacity,
            carriers_used,
            spilled_bits: 0,
        })
    }

    /// Recover the payload hidden by [`encode`](Self::encode).
    ///
    /// Carriers are read in order until the header's declared length is
    /// covered. If they run out first, the bits gathered so far are
    /// returned as a truncated [`DecodedPayload`].
    ///
    /// # Errors
    ///
    /// - [`CodecError::InsufficientCarriers`] if `carriers` is empty.
    /// - [`CodecError::MalformedCarrier`] if a carrier's text does not
    ///   parse, or its growth has fewer than 8 fractional digits.
    /// - [`CodecError::Overflow`] if a carrier value does not fit its field,
    ///   which means the carrier was not written by this codec.
    pub fn decode<C: GrassView>(carriers: &[C]) -> Result<DecodedPayload, CodecError> {
        let Some(first) = carriers.first() else {
            return Err(CodecError::InsufficientCarriers {
                needed: 1,
                available: 0,
            });
        };

        let mut bits = Self::read_carrier(0, first)?;
        let header = FIELD_LENGTH_HEADER.width();
        let declared = FIELD_LENGTH_HEADER.read(&bits)? as usize;
        let needed = declared + header;

        let mut carriers_used = 1;
        for (index, carrier) in carriers.iter().enumerate().skip(1) {
            if bits.len() >= needed {
                break;
            }
            bits.extend_from(&Self::read_carrier(index, carrier)?);
            carriers_used += 1;
        }

        let recovered = bits.len().min(needed) - header;
        let payload = bits.slice(header..header + recovered)?;

        if recovered < declared {
            warn!(
                declared_bits = declared,
                recovered_bits = recovered,
                "grass carriers exhausted before declared length"
            );
        }
        debug!(recovered_bits = recovered, carriers_used, "grass decode complete");

        Ok(DecodedPayload {
            bytes: payload.to_bytes(),
            declared_bits: declared,
            recovered_bits: recovered,
            carriers_used,
        })
    }

    /// Compute the new field texts for one carrier from the window of
    /// `bits` starting at `cursor`. Returns the write and the advanced cursor.
    fn plan_carrier<C: GrassView>(
        index: usize,
        carrier: &C,
        bits: &Bits,
        cursor: usize,
    ) -> Result<(GrassWrite, usize), CodecError> {
        let width = Self::carrier_bits(carrier);
        let end = (cursor + width).min(bits.len());
        let window = bits.slice(cursor..end)?.padded_to(width);

        let def = required(index, carrier, GrassField::Def)?;
        for field in [GrassField::Id, GrassField::Health, GrassField::Growth] {
            required(index, carrier, field)?;
        }

        let id = window.read_uint(0, ID_BITS)?;
        let health = i128::from(window.read_uint(ID_BITS, HEALTH_BITS)?) + HEALTH_OFFSET;
        let growth = i128::from(window.read_uint(ID_BITS + HEALTH_BITS, GROWTH_BITS)?);
        let age = if width == BITS_WITH_AGE {
            Some(window.read_uint(BITS_WITHOUT_AGE, AGE_BITS)?.to_string())
        } else {
            None
        };

        let write = GrassWrite {
            id: format!("{def}{id}"),
            health: health.to_string(),
            growth: format_fixed(growth, GROWTH_PLACES),
            age,
        };
        Ok((write, cursor + width))
    }

    fn apply<C: GrassEdit>(
        index: usize,
        carrier: &mut C,
        write: GrassWrite,
    ) -> Result<(), CodecError> {
        let mut writes = vec![
            (GrassField::Id, write.id),
            (GrassField::Health, write.health),
            (GrassField::Growth, write.growth),
        ];
        if let Some(age) = write.age {
            writes.push((GrassField::Age, age));
        }
        for (field, text) in writes {
            if !carrier.set_field(field, text) {
                return Err(CodecError::malformed(index, field.tag(), "", "field is absent"));
            }
        }
        Ok(())
    }

    /// Extract the 70 (or 50) bits one carrier holds.
    fn read_carrier<C: GrassView>(index: usize, carrier: &C) -> Result<Bits, CodecError> {
        let def = required(index, carrier, GrassField::Def)?;
        let id_text = required(index, carrier, GrassField::Id)?;
        let Some(suffix) = id_text.strip_prefix(def.as_str()) else {
            return Err(CodecError::malformed(
                index,
                "id",
                id_text.clone(),
                "does not start with the def name",
            ));
        };
        let id = parse_integer(index, "id", suffix)?;

        let health_text = required(index, carrier, GrassField::Health)?;
        let health = parse_integer(index, "health", &health_text)? - HEALTH_OFFSET;

        let growth_text = required(index, carrier, GrassField::Growth)?;
        let growth = parse_growth(index, &growth_text)?;

        let mut bits = Bits::with_capacity(BITS_WITH_AGE);
        push_field(&mut bits, index, "id", id, ID_BITS)?;
        push_field(&mut bits, index, "health", health, HEALTH_BITS)?;
        push_field(&mut bits, index, "growth", growth, GROWTH_BITS)?;

        if let Some(age_text) = carrier.field(GrassField::Age) {
            let age = parse_integer(index, "age", &age_text)?;
            push_field(&mut bits, index, "age", age, AGE_BITS)?;
        }
        Ok(bits)
    }
}

fn required<C: GrassView>(
    index: usize,
    carrier: &C,
    field: GrassField,
) -> Result<String, CodecError> {
    carrier
        .field(field)
        .map(|text| text.into_owned())
        .ok_or_else(|| CodecError::malformed(index, field.tag(), "", "field is absent"))
}

fn parse_integer(index: usize, field: &'static str, text: &str) -> Result<i128, CodecError> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::malformed(index, field, text, "not an integer"));
    }
    text.parse::<i128>()
        .map_err(|_| CodecError::malformed(index, field, text, "integer out of range"))
}

fn parse_growth(index: usize, text: &str) -> Result<i128, CodecError> {
    let Some(decimal) = DecimalText::parse(text) else {
        return Err(CodecError::malformed(index, "growth", text, "not a decimal"));
    };
    if decimal.fraction_digits() < GROWTH_PLACES {
        return Err(CodecError::malformed(
            index,
            "growth",
            text,
            "fewer than 8 fractional digits",
        ));
    }
    decimal
        .scaled_truncated(GROWTH_PLACES)
        .ok_or_else(|| CodecError::malformed(index, "growth", text, "decimal out of range"))
}

fn push_field(
    bits: &mut Bits,
    index: usize,
    field: &'static str,
    value: i128,
    width: usize,
) -> Result<(), CodecError> {
    let overflow = || CodecError::Overflow {
        index,
        field,
        value,
        width,
    };
    let value = u64::try_from(value).map_err(|_| overflow())?;
    bits.push_uint(value, width).map_err(|_| overflow())
}
