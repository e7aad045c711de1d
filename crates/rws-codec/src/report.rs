use crate::scheme::SchemeKind;

/// What an encode pass actually stored.
///
/// Clamping a payload to the cover's capacity is normal operation, so it is
/// reported here rather than raised as an error.
///
/// ```text
/// ┌───────────────┬────────────────────────────────────────────────────┐
/// │ Field         │ Meaning                                            │
/// ├───────────────┼────────────────────────────────────────────────────┤
/// │ requested_bits│ payload length × 8                                 │
/// │ stored_bits   │ payload bits the length header declares            │
/// │ capacity_bits │ payload bits the cover could hold (header excluded)│
/// │ carriers_used │ carriers rewritten, counted from the first         │
/// │ spilled_bits  │ whitespace glyphs appended past the last line      │
/// └───────────────┴────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeReport {
    pub scheme: SchemeKind,
    pub requested_bits: usize,
    pub stored_bits: usize,
    pub capacity_bits: usize,
    pub carriers_used: usize,
    pub spilled_bits: usize,
}

impl EncodeReport {
    pub fn is_clamped(&self) -> bool {
        self.stored_bits < self.requested_bits
    }

    /// Stored payload size in whole bytes, rounding a partial byte up.
    pub fn stored_bytes(&self) -> usize {
        self.stored_bits.div_ceil(8)
    }
}

/// A recovered payload and how much of it the cover actually held.
///
/// When the carriers run out before the declared length is reached the
/// bytes recovered so far are still returned, with
/// [`is_truncated`](Self::is_truncated) set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedPayload {
    pub bytes: Vec<u8>,
    pub declared_bits: usize,
    pub recovered_bits: usize,
    pub carriers_used: usize,
}

impl DecodedPayload {
    pub fn is_truncated(&self) -> bool {
        self.recovered_bits < self.declared_bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
