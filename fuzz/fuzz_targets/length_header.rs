#![no_main]

use libfuzzer_sys::fuzz_target;
use rws_wire::{Bits, FIELD_LENGTH_HEADER, FRACTIONAL_LENGTH_HEADER};

// Fuzz target: length header parsing on arbitrary bytes.
//
// Catches bugs in:
// - Inputs shorter than the header (must be OutOfRange, not a panic)
// - 22-bit headers that straddle byte boundaries
// - Maximum header values
fuzz_target!(|data: &[u8]| {
    let _ = FRACTIONAL_LENGTH_HEADER.read_bytes(data);
    let _ = FIELD_LENGTH_HEADER.read(&Bits::from_bytes(data));
});
