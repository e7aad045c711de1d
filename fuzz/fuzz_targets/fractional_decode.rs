#![no_main]

use libfuzzer_sys::fuzz_target;
use rws_codec::{FloatCell, FractionalCodec};

// Fuzz target: fractional decode over arbitrary carrier text.
//
// Each input line becomes one carrier.
// Catches bugs in:
// - Headers declaring more bytes than carriers remain
// - Carriers with fewer than three fractional digits
// - Byte values above 255 and negative carriers
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let floats: Vec<FloatCell> = text.lines().map(FloatCell::new).collect();
    let _ = FractionalCodec::decode(&floats);
});
