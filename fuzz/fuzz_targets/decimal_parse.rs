#![no_main]

use libfuzzer_sys::fuzz_target;
use rws_codec::decimal::format_fixed;
use rws_codec::DecimalText;

// Fuzz target: decimal text parsing and fixed-point arithmetic.
//
// Catches bugs in:
// - Signs, empty integer or fraction parts, stray characters
// - Digit strings too long for i128 (must be None, not overflow)
// - Exponents that push the point past every digit
// - Rounding carry at the last kept place
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some(decimal) = DecimalText::parse(text) else {
        return;
    };
    let _ = decimal.floor();
    let _ = decimal.scaled_rounded(3);
    if let Some(scaled) = decimal.scaled_truncated(8) {
        let rendered = format_fixed(scaled, 8);
        let again = DecimalText::parse(&rendered).expect("format_fixed output parses");
        assert_eq!(again.scaled_truncated(8), Some(scaled));
    }
});
