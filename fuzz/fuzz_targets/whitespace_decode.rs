#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: whitespace glyph extraction on arbitrary text.
//
// Catches bugs in:
// - Lone CR or LF, empty lines, lines that are only glyphs
// - Ambiguous final fragments
// - Multi-byte characters next to glyphs
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let _ = rws_codec::WhitespaceCodec::decode(text);
});
