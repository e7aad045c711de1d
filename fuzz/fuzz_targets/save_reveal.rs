#![no_main]

use libfuzzer_sys::fuzz_target;
use rws_codec::SchemeKind;
use rws_save::{DefaultSteganographer, SaveConfig, Steganographer};

// Fuzz target: full reveal path on arbitrary documents.
//
// Runs every scheme's reveal and capacity over the input.
// Catches bugs in:
// - XML parse failures surfacing as panics
// - Things paths that dead-end or point at text
// - Grass with missing or non-numeric fields
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for scheme in SchemeKind::ALL {
        let config = SaveConfig::with_scheme(scheme);
        let _ = DefaultSteganographer.reveal(text, &config);
        let _ = DefaultSteganographer.capacity(text, &config);
    }
});
