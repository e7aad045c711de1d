#![no_main]

use libfuzzer_sys::fuzz_target;
use rws_codec::{FieldCodec, Grass};

// Fuzz target: grass encode -> decode roundtrip.
//
// The first byte picks how many carriers exist and which of them lack an
// age; the rest is the payload. Whatever fits must come back unchanged.
fuzz_target!(|data: &[u8]| {
    let Some((&shape, payload)) = data.split_first() else {
        return;
    };
    let count = u32::from(shape % 32) + 1;
    let mut grass: Vec<Grass> = (0..count)
        .map(|n| {
            let age = (u32::from(shape) >> 5 & (1 << (n % 3)) == 0).then_some(n);
            Grass::new("PlantGrass", 100 + n, 20, "0.50000000", age)
        })
        .collect();

    let report = FieldCodec::encode(&mut grass, payload).unwrap();
    let decoded = FieldCodec::decode(&grass).unwrap();
    assert_eq!(decoded.declared_bits, report.stored_bits);
    if !report.is_clamped() {
        assert_eq!(decoded.bytes, payload);
    }
});
