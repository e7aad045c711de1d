#![no_main]

use libfuzzer_sys::fuzz_target;
use rws_wire::Bits;

// Fuzz target: bytes -> bits -> bytes, plus uint reads at every offset.
//
// Takes the first byte as a field width (1..=64) and reads fields of that
// width across the input, re-packing each one and checking it matches.
fuzz_target!(|data: &[u8]| {
    let bits = Bits::from_bytes(data);
    assert_eq!(bits.to_bytes(), data);

    let Some((&first, _)) = data.split_first() else {
        return;
    };
    let width = usize::from(first % 64) + 1;
    let mut offset = 0;
    while let Ok(value) = bits.read_uint(offset, width) {
        let packed = Bits::from_uint(value, width).unwrap();
        assert_eq!(packed, bits.slice(offset..offset + width).unwrap());
        offset += width;
    }
});
