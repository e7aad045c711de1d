//! The three worked examples, one per codec, checked down to the carrier
//! text each one leaves behind.
//!
//! - **Grass**: three carriers, the last without `<age>`, payload `01 02`.
//! - **Fractional**: six decimal leaves, payload `FF`.
//! - **Whitespace**: four lines, payload `A0`, so half the glyphs spill into
//!   the bare tail and come back through the tail sniff.

use rws_codec::whitespace::extract_tags;
use rws_codec::{
    CodecError, FieldCodec, FloatCell, FractionalCodec, Grass, GrassField, GrassView,
    WhitespaceCodec,
};

// ── Grass: 3 carriers, payload 01 02 ────────────────────────────────────────

fn three_grasses() -> Vec<Grass> {
    vec![
        Grass::new("PlantGrass", 5501, 71, "0.44017233", Some(632_007)),
        Grass::new("PlantTallGrass", 5502, 33, "0.90125512", Some(87_112)),
        Grass::new("PlantGrass", 5503, 85, "1", None),
    ]
}

#[test]
fn grass_scenario_stores_sixteen_bits() {
    let mut grass = three_grasses();
    let report = FieldCodec::encode(&mut grass, &[0x01, 0x02]).unwrap();
    assert_eq!(report.stored_bits, 16);
    assert_eq!(report.capacity_bits, 70 + 70 + 50 - 22);
    assert!(!report.is_clamped());
}

#[test]
fn grass_scenario_header_fits_first_carrier() {
    let mut grass = three_grasses();
    let before = grass.clone();
    let report = FieldCodec::encode(&mut grass, &[0x01, 0x02]).unwrap();

    // 22 + 16 = 38 bits, all inside carrier 0's 70-bit window:
    //   id     = header bits 0..18          = 1
    //   health = header bits 18..22 + "00"  = 0, stored as 5
    //   growth = payload bits 2..16, then 12 bits of padding
    //   age    = padding
    assert_eq!(report.carriers_used, 1);
    assert_eq!(grass[0].id, "PlantGrass1");
    assert_eq!(grass[0].health, "5");
    assert_eq!(grass[0].growth, format!("0.{:08}", 0b1_0000_0010 << 12));
    assert_eq!(grass[0].age.as_deref(), Some("0"));
    assert_eq!(grass[1..], before[1..]);
}

#[test]
fn grass_scenario_decodes_exactly() {
    let mut grass = three_grasses();
    FieldCodec::encode(&mut grass, &[0x01, 0x02]).unwrap();
    let decoded = FieldCodec::decode(&grass).unwrap();
    assert_eq!(decoded.bytes, vec![0x01, 0x02]);
    assert_eq!(decoded.declared_bits, 16);
    assert_eq!(decoded.carriers_used, 1);
}

#[test]
fn grass_scenario_def_is_never_written() {
    let mut grass = three_grasses();
    FieldCodec::encode(&mut grass, &[0xFF; 20]).unwrap();
    let defs: Vec<_> = grass
        .iter()
        .map(|g| g.field(GrassField::Def).unwrap().into_owned())
        .collect();
    assert_eq!(defs, ["PlantGrass", "PlantTallGrass", "PlantGrass"]);
}

// ── Fractional: 6 carriers, payload FF ──────────────────────────────────────

#[test]
fn fractional_scenario() {
    let mut floats: Vec<FloatCell> = ["17.25", "0.5", "3.14159", "250.75", "8.0625", "-2.5"]
        .into_iter()
        .map(FloatCell::new)
        .collect();
    let report = FractionalCodec::encode(&mut floats, &[0xFF]).unwrap();
    assert_eq!(report.stored_bits, 8);

    let texts: Vec<&str> = floats.iter().map(|f| f.0.as_str()).collect();
    assert_eq!(
        texts,
        ["17.000", "0.000", "3.000", "250.001", "8.255", "-2.5"]
    );

    let decoded = FractionalCodec::decode(&floats).unwrap();
    assert_eq!(decoded.bytes, vec![255]);
    assert_eq!(decoded.carriers_used, 5);
}

// ── Whitespace: 4 lines, payload A0 ─────────────────────────────────────────

fn one_per_line(markup: &str) -> Result<String, CodecError> {
    Ok(extract_tags(markup).join("\n"))
}

#[test]
fn whitespace_scenario_spills_into_tail() {
    let cover = "<colony>\n\t<name>Nova</name>\n\t<seed>ice</seed>\n</colony>\n";
    let encoded = WhitespaceCodec::encode(cover, &[0b1010_0000], &one_per_line).unwrap();

    assert_eq!(
        encoded.text,
        "<colony>\t\r\n<name>Nova</name> \r\n<seed>ice</seed>\t\r\n</colony> \r\n    "
    );
    assert_eq!(encoded.report.carriers_used, 4);
    assert_eq!(encoded.report.spilled_bits, 4);

    let decoded = WhitespaceCodec::decode(&encoded.text).unwrap();
    assert_eq!(decoded.bytes, vec![0b1010_0000]);
}
