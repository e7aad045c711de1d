//! Write a synthetic save and a matching payload for manual CLI runs.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_save -p rws-tests -- [DIR] [GRASS] [DECIMALS]
//! rws capacity -s DIR/colony.rws
//! rws encode -s DIR/colony.rws -i DIR/payload.bin -o DIR/hidden.rws
//! ```
//!
//! Defaults: `target/fixtures`, 120 grass things, 200 decimal stats.

#![allow(clippy::pedantic)]

use std::path::PathBuf;

use rws_tests::{SaveBuilder, payload};

fn main() {
    let mut args = std::env::args().skip(1);
    let dir = args
        .next()
        .map_or_else(|| PathBuf::from("target/fixtures"), PathBuf::from);
    let grasses: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(120);
    let decimals: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(200);

    let builder = SaveBuilder::new()
        .grasses(grasses - grasses / 4, grasses / 4)
        .thing("Building", "Wall")
        .thing("Plant", "PlantTreeOak")
        .decimals(decimals);
    let save = builder.build();
    let data = payload(32);

    std::fs::create_dir_all(&dir).expect("create_dir_all");
    let save_path = dir.join("colony.rws");
    let payload_path = dir.join("payload.bin");
    std::fs::write(&save_path, &save).expect("write save");
    std::fs::write(&payload_path, &data).expect("write payload");

    println!(
        "  wrote {} ({} grass, {} decimals)",
        save_path.display(),
        builder.grass_count(),
        builder.decimal_count()
    );
    println!("  wrote {} ({})", payload_path.display(), hex::encode(&data));
}
