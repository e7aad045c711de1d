/// Implementation of `rws capacity`.
///
/// Measures the save under every scheme. A scheme that cannot find its
/// carriers is listed with the reason instead of failing the command.
///
/// # Example output
///
/// ```text
/// Scheme        Carriers    Bits     Bytes
/// ─────────────────────────────────────────
/// grass              235   16428     2053
/// whitespace       48211   48211     6026
/// fractional        1904   15200     1900
/// ```
use std::fs;

use anyhow::{Context, Result};
use rws_codec::SchemeKind;
use rws_save::{DefaultSteganographer, SaveConfig, Steganographer};
use serde::Serialize;

use crate::CapacityArgs;

/// One row of the report.
#[derive(Serialize)]
struct Row {
    scheme: String,
    carriers: usize,
    payload_bits: usize,
    payload_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the `rws capacity` command.
///
/// # Errors
///
/// Returns an error if the save cannot be read or JSON serialization fails.
pub fn run(args: &CapacityArgs) -> Result<()> {
    let save = fs::read_to_string(&args.save)
        .with_context(|| format!("cannot read {}", args.save.display()))?;

    let rows: Vec<Row> = SchemeKind::ALL
        .iter()
        .map(|&scheme| measure(&save, scheme))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<12} {:>10} {:>8} {:>9}",
        "Scheme", "Carriers", "Bits", "Bytes"
    );
    println!("{}", "─".repeat(42));
    for row in &rows {
        match &row.error {
            Some(reason) => println!("{:<12} unavailable: {reason}", row.scheme),
            None => println!(
                "{:<12} {:>10} {:>8} {:>9}",
                row.scheme, row.carriers, row.payload_bits, row.payload_bytes
            ),
        }
    }

    Ok(())
}

fn measure(save: &str, scheme: SchemeKind) -> Row {
    let config = SaveConfig::with_scheme(scheme);
    match DefaultSteganographer.capacity(save, &config) {
        Ok(capacity) => Row {
            scheme: scheme.to_string(),
            carriers: capacity.carriers,
            payload_bits: capacity.payload_bits,
            payload_bytes: capacity.payload_bits / 8,
            error: None,
        },
        Err(e) => Row {
            scheme: scheme.to_string(),
            carriers: 0,
            payload_bits: 0,
            payload_bytes: 0,
            error: Some(e.to_string()),
        },
    }
}
