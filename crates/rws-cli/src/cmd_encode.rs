/// Implementation of `rws encode`.
///
/// Reads the cover save and the payload, hides the payload with the chosen
/// scheme, and writes the new save. Without `-o` the cover is overwritten.
///
/// # Example output
///
/// ```text
/// grass: stored 2048 of 2048 bytes in 235 carriers
/// wrote Colony.rws
/// ```
use std::fs;

use anyhow::{Context, Result};
use rws_save::{DefaultSteganographer, SaveConfig, Steganographer};
use tracing::debug;

use crate::EncodeArgs;

/// Run the `rws encode` command.
///
/// # Errors
///
/// Returns an error if either file cannot be read, the save is malformed,
/// the scheme finds too few carriers, or the output cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let save = fs::read_to_string(&args.save)
        .with_context(|| format!("cannot read {}", args.save.display()))?;
    let payload =
        fs::read(&args.input).with_context(|| format!("cannot read {}", args.input.display()))?;
    debug!(save_bytes = save.len(), payload_bytes = payload.len(), "inputs loaded");

    let config = SaveConfig::with_scheme(args.scheme);
    let concealed = DefaultSteganographer
        .conceal(&save, &payload, &config)
        .with_context(|| format!("failed to encode into {}", args.save.display()))?;

    let out = args.output.as_ref().unwrap_or(&args.save);
    fs::write(out, concealed.document.as_bytes())
        .with_context(|| format!("cannot write {}", out.display()))?;

    let report = concealed.report;
    print!(
        "{}: stored {} of {} bytes in {} carriers",
        report.scheme,
        report.stored_bytes(),
        payload.len(),
        report.carriers_used
    );
    if report.spilled_bits > 0 {
        print!(" ({} glyphs past the last line)", report.spilled_bits);
    }
    println!();
    if report.is_clamped() {
        println!(
            "payload clamped: capacity is {} bytes",
            report.capacity_bits / 8
        );
    }
    println!("wrote {}", out.display());

    Ok(())
}
