/// Implementation of `rws decode`.
///
/// Recovers the payload from a save and writes it raw to `-o`, raw to
/// stdout, or as hex with `--hex`.
///
/// A save whose carriers run out before the declared length still yields
/// the bytes that were there. That is a warning by default and an error
/// under `--strict`. Schemes without a length header get a note when the
/// output ends in zero bytes.
use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result, bail};
use rws_save::{DefaultSteganographer, SaveConfig, Steganographer};

use crate::DecodeArgs;

/// Run the `rws decode` command.
///
/// # Errors
///
/// Returns an error if the save cannot be read or decoded, the output
/// cannot be written, or `--strict` is set and the payload is truncated.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let save = fs::read_to_string(&args.save)
        .with_context(|| format!("cannot read {}", args.save.display()))?;

    let config = SaveConfig::with_scheme(args.scheme);
    let decoded = DefaultSteganographer
        .reveal(&save, &config)
        .with_context(|| format!("failed to decode {}", args.save.display()))?;

    if decoded.is_truncated() {
        let message = format!(
            "payload truncated: header declares {} bits, save holds {}",
            decoded.declared_bits, decoded.recovered_bits
        );
        if args.strict {
            bail!(message);
        }
        eprintln!("warning: {message}");
    }

    if !args.scheme.has_length_header() && decoded.bytes.last() == Some(&0) {
        eprintln!(
            "note: {} saves carry no length header; trailing zero bytes may be padding",
            args.scheme
        );
    }

    let bytes = if args.hex {
        let mut text = hex::encode(&decoded.bytes);
        text.push('\n');
        text.into_bytes()
    } else {
        decoded.into_bytes()
    };

    if let Some(path) = &args.output {
        fs::write(path, &bytes).with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        io::stdout()
            .lock()
            .write_all(&bytes)
            .context("cannot write to stdout")?;
    }

    Ok(())
}
