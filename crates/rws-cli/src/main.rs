/// RimWorld save steganography: hide a file inside a `.rws` save and get it
/// back out again.
///
/// # Command overview
///
/// ```text
/// rws <COMMAND> [OPTIONS]
///
/// Commands:
///   encode     Hide a payload file inside a save
///   decode     Recover a payload hidden by `encode`
///   capacity   Show how much each scheme can hide in a save
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Debug logging (RUST_LOG overrides)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                        |
/// |------|------------------------------------------------|
/// | 0    | Success                                        |
/// | 1    | Error (I/O failure, malformed save, etc.)      |
///
/// Logs and errors go to stderr so a decoded payload can be piped from stdout.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use rws_codec::SchemeKind;
use tracing_subscriber::EnvFilter;

mod cmd_capacity;
mod cmd_decode;
mod cmd_encode;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Conceal data in RimWorld save files.
#[derive(Parser)]
#[command(name = "rws", version, about = "RimWorld save steganography")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Hide a payload file inside a save.
    Encode(EncodeArgs),
    /// Recover a payload hidden by `encode`.
    Decode(DecodeArgs),
    /// Show how much each scheme can hide in a save.
    Capacity(CapacityArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `rws encode`.
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                                │
/// ├──────────────┼───────────────────────────────────────────────────────┤
/// │ -s SAVE      │ Cover save file                                       │
/// │ -i PAYLOAD   │ File to hide                                          │
/// │ -o OUT       │ Where to write the result (default: overwrite SAVE)   │
/// │ --scheme     │ grass (default) | whitespace | fractional             │
/// └──────────────┴───────────────────────────────────────────────────────┘
/// ```
///
/// Payloads larger than the save can hold are clamped; the summary line
/// says how much was actually stored.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Cover save file.
    #[arg(short, long)]
    pub save: PathBuf,

    /// File to hide.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output save file. Defaults to overwriting the cover.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Carrier scheme.
    #[arg(long, default_value = "grass")]
    pub scheme: SchemeKind,
}

/// Arguments for `rws decode`.
///
/// The whitespace scheme has no length field, so its output may carry a few
/// trailing zero bytes of padding.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Save file holding a payload.
    #[arg(short, long)]
    pub save: PathBuf,

    /// Write the payload here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the payload as hex.
    #[arg(long)]
    pub hex: bool,

    /// Carrier scheme.
    #[arg(long, default_value = "grass")]
    pub scheme: SchemeKind,

    /// Fail instead of warning when the save holds less than its header
    /// declares.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `rws capacity`.
#[derive(clap::Args)]
pub struct CapacityArgs {
    /// Save file to measure.
    #[arg(short, long)]
    pub save: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Capacity(args) => cmd_capacity::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
