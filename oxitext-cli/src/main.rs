//! OxiText CLI - text transcoding between WHATWG encodings
//!
//! Converts files or standard streams from one encoding to another and
//! answers label questions against the web and email profiles.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{ConvertOptions, cmd_convert, cmd_labels, cmd_resolve};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oxitext")]
#[command(
    author,
    version,
    about = "Pure Rust text transcoding - WHATWG Encoding Standard"
)]
#[command(long_about = "
OxiText converts text between the encodings of the WHATWG Encoding Standard.
Supported: UTF-8, UTF-16LE/BE, UTF-7 (email), 28 single-byte code pages,
Shift_JIS, EUC-JP, ISO-2022-JP, EUC-KR, Big5, GBK and GB18030.

Examples:
  oxitext convert --from shift_jis --to utf-8 input.txt
  oxitext convert -f utf-8 -t iso-2022-jp --ncr -o mail.txt message.txt
  cat page.html | oxitext convert -f windows-1252 -t utf-8
  oxitext resolve latin1
  oxitext resolve --email iso-8859-15 --json
  oxitext labels --encoding gbk

Set RUST_LOG (for example RUST_LOG=oxitext=trace) for detailed logging.
")]
struct Cli {
    /// Increase logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert text from one encoding to another
    #[command(alias = "c")]
    Convert {
        /// Input file (stdin if omitted or "-")
        input: Option<PathBuf>,

        /// Source encoding label
        #[arg(short, long, default_value = "utf-8")]
        from: String,

        /// Target encoding label
        #[arg(short, long, default_value = "utf-8")]
        to: String,

        /// Resolve labels with the email profile (UTF-7, strict US-ASCII)
        #[arg(short, long)]
        email: bool,

        /// Write unmappable characters as numeric character references
        #[arg(long)]
        ncr: bool,

        /// Do not let a byte order mark override the source encoding
        #[arg(long)]
        no_bom: bool,

        /// Output file (stdout if omitted or "-")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print conversion counters to stderr
        #[arg(short, long)]
        stats: bool,
    },

    /// Resolve a label to its canonical encoding name
    #[command(alias = "r")]
    Resolve {
        /// Encoding label
        label: String,

        /// Use the email profile
        #[arg(short, long)]
        email: bool,

        /// Accept labels that map to the replacement encoding
        #[arg(long)]
        allow_replacement: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// List supported encodings and their labels
    #[command(alias = "l")]
    Labels {
        /// Only show the encoding this label resolves to
        #[arg(long)]
        encoding: Option<String>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input,
            from,
            to,
            email,
            ncr,
            no_bom,
            output,
            stats,
        } => cmd_convert(&ConvertOptions {
            input: input.as_deref(),
            output: output.as_deref(),
            from: &from,
            to: &to,
            email,
            ncr,
            sniff_bom: !no_bom,
            stats,
        }),
        Commands::Resolve {
            label,
            email,
            allow_replacement,
            json,
        } => cmd_resolve(&label, email, allow_replacement, json),
        Commands::Labels { encoding, json } => cmd_labels(encoding.as_deref(), json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
