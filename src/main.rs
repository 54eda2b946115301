use clap::{Parser, Subcommand};
use serde::Serialize;
use textcodec::text::{to_string_lossy, units};
use textcodec::{resolve, CodecError, Encoding, Written};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "textcodec", about = "Convert between text and bytes under a named encoding")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode TEXT to bytes and print them as hex
    Encode {
        /// Encoding name or alias (utf8, ascii, ucs2, hex, base64, binary_string, ...)
        #[arg(short, long, default_value = "utf8")]
        encoding: String,
        /// Destination size in bytes (default: exactly byte_length)
        #[arg(short, long)]
        capacity: Option<usize>,
        /// Start of the write window inside the destination
        #[arg(short, long, default_value = "0")]
        offset: usize,
        /// Print a JSON report instead of plain text
        #[arg(long)]
        json: bool,
        #[arg(value_name = "TEXT")]
        input: String,
    },
    /// Decode hex-given BYTES and print the resulting text
    Decode {
        #[arg(short, long, default_value = "utf8")]
        encoding: String,
        bytes: String,
    },
    /// Print the number of bytes TEXT encodes to
    Length {
        #[arg(short, long, default_value = "utf8")]
        encoding: String,
        #[arg(value_name = "TEXT")]
        input: String,
    },
    /// List supported encodings and their aliases
    List,
}

#[derive(Serialize)]
struct EncodeReport {
    encoding: Encoding,
    bytes:    String,
    #[serde(flatten)]
    written:  Written,
}

/// Explicit `--capacity`, or just enough room for `needed` bytes after `offset`.
fn destination_size(
    capacity: Option<usize>,
    offset:   usize,
    needed:   usize,
) -> Result<usize, CodecError> {
    match capacity {
        Some(c) => Ok(c),
        None => offset.checked_add(needed).ok_or_else(|| {
            CodecError::InvalidArgument(format!("offset {offset} overflows the destination size"))
        }),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {

        // ── Encode ───────────────────────────────────────────────────────────
        Commands::Encode { encoding, capacity, offset, json, input } => {
            let codec = resolve(&encoding)?;
            let text = units(&input);
            let capacity = destination_size(capacity, offset, codec.byte_length(&text))?;
            let mut buf = vec![0u8; capacity];
            let length = capacity.saturating_sub(offset);
            let written = codec.encode(&mut buf, &text, offset, length)?;
            let bytes = hex::encode(&buf[offset..offset + written.bytes_written]);

            if json {
                let report = EncodeReport { encoding: codec.encoding(), bytes, written };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{bytes}");
                println!(
                    "  {} byte(s) written, {}/{} unit(s) consumed",
                    written.bytes_written, written.units_consumed, text.len()
                );
            }
        }

        // ── Decode ───────────────────────────────────────────────────────────
        Commands::Decode { encoding, bytes } => {
            let codec = resolve(&encoding)?;
            let raw = hex::decode(bytes.trim())?;
            println!("{}", to_string_lossy(&codec.decode(&raw)?));
        }

        // ── Length ───────────────────────────────────────────────────────────
        Commands::Length { encoding, input } => {
            let codec = resolve(&encoding)?;
            println!("{}", codec.byte_length(&units(&input)));
        }

        // ── List ─────────────────────────────────────────────────────────────
        Commands::List => {
            for enc in Encoding::ALL {
                println!("{:<18} {}", enc.name(), enc.aliases().join(", "));
            }
        }
    }

    Ok(())
}
