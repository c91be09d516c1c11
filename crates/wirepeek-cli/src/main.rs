//! wirepeek - Inspect protobuf-encoded buffers without a schema
//!
//! This tool takes a captured buffer (hex or base64 string, snapshot file,
//! binary file or standard input) and prints its field structure.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;
use wirepeek_core::{
    decode_input, decode_text, read_input_file, render_hex_data, render_walk, Decoder,
    DecoderConfig, FieldWriter, RenderConfig, StatsWriter, DEFAULT_MAX_DEPTH,
};

/// Inspect protobuf-encoded buffers without a schema
#[derive(Parser, Debug)]
#[command(name = "wirepeek")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Write the decoded bytes to stdout instead of the structure
    #[arg(long)]
    raw: bool,

    /// Deepest embedded message to attempt
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, env = "WIREPEEK_MAX_DEPTH")]
    max_depth: usize,

    /// Number of leading bytes shown for binary values
    #[arg(long, default_value_t = 20)]
    preview: usize,

    /// Indentation unit for nested fields
    #[arg(long, default_value = "  ")]
    indent: String,

    /// Print field statistics after the structure
    #[arg(long)]
    stats: bool,

    /// Do not echo the input as hex after the structure
    #[arg(long)]
    no_hex: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Snapshot file, binary file, or hex/base64 string to decode
    input: Option<String>,

    /// Read the buffer from standard input
    #[arg(long)]
    stdin: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let data = if cli.input.stdin {
        read_stdin()?
    } else if let Some(ref input) = cli.input.input {
        load_input(input)?
    } else {
        bail!("Either INPUT or --stdin must be specified")
    };

    eprintln!("Input: {} bytes", data.len());

    if cli.raw {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&data)
            .context("Failed to write raw bytes to stdout")?;
        stdout.flush()?;
        return Ok(());
    }

    print!("{}", inspect(&cli, &data)?);
    Ok(())
}

/// Decode `data` and render the report requested by `cli`
fn inspect(cli: &Cli, data: &[u8]) -> Result<String> {
    let decoder = Decoder::with_config(DecoderConfig::new().max_depth(cli.max_depth));
    let walk = decoder.walk(data);

    if let Some((offset, error)) = walk.error() {
        info!("Stopped at offset {} of {}: {}", offset, walk.input_len, error);
    }

    let config = RenderConfig::new()
        .indent_str(cli.indent.clone())
        .hex_preview_bytes(cli.preview);
    let mut report = render_walk(&walk, &config);

    if !cli.no_hex {
        report.push_str(&render_hex_data(data));
    }

    if cli.stats {
        let mut stats = StatsWriter::default();
        stats.write_records(&walk.fields, 0)?;
        report.push_str(&format!("{}\n", stats.summary()));
    }

    Ok(report)
}

/// Resolve the positional input: an existing path, or else hex or base64 text
fn load_input(input: &str) -> Result<Vec<u8>> {
    let path = Path::new(input);
    if path.is_file() {
        return Ok(read_input_file(path)?);
    }

    decode_text(input)
        .with_context(|| format!("Input is neither an existing file nor hex/base64 text: {}", input))
}

/// Read all of standard input
fn read_stdin() -> Result<Vec<u8>> {
    let mut content = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut content)
        .context("Failed to read standard input")?;

    debug!("Read {} bytes from stdin", content.len());
    decode_input(content).context("Failed to decode standard input")
}
