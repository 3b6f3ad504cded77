use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr, bail};
use resave::{FileProfile, FormatConfig, SaveReadable, SaveSession, codec};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resave", about = "Inspect and edit chained-XOR save files", version)]
struct Cli {
    /// JSON format description; defaults to the built-in layout.
    #[arg(long, global = true, value_name = "FORMAT.json")]
    format: Option<PathBuf>,
    /// Skip the file size and marker checks on open.
    #[arg(long, global = true)]
    no_check: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print an unsigned little-endian value.
    Get {
        file: PathBuf,
        #[arg(value_parser = parse_number)]
        offset: u64,
        length: usize,
    },
    /// Overwrite a value and save the result.
    Set {
        file: PathBuf,
        #[arg(value_parser = parse_number)]
        offset: u64,
        length: usize,
        #[arg(value_parser = parse_number)]
        value: u64,
        /// Output path (default: <stem>_edited.bin next to the input).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a flag bit, or set it with --set.
    Bit {
        file: PathBuf,
        #[arg(value_parser = parse_number)]
        offset: u64,
        bit_index: usize,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
        set: Option<u8>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the plain image of an on-disk file.
    Decode { input: PathBuf, output: PathBuf },
    /// Write the on-disk image of a plain file. The checksum is not touched.
    Encode { input: PathBuf, output: PathBuf },
    /// Compare the stored checksum with the computed one.
    Checksum { file: PathBuf },
}

/// Decimal, or hex with a `0x` prefix.
fn parse_number(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number {s:?}: {e}"))
}

fn to_offset(offset: u64) -> Result<usize> {
    usize::try_from(offset).wrap_err_with(|| format!("offset {offset:#x} does not fit in usize"))
}

fn edited_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("savedata");
    input.with_file_name(format!("{stem}_edited.bin"))
}

fn load_config(cli: &Cli) -> Result<FormatConfig> {
    let mut config = match &cli.format {
        Some(path) => FormatConfig::from_path(path)
            .wrap_err_with(|| format!("failed to load format: {}", path.display()))?,
        None => FormatConfig::default(),
    };
    if cli.no_check {
        config.profile = FileProfile::permissive();
    }
    Ok(config)
}

fn open(path: &Path, config: &FormatConfig) -> Result<SaveSession> {
    SaveSession::open(path, config.clone()).wrap_err_with(|| format!("failed to open {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Command::Get { file, offset, length } => {
            let session = open(file, &config)?;
            let value = session.get_value(to_offset(*offset)?, *length)?;
            println!("{value}");
        }
        Command::Set {
            file,
            offset,
            length,
            value,
            output,
        } => {
            let offset = to_offset(*offset)?;
            let mut session = open(file, &config)?;
            let before = session.get_value(offset, *length)?;
            session.set_value(offset, *length, *value)?;
            let out = output.clone().unwrap_or_else(|| edited_path(file));
            session.save(&out)?;
            println!("Changed {before} -> {value} at {offset:#x} ({})", out.display());
        }
        Command::Bit {
            file,
            offset,
            bit_index,
            set,
            output,
        } => {
            let offset = to_offset(*offset)?;
            let mut session = open(file, &config)?;
            match set {
                None => println!("{}", u8::from(session.get_bit(offset, *bit_index)?)),
                Some(bit) => {
                    session.set_bit(offset, *bit_index, *bit == 1)?;
                    let out = output.clone().unwrap_or_else(|| edited_path(file));
                    session.save(&out)?;
                    println!("Set bit {bit_index} at {offset:#x} to {bit} ({})", out.display());
                }
            }
        }
        Command::Decode { input, output } => {
            let raw = std::fs::read(input).wrap_err_with(|| format!("failed to read {}", input.display()))?;
            std::fs::write(output, codec::decode_with_key(&raw, &config.magic_key))?;
        }
        Command::Encode { input, output } => {
            let plain = std::fs::read(input).wrap_err_with(|| format!("failed to read {}", input.display()))?;
            std::fs::write(output, codec::encode_with_key(&plain, &config.magic_key))?;
        }
        Command::Checksum { file } => {
            let session = open(file, &config)?;
            let stored = session.stored_checksum()?;
            let computed = session.computed_checksum()?;
            println!("stored:   {stored:#010x}");
            println!("computed: {computed:#010x}");
            if stored != computed {
                bail!("checksum mismatch");
            }
        }
    }
    Ok(())
}
