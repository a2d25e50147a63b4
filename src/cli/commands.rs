//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mtags")]
#[command(about = "Decode and analyze microtag logs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a tag log and print the reconstructed listing
    Analyze {
        /// Tag log file (8-character codes, one per line)
        input: PathBuf,

        /// Definition table file (0xHHHH, kind:alias)
        #[arg(short, long)]
        defs: Option<PathBuf>,

        /// TOML profile with definitions path and tick scale
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Tick rate for time conversion (overrides the profile)
        #[arg(long, value_name = "HZ")]
        ticks_per_second: Option<f64>,

        /// Time unit label used with --ticks-per-second
        #[arg(long, default_value = "s")]
        unit: String,

        /// Decimal precision used with --ticks-per-second
        #[arg(long, default_value_t = 3)]
        precision: usize,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },

    /// Decode a single 8-character tag code
    Decode {
        /// Encoded tag code
        code: String,
    },

    /// Encode a tag id and data word into its 8-character code
    Encode {
        /// Tag id (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_u16)]
        id: u16,

        /// Data word (decimal or 0x-prefixed hex)
        #[arg(value_parser = parse_u32)]
        data: u32,
    },
}

fn parse_u16(value: &str) -> Result<u16, String> {
    parse_number(value).and_then(|n| {
        u16::try_from(n).map_err(|_| format!("id out of range: {}", value))
    })
}

fn parse_u32(value: &str) -> Result<u32, String> {
    parse_number(value).and_then(|n| {
        u32::try_from(n).map_err(|_| format!("data out of range: {}", value))
    })
}

fn parse_number(value: &str) -> Result<u64, String> {
    let result = if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        value.parse()
    };
    result.map_err(|_| format!("not a number: {}", value))
}
