use std::path::PathBuf;

use clap::Parser;

/// Every argument has a default, so a bare invocation performs the full
/// create-and-load sequence against a local server. The database password is
/// deliberately absent here; it comes from the `DB_PASSWORD` environment
/// variable.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Create PostgreSQL tables and bulk-load CSV datasets via COPY",
    long_about = None
)]
pub struct Cli {
    /// Directory containing the source CSV files
    #[arg(short = 'd', long = "data-dir", default_value = "data")]
    pub data_dir: PathBuf,
    /// Database server host
    #[arg(long, default_value = "localhost")]
    pub host: String,
    /// Database server port
    #[arg(long, default_value_t = 5432)]
    pub port: u16,
    /// Database name
    #[arg(long, default_value = "warby_parker")]
    pub dbname: String,
    /// Database user
    #[arg(long, default_value = "postgres")]
    pub user: String,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter, default_value = ",")]
    pub delimiter: u8,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
