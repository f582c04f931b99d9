//! evlog Dump Tool
//!
//! Command-line inspector for event log files: lists records or verifies
//! framing integrity.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use evlog::{scan, LogReader, Result};

/// evlog inspector
#[derive(Parser, Debug)]
#[command(name = "evlog-dump")]
#[command(about = "Inspect evlog event log files")]
struct Args {
    /// Path to the log file
    log: PathBuf,

    /// Stop after this many records
    #[arg(short, long)]
    limit: Option<usize>,

    /// Verify framing integrity instead of listing records
    #[arg(long)]
    verify: bool,

    /// Show the first N payload bytes of each record as hex
    #[arg(long, default_value_t = 0, value_name = "N")]
    preview: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    if args.verify {
        let report = scan(&args.log)?;
        println!("records:        {}", report.records);
        println!("complete bytes: {}", report.complete_bytes);
        if report.is_clean() {
            println!("clean end of stream");
        } else {
            println!("truncated tail: {} bytes", report.trailing_bytes);
        }
        return Ok(());
    }

    let reader = LogReader::from_path(&args.log)?;
    let limit = args.limit.unwrap_or(usize::MAX);
    for (index, result) in reader.records().take(limit).enumerate() {
        let record = result?;
        let uri = record.uri.to_string();
        print!("#{index:<6} {uri:<48} {:>12} bytes", record.payload.len());
        if args.preview > 0 {
            let n = record.payload.len().min(args.preview);
            let hex: String = record.payload[..n]
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect();
            print!("  {hex}");
        }
        println!();
    }
    Ok(())
}
