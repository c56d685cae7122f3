//! Starlog - journal telemetry decoder

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use starlog_cli::{ingest, summary};
use starlog_common::logging::{init_logging, LogConfig, LogLevel};
use starlog_journal::Pipeline;

#[derive(Parser, Debug)]
#[command(name = "starlog")]
#[command(author, version, about = "Journal telemetry decoder")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Decode journal records to JSON lines on stdout
    Decode {
        /// Journal file, or directory of *.log files
        path: PathBuf,

        /// Keep watching the newest file for appended records
        #[arg(short, long)]
        follow: bool,
    },

    /// Ingest journals and print the aggregate summary
    Summary {
        /// Journal file, or directory of *.log files
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let log_config = LogConfig::builder().level(log_level).build();
    init_logging(&log_config)?;

    match cli.command {
        Command::Decode { path, follow } => {
            let mut pipeline = Pipeline::new();

            let mut emit = |event: &starlog_journal::DecodedEvent| {
                match serde_json::to_string(event) {
                    Ok(line) => println!("{line}"),
                    Err(error) => tracing::warn!(%error, "failed to serialize event"),
                }
            };
            ingest::ingest_path(&mut pipeline, &path, follow, &mut emit).await?;

            let stats = pipeline.stats();
            info!(
                records = stats.records_read,
                decoded = stats.decoded,
                skipped = stats.skipped,
                unknown = stats.unknown_events,
                "ingestion finished"
            );
        },
        Command::Summary { path } => {
            let mut pipeline = Pipeline::new();
            ingest::ingest_path(&mut pipeline, &path, false, &mut |_| {}).await?;
            println!("{}", summary::render(&pipeline));
        },
    }

    Ok(())
}
