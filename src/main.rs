use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use trade_processor::{logging, ProcessorConfig, TracingLog, TradeProcessor};

/// Validate a trade file and load it into PostgreSQL via insert_trade
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Trade file to read (falls back to TRADE_INPUT_PATH, then stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// PostgreSQL connection URL (falls back to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    logging::init_tracing();

    // Command line flags win over the environment
    let config = ProcessorConfig::from_env(args.database_url, args.input)?;

    let processor = TradeProcessor::from_config(&config, Arc::new(TracingLog));

    let summary = match &config.input_path {
        Some(path) => processor
            .process_file(path)
            .with_context(|| format!("processing {}", path.display()))?,
        None => processor
            .process_reader(io::stdin().lock())
            .context("processing stdin")?,
    };

    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
    }

    Ok(())
}
