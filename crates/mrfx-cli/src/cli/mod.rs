//! CLI for the mrfx index extractor.

use anyhow::Result;
use clap::Parser;
use mrfx_core::config;
use mrfx_core::extract::{self, ExtractOptions};
use mrfx_core::report::{self, OutputFormat};
use std::path::PathBuf;

/// Extract NY PPO machine-readable file URLs from a price-transparency index.
#[derive(Debug, Parser)]
#[command(name = "mrfx")]
#[command(about = "Extract NY PPO machine-readable file URLs from a price-transparency index", long_about = None)]
pub struct Cli {
    /// Output file path (default depends on --format: ny_ppo_urls.txt or ny_ppo_urls.json).
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output shape: "text" (grouped URL lists) or "json" (structured document).
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Override the configured index URL.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(cli.format.default_filename()));
    let opts = ExtractOptions {
        index_url: cli.url,
        capture_records: cli.format == OutputFormat::Json,
    };

    println!(
        "Fetching index file from: {}",
        opts.index_url.as_deref().unwrap_or(&cfg.index_url)
    );
    println!("Looking for PPO plans in New York state...\n");

    let result = extract::run(&cfg, &opts)?;

    println!("Total items processed: {}", result.processed);
    println!("Networks found: {}", result.matches.network_count());
    println!(
        "Unique file IDs (deduplicated across CDNs): {}",
        result.matches.unique_file_ids()
    );

    report::write_report(&output, cli.format, &result)?;
    println!("Results saved to: {}", output.display());
    Ok(())
}
