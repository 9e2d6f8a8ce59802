//! ADNI Dataset CLI
//!
//! Command-line utilities for inspecting an on-disk ADNI layout before
//! training: per-category sample counts and a full decode pass.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use adni_dataset::utils::logging::{init_logging, LogConfig};
use adni_dataset::AdniDataset;

/// ADNI brain-scan dataset inspection
#[derive(Parser, Debug)]
#[command(name = "adni-dataset")]
#[command(version)]
#[command(about = "Inspect and verify ADNI brain-scan dataset layouts", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print sample counts for a split
    Stats {
        /// Path to the dataset root directory
        #[arg(short, long, default_value = "data/adni")]
        data_dir: String,

        /// Split to index (subdirectory of the root)
        #[arg(short, long, default_value = "train")]
        split: String,

        /// Emit statistics as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Decode every indexed scan and report failures
    Verify {
        /// Path to the dataset root directory
        #[arg(short, long, default_value = "data/adni")]
        data_dir: String,

        /// Split to index (subdirectory of the root)
        #[arg(short, long, default_value = "train")]
        split: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    init_logging(&log_config).map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Stats {
            data_dir,
            split,
            json,
        } => stats(&data_dir, &split, json),
        Commands::Verify { data_dir, split } => verify(&data_dir, &split),
    }
}

fn stats(data_dir: &str, split: &str, json: bool) -> Result<()> {
    let dataset = AdniDataset::with_split(data_dir, split)?;
    let stats = dataset.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        stats.print();
    }

    Ok(())
}

fn verify(data_dir: &str, split: &str) -> Result<()> {
    let dataset = AdniDataset::with_split(data_dir, split)?;
    info!("Verifying {} scans in split '{}'", dataset.len(), split);

    let mut failures = 0usize;
    for index in 0..dataset.len() {
        if let Err(err) = dataset.get(index) {
            let path = dataset.sample(index).map(|s| s.path.clone());
            println!(
                "{} {:?}: {}",
                "FAILED".red().bold(),
                path.unwrap_or_default(),
                err
            );
            failures += 1;
        }
    }

    if failures > 0 {
        println!(
            "\n{} {} of {} scans failed to decode",
            "✗".red(),
            failures,
            dataset.len()
        );
        std::process::exit(1);
    }

    println!(
        "{} all {} scans decoded cleanly",
        "✓".green(),
        dataset.len()
    );
    Ok(())
}
