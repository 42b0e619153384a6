//! `odinpack` CLI - repackage firmware zips into Odin-flashable tar archives

pub mod progress;
pub mod repack;

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(name = "odinpack", version)]
#[command(
    about = "OdinPack: split a firmware zip into BL, modem and combined modem tar archives",
    long_about = None
)]
struct Cli {
    /// Firmware zip files, or directories to search for them
    #[arg(value_name = "ZIPFILE", required = true)]
    sources: Vec<PathBuf>,

    /// Directory for the generated archives
    #[arg(short, long = "output-path", value_name = "DIR", default_value = ".")]
    output_path: PathBuf,

    /// Delete the original zip after repackaging
    #[arg(short, long)]
    delete_original: bool,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every extracted, archived and removed file
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

/// Run the `odinpack` CLI
///
/// # Errors
///
/// Returns an error if any repackaging job fails fatally, or if the output
/// directory cannot be created.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    repack::execute(
        &cli.sources,
        &cli.output_path,
        cli.delete_original,
        cli.quiet,
    )
}
