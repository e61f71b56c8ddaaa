mod cli;
mod config_file;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use engine_logging::engine_error;
use thumbnail_engine::{RunSummary, ThumbnailMaker};

use crate::cli::Cli;
use crate::config_file::ConfigFile;

fn main() -> ExitCode {
    match run() {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            engine_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<RunSummary> {
    let cli = Cli::parse();
    engine_logging::initialize(&cli.log_options())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let file = match &cli.config {
        Some(path) => config_file::load(path)?,
        None => ConfigFile::default(),
    };
    let config = cli.pipeline_config(&file);
    let urls = cli.collect_urls()?;
    if urls.is_empty() {
        eprintln!("warning: no URLs given");
    }

    let maker = ThumbnailMaker::new(config);
    let summary = maker
        .make_thumbnails(&urls)
        .context("thumbnail run aborted")?;
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} thumbnails from {}/{} images in {:.2?}",
        summary.thumbnails_written, summary.resized, summary.requested, summary.elapsed
    );
    for rejected in &summary.rejected {
        println!("  skipped {rejected}");
    }
    for failure in &summary.download_failures {
        println!("  download failed {}: {}", failure.url, failure.message);
    }
    for failure in &summary.resize_failures {
        println!("  resize failed {}: {}", failure.filename, failure.message);
    }
    if summary.lost_workers > 0 {
        println!("  {} worker(s) crashed, see log", summary.lost_workers);
    }
}
