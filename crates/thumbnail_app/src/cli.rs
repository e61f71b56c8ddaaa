use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use engine_logging::{LogDestination, LogOptions};
use log::LevelFilter;
use thumbnail_engine::PipelineConfig;

use crate::config_file::ConfigFile;

#[derive(Parser, Debug)]
#[command(
    name = "thumbnail-maker",
    version,
    about = "Download images and write thumbnails at fixed widths"
)]
pub(crate) struct Cli {
    /// Image URLs to process.
    pub urls: Vec<String>,

    /// File with one URL per line; blank lines and `#` comments are ignored.
    #[arg(long)]
    pub url_file: Option<PathBuf>,

    /// Base directory holding `incoming/` and `outgoing/`.
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Number of concurrent download workers.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Comma-separated thumbnail widths, e.g. `32,64,200`.
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<u32>>,

    /// RON config file; flags given here take precedence over it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where log lines go.
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LogTarget {
    Terminal,
    File,
    Both,
}

impl Cli {
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            destination: match self.log {
                LogTarget::Terminal => LogDestination::Terminal,
                LogTarget::File => LogDestination::File,
                LogTarget::Both => LogDestination::Both,
            },
            level: if self.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            ..LogOptions::default()
        }
    }

    /// Defaults, then the config file, then command-line flags.
    pub fn pipeline_config(&self, file: &ConfigFile) -> PipelineConfig {
        let home = self
            .home
            .clone()
            .or_else(|| file.home.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let mut config = PipelineConfig::with_home(home);
        file.apply(&mut config);
        if let Some(workers) = self.workers {
            config.download_workers = workers;
        }
        if let Some(sizes) = &self.sizes {
            config.target_widths = sizes.clone();
        }
        config
    }

    pub fn collect_urls(&self) -> Result<Vec<String>> {
        let mut urls = self.urls.clone();
        if let Some(path) = &self.url_file {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read URL file {path:?}"))?;
            urls.extend(parse_url_list(&text));
        }
        Ok(urls)
    }
}

fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = std::iter::once("thumbnail-maker").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn url_list_skips_blanks_and_comments() {
        let raw = "# header\nhttp://x/a.jpg\n\n   http://x/b.png  \n#http://x/c.gif\n";
        let urls = parse_url_list(raw);
        assert_eq!(urls, vec!["http://x/a.jpg", "http://x/b.png"]);
    }

    #[test]
    fn defaults_follow_home_layout() {
        let cli = parse(&["http://x/a.jpg"]);
        let config = cli.pipeline_config(&ConfigFile::default());
        assert_eq!(config.intake_dir, PathBuf::from("./incoming"));
        assert_eq!(config.output_dir, PathBuf::from("./outgoing"));
        assert_eq!(config.download_workers, 4);
        assert_eq!(config.target_widths, vec![32, 64, 200]);
        assert_eq!(cli.log, LogTarget::Terminal);
    }

    #[test]
    fn flags_override_config_file() {
        let cli = parse(&["--home", "/data", "--workers", "8", "--sizes", "16,48"]);
        let file = ConfigFile {
            home: Some(PathBuf::from("/elsewhere")),
            download_workers: Some(2),
            target_widths: Some(vec![100]),
            ..ConfigFile::default()
        };
        let config = cli.pipeline_config(&file);
        assert_eq!(config.intake_dir, PathBuf::from("/data/incoming"));
        assert_eq!(config.download_workers, 8);
        assert_eq!(config.target_widths, vec![16, 48]);
    }

    #[test]
    fn config_file_fills_in_missing_flags() {
        let cli = parse(&["--verbose", "--log", "both"]);
        let file = ConfigFile {
            home: Some(PathBuf::from("/srv/thumbs")),
            download_workers: Some(2),
            ..ConfigFile::default()
        };
        let config = cli.pipeline_config(&file);
        assert_eq!(config.output_dir, PathBuf::from("/srv/thumbs/outgoing"));
        assert_eq!(config.download_workers, 2);
        let options = cli.log_options();
        assert_eq!(options.destination, LogDestination::Both);
        assert_eq!(options.level, LevelFilter::Debug);
    }

    #[test]
    fn url_file_is_appended_to_positional_urls() {
        let dir = tempfile::TempDir::new().unwrap();
        let list = dir.path().join("urls.txt");
        fs::write(&list, "http://x/b.png\n").unwrap();
        let cli = parse(&["http://x/a.jpg", "--url-file", list.to_str().unwrap()]);
        assert_eq!(
            cli.collect_urls().unwrap(),
            vec!["http://x/a.jpg", "http://x/b.png"]
        );
    }
}
