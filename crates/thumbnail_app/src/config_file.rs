use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use engine_logging::engine_info;
use serde::Deserialize;
use thumbnail_engine::PipelineConfig;

/// Optional settings read from a RON file. Absent fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub home: Option<PathBuf>,
    pub download_workers: Option<usize>,
    pub target_widths: Option<Vec<u32>>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub redirect_limit: Option<usize>,
    pub max_bytes: Option<u64>,
    pub allowed_content_types: Option<Vec<String>>,
}

impl ConfigFile {
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(workers) = self.download_workers {
            config.download_workers = workers;
        }
        if let Some(widths) = &self.target_widths {
            config.target_widths = widths.clone();
        }
        let fetch = &mut config.fetch;
        if let Some(secs) = self.connect_timeout_secs {
            fetch.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.request_timeout_secs {
            fetch.request_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = self.redirect_limit {
            fetch.redirect_limit = limit;
        }
        if let Some(max_bytes) = self.max_bytes {
            fetch.max_bytes = max_bytes;
        }
        if let Some(types) = &self.allowed_content_types {
            fetch.allowed_content_types = types.clone();
        }
    }
}

pub(crate) fn load(path: &Path) -> Result<ConfigFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read config file {path:?}"))?;
    let file: ConfigFile =
        ron::from_str(&content).with_context(|| format!("failed to parse config file {path:?}"))?;
    engine_info!("Loaded configuration from {:?}", path);
    Ok(file)
}
