use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{FetchSettings, PipelineError};

pub const DEFAULT_DOWNLOAD_WORKERS: usize = 4;
pub const DEFAULT_TARGET_WIDTHS: [u32; 3] = [32, 64, 200];

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Where downloaded originals wait to be resized.
    pub intake_dir: PathBuf,
    /// Where thumbnails are written.
    pub output_dir: PathBuf,
    pub download_workers: usize,
    pub target_widths: Vec<u32>,
    pub fetch: FetchSettings,
}

impl PipelineConfig {
    /// `<home>/incoming` for intake, `<home>/outgoing` for thumbnails.
    pub fn with_home(home: impl AsRef<Path>) -> Self {
        let home = home.as_ref();
        Self {
            intake_dir: home.join("incoming"),
            output_dir: home.join("outgoing"),
            download_workers: DEFAULT_DOWNLOAD_WORKERS,
            target_widths: DEFAULT_TARGET_WIDTHS.to_vec(),
            fetch: FetchSettings::default(),
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.download_workers == 0 {
            return Err(PipelineError::InvalidConfig(
                "at least one download worker is required".into(),
            ));
        }
        if self.target_widths.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "at least one target width is required".into(),
            ));
        }
        if self.target_widths.contains(&0) {
            return Err(PipelineError::InvalidConfig(
                "target widths must be positive".into(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.target_widths.iter().find(|w| !seen.insert(**w)) {
            return Err(PipelineError::InvalidConfig(format!(
                "target width {dup} listed twice"
            )));
        }
        // Thumbnails in the intake directory would never let it drain.
        if self.intake_dir == self.output_dir {
            return Err(PipelineError::InvalidConfig(
                "intake and output directories must differ".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_home(".")
    }
}
