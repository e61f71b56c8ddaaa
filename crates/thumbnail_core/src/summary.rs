use std::time::Duration;

use crate::RejectedUrl;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFailure {
    pub url: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeFailure {
    pub filename: String,
    pub message: String,
}

/// What one download worker accomplished before it observed an empty queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadTally {
    pub downloaded: Vec<String>,
    pub failed: Vec<DownloadFailure>,
}

impl DownloadTally {
    pub fn attempted(&self) -> usize {
        self.downloaded.len() + self.failed.len()
    }
}

/// What the resize worker accomplished before it observed the sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResizeTally {
    pub resized: Vec<String>,
    pub thumbnails_written: usize,
    pub failed: Vec<ResizeFailure>,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: usize,
    pub rejected: Vec<RejectedUrl>,
    pub downloaded: usize,
    pub download_failures: Vec<DownloadFailure>,
    pub resized: usize,
    pub thumbnails_written: usize,
    pub resize_failures: Vec<ResizeFailure>,
    /// Download workers that panicked instead of returning a tally.
    pub lost_workers: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn new(requested: usize, rejected: Vec<RejectedUrl>) -> Self {
        Self {
            requested,
            rejected,
            ..Self::default()
        }
    }

    pub fn absorb_download(&mut self, tally: DownloadTally) {
        self.downloaded += tally.downloaded.len();
        self.download_failures.extend(tally.failed);
    }

    pub fn absorb_resize(&mut self, tally: ResizeTally) {
        self.resized += tally.resized.len();
        self.thumbnails_written += tally.thumbnails_written;
        self.resize_failures.extend(tally.failed);
    }

    /// Total URLs that did not make it to finished thumbnails.
    pub fn failed(&self) -> usize {
        self.rejected.len() + self.download_failures.len() + self.resize_failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0 && self.lost_workers == 0
    }
}
