use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::time::Instant;

use engine_logging::{engine_debug, engine_info, engine_warn};
use image::imageops::FilterType;
use image::io::Reader as ImageReader;
use image::{DynamicImage, GenericImageView, ImageError, ImageFormat};
use thiserror::Error;
use thumbnail_core::{
    scaled_height, thumbnail_filename, ReadyItem, ResizeFailure, ResizeState, ResizeTally,
};

use crate::{AtomicFileWriter, EventSink, PersistError, PipelineEvent, WorkQueue};

#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("image codec error: {0}")]
    Codec(#[from] ImageError),
    #[error("no known image format for {0}")]
    UnsupportedFormat(String),
    #[error("invalid target width {0}")]
    InvalidWidth(u32),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Produces a copy of `image` scaled to `target_width`, keeping its aspect ratio.
pub trait Resizer: Send + Sync {
    fn resize(&self, image: &DynamicImage, target_width: u32) -> Result<DynamicImage, ResizeError>;
}

#[derive(Debug, Clone, Copy)]
pub struct LanczosResizer {
    filter: FilterType,
}

impl LanczosResizer {
    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for LanczosResizer {
    fn default() -> Self {
        Self::with_filter(FilterType::Lanczos3)
    }
}

impl Resizer for LanczosResizer {
    fn resize(&self, image: &DynamicImage, target_width: u32) -> Result<DynamicImage, ResizeError> {
        if target_width == 0 {
            return Err(ResizeError::InvalidWidth(target_width));
        }
        let (width, height) = image.dimensions();
        let target_height = scaled_height(width, height, target_width);
        Ok(image.resize_exact(target_width, target_height, self.filter))
    }
}

/// Single consumer of the ready queue.
///
/// Runs until it pops the sentinel. Items queued ahead of the sentinel are
/// always processed first.
pub(crate) struct ResizeWorker<'a> {
    pub ready: &'a WorkQueue<ReadyItem>,
    pub resizer: &'a dyn Resizer,
    pub intake_dir: &'a Path,
    pub output: &'a AtomicFileWriter,
    pub target_widths: &'a [u32],
    pub events: &'a dyn EventSink,
}

impl ResizeWorker<'_> {
    pub fn run(self) -> ResizeTally {
        engine_info!("beginning image resizing");
        let started = Instant::now();
        let mut tally = ResizeTally::default();
        let mut state = ResizeState::Running;

        while state == ResizeState::Running {
            let item = self.ready.pop();
            state = state.observe(&item);
            match item {
                ReadyItem::File(filename) => self.process(filename, &mut tally),
                ReadyItem::Sentinel => engine_debug!("sentinel received, resizer stopping"),
            }
        }

        engine_info!(
            "created {} thumbnails from {} images in {:.2?}",
            tally.thumbnails_written,
            tally.resized.len(),
            started.elapsed()
        );
        self.events.emit(PipelineEvent::ResizerStopped);
        tally
    }

    fn process(&self, filename: String, tally: &mut ResizeTally) {
        engine_info!("Resizing image {}", filename);
        self.events.emit(PipelineEvent::ResizeStarted {
            filename: filename.clone(),
        });

        match self.resize_all(&filename) {
            Ok(written) => {
                let thumbnails = written.len();
                tally.thumbnails_written += thumbnails;
                self.remove_source(&filename);
                engine_info!("Done resizing image {}", filename);
                self.events.emit(PipelineEvent::Resized {
                    filename: filename.clone(),
                    thumbnails,
                });
                tally.resized.push(filename);
            }
            Err(err) => {
                // The intake file stays put so the image can be retried by hand.
                engine_warn!("Resizing {} failed, source kept: {}", filename, err);
                self.events.emit(PipelineEvent::ResizeFailed {
                    filename: filename.clone(),
                    message: err.to_string(),
                });
                tally.failed.push(ResizeFailure {
                    filename,
                    message: err.to_string(),
                });
            }
        }
    }

    fn resize_all(&self, filename: &str) -> Result<Vec<PathBuf>, ResizeError> {
        let source = self.intake_dir.join(filename);
        let reader = ImageReader::open(&source)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|err| ResizeError::Open {
                path: source.clone(),
                source: err,
            })?;
        // Output keeps the format named by the extension; fall back to what was sniffed.
        let format = ImageFormat::from_path(filename)
            .ok()
            .or_else(|| reader.format())
            .ok_or_else(|| ResizeError::UnsupportedFormat(filename.to_string()))?;
        let image = reader.decode()?;

        let mut written = Vec::with_capacity(self.target_widths.len());
        for &width in self.target_widths {
            let resized = self.resizer.resize(&image, width)?;
            let mut encoded = Cursor::new(Vec::new());
            resized.write_to(&mut encoded, format)?;
            let name = thumbnail_filename(filename, width);
            let path = self.output.write(&name, encoded.get_ref())?;
            engine_debug!(
                "wrote {} ({}x{})",
                name,
                resized.width(),
                resized.height()
            );
            written.push(path);
        }
        Ok(written)
    }

    fn remove_source(&self, filename: &str) {
        let source = self.intake_dir.join(filename);
        if let Err(err) = fs::remove_file(&source) {
            engine_warn!("Could not remove intake file {:?}: {}", source, err);
        }
    }
}
