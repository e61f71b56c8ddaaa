use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::Instant;

use engine_logging::{engine_error, engine_info, engine_warn};
use thiserror::Error;
use thumbnail_core::{plan_downloads, DownloadTask, ReadyItem, RunSummary};

use crate::download::DownloadWorker;
use crate::resize::ResizeWorker;
use crate::{
    ensure_dir, AtomicFileWriter, EventSink, Fetcher, LanczosResizer, NoopEventSink, PersistError,
    PipelineConfig, PipelineEvent, ReqwestFetcher, Resizer, WorkQueue,
};

/// Problems that stop a run before any worker starts.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("intake directory {path:?} unusable: {source}")]
    IntakeDir {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
    #[error("output directory {path:?} unusable: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
    #[error("could not start fetch runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("could not spawn resize worker: {0}")]
    Spawn(#[source] io::Error),
}

/// Downloads images and turns each into thumbnails at the configured widths.
///
/// A run uses `download_workers` downloader threads feeding a single resizer
/// thread. Per-image failures are logged and reported in the returned
/// [`RunSummary`]; only configuration problems produce an `Err`.
pub struct ThumbnailMaker {
    config: PipelineConfig,
    fetcher: Arc<dyn Fetcher>,
    resizer: Arc<dyn Resizer>,
    events: Arc<dyn EventSink>,
}

impl ThumbnailMaker {
    pub fn new(config: PipelineConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self {
            config,
            fetcher,
            resizer: Arc::new(LanczosResizer::default()),
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_resizer(mut self, resizer: Arc<dyn Resizer>) -> Self {
        self.resizer = resizer;
        self
    }

    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Runs the whole pipeline over `urls` and blocks until every accepted
    /// image is either resized or reported as failed.
    ///
    /// The run owns its own tokio runtime for fetching, so this must be called
    /// from synchronous code, never from inside an async task.
    pub fn make_thumbnails<I, S>(&self, urls: I) -> Result<RunSummary, PipelineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        engine_info!("START make_thumbnails");
        let started = Instant::now();

        self.prepare()?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(PipelineError::Runtime)?;

        let plan = plan_downloads(urls);
        for rejected in &plan.rejected {
            engine_warn!("Skipping {}", rejected);
        }
        let mut summary = RunSummary::new(plan.tasks.len() + plan.rejected.len(), plan.rejected);
        let tasks: WorkQueue<DownloadTask> = plan.tasks.into_iter().collect();
        engine_info!(
            "beginning image downloads: {} queued, {} rejected",
            tasks.len(),
            summary.rejected.len()
        );
        let ready: WorkQueue<ReadyItem> = WorkQueue::new();
        let intake = AtomicFileWriter::new(self.config.intake_dir.clone());
        let output = AtomicFileWriter::new(self.config.output_dir.clone());

        thread::scope(|scope| -> Result<(), PipelineError> {
            let resize_worker = ResizeWorker {
                ready: &ready,
                resizer: self.resizer.as_ref(),
                intake_dir: &self.config.intake_dir,
                output: &output,
                target_widths: &self.config.target_widths,
                events: self.events.as_ref(),
            };
            let resizer = spawn_named(scope, "resizer".to_string(), move || resize_worker.run())
                .map_err(PipelineError::Spawn)?;

            let download_worker = |id| DownloadWorker {
                id,
                tasks: &tasks,
                ready: &ready,
                fetcher: self.fetcher.as_ref(),
                runtime: runtime.handle(),
                intake: &intake,
                events: self.events.as_ref(),
            };

            let mut downloaders = Vec::with_capacity(self.config.download_workers);
            for id in 0..self.config.download_workers {
                let worker = download_worker(id);
                match spawn_named(scope, format!("downloader-{id}"), move || worker.run()) {
                    Ok(handle) => downloaders.push(handle),
                    Err(err) => engine_error!("could not spawn download worker {}: {}", id, err),
                }
            }
            if downloaders.is_empty() {
                engine_warn!("no download worker could be spawned, downloading inline");
                summary.absorb_download(download_worker(0).run());
            }

            // Barrier: every fetch has finished and its item, if any, is queued.
            for handle in downloaders {
                match handle.join() {
                    Ok(tally) => summary.absorb_download(tally),
                    Err(_) => {
                        engine_error!("a download worker panicked");
                        summary.lost_workers += 1;
                    }
                }
            }
            engine_info!(
                "downloaded {} images in {:.2?}",
                summary.downloaded,
                started.elapsed()
            );
            self.events.emit(PipelineEvent::DownloadsDrained);

            // Announced first so observers always see it ahead of `ResizerStopped`.
            self.events.emit(PipelineEvent::SentinelQueued);
            ready.push(ReadyItem::Sentinel);

            match resizer.join() {
                Ok(tally) => summary.absorb_resize(tally),
                Err(_) => {
                    engine_error!("the resize worker panicked");
                    summary.lost_workers += 1;
                }
            }
            Ok(())
        })?;

        summary.elapsed = started.elapsed();
        engine_info!(
            "END make_thumbnails in {:.2?}: {} thumbnails from {} of {} images, {} failed",
            summary.elapsed,
            summary.thumbnails_written,
            summary.resized,
            summary.requested,
            summary.failed()
        );
        Ok(summary)
    }

    /// Fatal checks that run before any worker exists.
    fn prepare(&self) -> Result<(), PipelineError> {
        self.config.validate()?;
        let intake_dir = &self.config.intake_dir;
        let output_dir = &self.config.output_dir;
        let intake_error = |source: PersistError| PipelineError::IntakeDir {
            path: intake_dir.clone(),
            source,
        };
        let output_error = |source: PersistError| PipelineError::OutputDir {
            path: output_dir.clone(),
            source,
        };

        ensure_dir(intake_dir).map_err(intake_error)?;
        ensure_dir(output_dir).map_err(output_error)?;

        // Spellings like `a/../incoming` slip past the literal check in `validate`.
        let intake = fs::canonicalize(intake_dir).map_err(|err| intake_error(err.into()))?;
        let output = fs::canonicalize(output_dir).map_err(|err| output_error(err.into()))?;
        if intake == output {
            return Err(PipelineError::InvalidConfig(format!(
                "intake and output directories both resolve to {intake:?}"
            )));
        }
        Ok(())
    }
}

/// Runs the pipeline with [`PipelineConfig::default`], i.e. rooted at the
/// current directory.
pub fn make_thumbnails<I, S>(urls: I) -> Result<RunSummary, PipelineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ThumbnailMaker::new(PipelineConfig::default()).make_thumbnails(urls)
}

fn spawn_named<'scope, 'env, T, F>(
    scope: &'scope Scope<'scope, 'env>,
    name: String,
    f: F,
) -> io::Result<ScopedJoinHandle<'scope, T>>
where
    F: FnOnce() -> T + Send + 'scope,
    T: Send + 'scope,
{
    thread::Builder::new().name(name).spawn_scoped(scope, f)
}
