use engine_logging::{engine_debug, engine_info, engine_warn};
use thiserror::Error;
use thumbnail_core::{DownloadFailure, DownloadTally, DownloadTask, ReadyItem};
use tokio::runtime::Handle;

use crate::{
    AtomicFileWriter, EventSink, FetchError, Fetcher, PersistError, PipelineEvent, WorkQueue,
};

#[derive(Debug, Error)]
enum DownloadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("could not store download: {0}")]
    Persist(#[from] PersistError),
}

/// One member of the download pool.
///
/// Drains the download queue with non-blocking pops and exits the first time
/// it finds the queue empty; tasks are never re-queued.
pub(crate) struct DownloadWorker<'a> {
    pub id: usize,
    pub tasks: &'a WorkQueue<DownloadTask>,
    pub ready: &'a WorkQueue<ReadyItem>,
    pub fetcher: &'a dyn Fetcher,
    pub runtime: &'a Handle,
    pub intake: &'a AtomicFileWriter,
    pub events: &'a dyn EventSink,
}

impl DownloadWorker<'_> {
    pub fn run(self) -> DownloadTally {
        let mut tally = DownloadTally::default();

        while let Some(task) = self.tasks.try_pop() {
            engine_info!("Downloading {} as {}", task.url, task.filename);
            self.events.emit(PipelineEvent::DownloadStarted {
                url: task.url.clone(),
            });

            match self.download(&task) {
                Ok(bytes) => {
                    // The file is fully persisted before anyone can see its name.
                    self.ready.push(ReadyItem::file(task.filename.clone()));
                    self.events.emit(PipelineEvent::Downloaded {
                        url: task.url,
                        filename: task.filename.clone(),
                        bytes,
                    });
                    tally.downloaded.push(task.filename);
                }
                Err(err) => {
                    engine_warn!("Download of {} failed, skipping: {}", task.url, err);
                    self.events.emit(PipelineEvent::DownloadFailed {
                        url: task.url.clone(),
                        message: err.to_string(),
                    });
                    tally.failed.push(DownloadFailure {
                        url: task.url,
                        message: err.to_string(),
                    });
                }
            }
        }

        engine_debug!(
            "Download queue empty, worker {} exiting after {} task(s)",
            self.id,
            tally.attempted()
        );
        tally
    }

    fn download(&self, task: &DownloadTask) -> Result<u64, DownloadError> {
        let output = self.runtime.block_on(self.fetcher.fetch(&task.url))?;
        self.intake.write(&task.filename, &output.bytes)?;
        Ok(output.metadata.byte_len)
    }
}
