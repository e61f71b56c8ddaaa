//! Thumbnail engine: download/resize workers, queues and the pipeline coordinator.
mod config;
mod download;
mod events;
mod fetch;
mod persist;
mod pipeline;
mod queue;
mod resize;
mod types;

pub use config::{PipelineConfig, DEFAULT_DOWNLOAD_WORKERS, DEFAULT_TARGET_WIDTHS};
pub use events::{ChannelEventSink, EventSink, NoopEventSink, PipelineEvent};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use pipeline::{make_thumbnails, PipelineError, ThumbnailMaker};
pub use queue::WorkQueue;
pub use resize::{LanczosResizer, ResizeError, Resizer};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};

pub use thumbnail_core::{ReadyItem, RunSummary};
