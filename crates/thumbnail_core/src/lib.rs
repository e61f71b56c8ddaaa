//! Thumbnail core: pure pipeline types, naming, planning and accounting.
mod geometry;
mod item;
mod plan;
mod summary;

pub use geometry::{scaled_height, thumbnail_filename};
pub use item::{ReadyItem, ResizeState};
pub use plan::{
    filename_from_url, plan_downloads, DownloadPlan, DownloadTask, RejectReason, RejectedUrl,
};
pub use summary::{DownloadFailure, DownloadTally, ResizeFailure, ResizeTally, RunSummary};
