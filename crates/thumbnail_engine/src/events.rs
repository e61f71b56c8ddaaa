use std::sync::mpsc;

/// Observable milestones of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    DownloadStarted {
        url: String,
    },
    Downloaded {
        url: String,
        filename: String,
        bytes: u64,
    },
    DownloadFailed {
        url: String,
        message: String,
    },
    /// Every download worker has been joined.
    DownloadsDrained,
    SentinelQueued,
    ResizeStarted {
        filename: String,
    },
    Resized {
        filename: String,
        thumbnails: usize,
    },
    ResizeFailed {
        filename: String,
        message: String,
    },
    ResizerStopped,
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: PipelineEvent) {}
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<PipelineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<PipelineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: PipelineEvent) {
        let _ = self.tx.send(event);
    }
}
