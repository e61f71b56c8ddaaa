/// Work item handed from the download stage to the resize stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyItem {
    /// Intake filename whose content is fully written and ready to resize.
    File(String),
    /// No further items will arrive.
    Sentinel,
}

impl ReadyItem {
    pub fn file(name: impl Into<String>) -> Self {
        ReadyItem::File(name.into())
    }
}

/// Lifecycle of the resize worker. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeState {
    #[default]
    Running,
    Stopped,
}

impl ResizeState {
    /// Advances the state machine for an observed item.
    pub fn observe(self, item: &ReadyItem) -> Self {
        match (self, item) {
            (ResizeState::Running, ReadyItem::Sentinel) => ResizeState::Stopped,
            (state, _) => state,
        }
    }
}
