use crate::{InputField, MockResult, PageSession, SelectedFile, ToastId};

/// Selectors whose value steps through "none" and the catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    GraphDomain,
    SearchDomain,
    ExportDomain,
    ExportLot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application start with the initial location.
    Started { location: String },
    /// Switch to the page with this fragment id (any string is accepted).
    NavigateTo(String),
    ThemeToggled,
    /// User edited a text input.
    InputChanged { field: InputField, text: String },
    /// User pressed Enter in a text input.
    InputSubmitted(InputField),
    HealthRefreshClicked,
    /// Outcome of one service probe, after retries.
    HealthProbed { service: &'static str, online: bool },
    /// Dropped or browsed files, resolved. Replaces the current list.
    FilesSelected(Vec<SelectedFile>),
    /// Path resolution failed.
    FilesRejected(String),
    FileRemoved(usize),
    /// Toggle the domain checkbox at this catalog index.
    DomainToggled(usize),
    LotCycled,
    IngestionSubmitted,
    PipelineStartClicked,
    PipelinePauseClicked,
    PipelineStopClicked,
    PipelineTick { session: PageSession },
    GraphRefreshClicked,
    FilterCycled { filter: FilterKind, forward: bool },
    ExportFormatCycled { forward: bool },
    ExportPreviewClicked,
    ExportDownloadClicked,
    /// A simulated operation finished.
    MockCompleted {
        session: PageSession,
        result: MockResult,
    },
    DebounceElapsed { session: PageSession, seq: u64 },
    ToastExpired(ToastId),
    /// Fallback for unbound input.
    NoOp,
}
