use std::fmt;

use crate::health::HealthBoard;
use crate::notify::{Notifier, ToastKind};
use crate::pages::{
    ChatState, DashboardState, DomainsState, ExportState, GraphState, IngestionState,
    PipelineState, SearchState,
};
use crate::{Effect, PageId, PageSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputField {
    FilePath,
    DomainSearch,
    ChatMessage,
    ClassifyText,
    SearchQuery,
}

impl InputField {
    /// Page the input lives on.
    pub fn page(self) -> PageId {
        match self {
            InputField::FilePath => PageId::Ingestion,
            InputField::DomainSearch => PageId::Domains,
            InputField::ChatMessage | InputField::ClassifyText => PageId::Chat,
            InputField::SearchQuery => PageId::Search,
        }
    }
}

/// Current text of every input control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inputs {
    pub file_path: String,
    pub domain_search: String,
    pub chat_message: String,
    pub classify_text: String,
    pub search_query: String,
}

impl Inputs {
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::FilePath => &self.file_path,
            InputField::DomainSearch => &self.domain_search,
            InputField::ChatMessage => &self.chat_message,
            InputField::ClassifyText => &self.classify_text,
            InputField::SearchQuery => &self.search_query,
        }
    }

    pub(crate) fn set(&mut self, field: InputField, text: String) {
        let slot = match field {
            InputField::FilePath => &mut self.file_path,
            InputField::DomainSearch => &mut self.domain_search,
            InputField::ChatMessage => &mut self.chat_message,
            InputField::ClassifyText => &mut self.classify_text,
            InputField::SearchQuery => &mut self.search_query,
        };
        *slot = text;
    }
}

/// Wall-clock source for the `[HH:MM:SS]` prefix of pipeline log lines.
/// Without one, lines are left unstamped.
#[derive(Clone, Copy, Default)]
pub struct LogClock(Option<fn() -> String>);

impl LogClock {
    pub fn new(now: fn() -> String) -> Self {
        Self(Some(now))
    }

    pub(crate) fn stamp(&self, line: &str) -> String {
        match self.0 {
            Some(now) => format!("[{}] {line}", now()),
            None => line.to_string(),
        }
    }
}

impl fmt::Debug for LogClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LogClock").field(&self.0.is_some()).finish()
    }
}

// Equality of states ignores the clock.
impl PartialEq for LogClock {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for LogClock {}

/// Whole application state. Owned by the event loop and threaded through
/// [`crate::update`]; there is no other copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    /// `None` until the application has started.
    pub(crate) route: Option<String>,
    pub(crate) theme: Theme,
    pub(crate) active: Option<PageSession>,
    next_generation: u64,
    pub(crate) health: HealthBoard,
    pub(crate) notifier: Notifier,
    pub(crate) inputs: Inputs,
    pub(crate) dashboard: DashboardState,
    pub(crate) ingestion: IngestionState,
    pub(crate) domains: DomainsState,
    pub(crate) pipeline: PipelineState,
    pub(crate) graph: GraphState,
    pub(crate) chat: ChatState,
    pub(crate) search: SearchState,
    pub(crate) export: ExportState,
    pub(crate) clock: LogClock,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: LogClock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Returns whether the state changed since the last call, and resets it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn open_session(&mut self, page: PageId) -> PageSession {
        self.next_generation += 1;
        let session = PageSession {
            page,
            generation: self.next_generation,
        };
        self.active = Some(session);
        session
    }

    /// The live session if it belongs to `page`.
    pub(crate) fn session_for(&self, page: PageId) -> Option<PageSession> {
        self.active.filter(|session| session.page == page)
    }

    pub(crate) fn is_current(&self, session: PageSession) -> bool {
        self.active == Some(session)
    }

    pub(crate) fn notify(
        &mut self,
        effects: &mut Vec<Effect>,
        kind: ToastKind,
        message: impl Into<String>,
    ) {
        effects.push(self.notifier.toast(kind, message.into()));
        self.mark_dirty();
    }

    pub(crate) fn log_activity(&mut self, message: impl Into<String>) {
        self.notifier.log(message.into());
        self.mark_dirty();
    }
}
