//! Dashboard core: pure state machine, page registry and view models.
pub mod catalog;
mod effect;
mod health;
mod mock;
mod msg;
mod notify;
mod page;
mod pages;
mod registry;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use health::HealthStatus;
pub use mock::{
    DashboardStats, DomainCard, ExportRequest, GraphStats, IngestReceipt, MockRequest,
    MockResult, SearchHit, SelectedFile,
};
pub use msg::{FilterKind, Msg};
pub use notify::{Toast, ToastId, ToastKind, ACTIVITY_CAPACITY, MAX_TOASTS, TOAST_TTL};
pub use page::{fragment_of, PageId, PageSession, LANDING_PAGE};
pub use pages::{
    ChatMessage, ChatRole, ClassifyState, PipelineStage, PipelineStatus, SearchResults,
    PIPELINE_STEP, SEARCH_DEBOUNCE,
};
pub use state::{AppState, InputField, Inputs, LogClock, Theme};
pub use update::update;
pub use view_model::{
    AppViewModel, ChatView, DashboardView, DomainCheckView, DomainsView, ExportView,
    FileRowView, GraphView, IngestionView, NavItemView, PageView, PipelineView, SearchView,
    ServiceView, StageView,
};
