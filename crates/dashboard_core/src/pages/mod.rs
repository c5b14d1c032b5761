//! Per-page state, lifecycle hooks and message handlers.
mod chat;
mod dashboard;
mod domains;
mod export;
mod graph;
mod ingestion;
mod pipeline;
mod search;

pub(crate) use chat::{ChatPage, ChatState};
pub(crate) use dashboard::{DashboardPage, DashboardState};
pub(crate) use domains::{DomainsPage, DomainsState};
pub(crate) use export::{ExportPage, ExportState};
pub(crate) use graph::{GraphPage, GraphState};
pub(crate) use ingestion::{IngestionPage, IngestionState};
pub(crate) use pipeline::{PipelinePage, PipelineState};
pub(crate) use search::{SearchPage, SearchState};

pub use chat::{ChatMessage, ChatRole, ClassifyState};
pub use pipeline::{PipelineStage, PipelineStatus, PIPELINE_STEP};
pub use search::SearchResults;
pub use domains::SEARCH_DEBOUNCE;

pub(crate) use chat::{apply_chat_reply, apply_classification, classify, send_chat};
pub(crate) use dashboard::apply_stats;
pub(crate) use domains::{apply_debounce, apply_domain_stats, flush_search, schedule_search};
pub(crate) use export::{apply_download, apply_preview, cycle_format, download, preview};
pub(crate) use graph::{apply_graph_data, refresh_graph};
pub(crate) use ingestion::{
    apply_ingestion, cycle_lot, remove_file, select_files, submit, toggle_domain,
};
pub(crate) use pipeline::{pause_pipeline, pipeline_tick, start_pipeline, stop_pipeline};
pub(crate) use search::{apply_search, perform_search};
