//! Requests for simulated backend work and the results that come back.
//!
//! Nothing here talks to a real service: the engine waits a fixed delay,
//! fabricates a result of the right shape and posts it back.
use std::path::PathBuf;

use crate::catalog::ExportFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub domain: Option<String>,
    pub lot: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockRequest {
    DashboardStats,
    DomainStats,
    GraphData {
        domain: Option<String>,
    },
    Ingest {
        files: Vec<SelectedFile>,
        lot: String,
        domains: Vec<String>,
    },
    Chat {
        message: String,
    },
    Classify {
        text: String,
    },
    Search {
        query: String,
        domain: Option<String>,
    },
    ExportPreview(ExportRequest),
    ExportDownload {
        format: ExportFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub documents: u32,
    pub nodes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCard {
    pub label: String,
    pub documents: u32,
    pub tags: u32,
    pub relations: u32,
}

impl DomainCard {
    /// Lower-cased text the domain search matches against.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} documents {} tags {} relations",
            self.label, self.documents, self.tags, self.relations
        )
        .to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphStats {
    pub nodes: u32,
    pub edges: u32,
    pub clusters: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReceipt {
    pub files: usize,
    pub lot: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub domain: String,
    /// Relevance in hundredths (70..=100).
    pub score: u8,
}

impl SearchHit {
    pub fn score_label(&self) -> String {
        format!("{}.{:02}", self.score / 100, self.score % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResult {
    DashboardStats(DashboardStats),
    DomainStats(Vec<DomainCard>),
    GraphData(GraphStats),
    Ingested(Result<IngestReceipt, String>),
    ChatReply(String),
    Classified(Vec<String>),
    SearchResults(Vec<SearchHit>),
    ExportPreview(String),
    ExportDownloaded(ExportFormat),
}
