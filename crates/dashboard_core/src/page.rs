#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageId {
    Dashboard,
    Ingestion,
    Domains,
    Pipeline,
    Graph,
    Chat,
    Search,
    Export,
}

pub const LANDING_PAGE: PageId = PageId::Dashboard;

impl PageId {
    /// Navigation order.
    pub const ALL: [PageId; 8] = [
        PageId::Dashboard,
        PageId::Ingestion,
        PageId::Domains,
        PageId::Pipeline,
        PageId::Graph,
        PageId::Chat,
        PageId::Search,
        PageId::Export,
    ];

    /// Identifier used in the location fragment.
    pub fn fragment(self) -> &'static str {
        match self {
            PageId::Dashboard => "dashboard",
            PageId::Ingestion => "ingestion",
            PageId::Domains => "domaines",
            PageId::Pipeline => "pipeline",
            PageId::Graph => "graphiti",
            PageId::Chat => "fastgpt",
            PageId::Search => "danswer",
            PageId::Export => "export",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageId::Dashboard => "Tableau de bord",
            PageId::Ingestion => "Ingestion",
            PageId::Domains => "Domaines",
            PageId::Pipeline => "Pipeline",
            PageId::Graph => "Graphiti",
            PageId::Chat => "FastGPT",
            PageId::Search => "Danswer",
            PageId::Export => "Export",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|page| *page == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|page| *page == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Handle for one activation of a page.
///
/// Every asynchronous operation a page starts is tagged with its session.
/// Navigating away tears the session down; anything still carrying it
/// afterwards is stale and gets dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSession {
    pub page: PageId,
    pub generation: u64,
}

/// Extracts the route fragment from a location.
///
/// Accepts a full URL (`http://host/#pipeline`), a bare fragment
/// (`#pipeline`) or the page id itself. Returns an empty string when the
/// location has no fragment.
pub fn fragment_of(location: &str) -> String {
    let location = location.trim();
    if let Ok(parsed) = url::Url::parse(location) {
        return parsed.fragment().unwrap_or_default().to_string();
    }
    match location.split_once('#') {
        Some((_, fragment)) => fragment.trim().to_string(),
        None => location.to_string(),
    }
}
