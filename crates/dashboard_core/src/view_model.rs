use crate::catalog::{ExportFormat, DOMAINS, SERVICES};
use crate::health::HealthStatus;
use crate::notify::Toast;
use crate::pages::{ChatMessage, ClassifyState, PipelineStage, PipelineStatus, SearchResults};
use crate::{AppState, DashboardStats, DomainCard, GraphStats, Inputs, PageId, Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    /// Current location fragment, empty before start.
    pub location: String,
    pub theme: Theme,
    pub nav: Vec<NavItemView>,
    /// `None` when the route has no registered page.
    pub page: Option<PageView>,
    pub services: Vec<ServiceView>,
    pub online_count: usize,
    pub service_total: usize,
    /// Newest first.
    pub activity: Vec<String>,
    pub toasts: Vec<Toast>,
    pub inputs: Inputs,
}

impl AppViewModel {
    pub fn visible_page(&self) -> Option<PageId> {
        self.page.as_ref().map(PageView::page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItemView {
    pub page: PageId,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceView {
    pub key: &'static str,
    pub name: &'static str,
    pub port: u16,
    pub description: &'static str,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Dashboard(DashboardView),
    Ingestion(IngestionView),
    Domains(DomainsView),
    Pipeline(PipelineView),
    Graph(GraphView),
    Chat(ChatView),
    Search(SearchView),
    Export(ExportView),
}

impl PageView {
    pub fn page(&self) -> PageId {
        match self {
            PageView::Dashboard(_) => PageId::Dashboard,
            PageView::Ingestion(_) => PageId::Ingestion,
            PageView::Domains(_) => PageId::Domains,
            PageView::Pipeline(_) => PageId::Pipeline,
            PageView::Graph(_) => PageId::Graph,
            PageView::Chat(_) => PageId::Chat,
            PageView::Search(_) => PageId::Search,
            PageView::Export(_) => PageId::Export,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub stats: Option<DashboardStats>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionView {
    pub files: Vec<FileRowView>,
    /// One checkbox per catalog domain, in catalog order.
    pub domains: Vec<DomainCheckView>,
    pub selected_domains: Vec<String>,
    pub lot: &'static str,
    pub can_submit: bool,
    pub in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub name: String,
    /// Size in KB with two decimals.
    pub size_kb: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCheckView {
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainsView {
    pub cards: Vec<DomainCard>,
    pub total: usize,
    pub applied_query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineView {
    pub status: PipelineStatus,
    pub stages: Vec<StageView>,
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageView {
    pub stage: PipelineStage,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphView {
    pub stats: Option<GraphStats>,
    pub domain_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub messages: Vec<ChatMessage>,
    pub classification: ClassifyState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub domain_filter: Option<String>,
    pub results: SearchResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportView {
    pub format: ExportFormat,
    pub domain: Option<String>,
    pub lot: Option<String>,
    pub preview: Option<String>,
    pub history: Vec<ExportFormat>,
    pub downloading: bool,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let route = self.route.clone().unwrap_or_default();
        let visible = self.active.map(|session| session.page);

        AppViewModel {
            nav: PageId::ALL
                .iter()
                .map(|page| NavItemView {
                    page: *page,
                    label: page.label(),
                    active: page.fragment() == route,
                })
                .collect(),
            page: visible.map(|page| self.page_view(page)),
            location: route,
            theme: self.theme,
            services: SERVICES
                .iter()
                .map(|service| ServiceView {
                    key: service.key,
                    name: service.name,
                    port: service.port,
                    description: service.description,
                    status: self.health.status(service.key),
                })
                .collect(),
            online_count: self.health.online_count(),
            service_total: self.health.len(),
            activity: self.notifier.activity(),
            toasts: self.notifier.toasts(),
            inputs: self.inputs.clone(),
        }
    }

    fn page_view(&self, page: PageId) -> PageView {
        match page {
            PageId::Dashboard => PageView::Dashboard(DashboardView {
                stats: self.dashboard.stats,
            }),
            PageId::Ingestion => PageView::Ingestion(IngestionView {
                files: self
                    .ingestion
                    .files
                    .iter()
                    .map(|file| FileRowView {
                        name: file.name.clone(),
                        size_kb: format!("{:.2}", file.size_bytes as f64 / 1024.0),
                    })
                    .collect(),
                domains: DOMAINS
                    .iter()
                    .enumerate()
                    .map(|(index, label)| DomainCheckView {
                        label: *label,
                        checked: self.ingestion.domains.contains(&index),
                    })
                    .collect(),
                selected_domains: self.ingestion.selected_domains(),
                lot: self.ingestion.lot(),
                can_submit: self.ingestion.can_submit(),
                in_flight: self.ingestion.in_flight,
            }),
            PageId::Domains => PageView::Domains(DomainsView {
                cards: self.domains.visible_cards(),
                total: self.domains.cards.len(),
                applied_query: self.domains.applied_query.clone(),
            }),
            PageId::Pipeline => PageView::Pipeline(PipelineView {
                status: self.pipeline.status,
                stages: PipelineStage::ALL
                    .iter()
                    .map(|stage| StageView {
                        stage: *stage,
                        completed: self.pipeline.completed.contains(stage),
                    })
                    .collect(),
                logs: self.pipeline.logs.clone(),
            }),
            PageId::Graph => PageView::Graph(GraphView {
                stats: self.graph.stats,
                domain_filter: self.graph.domain_filter.clone(),
            }),
            PageId::Chat => PageView::Chat(ChatView {
                messages: self.chat.history.clone(),
                classification: self.chat.classification.clone(),
            }),
            PageId::Search => PageView::Search(SearchView {
                domain_filter: self.search.domain_filter.clone(),
                results: self.search.results.clone(),
            }),
            PageId::Export => PageView::Export(ExportView {
                format: self.export.format,
                domain: self.export.domain.clone(),
                lot: self.export.lot.clone(),
                preview: self.export.preview.clone(),
                history: self.export.history.clone(),
                downloading: self.export.downloading,
            }),
        }
    }
}
