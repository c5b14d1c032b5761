//! Static configuration compiled into the dashboard.

/// A backend service whose health is shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub key: &'static str,
    pub name: &'static str,
    pub port: u16,
    pub description: &'static str,
}

pub const SERVICES: [ServiceDescriptor; 3] = [
    ServiceDescriptor {
        key: "graphiti",
        name: "Graphiti",
        port: 8001,
        description: "Graph Intelligence",
    },
    ServiceDescriptor {
        key: "fastgpt",
        name: "FastGPT",
        port: 3000,
        description: "LLM & Classification",
    },
    ServiceDescriptor {
        key: "danswer",
        name: "Danswer",
        port: 8080,
        description: "RAG Search",
    },
];

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";

/// Knowledge domains used to tag and filter documents.
pub const DOMAINS: [&str; 24] = [
    "Mathématiques du millénaire",
    "Cognition vivante",
    "Éthique / gouvernance",
    "Cosmologie fractale",
    "Agents Obsidia",
    "Mémoire fractale",
    "Double Filtre",
    "AVDR",
    "Balance λ(t)",
    "Automatisation",
    "Multimodalité / double cerveau",
    "Gestion des biais",
    "Psychologie / perception",
    "Civilisation cognitive",
    "Sciences cognitives",
    "Flux internes",
    "Friction / émergence",
    "Conscience mathématique",
    "Validation scientifique",
    "Multi-agents",
    "Cosmos ↔ Intelligence",
    "Chaos contrôlé",
    "Temporalité dynamique",
    "Calibration Chaotique Symbiotique",
];

/// Batch labels an ingestion can be filed under. The first is the default.
pub const LOTS: [&str; 4] = [
    "maps_first",
    "lot_A_ancien",
    "lot_B_intermediaire",
    "lot_C_recent",
];

/// File extensions picked up when a whole directory is selected.
pub const ACCEPTED_FILE_FORMATS: [&str; 4] = ["pdf", "docx", "md", "txt"];

pub fn service(key: &str) -> Option<&'static ServiceDescriptor> {
    SERVICES.iter().find(|service| service.key == key)
}

pub fn is_accepted_extension(ext: &str) -> bool {
    ACCEPTED_FILE_FORMATS
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(ext))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Markdown,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Markdown,
        ExportFormat::Pdf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

fn cycle<T: Copy + PartialEq>(items: &[T], current: T, step: usize) -> T {
    let index = items.iter().position(|item| *item == current).unwrap_or(0);
    items[(index + step) % items.len()]
}

/// Steps the optional filter through `None` and every entry of `options`.
pub fn cycle_filter(options: &[&str], current: Option<&str>, forward: bool) -> Option<String> {
    let slots = options.len() + 1;
    let index = match current {
        None => 0,
        Some(value) => options
            .iter()
            .position(|option| *option == value)
            .map_or(0, |pos| pos + 1),
    };
    let next = if forward {
        (index + 1) % slots
    } else {
        (index + slots - 1) % slots
    };
    if next == 0 {
        None
    } else {
        Some(options[next - 1].to_string())
    }
}
