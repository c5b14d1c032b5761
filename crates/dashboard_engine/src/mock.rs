//! Fabricated results for the simulated backend operations.
use std::time::Duration;

use dashboard_core::catalog::DOMAINS;
use dashboard_core::{
    DashboardStats, DomainCard, GraphStats, IngestReceipt, MockRequest, MockResult, SearchHit,
    SelectedFile,
};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::export::render_preview;

const SEARCH_RESULT_COUNT: usize = 5;
const CLASSIFY_DOMAIN_COUNT: usize = 3;

/// How long each simulated operation pretends to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockTimings {
    pub ingest: Duration,
    pub chat: Duration,
    pub classify: Duration,
    pub search: Duration,
    pub download: Duration,
}

impl Default for MockTimings {
    fn default() -> Self {
        Self {
            ingest: Duration::from_secs(2),
            chat: Duration::from_secs(1),
            classify: Duration::from_millis(1500),
            search: Duration::from_millis(1500),
            download: Duration::from_secs(1),
        }
    }
}

impl MockTimings {
    pub fn delay_for(&self, request: &MockRequest) -> Duration {
        match request {
            MockRequest::Ingest { .. } => self.ingest,
            MockRequest::Chat { .. } => self.chat,
            MockRequest::Classify { .. } => self.classify,
            MockRequest::Search { .. } => self.search,
            MockRequest::ExportDownload { .. } => self.download,
            MockRequest::DashboardStats
            | MockRequest::DomainStats
            | MockRequest::GraphData { .. }
            | MockRequest::ExportPreview(_) => Duration::ZERO,
        }
    }
}

/// Produces the result for `request`. `clock` supplies the export date.
pub fn generate<R: Rng + ?Sized>(
    request: &MockRequest,
    rng: &mut R,
    clock: &dyn Fn() -> String,
) -> MockResult {
    match request {
        MockRequest::DashboardStats => MockResult::DashboardStats(DashboardStats {
            documents: rng.gen_range(100..600),
            nodes: rng.gen_range(200..1200),
        }),
        MockRequest::DomainStats => MockResult::DomainStats(
            DOMAINS
                .iter()
                .map(|label| DomainCard {
                    label: label.to_string(),
                    documents: rng.gen_range(0..50),
                    tags: rng.gen_range(0..20),
                    relations: rng.gen_range(0..100),
                })
                .collect(),
        ),
        // The filter is accepted but the numbers are random either way.
        MockRequest::GraphData { .. } => MockResult::GraphData(GraphStats {
            nodes: rng.gen_range(100..600),
            edges: rng.gen_range(200..1200),
            clusters: rng.gen_range(5..25),
        }),
        MockRequest::Ingest { files, lot, .. } => MockResult::Ingested(ingest(files, lot)),
        MockRequest::Chat { message } => MockResult::ChatReply(format!(
            "Réponse simulée: J'ai bien reçu votre message \"{message}\". En production, cette réponse viendrait du modèle FastGPT."
        )),
        MockRequest::Classify { .. } => MockResult::Classified(
            DOMAINS
                .choose_multiple(rng, CLASSIFY_DOMAIN_COUNT)
                .map(|domain| domain.to_string())
                .collect(),
        ),
        MockRequest::Search { query, domain } => {
            MockResult::SearchResults(search(query, domain.as_deref(), rng))
        }
        MockRequest::ExportPreview(export) => {
            MockResult::ExportPreview(render_preview(export, &clock()))
        }
        MockRequest::ExportDownload { format } => MockResult::ExportDownloaded(*format),
    }
}

fn ingest(files: &[SelectedFile], lot: &str) -> Result<IngestReceipt, String> {
    if let Some(missing) = files.iter().find(|file| !file.path.exists()) {
        return Err(format!("fichier introuvable: {}", missing.name));
    }
    Ok(IngestReceipt {
        files: files.len(),
        lot: lot.to_string(),
    })
}

fn search<R: Rng + ?Sized>(query: &str, domain: Option<&str>, rng: &mut R) -> Vec<SearchHit> {
    (1..=SEARCH_RESULT_COUNT)
        .map(|index| SearchHit {
            title: format!("Document {index}: Résultat pour \"{query}\""),
            snippet: format!(
                "Ceci est un extrait pertinent du document qui contient des informations sur {query}. Le système RAG a trouvé cette correspondance sémantique..."
            ),
            domain: match domain {
                Some(domain) => domain.to_string(),
                None => DOMAINS
                    .choose(rng)
                    .map(|domain| domain.to_string())
                    .unwrap_or_default(),
            },
            score: rng.gen_range(70..=100),
        })
        .collect()
}
