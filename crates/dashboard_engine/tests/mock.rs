use std::collections::BTreeSet;
use std::io::Write;
use std::time::Duration;

use dashboard_core::catalog::{ExportFormat, DOMAINS};
use dashboard_core::{ExportRequest, MockRequest, MockResult, SelectedFile};
use dashboard_engine::{generate, render_preview, MockTimings};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fixed_clock() -> String {
    "2025-01-01T00:00:00+00:00".to_string()
}

fn run(request: MockRequest, seed: u64) -> MockResult {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(&request, &mut rng, &fixed_clock)
}

fn export(format: ExportFormat) -> ExportRequest {
    ExportRequest {
        format,
        domain: None,
        lot: None,
    }
}

#[test]
fn classification_picks_three_distinct_catalog_domains() {
    for seed in 0..50 {
        let MockResult::Classified(domains) = run(
            MockRequest::Classify {
                text: "agents et mémoire".to_string(),
            },
            seed,
        ) else {
            panic!("expected a classification");
        };
        assert_eq!(domains.len(), 3);
        let distinct: BTreeSet<&String> = domains.iter().collect();
        assert_eq!(distinct.len(), 3);
        assert!(domains.iter().all(|domain| DOMAINS.contains(&domain.as_str())));
    }
}

#[test]
fn csv_preview_starts_with_header() {
    let preview = render_preview(&export(ExportFormat::Csv), &fixed_clock());
    assert_eq!(preview.lines().next(), Some("id,title,domain"));
    assert_eq!(preview.lines().count(), 3);
}

#[test]
fn json_preview_defaults_filters_and_keeps_field_order() {
    let preview = render_preview(&export(ExportFormat::Json), &fixed_clock());
    assert!(preview.starts_with("{\n  \"format\": \"json\",\n  \"filters\""));

    let value: serde_json::Value = serde_json::from_str(&preview).unwrap();
    assert_eq!(value["filters"]["domain"], "Tous");
    assert_eq!(value["filters"]["lot"], "Tous");
    assert_eq!(value["documents"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["documents"][1]["domain"], "Éthique / gouvernance");
    assert_eq!(value["exportDate"], "2025-01-01T00:00:00+00:00");
}

#[test]
fn json_preview_echoes_selected_filters() {
    let request = ExportRequest {
        format: ExportFormat::Json,
        domain: Some("AVDR".to_string()),
        lot: Some("lot_B_intermediaire".to_string()),
    };
    let value: serde_json::Value =
        serde_json::from_str(&render_preview(&request, &fixed_clock())).unwrap();
    assert_eq!(value["filters"]["domain"], "AVDR");
    assert_eq!(value["filters"]["lot"], "lot_B_intermediaire");
}

#[test]
fn markdown_and_pdf_previews_are_fixed_text() {
    let markdown = render_preview(&export(ExportFormat::Markdown), &fixed_clock());
    assert!(markdown.starts_with("# Export ObsidiaShell\n\n## Documents"));
    assert_eq!(
        render_preview(&export(ExportFormat::Pdf), &fixed_clock()),
        "Aperçu PDF non disponible en mode prévisualisation"
    );
}

#[test]
fn search_returns_five_scored_hits() {
    let MockResult::SearchResults(hits) = run(
        MockRequest::Search {
            query: "graphe".to_string(),
            domain: None,
        },
        7,
    ) else {
        panic!("expected search results");
    };
    assert_eq!(hits.len(), 5);
    assert_eq!(hits[0].title, "Document 1: Résultat pour \"graphe\"");
    assert_eq!(hits[4].title, "Document 5: Résultat pour \"graphe\"");
    assert!(hits.iter().all(|hit| (70..=100).contains(&hit.score)));
    assert!(hits.iter().all(|hit| hit.snippet.contains("informations sur graphe.")));
    assert!(hits.iter().all(|hit| DOMAINS.contains(&hit.domain.as_str())));
}

#[test]
fn search_domain_filter_applies_to_hits() {
    let MockResult::SearchResults(hits) = run(
        MockRequest::Search {
            query: "graphe".to_string(),
            domain: Some("Chaos contrôlé".to_string()),
        },
        3,
    ) else {
        panic!("expected search results");
    };
    assert!(hits.iter().all(|hit| hit.domain == "Chaos contrôlé"));
}

#[test]
fn statistics_stay_in_range() {
    for seed in 0..20 {
        let MockResult::DashboardStats(stats) = run(MockRequest::DashboardStats, seed) else {
            panic!("expected dashboard stats");
        };
        assert!((100..600).contains(&stats.documents));
        assert!((200..1200).contains(&stats.nodes));

        let MockResult::GraphData(graph) = run(MockRequest::GraphData { domain: None }, seed)
        else {
            panic!("expected graph data");
        };
        assert!((5..25).contains(&graph.clusters));

        let MockResult::DomainStats(cards) = run(MockRequest::DomainStats, seed) else {
            panic!("expected domain stats");
        };
        assert_eq!(cards.len(), DOMAINS.len());
        assert!(cards
            .iter()
            .all(|card| card.documents < 50 && card.tags < 20 && card.relations < 100));
    }
}

#[test]
fn chat_reply_quotes_the_message() {
    let reply = run(
        MockRequest::Chat {
            message: "Bonjour".to_string(),
        },
        0,
    );
    assert_eq!(
        reply,
        MockResult::ChatReply(
            "Réponse simulée: J'ai bien reçu votre message \"Bonjour\". En production, cette réponse viendrait du modèle FastGPT.".to_string()
        )
    );
}

#[test]
fn ingestion_fails_when_a_file_disappeared() {
    let mut present = tempfile::NamedTempFile::new().unwrap();
    present.write_all(b"contenu").unwrap();
    let present_file = SelectedFile {
        path: present.path().to_path_buf(),
        name: "present.md".to_string(),
        size_bytes: 7,
    };
    let missing_file = SelectedFile {
        path: present.path().with_extension("gone"),
        name: "gone.pdf".to_string(),
        size_bytes: 1,
    };

    let ok = run(
        MockRequest::Ingest {
            files: vec![present_file.clone()],
            lot: "maps_first".to_string(),
            domains: vec!["AVDR".to_string()],
        },
        0,
    );
    let MockResult::Ingested(Ok(receipt)) = ok else {
        panic!("expected a receipt");
    };
    assert_eq!(receipt.files, 1);
    assert_eq!(receipt.lot, "maps_first");

    let failed = run(
        MockRequest::Ingest {
            files: vec![present_file, missing_file],
            lot: "maps_first".to_string(),
            domains: vec!["AVDR".to_string()],
        },
        0,
    );
    assert_eq!(
        failed,
        MockResult::Ingested(Err("fichier introuvable: gone.pdf".to_string()))
    );
}

#[test]
fn delays_match_each_operation() {
    let timings = MockTimings::default();
    assert_eq!(
        timings.delay_for(&MockRequest::Ingest {
            files: Vec::new(),
            lot: String::new(),
            domains: Vec::new(),
        }),
        Duration::from_secs(2)
    );
    assert_eq!(
        timings.delay_for(&MockRequest::Classify {
            text: String::new()
        }),
        Duration::from_millis(1500)
    );
    assert_eq!(
        timings.delay_for(&MockRequest::ExportPreview(export(ExportFormat::Csv))),
        Duration::ZERO
    );
}
