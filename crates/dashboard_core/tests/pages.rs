use dashboard_core::{
    update, AppState, ChatRole, ClassifyState, DashboardStats, DomainCard, Effect, ExportView,
    FilterKind, GraphStats, InputField, MockRequest, MockResult, Msg, PageSession, PageView,
    SearchHit, SearchResults,
};
use dashboard_core::catalog::ExportFormat;
use pretty_assertions::assert_eq;

fn open(location: &str) -> (AppState, Vec<Effect>) {
    update(
        AppState::new(),
        Msg::Started {
            location: location.to_string(),
        },
    )
}

fn type_into(state: AppState, field: InputField, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::InputChanged {
            field,
            text: text.to_string(),
        },
    )
}

fn requested(effects: &[Effect]) -> Option<(PageSession, MockRequest)> {
    effects.iter().find_map(|effect| match effect {
        Effect::Simulate { session, request } => Some((*session, request.clone())),
        _ => None,
    })
}

fn complete(state: AppState, session: PageSession, result: MockResult) -> AppState {
    update(state, Msg::MockCompleted { session, result }).0
}

fn has_toast(state: &AppState, message: &str) -> bool {
    state
        .view()
        .toasts
        .iter()
        .any(|toast| toast.message == message)
}

fn page(state: &AppState) -> PageView {
    state.view().page.expect("a page is visible")
}

fn card(label: &str, documents: u32) -> DomainCard {
    DomainCard {
        label: label.to_string(),
        documents,
        tags: 4,
        relations: 12,
    }
}

#[test]
fn dashboard_shows_stats_once_loaded() {
    let (state, effects) = open("#dashboard");
    let (session, request) = requested(&effects).expect("stats requested");
    assert_eq!(request, MockRequest::DashboardStats);

    let stats = DashboardStats {
        documents: 812,
        nodes: 4321,
    };
    let state = complete(state, session, MockResult::DashboardStats(stats));
    match page(&state) {
        PageView::Dashboard(view) => assert_eq!(view.stats, Some(stats)),
        other => panic!("unexpected page {other:?}"),
    }
}

#[test]
fn domain_search_applies_only_latest_window() {
    let (state, effects) = open("#domaines");
    let (session, _) = requested(&effects).expect("domain stats requested");
    let state = complete(
        state,
        session,
        MockResult::DomainStats(vec![card("AVDR", 10), card("Chaos contrôlé", 20)]),
    );

    let (state, first) = type_into(state, InputField::DomainSearch, "av");
    let (state, second) = type_into(state, InputField::DomainSearch, "chaos");
    let seq_of = |effects: &[Effect]| {
        effects.iter().find_map(|effect| match effect {
            Effect::Debounce { seq, .. } => Some(*seq),
            _ => None,
        })
    };
    let first = seq_of(&first).expect("first window");
    let second = seq_of(&second).expect("second window");
    assert!(second > first);

    let (state, _) = update(state, Msg::DebounceElapsed { session, seq: first });
    match page(&state) {
        PageView::Domains(view) => assert_eq!(view.cards.len(), 2),
        other => panic!("unexpected page {other:?}"),
    }

    let (state, _) = update(state, Msg::DebounceElapsed { session, seq: second });
    match page(&state) {
        PageView::Domains(view) => {
            assert_eq!(view.applied_query, "chaos");
            assert_eq!(view.cards, vec![card("Chaos contrôlé", 20)]);
            assert_eq!(view.total, 2);
        }
        other => panic!("unexpected page {other:?}"),
    }
}

#[test]
fn domain_search_enter_applies_immediately() {
    let (state, effects) = open("#domaines");
    let (session, _) = requested(&effects).expect("domain stats requested");
    let state = complete(
        state,
        session,
        MockResult::DomainStats(vec![card("AVDR", 10), card("Multi-agents", 3)]),
    );
    let (state, _) = type_into(state, InputField::DomainSearch, "AGENTS");
    let (state, _) = update(state, Msg::InputSubmitted(InputField::DomainSearch));

    match page(&state) {
        PageView::Domains(view) => assert_eq!(view.cards, vec![card("Multi-agents", 3)]),
        other => panic!("unexpected page {other:?}"),
    }
}

#[test]
fn graph_refresh_uses_current_filter() {
    let (state, _) = open("#graphiti");
    let (state, _) = update(
        state,
        Msg::FilterCycled {
            filter: FilterKind::GraphDomain,
            forward: true,
        },
    );
    let (state, effects) = update(state, Msg::GraphRefreshClicked);
    let (session, request) = requested(&effects).expect("graph requested");
    assert_eq!(
        request,
        MockRequest::GraphData {
            domain: Some("Mathématiques du millénaire".to_string())
        }
    );
    assert!(has_toast(&state, "Actualisation du graphe..."));

    let stats = GraphStats {
        nodes: 1200,
        edges: 3400,
        clusters: 12,
    };
    let state = complete(state, session, MockResult::GraphData(stats));
    match page(&state) {
        PageView::Graph(view) => assert_eq!(view.stats, Some(stats)),
        other => panic!("unexpected page {other:?}"),
    }
}

#[test]
fn filter_cycles_back_to_none() {
    let (mut state, _) = open("#export");
    state = update(
        state,
        Msg::FilterCycled {
            filter: FilterKind::ExportLot,
            forward: false,
        },
    )
    .0;
    match page(&state) {
        PageView::Export(view) => assert_eq!(view.lot.as_deref(), Some("lot_C_recent")),
        other => panic!("unexpected page {other:?}"),
    }
    state = update(
        state,
        Msg::FilterCycled {
            filter: FilterKind::ExportLot,
            forward: true,
        },
    )
    .0;
    match page(&state) {
        PageView::Export(view) => assert_eq!(view.lot, None),
        other => panic!("unexpected page {other:?}"),
    }
}

#[test]
fn chat_round_trip_appends_both_sides() {
    let (state, _) = open("#fastgpt");
    let (state, effects) = update(state, Msg::InputSubmitted(InputField::ChatMessage));
    assert!(effects.is_empty());

    let (state, _) = type_into(state, InputField::ChatMessage, "Bonjour");
    let (state, effects) = update(state, Msg::InputSubmitted(InputField::ChatMessage));
    let (session, request) = requested(&effects).expect("chat requested");
    assert_eq!(
        request,
        MockRequest::Chat {
            message: "Bonjour".to_string()
        }
    );
    assert_eq!(state.view().inputs.chat_message, "");

    let state = complete(state, session, MockResult::ChatReply("Salut".to_string()));
    match page(&state) {
        PageView::Chat(view) => {
            let roles: Vec<ChatRole> = view.messages.iter().map(|m| m.role).collect();
            assert_eq!(roles, vec![ChatRole::User, ChatRole::Assistant]);
            assert_eq!(view.messages[1].text, "Salut");
        }
        other => panic!("unexpected page {other:?}"),
    }
}

#[test]
fn classification_requires_text_and_shows_domains() {
    let (state, _) = open("#fastgpt");
    let (state, effects) = update(state, Msg::InputSubmitted(InputField::ClassifyText));
    assert!(requested(&effects).is_none());
    assert!(has_toast(&state, "Veuillez entrer du texte à classifier"));

    let (state, _) = type_into(state, InputField::ClassifyText, "graphes et agents");
    let (state, effects) = update(state, Msg::InputSubmitted(InputField::ClassifyText));
    let (session, _) = requested(&effects).expect("classification requested");
    match page(&state) {
        PageView::Chat(view) => assert_eq!(view.classification, ClassifyState::Pending),
        other => panic!("unexpected page {other:?}"),
    }

    let domains = vec!["AVDR".to_string(), "Multi-agents".to_string()];
    let state = complete(state, session, MockResult::Classified(domains.clone()));
    match page(&state) {
        PageView::Chat(view) => assert_eq!(view.classification, ClassifyState::Done(domains)),
        other => panic!("unexpected page {other:?}"),
    }
    assert!(has_toast(&state, "Classification terminée"));
}

#[test]
fn search_reports_result_count() {
    let (state, _) = open("#danswer");
    let (state, effects) = update(state, Msg::InputSubmitted(InputField::SearchQuery));
    assert!(requested(&effects).is_none());
    assert!(has_toast(&state, "Veuillez entrer une requête"));

    let (state, _) = type_into(state, InputField::SearchQuery, "mémoire");
    let (state, effects) = update(state, Msg::InputSubmitted(InputField::SearchQuery));
    let (session, request) = requested(&effects).expect("search requested");
    assert_eq!(
        request,
        MockRequest::Search {
            query: "mémoire".to_string(),
            domain: None
        }
    );

    let hit = SearchHit {
        title: "Document 1".to_string(),
        snippet: "extrait".to_string(),
        domain: "AVDR".to_string(),
        score: 87,
    };
    assert_eq!(hit.score_label(), "0.87");
    let state = complete(state, session, MockResult::SearchResults(vec![hit.clone()]));
    match page(&state) {
        PageView::Search(view) => assert_eq!(view.results, SearchResults::Ready(vec![hit])),
        other => panic!("unexpected page {other:?}"),
    }
    assert!(has_toast(&state, "1 résultats trouvés"));
}

#[test]
fn export_preview_carries_format_and_filters() {
    let (state, _) = open("#export");
    let (state, _) = update(state, Msg::ExportFormatCycled { forward: true });
    let (state, _) = update(
        state,
        Msg::FilterCycled {
            filter: FilterKind::ExportDomain,
            forward: true,
        },
    );
    let (state, effects) = update(state, Msg::ExportPreviewClicked);
    let (session, request) = requested(&effects).expect("preview requested");
    match request {
        MockRequest::ExportPreview(request) => {
            assert_eq!(request.format, ExportFormat::Csv);
            assert_eq!(request.domain.as_deref(), Some("Mathématiques du millénaire"));
            assert_eq!(request.lot, None);
        }
        other => panic!("unexpected request {other:?}"),
    }

    let state = complete(
        state,
        session,
        MockResult::ExportPreview("id,title,domain".to_string()),
    );
    assert!(has_toast(&state, "Aperçu généré"));
    match page(&state) {
        PageView::Export(ExportView { preview, .. }) => {
            assert_eq!(preview.as_deref(), Some("id,title,domain"))
        }
        other => panic!("unexpected page {other:?}"),
    }
}

#[test]
fn downloads_are_listed_newest_first() {
    let (mut state, _) = open("#export");
    for forward in [false, true] {
        state = update(state, Msg::ExportFormatCycled { forward }).0;
        let (next, effects) = update(state, Msg::ExportDownloadClicked);
        let Some((session, MockRequest::ExportDownload { format })) = requested(&effects) else {
            panic!("download not requested");
        };
        match page(&next) {
            PageView::Export(view) => assert!(view.downloading),
            other => panic!("unexpected page {other:?}"),
        }
        state = complete(next, session, MockResult::ExportDownloaded(format));
    }

    match page(&state) {
        PageView::Export(view) => {
            assert_eq!(view.history, vec![ExportFormat::Json, ExportFormat::Pdf]);
            assert!(!view.downloading);
        }
        other => panic!("unexpected page {other:?}"),
    }
    assert!(has_toast(&state, "Export PDF en cours..."));
    assert!(has_toast(&state, "Export JSON en cours..."));
    assert!(has_toast(&state, "Export téléchargé avec succès!"));
}
