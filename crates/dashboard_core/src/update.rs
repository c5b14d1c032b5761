use crate::catalog::{cycle_filter, DOMAINS, LOTS};
use crate::notify::ToastKind;
use crate::page::{fragment_of, LANDING_PAGE};
use crate::pages;
use crate::registry::REGISTRY;
use crate::{AppState, Effect, FilterKind, InputField, MockResult, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::Started { location } => {
            if state.route.is_some() {
                return (state, effects);
            }
            effects.push(Effect::StartHealthPolling);
            let fragment = fragment_of(&location);
            let target = if fragment.is_empty() {
                LANDING_PAGE.fragment().to_string()
            } else {
                fragment
            };
            navigate(&mut state, &target, &mut effects);
            state.notify(
                &mut effects,
                ToastKind::Success,
                "ObsidiaShell initialisé avec succès",
            );
        }
        Msg::NavigateTo(target) => navigate(&mut state, &target, &mut effects),
        Msg::ThemeToggled => {
            state.theme = state.theme.toggled();
            state.mark_dirty();
        }
        Msg::InputChanged { field, text } => {
            if state.inputs.get(field) != text {
                state.inputs.set(field, text);
                state.mark_dirty();
                if field == InputField::DomainSearch {
                    pages::schedule_search(&mut state, &mut effects);
                }
            }
        }
        Msg::InputSubmitted(field) => submit_input(&mut state, field, &mut effects),
        Msg::HealthRefreshClicked => effects.push(Effect::ProbeHealth),
        Msg::HealthProbed { service, online } => {
            if state.health.record(service, online) {
                state.mark_dirty();
            }
        }
        Msg::FilesSelected(files) => pages::select_files(&mut state, files),
        Msg::FilesRejected(reason) => {
            state.notify(
                &mut effects,
                ToastKind::Error,
                format!("Fichier invalide: {reason}"),
            );
        }
        Msg::FileRemoved(index) => pages::remove_file(&mut state, index),
        Msg::DomainToggled(index) => pages::toggle_domain(&mut state, index),
        Msg::LotCycled => pages::cycle_lot(&mut state),
        Msg::IngestionSubmitted => pages::submit(&mut state, &mut effects),
        Msg::PipelineStartClicked => pages::start_pipeline(&mut state, &mut effects),
        Msg::PipelinePauseClicked => pages::pause_pipeline(&mut state, &mut effects),
        Msg::PipelineStopClicked => pages::stop_pipeline(&mut state, &mut effects),
        Msg::PipelineTick { session } => pages::pipeline_tick(&mut state, session, &mut effects),
        Msg::GraphRefreshClicked => pages::refresh_graph(&mut state, &mut effects),
        Msg::FilterCycled { filter, forward } => cycle(&mut state, filter, forward),
        Msg::ExportFormatCycled { forward } => pages::cycle_format(&mut state, forward),
        Msg::ExportPreviewClicked => pages::preview(&mut state, &mut effects),
        Msg::ExportDownloadClicked => pages::download(&mut state, &mut effects),
        Msg::MockCompleted { session, result } => {
            // Late results from a torn-down page must not touch state.
            if state.is_current(session) {
                apply_result(&mut state, result, &mut effects);
            }
        }
        Msg::DebounceElapsed { session, seq } => {
            if state.is_current(session) {
                pages::apply_debounce(&mut state, seq);
            }
        }
        Msg::ToastExpired(id) => {
            if state.notifier.expire(id) {
                state.mark_dirty();
            }
        }
        Msg::NoOp => {}
    }

    (state, effects)
}

/// Tears down the visible page, then activates the one registered for
/// `target`. Unknown targets leave no page visible.
fn navigate(state: &mut AppState, target: &str, effects: &mut Vec<Effect>) {
    if let Some(previous) = state.active.take() {
        if let Some(controller) = REGISTRY.get(previous.page) {
            controller.teardown(state, previous);
        }
        effects.push(Effect::TeardownPage { session: previous });
    }

    state.route = Some(target.to_string());
    effects.push(Effect::SetLocation {
        fragment: target.to_string(),
    });

    if let Some(controller) = REGISTRY.lookup(target) {
        let session = state.open_session(controller.page());
        controller.activate(state, session, effects);
    }

    state.log_activity(format!("Navigation vers {target}"));
}

fn submit_input(state: &mut AppState, field: InputField, effects: &mut Vec<Effect>) {
    match field {
        InputField::FilePath => {
            let raw = state.inputs.file_path.trim().to_string();
            if raw.is_empty() {
                state.notify(effects, ToastKind::Error, "Veuillez saisir un chemin");
                return;
            }
            state.inputs.file_path.clear();
            state.mark_dirty();
            effects.push(Effect::ResolveFiles { raw });
        }
        InputField::DomainSearch => pages::flush_search(state),
        InputField::ChatMessage => pages::send_chat(state, effects),
        InputField::ClassifyText => pages::classify(state, effects),
        InputField::SearchQuery => pages::perform_search(state, effects),
    }
}

fn cycle(state: &mut AppState, filter: FilterKind, forward: bool) {
    let (options, slot): (&[&str], &mut Option<String>) = match filter {
        FilterKind::GraphDomain => (&DOMAINS[..], &mut state.graph.domain_filter),
        FilterKind::SearchDomain => (&DOMAINS[..], &mut state.search.domain_filter),
        FilterKind::ExportDomain => (&DOMAINS[..], &mut state.export.domain),
        FilterKind::ExportLot => (&LOTS[..], &mut state.export.lot),
    };
    *slot = cycle_filter(options, slot.as_deref(), forward);
    state.mark_dirty();
}

fn apply_result(state: &mut AppState, result: MockResult, effects: &mut Vec<Effect>) {
    match result {
        MockResult::DashboardStats(stats) => pages::apply_stats(state, stats),
        MockResult::DomainStats(cards) => pages::apply_domain_stats(state, cards),
        MockResult::GraphData(stats) => pages::apply_graph_data(state, stats),
        MockResult::Ingested(outcome) => pages::apply_ingestion(state, outcome, effects),
        MockResult::ChatReply(reply) => pages::apply_chat_reply(state, reply),
        MockResult::Classified(domains) => pages::apply_classification(state, domains, effects),
        MockResult::SearchResults(hits) => pages::apply_search(state, hits, effects),
        MockResult::ExportPreview(content) => pages::apply_preview(state, content, effects),
        MockResult::ExportDownloaded(format) => pages::apply_download(state, format, effects),
    }
}
