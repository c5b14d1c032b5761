use std::collections::BTreeSet;

use crate::catalog::{DOMAINS, LOTS};
use crate::notify::ToastKind;
use crate::registry::PageController;
use crate::{AppState, Effect, IngestReceipt, MockRequest, PageId, PageSession, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct IngestionState {
    pub(crate) files: Vec<SelectedFile>,
    /// Catalog indices of the checked domains.
    pub(crate) domains: BTreeSet<usize>,
    /// Index into `LOTS`.
    pub(crate) lot: usize,
    pub(crate) in_flight: bool,
}

impl IngestionState {
    pub(crate) fn can_submit(&self) -> bool {
        !self.files.is_empty() && !self.domains.is_empty()
    }

    pub(crate) fn selected_domains(&self) -> Vec<String> {
        self.domains
            .iter()
            .map(|index| DOMAINS[*index].to_string())
            .collect()
    }

    pub(crate) fn lot(&self) -> &'static str {
        LOTS[self.lot % LOTS.len()]
    }
}

pub(crate) struct IngestionPage;

impl PageController for IngestionPage {
    fn page(&self) -> PageId {
        PageId::Ingestion
    }

    fn activate(&self, _state: &mut AppState, _session: PageSession, _effects: &mut Vec<Effect>) {}

    fn teardown(&self, state: &mut AppState, _session: PageSession) {
        // The pending submit was cancelled with the session.
        if state.ingestion.in_flight {
            state.ingestion.in_flight = false;
            state.log_activity("Ingestion interrompue");
        }
    }
}

pub(crate) fn select_files(state: &mut AppState, files: Vec<SelectedFile>) {
    state.ingestion.files = files;
    state.mark_dirty();
}

pub(crate) fn remove_file(state: &mut AppState, index: usize) {
    if index < state.ingestion.files.len() {
        state.ingestion.files.remove(index);
        state.mark_dirty();
    }
}

pub(crate) fn toggle_domain(state: &mut AppState, index: usize) {
    if index >= DOMAINS.len() {
        return;
    }
    let domains = &mut state.ingestion.domains;
    if !domains.remove(&index) {
        domains.insert(index);
    }
    state.mark_dirty();
}

pub(crate) fn cycle_lot(state: &mut AppState) {
    state.ingestion.lot = (state.ingestion.lot + 1) % LOTS.len();
    state.mark_dirty();
}

pub(crate) fn submit(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(session) = state.session_for(PageId::Ingestion) else {
        return;
    };
    if state.ingestion.files.is_empty() {
        state.notify(effects, ToastKind::Error, "Veuillez sélectionner au moins un fichier");
        return;
    }
    if state.ingestion.domains.is_empty() {
        state.notify(effects, ToastKind::Error, "Veuillez sélectionner au moins un domaine");
        return;
    }
    if state.ingestion.in_flight {
        return;
    }

    let count = state.ingestion.files.len();
    state.ingestion.in_flight = true;
    state.notify(
        effects,
        ToastKind::Info,
        format!("Démarrage de l'ingestion de {count} fichiers..."),
    );
    state.log_activity(format!("Ingestion démarrée: {count} fichiers"));
    effects.push(Effect::Simulate {
        session,
        request: MockRequest::Ingest {
            files: state.ingestion.files.clone(),
            lot: state.ingestion.lot().to_string(),
            domains: state.ingestion.selected_domains(),
        },
    });
}

pub(crate) fn apply_ingestion(
    state: &mut AppState,
    outcome: Result<IngestReceipt, String>,
    effects: &mut Vec<Effect>,
) {
    state.ingestion.in_flight = false;
    match outcome {
        Ok(_receipt) => {
            state.notify(effects, ToastKind::Success, "Ingestion terminée avec succès!");
            state.log_activity("Ingestion réussie");
            state.ingestion.files.clear();
            state.ingestion.domains.clear();
        }
        Err(message) => {
            state.notify(
                effects,
                ToastKind::Error,
                format!("Erreur d'ingestion: {message}"),
            );
            state.log_activity("Erreur d'ingestion");
        }
    }
}
