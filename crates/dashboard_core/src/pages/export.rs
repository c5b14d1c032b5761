use crate::catalog::ExportFormat;
use crate::notify::ToastKind;
use crate::registry::PageController;
use crate::{AppState, Effect, ExportRequest, MockRequest, PageId, PageSession};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ExportState {
    pub(crate) format: ExportFormat,
    pub(crate) domain: Option<String>,
    pub(crate) lot: Option<String>,
    pub(crate) preview: Option<String>,
    /// Newest first.
    pub(crate) history: Vec<ExportFormat>,
    pub(crate) downloading: bool,
}

pub(crate) struct ExportPage;

impl PageController for ExportPage {
    fn page(&self) -> PageId {
        PageId::Export
    }

    fn activate(&self, _state: &mut AppState, _session: PageSession, _effects: &mut Vec<Effect>) {}

    fn teardown(&self, state: &mut AppState, _session: PageSession) {
        if state.export.downloading {
            state.export.downloading = false;
            state.mark_dirty();
        }
    }
}

pub(crate) fn cycle_format(state: &mut AppState, forward: bool) {
    state.export.format = if forward {
        state.export.format.next()
    } else {
        state.export.format.previous()
    };
    state.mark_dirty();
}

pub(crate) fn preview(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(session) = state.session_for(PageId::Export) else {
        return;
    };
    effects.push(Effect::Simulate {
        session,
        request: MockRequest::ExportPreview(ExportRequest {
            format: state.export.format,
            domain: state.export.domain.clone(),
            lot: state.export.lot.clone(),
        }),
    });
}

pub(crate) fn apply_preview(state: &mut AppState, content: String, effects: &mut Vec<Effect>) {
    state.export.preview = Some(content);
    state.notify(effects, ToastKind::Success, "Aperçu généré");
}

pub(crate) fn download(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(session) = state.session_for(PageId::Export) else {
        return;
    };
    let format = state.export.format;
    state.export.downloading = true;
    state.notify(
        effects,
        ToastKind::Info,
        format!("Export {} en cours...", format.as_str().to_uppercase()),
    );
    effects.push(Effect::Simulate {
        session,
        request: MockRequest::ExportDownload { format },
    });
}

pub(crate) fn apply_download(state: &mut AppState, format: ExportFormat, effects: &mut Vec<Effect>) {
    state.export.downloading = false;
    state.export.history.insert(0, format);
    state.notify(effects, ToastKind::Success, "Export téléchargé avec succès!");
}
