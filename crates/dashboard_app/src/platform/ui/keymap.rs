//! Key presses to messages. Focus and list cursors are UI-only state and
//! never reach `update`.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dashboard_core::catalog::DOMAINS;
use dashboard_core::{AppViewModel, FilterKind, InputField, Msg, PageId, PageView, LANDING_PAGE};

use crate::platform::effects::files_msg;
use crate::platform::files::resolve_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    /// Text input receiving keystrokes, if any.
    pub focus: Option<InputField>,
    /// Highlighted row of the ingestion domain checklist.
    pub domain_cursor: usize,
    /// Highlighted row of the ingestion file list.
    pub file_cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Dispatch(Msg),
    /// Only UI state changed.
    Redraw,
    Ignore,
}

pub fn map_key(view: &AppViewModel, ui: &mut UiState, key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    let page = view.visible_page();
    if ui.focus.is_some_and(|field| Some(field.page()) != page) {
        ui.focus = None;
    }
    if let Some(field) = ui.focus {
        return edit_input(view, ui, field, key);
    }
    if let Some(action) = global_key(page, key) {
        return action;
    }
    match &view.page {
        Some(page) => page_key(page, ui, key),
        None => KeyAction::Ignore,
    }
}

/// A bracketed paste. Focused inputs take the text on a single line; the
/// ingestion page otherwise treats it as dropped files.
pub fn map_paste(view: &AppViewModel, ui: &mut UiState, text: &str) -> Option<Msg> {
    let page = view.visible_page();
    if ui.focus.is_some_and(|field| Some(field.page()) != page) {
        ui.focus = None;
    }
    if let Some(field) = ui.focus {
        let pasted: String = text
            .trim_end_matches(['\r', '\n'])
            .chars()
            .map(|ch| if ch == '\r' || ch == '\n' { ' ' } else { ch })
            .collect();
        let mut current = view.inputs.get(field).to_string();
        current.push_str(&pasted);
        return Some(Msg::InputChanged {
            field,
            text: current,
        });
    }
    (page == Some(PageId::Ingestion)).then(|| files_msg(resolve_input(text)))
}

fn edit_input(view: &AppViewModel, ui: &mut UiState, field: InputField, key: KeyEvent) -> KeyAction {
    let mut text = view.inputs.get(field).to_string();
    match key.code {
        KeyCode::Esc => {
            ui.focus = None;
            KeyAction::Redraw
        }
        KeyCode::Enter => KeyAction::Dispatch(Msg::InputSubmitted(field)),
        KeyCode::Backspace => {
            if text.pop().is_none() {
                return KeyAction::Ignore;
            }
            KeyAction::Dispatch(Msg::InputChanged { field, text })
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            text.push(ch);
            KeyAction::Dispatch(Msg::InputChanged { field, text })
        }
        _ => KeyAction::Ignore,
    }
}

fn global_key(page: Option<PageId>, key: KeyEvent) -> Option<KeyAction> {
    let navigate = |page: PageId| KeyAction::Dispatch(Msg::NavigateTo(page.fragment().to_string()));
    let current = page.unwrap_or(LANDING_PAGE);
    let action = match key.code {
        KeyCode::F(n) => {
            let page = PageId::ALL.get(usize::from(n).checked_sub(1)?)?;
            navigate(*page)
        }
        KeyCode::Tab => navigate(current.next()),
        KeyCode::BackTab => navigate(current.previous()),
        KeyCode::Char('t') => KeyAction::Dispatch(Msg::ThemeToggled),
        KeyCode::Char('q') => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

fn page_key(page: &PageView, ui: &mut UiState, key: KeyEvent) -> KeyAction {
    let dispatch = KeyAction::Dispatch;
    let focus = |ui: &mut UiState, field| {
        ui.focus = Some(field);
        KeyAction::Redraw
    };
    let filter = |filter, forward| dispatch(Msg::FilterCycled { filter, forward });

    match (page, key.code) {
        (PageView::Dashboard(_), KeyCode::Char('r')) => dispatch(Msg::HealthRefreshClicked),

        (PageView::Ingestion(_), KeyCode::Char('f')) => focus(ui, InputField::FilePath),
        (PageView::Ingestion(_), KeyCode::Up) => {
            ui.domain_cursor = ui.domain_cursor.saturating_sub(1);
            KeyAction::Redraw
        }
        (PageView::Ingestion(_), KeyCode::Down) => {
            ui.domain_cursor = (ui.domain_cursor + 1).min(DOMAINS.len() - 1);
            KeyAction::Redraw
        }
        (PageView::Ingestion(_), KeyCode::Char(' ')) => {
            dispatch(Msg::DomainToggled(ui.domain_cursor))
        }
        (PageView::Ingestion(_), KeyCode::Char('l')) => dispatch(Msg::LotCycled),
        (PageView::Ingestion(view), KeyCode::Char('[')) => {
            let last = view.files.len().saturating_sub(1);
            ui.file_cursor = ui.file_cursor.min(last).saturating_sub(1);
            KeyAction::Redraw
        }
        (PageView::Ingestion(view), KeyCode::Char(']')) => {
            ui.file_cursor = (ui.file_cursor + 1).min(view.files.len().saturating_sub(1));
            KeyAction::Redraw
        }
        (PageView::Ingestion(view), KeyCode::Char('x')) => match view.files.len() {
            0 => KeyAction::Ignore,
            len => {
                let index = ui.file_cursor.min(len - 1);
                ui.file_cursor = index.min(len.saturating_sub(2));
                dispatch(Msg::FileRemoved(index))
            }
        },
        (PageView::Ingestion(_), KeyCode::Enter) => dispatch(Msg::IngestionSubmitted),

        (PageView::Domains(_), KeyCode::Char('/')) => focus(ui, InputField::DomainSearch),

        (PageView::Pipeline(_), KeyCode::Char('s')) => dispatch(Msg::PipelineStartClicked),
        (PageView::Pipeline(_), KeyCode::Char('p')) => dispatch(Msg::PipelinePauseClicked),
        (PageView::Pipeline(_), KeyCode::Char('x')) => dispatch(Msg::PipelineStopClicked),

        (PageView::Graph(_), KeyCode::Char('r')) => dispatch(Msg::GraphRefreshClicked),
        (PageView::Graph(_), KeyCode::Left) => filter(FilterKind::GraphDomain, false),
        (PageView::Graph(_), KeyCode::Right) => filter(FilterKind::GraphDomain, true),

        (PageView::Chat(_), KeyCode::Char('c')) => focus(ui, InputField::ChatMessage),
        (PageView::Chat(_), KeyCode::Char('k')) => focus(ui, InputField::ClassifyText),

        (PageView::Search(_), KeyCode::Char('/')) => focus(ui, InputField::SearchQuery),
        (PageView::Search(_), KeyCode::Left) => filter(FilterKind::SearchDomain, false),
        (PageView::Search(_), KeyCode::Right) => filter(FilterKind::SearchDomain, true),

        (PageView::Export(_), KeyCode::Left) => dispatch(Msg::ExportFormatCycled { forward: false }),
        (PageView::Export(_), KeyCode::Right) => dispatch(Msg::ExportFormatCycled { forward: true }),
        (PageView::Export(_), KeyCode::Char('[')) => filter(FilterKind::ExportDomain, false),
        (PageView::Export(_), KeyCode::Char(']')) => filter(FilterKind::ExportDomain, true),
        (PageView::Export(_), KeyCode::Char('l')) => filter(FilterKind::ExportLot, true),
        (PageView::Export(_), KeyCode::Char('p')) => dispatch(Msg::ExportPreviewClicked),
        (PageView::Export(_), KeyCode::Char('d')) => dispatch(Msg::ExportDownloadClicked),

        _ => KeyAction::Ignore,
    }
}
