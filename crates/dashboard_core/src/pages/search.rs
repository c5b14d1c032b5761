use crate::notify::ToastKind;
use crate::registry::PageController;
use crate::{AppState, Effect, MockRequest, PageId, PageSession, SearchHit};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchResults {
    #[default]
    Idle,
    Pending,
    Ready(Vec<SearchHit>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SearchState {
    pub(crate) domain_filter: Option<String>,
    pub(crate) results: SearchResults,
}

pub(crate) struct SearchPage;

impl PageController for SearchPage {
    fn page(&self) -> PageId {
        PageId::Search
    }

    fn activate(&self, _state: &mut AppState, _session: PageSession, _effects: &mut Vec<Effect>) {}

    fn teardown(&self, state: &mut AppState, _session: PageSession) {
        if state.search.results == SearchResults::Pending {
            state.search.results = SearchResults::Idle;
            state.mark_dirty();
        }
    }
}

pub(crate) fn perform_search(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(session) = state.session_for(PageId::Search) else {
        return;
    };
    let query = state.inputs.search_query.trim().to_string();
    if query.is_empty() {
        state.notify(effects, ToastKind::Error, "Veuillez entrer une requête");
        return;
    }
    state.search.results = SearchResults::Pending;
    state.mark_dirty();
    effects.push(Effect::Simulate {
        session,
        request: MockRequest::Search {
            query,
            domain: state.search.domain_filter.clone(),
        },
    });
}

pub(crate) fn apply_search(state: &mut AppState, hits: Vec<SearchHit>, effects: &mut Vec<Effect>) {
    let count = hits.len();
    state.search.results = SearchResults::Ready(hits);
    state.notify(
        effects,
        ToastKind::Success,
        format!("{count} résultats trouvés"),
    );
}
