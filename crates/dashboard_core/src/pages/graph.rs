use crate::notify::ToastKind;
use crate::registry::PageController;
use crate::{AppState, Effect, GraphStats, MockRequest, PageId, PageSession};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct GraphState {
    pub(crate) stats: Option<GraphStats>,
    pub(crate) domain_filter: Option<String>,
}

pub(crate) struct GraphPage;

impl PageController for GraphPage {
    fn page(&self) -> PageId {
        PageId::Graph
    }

    fn activate(&self, state: &mut AppState, session: PageSession, effects: &mut Vec<Effect>) {
        request_graph(state, session, effects);
    }
}

pub(crate) fn refresh_graph(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(session) = state.session_for(PageId::Graph) else {
        return;
    };
    state.notify(effects, ToastKind::Info, "Actualisation du graphe...");
    request_graph(state, session, effects);
}

fn request_graph(state: &AppState, session: PageSession, effects: &mut Vec<Effect>) {
    effects.push(Effect::Simulate {
        session,
        request: MockRequest::GraphData {
            domain: state.graph.domain_filter.clone(),
        },
    });
}

pub(crate) fn apply_graph_data(state: &mut AppState, stats: GraphStats) {
    state.graph.stats = Some(stats);
    state.mark_dirty();
}
