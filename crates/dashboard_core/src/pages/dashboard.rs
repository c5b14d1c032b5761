use crate::registry::PageController;
use crate::{AppState, DashboardStats, Effect, MockRequest, PageId, PageSession};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct DashboardState {
    pub(crate) stats: Option<DashboardStats>,
}

pub(crate) struct DashboardPage;

impl PageController for DashboardPage {
    fn page(&self) -> PageId {
        PageId::Dashboard
    }

    fn activate(&self, state: &mut AppState, session: PageSession, effects: &mut Vec<Effect>) {
        effects.push(Effect::ProbeHealth);
        effects.push(Effect::Simulate {
            session,
            request: MockRequest::DashboardStats,
        });
        state.log_activity("Dashboard chargé");
    }
}

pub(crate) fn apply_stats(state: &mut AppState, stats: DashboardStats) {
    state.dashboard.stats = Some(stats);
    state.mark_dirty();
}
