use std::time::Duration;

use crate::registry::PageController;
use crate::{AppState, DomainCard, Effect, MockRequest, PageId, PageSession};

/// Quiet period before a domain search is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct DomainsState {
    pub(crate) cards: Vec<DomainCard>,
    pub(crate) applied_query: String,
    search_seq: u64,
}

impl DomainsState {
    pub(crate) fn visible_cards(&self) -> Vec<DomainCard> {
        self.cards
            .iter()
            .filter(|card| card.search_text().contains(&self.applied_query))
            .cloned()
            .collect()
    }
}

pub(crate) struct DomainsPage;

impl PageController for DomainsPage {
    fn page(&self) -> PageId {
        PageId::Domains
    }

    fn activate(&self, _state: &mut AppState, session: PageSession, effects: &mut Vec<Effect>) {
        effects.push(Effect::Simulate {
            session,
            request: MockRequest::DomainStats,
        });
    }
}

pub(crate) fn apply_domain_stats(state: &mut AppState, cards: Vec<DomainCard>) {
    state.domains.cards = cards;
    state.mark_dirty();
}

/// Restarts the quiescence window after an edit of the search input.
pub(crate) fn schedule_search(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(session) = state.session_for(PageId::Domains) else {
        return;
    };
    state.domains.search_seq += 1;
    effects.push(Effect::Debounce {
        session,
        seq: state.domains.search_seq,
        after: SEARCH_DEBOUNCE,
    });
}

/// Applies only the latest scheduled search; earlier windows are superseded.
pub(crate) fn apply_debounce(state: &mut AppState, seq: u64) {
    if seq == state.domains.search_seq {
        apply_query(state);
    }
}

/// Enter applies the query immediately and supersedes any pending window.
pub(crate) fn flush_search(state: &mut AppState) {
    state.domains.search_seq += 1;
    apply_query(state);
}

fn apply_query(state: &mut AppState) {
    state.domains.applied_query = state.inputs.domain_search.trim().to_lowercase();
    state.mark_dirty();
}
