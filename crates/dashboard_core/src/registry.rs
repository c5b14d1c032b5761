use crate::pages::{
    ChatPage, DashboardPage, DomainsPage, ExportPage, GraphPage, IngestionPage, PipelinePage,
    SearchPage,
};
use crate::{AppState, Effect, PageId, PageSession};

/// Lifecycle hooks for one page.
///
/// `activate` runs every time the page becomes visible and emits the work
/// the page needs (mock requests, probes). `teardown` runs before another
/// page is activated and resets whatever the cancelled work left pending.
pub(crate) trait PageController: Sync {
    fn page(&self) -> PageId;

    fn activate(&self, state: &mut AppState, session: PageSession, effects: &mut Vec<Effect>);

    fn teardown(&self, _state: &mut AppState, _session: PageSession) {}
}

pub(crate) struct PageRegistry {
    pages: &'static [&'static dyn PageController],
}

pub(crate) static REGISTRY: PageRegistry = PageRegistry {
    pages: &[
        &DashboardPage,
        &IngestionPage,
        &DomainsPage,
        &PipelinePage,
        &GraphPage,
        &ChatPage,
        &SearchPage,
        &ExportPage,
    ],
};

impl PageRegistry {
    pub(crate) fn lookup(&self, fragment: &str) -> Option<&'static dyn PageController> {
        self.pages
            .iter()
            .copied()
            .find(|controller| controller.page().fragment() == fragment)
    }

    pub(crate) fn get(&self, page: PageId) -> Option<&'static dyn PageController> {
        self.pages
            .iter()
            .copied()
            .find(|controller| controller.page() == page)
    }
}
