use std::time::Duration;

use crate::{MockRequest, PageSession, ToastId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Mirror the route into the location (terminal title).
    SetLocation { fragment: String },
    /// Cancel every timer and pending operation owned by the session.
    TeardownPage { session: PageSession },
    /// Probe all services now and then on the poll interval, for the
    /// lifetime of the application.
    StartHealthPolling,
    /// One extra probe cycle outside the poll interval.
    ProbeHealth,
    Simulate {
        session: PageSession,
        request: MockRequest,
    },
    StartPipeline {
        session: PageSession,
        step: Duration,
    },
    StopPipeline { session: PageSession },
    /// Post `DebounceElapsed` after the quiescence window.
    Debounce {
        session: PageSession,
        seq: u64,
        after: Duration,
    },
    ExpireToast { id: ToastId, after: Duration },
    /// Turn typed or dropped paths into selected files.
    ResolveFiles { raw: String },
}
