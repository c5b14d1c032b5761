use dashboard_core::{MockResult, PageSession, ToastId};

/// Everything the engine reports back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Final outcome of one service probe, after retries.
    HealthProbed {
        service: &'static str,
        online: bool,
    },
    MockCompleted {
        session: PageSession,
        result: MockResult,
    },
    PipelineTick {
        session: PageSession,
    },
    DebounceElapsed {
        session: PageSession,
        seq: u64,
    },
    ToastExpired(ToastId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("invalid health url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("response too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },
    #[error("response is not json: {0}")]
    InvalidBody(String),
}

impl ProbeError {
    /// Transport-level failures are worth another attempt; a bad body is not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProbeError::HttpStatus(_) | ProbeError::Timeout | ProbeError::Network(_)
        )
    }
}
