//! Dashboard engine: executes effects on a background tokio runtime.
mod engine;
mod export;
mod health;
mod mock;
mod pipeline;
mod types;

pub use engine::{probe_all, ChannelEventSink, Clock, EngineConfig, EngineHandle, EventSink};
pub use export::render_preview;
pub use health::{
    check_service, probe_with_retry, EndpointMode, HealthEndpoints, HealthProbe, HealthSettings,
    ReqwestHealthProbe, RetryPolicy,
};
pub use mock::{generate, MockTimings};
pub use pipeline::run_pipeline_ticker;
pub use types::{EngineEvent, ProbeError};
