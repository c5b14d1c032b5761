use std::sync::Arc;
use std::time::Duration;

use dashboard_core::PageSession;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, EventSink};

/// Emits a `PipelineTick` every `step`, first one after a full step, until
/// `token` is cancelled. Whether a tick advances a stage is decided by the
/// state machine, so pausing needs no cooperation from the ticker.
pub async fn run_pipeline_ticker(
    session: PageSession,
    step: Duration,
    token: CancellationToken,
    sink: Arc<dyn EventSink>,
) {
    let mut ticks = interval_at(Instant::now() + step, step);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticks.tick() => sink.emit(EngineEvent::PipelineTick { session }),
        }
    }
}
