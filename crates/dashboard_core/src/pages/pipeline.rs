use std::time::Duration;

use crate::notify::ToastKind;
use crate::registry::PageController;
use crate::state::LogClock;
use crate::{AppState, Effect, PageId, PageSession};

/// Time between two stage completions.
pub const PIPELINE_STEP: Duration = Duration::from_secs(2);

const LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Ingest,
    Classify,
    Index,
    Graph,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 4] = [
        PipelineStage::Ingest,
        PipelineStage::Classify,
        PipelineStage::Index,
        PipelineStage::Graph,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineStage::Ingest => "ingest",
            PipelineStage::Classify => "classify",
            PipelineStage::Index => "index",
            PipelineStage::Graph => "graph",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct PipelineState {
    pub(crate) status: PipelineStatus,
    /// Completed stages, in completion order.
    pub(crate) completed: Vec<PipelineStage>,
    pub(crate) logs: Vec<String>,
    /// Session whose ticker drives the current run.
    run: Option<PageSession>,
}

impl PipelineState {
    fn log(&mut self, clock: &LogClock, line: &str) {
        self.logs.push(clock.stamp(line));
        if self.logs.len() > LOG_CAPACITY {
            let excess = self.logs.len() - LOG_CAPACITY;
            self.logs.drain(..excess);
        }
    }

    fn reset(&mut self) {
        self.status = PipelineStatus::Idle;
        self.completed.clear();
        self.run = None;
    }
}

pub(crate) struct PipelinePage;

impl PageController for PipelinePage {
    fn page(&self) -> PageId {
        PageId::Pipeline
    }

    fn activate(&self, _state: &mut AppState, _session: PageSession, _effects: &mut Vec<Effect>) {}

    fn teardown(&self, state: &mut AppState, _session: PageSession) {
        // The ticker dies with the session; a half-finished run cannot resume.
        if state.pipeline.status != PipelineStatus::Idle {
            state.pipeline.status = PipelineStatus::Idle;
            state.pipeline.run = None;
            state.pipeline.log(&state.clock, "Pipeline interrompu");
            state.mark_dirty();
        }
    }
}

pub(crate) fn start_pipeline(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(session) = state.session_for(PageId::Pipeline) else {
        return;
    };
    match state.pipeline.status {
        PipelineStatus::Running => {}
        PipelineStatus::Paused => {
            state.pipeline.status = PipelineStatus::Running;
            state.pipeline.log(&state.clock, "Pipeline repris");
            state.notify(effects, ToastKind::Info, "Pipeline repris");
        }
        PipelineStatus::Idle => {
            state.pipeline.reset();
            state.pipeline.status = PipelineStatus::Running;
            state.pipeline.run = Some(session);
            state.notify(effects, ToastKind::Success, "Pipeline démarré");
            state.log_activity("Pipeline démarré");
            effects.push(Effect::StartPipeline {
                session,
                step: PIPELINE_STEP,
            });
        }
    }
}

pub(crate) fn pause_pipeline(state: &mut AppState, effects: &mut Vec<Effect>) {
    if state.pipeline.status != PipelineStatus::Running {
        return;
    }
    state.pipeline.status = PipelineStatus::Paused;
    state.pipeline.log(&state.clock, "Pipeline mis en pause");
    state.notify(effects, ToastKind::Info, "Pipeline en pause");
}

pub(crate) fn stop_pipeline(state: &mut AppState, effects: &mut Vec<Effect>) {
    if let Some(session) = state.pipeline.run {
        effects.push(Effect::StopPipeline { session });
    }
    state.pipeline.reset();
    state.pipeline.log(&state.clock, "Pipeline arrêté");
    state.notify(effects, ToastKind::Info, "Pipeline arrêté");
}

pub(crate) fn pipeline_tick(state: &mut AppState, session: PageSession, effects: &mut Vec<Effect>) {
    if state.pipeline.run != Some(session) || state.pipeline.status != PipelineStatus::Running {
        return;
    }
    match PipelineStage::ALL.get(state.pipeline.completed.len()).copied() {
        Some(stage) => {
            state.pipeline.completed.push(stage);
            let line = format!("Étape {} terminée", stage.as_str());
            state.pipeline.log(&state.clock, &line);
            state.mark_dirty();
        }
        None => {
            state.pipeline.status = PipelineStatus::Idle;
            state.pipeline.run = None;
            effects.push(Effect::StopPipeline { session });
            state.notify(effects, ToastKind::Success, "Pipeline terminé");
        }
    }
}
