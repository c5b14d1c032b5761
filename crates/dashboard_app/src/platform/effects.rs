use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use crossterm::execute;
use crossterm::terminal::SetTitle;
use dashboard_core::{Effect, Msg, SelectedFile};
use dashboard_engine::{EngineConfig, EngineEvent, EngineHandle};
use dashboard_logging::{dash_debug, dash_info, dash_warn};

use super::files::{resolve_input, ResolveError};

/// Executes effects produced by `update` and feeds engine results back as
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>) -> io::Result<Self> {
        let config = EngineConfig {
            clock: Arc::new(|| Utc::now().to_rfc3339()),
            ..EngineConfig::default()
        };
        dash_info!(
            "Engine starting: gateway={} mode={:?} poll={:?}",
            config.endpoints.gateway,
            config.endpoints.mode,
            config.poll_interval
        );

        let engine = EngineHandle::new(config)?;
        let runner = Self { engine, msg_tx };
        runner.spawn_event_loop();
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SetLocation { fragment } => {
                    if let Err(err) = execute!(io::stdout(), SetTitle(window_title(&fragment))) {
                        dash_warn!("Could not set terminal title: {err}");
                    }
                }
                Effect::TeardownPage { session } => self.engine.teardown(session),
                Effect::StartHealthPolling => self.engine.start_health_polling(),
                Effect::ProbeHealth => self.engine.probe_health(),
                Effect::Simulate { session, request } => {
                    dash_debug!("Simulate {request:?} for {session:?}");
                    self.engine.simulate(session, request);
                }
                Effect::StartPipeline { session, step } => {
                    self.engine.start_pipeline(session, step)
                }
                Effect::StopPipeline { session } => self.engine.stop_pipeline(session),
                Effect::Debounce {
                    session,
                    seq,
                    after,
                } => self.engine.debounce(session, seq, after),
                Effect::ExpireToast { id, after } => self.engine.expire_toast(id, after),
                Effect::ResolveFiles { raw } => {
                    let _ = self.msg_tx.send(files_msg(resolve_input(&raw)));
                }
            }
        }
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

/// Message for a dropped or typed path once it has been resolved.
pub fn files_msg(resolved: Result<Vec<SelectedFile>, ResolveError>) -> Msg {
    match resolved {
        Ok(files) => Msg::FilesSelected(files),
        Err(err) => {
            dash_warn!("File selection rejected: {err}");
            Msg::FilesRejected(err.to_string())
        }
    }
}

pub fn window_title(fragment: &str) -> String {
    format!("ObsidiaShell #{fragment}")
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::HealthProbed { service, online } => Msg::HealthProbed { service, online },
        EngineEvent::MockCompleted { session, result } => Msg::MockCompleted { session, result },
        EngineEvent::PipelineTick { session } => Msg::PipelineTick { session },
        EngineEvent::DebounceElapsed { session, seq } => Msg::DebounceElapsed { session, seq },
        EngineEvent::ToastExpired(id) => Msg::ToastExpired(id),
    }
}
