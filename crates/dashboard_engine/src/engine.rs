use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use dashboard_core::catalog::SERVICES;
use dashboard_core::{MockRequest, PageSession, ToastId};
use dashboard_logging::{dash_debug, dash_info};
use futures_util::future::join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::health::{check_service, HealthEndpoints, HealthProbe, HealthSettings, ReqwestHealthProbe};
use crate::mock::{generate, MockTimings};
use crate::pipeline::run_pipeline_ticker;
use crate::{EngineEvent, RetryPolicy};

/// Produces the timestamp written into export previews.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub endpoints: HealthEndpoints,
    pub health: HealthSettings,
    pub poll_interval: Duration,
    pub timings: MockTimings,
    /// The application replaces this with a real wall clock.
    pub clock: Clock,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoints: HealthEndpoints::default(),
            health: HealthSettings::default(),
            poll_interval: Duration::from_secs(30),
            timings: MockTimings::default(),
            clock: Arc::new(String::new),
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    StartHealthPolling,
    ProbeHealth,
    Simulate {
        session: PageSession,
        request: MockRequest,
    },
    StartPipeline {
        session: PageSession,
        step: Duration,
    },
    StopPipeline {
        session: PageSession,
    },
    Debounce {
        session: PageSession,
        seq: u64,
        after: Duration,
    },
    ExpireToast {
        id: ToastId,
        after: Duration,
    },
    Teardown {
        session: PageSession,
    },
    Shutdown,
}

#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> io::Result<Self> {
        let probe = Arc::new(ReqwestHealthProbe::new(config.health.clone()));
        Self::with_probe(config, probe)
    }

    pub fn with_probe(config: EngineConfig, probe: Arc<dyn HealthProbe>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = Runtime::new()?;
        let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));

        thread::spawn(move || {
            let mut worker = Worker {
                runtime,
                config,
                probe,
                sink,
                app_token: CancellationToken::new(),
                sessions: HashMap::new(),
                pipelines: HashMap::new(),
                polling: false,
            };
            while let Ok(command) = cmd_rx.recv() {
                if matches!(command, EngineCommand::Shutdown) {
                    break;
                }
                worker.handle(command);
            }
            worker.app_token.cancel();
            dash_info!("Engine stopped");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn start_health_polling(&self) {
        self.send(EngineCommand::StartHealthPolling);
    }

    pub fn probe_health(&self) {
        self.send(EngineCommand::ProbeHealth);
    }

    pub fn simulate(&self, session: PageSession, request: MockRequest) {
        self.send(EngineCommand::Simulate { session, request });
    }

    pub fn start_pipeline(&self, session: PageSession, step: Duration) {
        self.send(EngineCommand::StartPipeline { session, step });
    }

    pub fn stop_pipeline(&self, session: PageSession) {
        self.send(EngineCommand::StopPipeline { session });
    }

    pub fn debounce(&self, session: PageSession, seq: u64, after: Duration) {
        self.send(EngineCommand::Debounce {
            session,
            seq,
            after,
        });
    }

    pub fn expire_toast(&self, id: ToastId, after: Duration) {
        self.send(EngineCommand::ExpireToast { id, after });
    }

    /// Cancels every timer and pending operation started for `session`.
    pub fn teardown(&self, session: PageSession) {
        self.send(EngineCommand::Teardown { session });
    }

    pub fn shutdown(&self) {
        self.send(EngineCommand::Shutdown);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

/// Owns the runtime and the cancellation scopes; lives on the engine thread.
struct Worker {
    runtime: Runtime,
    config: EngineConfig,
    probe: Arc<dyn HealthProbe>,
    sink: Arc<dyn EventSink>,
    app_token: CancellationToken,
    sessions: HashMap<PageSession, CancellationToken>,
    pipelines: HashMap<PageSession, CancellationToken>,
    polling: bool,
}

impl Worker {
    fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::StartHealthPolling => {
                if !self.polling {
                    self.polling = true;
                    self.spawn_health_polling();
                }
            }
            EngineCommand::ProbeHealth => {
                let token = self.app_token.clone();
                let task = self.probe_task();
                self.runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {}
                        _ = task => {}
                    }
                });
            }
            EngineCommand::Simulate { session, request } => self.spawn_simulation(session, request),
            EngineCommand::StartPipeline { session, step } => {
                let token = self.session_token(session).child_token();
                if let Some(previous) = self.pipelines.insert(session, token.clone()) {
                    previous.cancel();
                }
                dash_debug!("Pipeline ticker started for {session:?}");
                self.runtime
                    .spawn(run_pipeline_ticker(session, step, token, self.sink.clone()));
            }
            EngineCommand::StopPipeline { session } => {
                if let Some(token) = self.pipelines.remove(&session) {
                    token.cancel();
                    dash_debug!("Pipeline ticker stopped for {session:?}");
                }
            }
            EngineCommand::Debounce {
                session,
                seq,
                after,
            } => {
                let token = self.session_token(session);
                self.spawn_delayed(token, after, EngineEvent::DebounceElapsed { session, seq });
            }
            EngineCommand::ExpireToast { id, after } => {
                let token = self.app_token.clone();
                self.spawn_delayed(token, after, EngineEvent::ToastExpired(id));
            }
            EngineCommand::Teardown { session } => {
                self.pipelines.remove(&session);
                if let Some(token) = self.sessions.remove(&session) {
                    token.cancel();
                    dash_debug!("Tore down {session:?}");
                }
            }
            EngineCommand::Shutdown => {}
        }
    }

    fn session_token(&mut self, session: PageSession) -> CancellationToken {
        self.sessions
            .entry(session)
            .or_insert_with(|| self.app_token.child_token())
            .clone()
    }

    fn spawn_delayed(&self, token: CancellationToken, after: Duration, event: EngineEvent) {
        let sink = self.sink.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(after) => sink.emit(event),
            }
        });
    }

    fn spawn_simulation(&mut self, session: PageSession, request: MockRequest) {
        let token = self.session_token(session);
        let delay = self.config.timings.delay_for(&request);
        let clock = self.config.clock.clone();
        let sink = self.sink.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let mut rng = StdRng::from_entropy();
                    let result = generate(&request, &mut rng, clock.as_ref());
                    sink.emit(EngineEvent::MockCompleted { session, result });
                }
            }
        });
    }

    fn spawn_health_polling(&self) {
        let token = self.app_token.clone();
        let interval = self.config.poll_interval;
        let probe = self.probe.clone();
        let endpoints = self.config.endpoints.clone();
        let policy = self.config.health.retry;
        let sink = self.sink.clone();
        self.runtime.spawn(async move {
            let mut ticks = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticks.tick() => {}
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = probe_all(probe.as_ref(), &endpoints, policy, sink.as_ref()) => {}
                }
            }
        });
    }

    fn probe_task(&self) -> impl Future<Output = ()> + Send + 'static {
        let probe = self.probe.clone();
        let endpoints = self.config.endpoints.clone();
        let policy = self.config.health.retry;
        let sink = self.sink.clone();
        async move { probe_all(probe.as_ref(), &endpoints, policy, sink.as_ref()).await }
    }
}

/// Checks every configured service concurrently and reports in catalog order.
pub async fn probe_all(
    probe: &dyn HealthProbe,
    endpoints: &HealthEndpoints,
    policy: RetryPolicy,
    sink: &dyn EventSink,
) {
    let checks = SERVICES.iter().map(|service| async move {
        (
            service.key,
            check_service(probe, endpoints, service, policy).await,
        )
    });
    for (service, online) in join_all(checks).await {
        sink.emit(EngineEvent::HealthProbed { service, online });
    }
}
