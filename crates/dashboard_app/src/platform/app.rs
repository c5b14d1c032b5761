use std::io::{self, Stdout};
use std::sync::mpsc;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use dashboard_core::{update, AppState, LogClock, Msg};
use dashboard_logging::{dash_info, dash_warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::effects::EffectRunner;
use super::logging;
use super::ui::keymap::{map_key, map_paste, KeyAction, UiState};
use super::ui::render::render;

/// How long to wait for terminal input before draining engine messages.
const TICK: Duration = Duration::from_millis(75);

type Backend = CrosstermBackend<Stdout>;

/// Restores the terminal on every exit path, panics included.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
    }
}

pub fn run_app(location: String) -> anyhow::Result<()> {
    logging::initialize();
    dash_info!("ObsidiaShell starting at '{location}'");

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(msg_tx)?;

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut app = App {
        state: AppState::with_clock(LogClock::new(wall_clock)),
        ui: UiState::default(),
        runner,
        needs_redraw: true,
    };
    app.dispatch(Msg::Started { location });
    let outcome = app.event_loop(&mut terminal, &msg_rx);

    app.runner.shutdown();
    drop(guard);
    match &outcome {
        Ok(()) => dash_info!("ObsidiaShell stopped"),
        Err(err) => dash_warn!("ObsidiaShell stopped on error: {err}"),
    }
    outcome
}

fn wall_clock() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

struct App {
    state: AppState,
    ui: UiState,
    runner: EffectRunner,
    needs_redraw: bool,
}

impl App {
    fn event_loop(
        &mut self,
        terminal: &mut Terminal<Backend>,
        msg_rx: &mpsc::Receiver<Msg>,
    ) -> anyhow::Result<()> {
        loop {
            while let Ok(msg) = msg_rx.try_recv() {
                self.dispatch(msg);
            }

            if self.needs_redraw {
                let view = self.state.view();
                terminal.draw(|frame| render(frame, &view, &self.ui))?;
                self.needs_redraw = false;
            }

            if !event::poll(TICK)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let view = self.state.view();
                    match map_key(&view, &mut self.ui, key) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Dispatch(msg) => self.dispatch(msg),
                        KeyAction::Redraw => self.needs_redraw = true,
                        KeyAction::Ignore => {}
                    }
                }
                Event::Paste(text) => {
                    let view = self.state.view();
                    if let Some(msg) = map_paste(&view, &mut self.ui, &text) {
                        self.dispatch(msg);
                    }
                }
                Event::Resize(..) => self.needs_redraw = true,
                _ => {}
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.needs_redraw = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }
}
