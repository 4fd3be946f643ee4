mod spawn;

use crate::{components, keymap, theme::Theme};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
};
use spawn::spawn_submission;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    time::{Duration, Instant},
};
use templater_core::{
    config::KeysConfig,
    event::AppEvent,
    keyboard::KeyEvent,
    machine::{Effect, StateMachine},
    recovery::RecoveryAction,
    state::AppState,
    status::ScreenStatus,
};

/// What to do after the TUI exits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exit(u8),
    /// Run this once the terminal is restored
    Recover(RecoveryAction),
}

/// Handle for dispatching background work
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
    cancel: Arc<AtomicBool>,
}

impl EventSender {
    /// Send an event from a background thread to the main loop
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

const POLL_INTERVAL: Duration = Duration::from_millis(80);
/// Below this many rows the banner is dropped to leave room for content.
const LOGO_MIN_HEIGHT: u16 = 24;
/// Below this many columns the sidebar is hidden.
const SIDEBAR_MIN_WIDTH: u16 = 70;

struct App {
    machine: StateMachine,
    keys: KeysConfig,
    theme: Theme,
    sender: EventSender,
    rx: mpsc::Receiver<AppEvent>,
    exit_deadline: Option<Instant>,
    spinner_start: Instant,
    /// Raised from a signal handler; the loop exits cleanly on its next pass
    shutdown: Arc<AtomicBool>,
}

impl App {
    fn new(
        machine: StateMachine,
        keys: KeysConfig,
        theme: Theme,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        Self {
            machine,
            keys,
            theme,
            sender: EventSender {
                tx,
                cancel: Arc::new(AtomicBool::new(false)),
            },
            rx,
            exit_deadline: None,
            spinner_start: Instant::now(),
            shutdown,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<Outcome> {
        let status = self.machine.status();
        let action = keymap::resolve_action(key, &status, &self.keys)?;
        log::debug!("{key} -> {action:?} in {}", status.name());
        let effect = self.machine.apply(action)?;
        self.process_effect(effect)
    }

    fn handle_app_event(&mut self, event: AppEvent) -> Option<Outcome> {
        let effect = self.machine.handle_event(event)?;
        self.process_effect(effect)
    }

    /// Honour a pending shutdown request, then fire the auto-exit timer once
    /// its deadline has passed.
    fn tick(&mut self, now: Instant) -> Option<Outcome> {
        if self.shutdown.load(Ordering::SeqCst) {
            log::info!("Shutdown requested in {} state", self.machine.status().name());
            return self.process_effect(Effect::Exit(0));
        }
        match self.exit_deadline {
            Some(deadline) if now >= deadline => {
                self.exit_deadline = None;
                self.handle_app_event(AppEvent::AutoExitElapsed)
            }
            _ => None,
        }
    }

    fn process_effect(&mut self, effect: Effect) -> Option<Outcome> {
        match effect {
            Effect::Submit(draft) => {
                self.spinner_start = Instant::now();
                spawn_submission(self.machine.context(), &self.sender, draft);
                None
            }
            Effect::ScheduleExit(delay) => {
                self.exit_deadline = Some(Instant::now() + delay);
                None
            }
            Effect::Exit(code) => {
                // Abandon any in-flight submission
                self.sender.cancel.store(true, Ordering::Relaxed);
                Some(Outcome::Exit(code))
            }
            Effect::Recover(action) => Some(Outcome::Recover(action)),
        }
    }

    fn draw(&self, f: &mut Frame) {
        let status = self.machine.status();
        let area = f.area();

        let show_logo = area.height >= LOGO_MIN_HEIGHT;
        let chunks = Layout::vertical([
            Constraint::Length(if show_logo { components::logo::HEIGHT } else { 0 }),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        if show_logo {
            components::logo::draw(f, chunks[0], &self.theme);
        }
        self.draw_body(f, chunks[1], &status);
        components::footer::draw(f, chunks[2], &status, &self.keys, &self.theme);
    }

    fn draw_body(&self, f: &mut Frame, area: Rect, status: &ScreenStatus) {
        let theme = &self.theme;
        match self.machine.state() {
            AppState::Interactive(session) => {
                let main_area = if area.width >= SIDEBAR_MIN_WIDTH {
                    let columns = Layout::horizontal([
                        Constraint::Length(components::sidebar::WIDTH),
                        Constraint::Min(1),
                    ])
                    .split(area);
                    components::sidebar::draw(f, columns[0], session, theme);
                    columns[1]
                } else {
                    area
                };

                match status {
                    ScreenStatus::SelectingBranch => {
                        components::branch_list::draw(f, main_area, session, theme);
                    }
                    ScreenStatus::SelectingTemplate => {
                        let root = &self.machine.context().repo_root;
                        components::template_list::draw(f, main_area, session, root, theme);
                    }
                    _ => {
                        if let (Some(buffer), Some(template)) =
                            (session.editor(), session.selected_template())
                        {
                            components::editor::draw(f, main_area, buffer, template, theme);
                        }
                    }
                }
            }
            AppState::Creating {
                target_branch,
                title,
            } => {
                let elapsed = self.spinner_start.elapsed();
                components::status_panel::draw_creating(
                    f,
                    area,
                    target_branch,
                    title,
                    elapsed,
                    theme,
                );
            }
            AppState::Success { url } => {
                components::status_panel::draw_success(f, area, url, theme);
            }
            AppState::Failed { error, compare_url } => {
                components::status_panel::draw_failed(f, area, error, compare_url.as_deref(), theme);
            }
            AppState::Error { .. } => {
                components::status_panel::draw_error(f, area, status, &self.keys, theme);
            }
        }
    }
}

/// Drive the UI until the user quits, the success timer fires or a recovery
/// action is chosen.
pub fn run(
    terminal: &mut DefaultTerminal,
    machine: StateMachine,
    keys: KeysConfig,
    theme: Theme,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<Outcome> {
    let mut app = App::new(machine, keys, theme, shutdown);
    log::info!("Starting in {} state", app.machine.status().name());

    loop {
        terminal.draw(|f| app.draw(f))?;

        if let Some(outcome) = app.tick(Instant::now()) {
            return Ok(outcome);
        }

        // Check background channel (non-blocking)
        if let Ok(app_event) = app.rx.try_recv() {
            if let Some(outcome) = app.handle_app_event(app_event) {
                return Ok(outcome);
            }
            continue;
        }

        // Poll terminal events with a timeout so we can update spinner + check channel
        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(key) = KeyEvent::from_crossterm(key)
                && let Some(outcome) = app.handle_key(&key)
            {
                return Ok(outcome);
            }
        }
    }
}
