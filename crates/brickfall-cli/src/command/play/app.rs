use std::time::Duration;

use brickfall_engine::{Command, CommandQueue, GameEvent, GameSession, SessionState};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, RenderMode, Tui},
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const PLAYING_KEYS: &[KeyBinding] = &[
    KeyBinding {
        keys: &["←", "→"],
        action: "Move",
    },
    KeyBinding {
        keys: &["↓"],
        action: "Drop",
    },
    KeyBinding {
        keys: &["↑"],
        action: "Rotate",
    },
    KeyBinding {
        keys: &["P"],
        action: "Pause",
    },
    KeyBinding {
        keys: &["R"],
        action: "Restart",
    },
    KeyBinding {
        keys: &["Q"],
        action: "Quit",
    },
];

const PAUSED_KEYS: &[KeyBinding] = &[
    KeyBinding {
        keys: &["P"],
        action: "Resume",
    },
    KeyBinding {
        keys: &["R"],
        action: "Restart",
    },
    KeyBinding {
        keys: &["Q"],
        action: "Quit",
    },
];

const STOPPED_KEYS: &[KeyBinding] = &[
    KeyBinding {
        keys: &["R"],
        action: "Restart",
    },
    KeyBinding {
        keys: &["Q"],
        action: "Quit",
    },
];

/// Interactive game driven by the terminal.
///
/// Arrow keys and drop timer ticks are both turned into [`Command`]s and
/// pushed onto one queue, which is drained after every event.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    queue: CommandQueue,
    drop_interval: Duration,
    render_mode: RenderMode,
    cleared_rows: Option<usize>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, drop_interval: Duration, render_mode: RenderMode) -> Self {
        Self {
            session,
            queue: CommandQueue::new(),
            drop_interval,
            render_mode,
            cleared_rows: None,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn restart(&mut self, tui: &mut Tui) {
        self.queue.clear();
        self.cleared_rows = None;
        self.session.start();
        tui.restart_tick();
        self.collect_events(tui);
    }

    fn run_queue(&mut self, tui: &mut Tui) {
        self.session.process(&mut self.queue);
        self.collect_events(tui);
    }

    /// Redraws only when the engine reported a change.
    fn collect_events(&mut self, tui: &mut Tui) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::RowsCleared { count } => self.cleared_rows = Some(count),
                GameEvent::CellDrawn { .. }
                | GameEvent::CellCleared { .. }
                | GameEvent::GridRedrawn
                | GameEvent::ScoreChanged { .. }
                | GameEvent::PieceSpawned { .. }
                | GameEvent::GameOver => {}
            }
            tui.request_render();
        }
    }
}

/// Maps a key to the command it queues, if any.
fn key_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Down => Some(Command::SoftDrop),
        KeyCode::Up => Some(Command::Rotate),
        _ => None,
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(Some(self.drop_interval));
        tui.set_render_mode(self.render_mode);
        self.restart(tui);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        match key.code {
            KeyCode::Char('q') => self.is_exiting = true,
            KeyCode::Char('r') => self.restart(tui),
            KeyCode::Char('p') => {
                self.session.toggle_pause();
                if self.session.state().is_playing() {
                    tui.restart_tick();
                }
            }
            code => {
                if let Some(command) = key_command(code) {
                    self.queue.push(command);
                    self.run_queue(tui);
                }
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = match self.session.state() {
            SessionState::Playing => PLAYING_KEYS,
            SessionState::Paused => PAUSED_KEYS,
            SessionState::Idle | SessionState::GameOver => STOPPED_KEYS,
        };
        let session_display = SessionDisplay::new(&self.session).cleared_rows(self.cleared_rows);

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        if self.cleared_rows.take().is_some() {
            tui.request_render();
        }
        self.queue.push(Command::Tick);
        self.run_queue(tui);
    }
}
