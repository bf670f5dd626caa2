use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, ModifierKeyCode};
use minicade_engine::{Command, GameSession, SessionState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use crate::{
    registry::Game,
    ui::widgets::{SessionDisplay, style},
};

#[derive(Debug)]
pub enum Screen {
    Tetris(TetrisScreen),
}

impl Screen {
    pub fn new(game: Game) -> Self {
        match game {
            Game::Tetris(session) => Screen::Tetris(TetrisScreen::new(session)),
        }
    }

    pub fn should_exit(&self) -> bool {
        match self {
            Screen::Tetris(screen) => screen.is_exiting(),
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        match self {
            Screen::Tetris(screen) => screen.draw(frame),
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match self {
            Screen::Tetris(screen) => screen.handle_event(event),
        }
    }

    pub fn update(&mut self, elapsed: Duration) {
        match self {
            Screen::Tetris(screen) => screen.update(elapsed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Game(Command),
    Quit,
}

fn key_action(code: KeyCode, state: SessionState) -> Option<KeyAction> {
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        code => code,
    };
    let command = match code {
        KeyCode::Left | KeyCode::Char('a') => Command::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') => Command::MoveRight,
        KeyCode::Down | KeyCode::Char('s') => Command::SoftDrop,
        KeyCode::Up | KeyCode::Char('w') => Command::Rotate,
        KeyCode::Char(' ') if state.is_running() => Command::HardDrop,
        KeyCode::Char(' ') | KeyCode::Enter => Command::Start,
        KeyCode::Char('c')
        | KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
            Command::Hold
        }
        KeyCode::Char('p') => Command::PauseToggle,
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char('q') | KeyCode::Esc => return Some(KeyAction::Quit),
        _ => return None,
    };
    Some(KeyAction::Game(command))
}

fn help_text(state: SessionState) -> &'static str {
    match state {
        SessionState::Stopped => "Controls: Space/Enter (Start) | Q (Quit)",
        SessionState::Running => {
            "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | C (Hold) | P (Pause) | R (Reset) | Q (Quit)"
        }
        SessionState::Paused => "Controls: P/Space (Resume) | R (Reset) | Q (Quit)",
        SessionState::GameOver => "Controls: Space/Enter (New Game) | Q (Quit)",
    }
}

#[derive(Debug)]
pub struct TetrisScreen {
    session: GameSession,
    is_exiting: bool,
}

impl TetrisScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            is_exiting: false,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(self.session.snapshot(), self.session.play_time());
        let help_text = Text::from(help_text(self.session.state()))
            .style(style::HELP)
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if event.kind == KeyEventKind::Release {
            return;
        }
        match key_action(event.code, self.session.state()) {
            Some(KeyAction::Game(command)) => {
                if let Err(e) = self.session.apply(command) {
                    log::trace!("{command:?} ignored: {e}");
                }
            }
            Some(KeyAction::Quit) => self.is_exiting = true,
            None => {}
        }
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.session.tick(elapsed);
    }
}
