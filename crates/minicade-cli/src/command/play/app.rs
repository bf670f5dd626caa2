use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    registry::Game,
    tui::{App, RenderMode, Runtime},
};

use super::screen::Screen;

const FPS: f64 = 60.0;

#[derive(Debug)]
pub struct PlayApp {
    screen: Screen,
}

impl PlayApp {
    pub fn new(game: Game) -> Self {
        Self {
            screen: Screen::new(game),
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(FPS));
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) {
        self.screen.handle_event(event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        self.screen.update(elapsed);
    }
}
