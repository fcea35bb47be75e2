use std::time::Duration;

use blockfall_engine::SourceSeed;
use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, Tui},
};

const TICK_RATE: f64 = 60.0;

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub fn new(seed: SourceSeed, high_score: u64, ai: bool, cadence: Duration) -> Self {
        Self {
            screen: PlayScreen::new(seed, high_score, ai, cadence),
        }
    }

    pub fn high_score(&self) -> u64 {
        self.screen.high_score()
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(TICK_RATE);
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.screen.update(Duration::from_secs_f64(1.0 / TICK_RATE));
    }
}
