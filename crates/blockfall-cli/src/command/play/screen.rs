use std::time::Duration;

use blockfall_ai::AutoPilot;
use blockfall_engine::{GameSession, SourceSeed};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::ui::widgets::SessionDisplay;

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    pilot: AutoPilot,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(seed: SourceSeed, high_score: u64, ai: bool, cadence: Duration) -> Self {
        let mut pilot = AutoPilot::new(cadence);
        pilot.set_enabled(ai);
        Self {
            session: GameSession::new(seed, high_score),
            pilot,
            is_exiting: false,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn high_score(&self) -> u64 {
        self.session.high_score()
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display =
            SessionDisplay::new(&self.session).pilot_enabled(self.pilot.is_enabled());
        let help_text = if self.session.state().is_game_over() {
            "Controls: R (New Game) | Q (Quit)"
        } else {
            "Controls: ← → (Move) | ↑ (Rotate) | ↓ (Soft Drop) | Space (Hard Drop) | A (Autopilot) | R (New Game) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(23), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let is_playing = self.session.state().is_playing();

        if let Some(event) = event.as_key_event() {
            match event.code {
                // Manual keys stay live even while the autopilot runs, so the
                // player can nudge a piece mid-plan.
                KeyCode::Left if is_playing => _ = self.session.move_piece(-1),
                KeyCode::Right if is_playing => _ = self.session.move_piece(1),
                KeyCode::Up if is_playing => _ = self.session.rotate_piece(),
                KeyCode::Down if is_playing => _ = self.session.soft_drop(),
                KeyCode::Char(' ') if is_playing => self.session.hard_drop(),
                KeyCode::Char('a') if is_playing => self.pilot.toggle(),
                KeyCode::Char('r') => {
                    self.session.reset();
                    self.pilot.set_enabled(false);
                }
                KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
                _ => {}
            }
        }
    }

    pub fn update(&mut self, dt: Duration) {
        if self.session.state().is_game_over() {
            return;
        }
        self.pilot.update(dt, &mut self.session);
        self.session.step(dt);
    }
}
