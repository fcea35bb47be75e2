use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for TUI applications driven by [`Tui::run`].
pub trait App {
    /// Called once at the start of `Tui::run()`. Use this to configure the
    /// tick rate.
    fn init(&mut self, tui: &mut Tui);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);

    /// Advances application logic, called once per tick.
    fn update(&mut self, tui: &mut Tui);
}
