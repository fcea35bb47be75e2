use std::time::Duration;

use crate::tui::{
    App,
    event_loop::{EventLoop, TuiEvent},
};

/// TUI application runtime.
///
/// Owns the event loop and executes an [`App`] inside a raw-mode terminal.
#[derive(Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Default for Tui {
    fn default() -> Self {
        Self::new()
    }
}

impl Tui {
    /// Creates a runtime with no tick interval set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(),
        }
    }

    /// Sets the tick rate in ticks per second.
    pub fn set_tick_rate(&mut self, rate: f64) {
        self.events
            .set_tick_interval(Some(Duration::from_secs_f64(1.0 / rate)));
    }

    /// Runs the application until [`App::should_exit`] returns true.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
