use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

/// What the event loop produced.
#[derive(Debug)]
pub(super) enum TuiEvent {
    /// A tick interval elapsed.
    Tick,
    /// The screen should be redrawn.
    Render,
    /// A terminal event arrived.
    Crossterm(Event),
}

/// Blocking tick/render/input multiplexer.
///
/// Ticks fire at a fixed interval; renders fire after anything changed
/// (a tick or a terminal event). Without a tick interval only terminal
/// events are delivered.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            // The first frame must be drawn before anything happens.
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    /// Returns the next event, blocking until one is due.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }
            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.poll_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(TuiEvent::Crossterm(event::read()?));
        }
    }

    fn poll_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}
