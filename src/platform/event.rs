//! Terminal event pump

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, KeyEvent};

pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Background thread that forwards key events and emits ticks
///
/// Ticks are scheduled against a deadline rather than a poll timeout, so a
/// stream of key events cannot delay them.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_ms.max(1));

        thread::spawn(move || {
            let mut next_tick = Instant::now() + tick_rate;
            loop {
                let timeout = next_tick.saturating_duration_since(Instant::now());
                if event::poll(timeout).unwrap_or(false) {
                    if let Ok(event::Event::Key(key)) = event::read() {
                        if tx.send(Event::Key(key)).is_err() {
                            return;
                        }
                    }
                }

                let now = Instant::now();
                if now >= next_tick {
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                    next_tick += tick_rate;
                    // Fell far behind (suspended terminal); don't burst
                    if next_tick < now {
                        next_tick = now + tick_rate;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<Event> {
        self.rx.recv().context("event thread stopped")
    }
}
