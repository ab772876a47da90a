//! Keyboard state tracking
//!
//! Terminals report key presses and auto-repeats but many never report
//! releases. Held keys therefore expire `grace` ticks after their last press
//! or repeat, unless the terminal has shown it sends release events.

use crossterm::event::KeyCode;

use crate::sim::TickInput;

/// Game actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    TurnLeft,
    TurnRight,
    Thrust,
    Reverse,
    Fire,
    Restart,
    Quit,
}

impl Key {
    pub const COUNT: usize = 7;

    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('a' | 'A') | KeyCode::Left => Some(Key::TurnLeft),
            KeyCode::Char('d' | 'D') | KeyCode::Right => Some(Key::TurnRight),
            KeyCode::Char('w' | 'W') | KeyCode::Up => Some(Key::Thrust),
            KeyCode::Char('s' | 'S') | KeyCode::Down => Some(Key::Reverse),
            KeyCode::Char(' ') => Some(Key::Fire),
            KeyCode::Char('r' | 'R') => Some(Key::Restart),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Key::Quit),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Per-key held/pressed bookkeeping, advanced once per tick
#[derive(Debug, Clone)]
pub struct KeyState {
    /// Ticks since the last press or repeat, `None` when up
    held: [Option<u32>; Key::COUNT],
    /// Pressed since the last `end_tick`
    pressed: [bool; Key::COUNT],
    grace: u32,
    /// Set once the terminal delivers a release; held keys stop expiring
    releases: bool,
}

impl KeyState {
    pub fn new(grace: u32, releases: bool) -> Self {
        Self {
            held: [None; Key::COUNT],
            pressed: [false; Key::COUNT],
            grace: grace.max(1),
            releases,
        }
    }

    /// Press or auto-repeat
    pub fn key_down(&mut self, key: Key, repeat: bool) {
        let i = key.index();
        if !repeat && self.held[i].is_none() {
            self.pressed[i] = true;
        }
        self.held[i] = Some(0);
    }

    pub fn key_up(&mut self, key: Key) {
        self.releases = true;
        self.held[key.index()] = None;
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()].is_some()
    }

    /// True only during the first tick after a fresh press
    #[inline]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Held now, or tapped and released since the last tick
    #[inline]
    fn active(&self, key: Key) -> bool {
        self.is_held(key) || self.was_pressed(key)
    }

    /// Snapshot the controls for one simulation tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            turn_left: self.active(Key::TurnLeft),
            turn_right: self.active(Key::TurnRight),
            thrust: self.active(Key::Thrust),
            reverse: self.active(Key::Reverse),
            fire: self.active(Key::Fire),
            restart: self.was_pressed(Key::Restart),
        }
    }

    /// Clear edge flags and age held keys
    pub fn end_tick(&mut self) {
        self.pressed = [false; Key::COUNT];
        if self.releases {
            return;
        }
        for slot in &mut self.held {
            if let Some(age) = slot {
                *age += 1;
                if *age >= self.grace {
                    *slot = None;
                }
            }
        }
    }

    pub fn releases_reported(&self) -> bool {
        self.releases
    }
}
