//! Application state: one game session plus the host's input bookkeeping

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::platform::{Key, KeyState};
use crate::renderer::{DrawCmd, build_scene};
use crate::settings::Settings;
use crate::sim::{GameState, tick};

pub struct App {
    pub state: GameState,
    pub keys: KeyState,
    pub settings: Settings,
    pub should_quit: bool,
}

impl App {
    /// `releases` says whether the terminal reports key releases
    pub fn new(settings: Settings, seed: u64, releases: bool) -> Self {
        let state = GameState::new(seed, settings.tuning.clone());
        let keys = KeyState::new(settings.hold_grace_ticks, releases);
        Self {
            state,
            keys,
            settings,
            should_quit: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let Some(mapped) = Key::from_code(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => {
                if mapped == Key::Quit {
                    self.should_quit = true;
                    return;
                }
                self.keys.key_down(mapped, false);
            }
            KeyEventKind::Repeat => self.keys.key_down(mapped, true),
            KeyEventKind::Release => self.keys.key_up(mapped),
        }
    }

    /// Advance the simulation one fixed step
    pub fn on_tick(&mut self) {
        let input = self.keys.tick_input();
        tick(&mut self.state, &input);
        self.keys.end_tick();
    }

    /// Draw list for the current frame
    pub fn scene(&self) -> Vec<DrawCmd> {
        build_scene(&self.state, self.settings.show_help)
    }
}
