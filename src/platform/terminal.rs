//! Terminal session guard

use std::io::{self, Stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use glam::Vec2;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::Paragraph;

use super::raster;
use crate::renderer::DrawCmd;
use crate::settings::ColorMode;

/// Raw-mode alternate-screen terminal, restored on drop
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Keyboard enhancement flags were pushed (release events available)
    enhanced: bool,
    color_mode: ColorMode,
}

impl Tui {
    /// Switch the terminal into game mode
    ///
    /// If any step fails, whatever was already set up is undone before the
    /// error is returned.
    pub fn enter(color_mode: ColorMode) -> anyhow::Result<Self> {
        enable_raw_mode()?;
        with_rollback(|| Self::setup(color_mode), || restore(false))
    }

    fn setup(color_mode: ColorMode) -> anyhow::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        // Pushed last so a failure before this point has nothing to pop
        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                terminal.backend_mut(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        }
        log::info!("Terminal entered (key release events: {enhanced})");

        Ok(Self {
            terminal,
            enhanced,
            color_mode,
        })
    }

    /// Whether the terminal will report key releases
    pub fn reports_releases(&self) -> bool {
        self.enhanced
    }

    /// Draw one frame of `world`-sized screen space, scaled to the terminal
    pub fn draw(&mut self, cmds: &[DrawCmd], world: Vec2) -> anyhow::Result<()> {
        let mode = self.color_mode;
        self.terminal.draw(|frame| {
            let area = frame.area();
            let lines = raster::rasterize(cmds, world, area.width, area.height).into_lines(mode);
            frame.render_widget(Paragraph::new(lines), area);
        })?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        restore(self.enhanced);
    }
}

/// Leave game mode; errors are ignored since this also runs on failure paths
fn restore(enhanced: bool) {
    let mut stdout = io::stdout();
    if enhanced {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    let _ = execute!(stdout, LeaveAlternateScreen, Show);
}

/// Run `setup`, calling `rollback` if it fails
fn with_rollback<T>(
    setup: impl FnOnce() -> anyhow::Result<T>,
    rollback: impl FnOnce(),
) -> anyhow::Result<T> {
    setup().inspect_err(|err| {
        log::warn!("Terminal setup failed, restoring: {err:#}");
        rollback();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_rolls_back() {
        let restored = Cell::new(false);
        let result: anyhow::Result<()> =
            with_rollback(|| anyhow::bail!("no tty"), || restored.set(true));
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_keeps_state() {
        let restored = Cell::new(false);
        let result = with_rollback(|| Ok(7), || restored.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }
}
