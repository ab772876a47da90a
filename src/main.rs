//! Drifter - terminal entry point

use std::fs::File;

use anyhow::Context;

use drifter::platform::{Event, EventHandler, Tui};
use drifter::settings::ColorMode;
use drifter::{App, Settings};

/// Log file path; without it logging stays off unless `RUST_LOG` asks for it
const LOG_ENV: &str = "DRIFTER_LOG";
/// Overrides the settings file's color mode ("rgb" or "ansi")
const COLOR_ENV: &str = "DRIFTER_COLOR";

fn init_logging() -> anyhow::Result<()> {
    // stderr shares the terminal with the game screen, so only log there
    // when explicitly requested
    match std::env::var_os(LOG_ENV) {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create log file {}", path.to_string_lossy()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
                .init();
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    log::info!("Drifter starting...");

    let mut settings = Settings::load()?;
    if let Some(mode) = std::env::var(COLOR_ENV)
        .ok()
        .and_then(|v| ColorMode::from_str(&v))
    {
        log::info!("Color mode from {COLOR_ENV}: {}", mode.as_str());
        settings.color_mode = mode;
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Session seed: {seed}");

    let mut tui = Tui::enter(settings.color_mode)?;
    let events = EventHandler::new(settings.tick_ms);
    let mut app = App::new(settings, seed, tui.reports_releases());

    tui.draw(&app.scene(), app.state.world())?;
    loop {
        match events.next()? {
            Event::Tick => {
                app.on_tick();
                tui.draw(&app.scene(), app.state.world())?;
            }
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            break;
        }
    }

    drop(tui);
    log::info!(
        "Drifter exiting after {} ticks, score {}",
        app.state.time_ticks,
        app.state.score
    );
    Ok(())
}
