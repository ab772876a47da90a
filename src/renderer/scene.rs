//! Build the per-frame draw list from game state

use glam::Vec2;

use super::{Align, Camera, DrawCmd, colors};
use crate::consts::TICK_RATE_HZ;
use crate::sim::{GameState, PowerupKind};

/// Text rows in world units (one glyph cell is 4x6)
const TOP_ROW: f32 = 2.0;
const SECOND_ROW: f32 = 10.0;
const HUD_MARGIN: f32 = 4.0;

pub const HELP_TEXT: &str = "A/D turn  W accel  S reverse  SPACE shoot  Q quit";
pub const DESTROYED_TEXT: &str = "Destroyed! Press R to restart";

fn powerup_style(kind: PowerupKind) -> (u8, &'static str) {
    match kind {
        PowerupKind::Points => (colors::POINTS, "+"),
        PowerupKind::Laser => (colors::LASER, "L"),
        PowerupKind::Bomb => (colors::BOMB, "B"),
    }
}

/// Describe one frame, camera centred on the ship
pub fn build_scene(state: &GameState, show_help: bool) -> Vec<DrawCmd> {
    let world = state.world();
    let camera = Camera::centered_on(state.ship.pos, world);
    let alive = state.is_alive();
    let mut cmds = Vec::with_capacity(
        state.asteroids.len() + state.bullets.len() + state.powerups.len() * 2 + 12,
    );

    for asteroid in &state.asteroids {
        cmds.push(DrawCmd::Circle {
            center: camera.world_to_screen(asteroid.pos),
            radius: asteroid.radius,
            color: colors::ASTEROID,
        });
    }

    if let Some(explosion) = state.explosion.filter(|_| alive) {
        cmds.push(DrawCmd::Circle {
            center: camera.world_to_screen(explosion.origin),
            radius: explosion.radius,
            color: colors::EXPLOSION,
        });
    }

    for bullet in &state.bullets {
        cmds.push(DrawCmd::FilledCircle {
            center: camera.world_to_screen(bullet.pos),
            radius: bullet.radius,
            color: colors::BULLET,
        });
    }

    for powerup in &state.powerups {
        let center = camera.world_to_screen(powerup.pos);
        let (color, glyph) = powerup_style(powerup.kind);
        cmds.push(DrawCmd::FilledCircle {
            center,
            radius: powerup.radius,
            color,
        });
        cmds.push(DrawCmd::Text {
            pos: center,
            text: glyph.to_string(),
            color: colors::GLYPH,
            align: Align::Center,
        });
    }

    if alive {
        let origin = camera.world_to_screen(state.ship.pos);
        let [nose, left, right] = state.ship.triangle().map(|p| origin + (p - state.ship.pos));
        for (from, to) in [(nose, left), (nose, right), (left, right)] {
            cmds.push(DrawCmd::Line {
                from,
                to,
                color: colors::SHIP,
            });
        }
    }

    push_hud(&mut cmds, state, world, show_help);
    cmds
}

fn push_hud(cmds: &mut Vec<DrawCmd>, state: &GameState, world: Vec2, show_help: bool) {
    let score = format!("Score: {}", state.score);

    if state.is_alive() {
        if show_help {
            cmds.push(DrawCmd::Text {
                pos: Vec2::new(world.x / 2.0, TOP_ROW),
                text: HELP_TEXT.to_string(),
                color: colors::HELP,
                align: Align::Center,
            });
        }
        cmds.push(DrawCmd::Text {
            pos: Vec2::new(world.x - HUD_MARGIN, TOP_ROW),
            text: score,
            color: colors::SCORE,
            align: Align::Right,
        });
    } else {
        cmds.push(DrawCmd::Text {
            pos: Vec2::new(world.x / 2.0, world.y * 0.23),
            text: DESTROYED_TEXT.to_string(),
            color: colors::DESTROYED,
            align: Align::Center,
        });
        cmds.push(DrawCmd::Text {
            pos: Vec2::new(world.x / 2.0, world.y * 0.27),
            text: score,
            color: colors::SCORE,
            align: Align::Center,
        });
    }

    cmds.push(DrawCmd::Text {
        pos: Vec2::new(TOP_ROW, TOP_ROW),
        text: format!("Diff: {}", state.difficulty_level()),
        color: colors::DIFFICULTY,
        align: Align::Left,
    });

    if state.effects.laser_active() {
        cmds.push(DrawCmd::Text {
            pos: Vec2::new(TOP_ROW, SECOND_ROW),
            text: format!("Laser: {}s", state.effects.laser_ticks / TICK_RATE_HZ),
            color: colors::LASER,
            align: Align::Left,
        });
    }
}
