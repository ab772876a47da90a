//! Frame description for the host to draw
//!
//! The simulation never touches pixels. Each frame the scene builder turns a
//! `GameState` into a flat list of [`DrawCmd`]s in screen space (same units
//! as the world, y pointing down, camera centred on the ship); a backend in
//! `platform` rasterises them.

pub mod camera;
pub mod scene;

use glam::Vec2;

pub use camera::Camera;
pub use scene::build_scene;

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One primitive draw request, colors are palette indices
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle {
        center: Vec2,
        radius: f32,
        color: u8,
    },
    FilledCircle {
        center: Vec2,
        radius: f32,
        color: u8,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: u8,
    },
    Text {
        pos: Vec2,
        text: String,
        color: u8,
        align: Align,
    },
}

/// Palette indices for game elements (16-color palette)
pub mod colors {
    pub const BACKGROUND: u8 = 0;
    pub const ASTEROID: u8 = 5;
    pub const SHIP: u8 = 7;
    /// Dark label over the powerup's filled disc
    pub const GLYPH: u8 = 0;
    pub const EXPLOSION: u8 = 8;
    pub const DESTROYED: u8 = 8;
    pub const BOMB: u8 = 8;
    pub const DIFFICULTY: u8 = 9;
    pub const BULLET: u8 = 10;
    pub const SCORE: u8 = 11;
    pub const POINTS: u8 = 11;
    pub const LASER: u8 = 12;
    pub const HELP: u8 = 13;

    /// Number of palette entries a backend must provide
    pub const PALETTE_SIZE: usize = 16;
}
