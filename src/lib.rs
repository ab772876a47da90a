//! Drifter - a wrap-around asteroid field arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `renderer`: Camera projection and per-frame draw commands
//! - `platform`: Terminal host (events, key state, drawing)
//! - `tuning`: Data-driven game balance
//! - `settings`: Host preferences loaded from JSON

pub mod app;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate; every speed below is "per tick" at this rate
    pub const TICK_RATE_HZ: u32 = 60;

    /// World dimensions (the torus)
    pub const WORLD_WIDTH: f32 = 320.0;
    pub const WORLD_HEIGHT: f32 = 240.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 5.0;
    pub const SHIP_THRUST: f32 = 0.06;
    pub const SHIP_FRICTION: f32 = 0.002;
    pub const SHIP_MAX_SPEED: f32 = 2.5;
    pub const SHIP_TURN_RATE: f32 = 0.06;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 4.0;
    pub const BULLET_TTL: u32 = 60;
    pub const BULLET_RADIUS: f32 = 1.0;
    pub const FIRE_COOLDOWN: u32 = 8;

    /// Asteroid defaults
    pub const ASTEROID_RADIUS: f32 = 8.0;
    pub const ASTEROID_MIN_SPEED: f32 = 0.08;
    pub const ASTEROID_MAX_SPEED: f32 = 0.4;
    pub const ASTEROID_POINTS: u64 = 10;

    /// Splitting: only asteroids larger than the threshold break apart
    pub const SPLIT_THRESHOLD: f32 = 3.0;
    pub const SPLIT_FACTOR: f32 = 0.6;
    pub const FRAGMENT_MIN_RADIUS: f32 = 2.0;
    pub const FRAGMENT_MIN_COUNT: u32 = 2;
    pub const FRAGMENT_MAX_COUNT: u32 = 3;
    pub const FRAGMENT_BOOST_MAX: f32 = 0.3;

    /// Spawn placement
    pub const SAFE_SPAWN_DIST: f32 = WORLD_WIDTH / 2.0;
    pub const SPAWN_ATTEMPTS: u32 = 256;

    /// Difficulty: minimum asteroid count rises with score
    pub const BASE_MIN_ASTEROIDS: usize = 10;
    pub const DIFFICULTY_SCORE_STEP: u64 = 100;
    pub const ASTEROIDS_PER_STEP: usize = 2;
    pub const MAX_MIN_ASTEROIDS: usize = 16;

    /// Powerups (8 to 15 seconds between spawn attempts)
    pub const POWERUP_SPAWN_MIN: u32 = 8 * TICK_RATE_HZ;
    pub const POWERUP_SPAWN_MAX: u32 = 15 * TICK_RATE_HZ;
    pub const POWERUP_CAP: usize = 3;
    pub const POWERUP_TTL: u32 = 20 * TICK_RATE_HZ;
    pub const POWERUP_RADIUS: f32 = 4.0;
    pub const POWERUP_MIN_SPEED: f32 = 0.02;
    pub const POWERUP_MAX_SPEED: f32 = 0.08;

    /// Powerup effects
    pub const LASER_DURATION: u32 = 12 * TICK_RATE_HZ;
    pub const POINTS_BONUS: u64 = 50;
    pub const EXPLOSION_SPEED: f32 = 3.0;
    pub const EXPLOSION_TOLERANCE: f32 = 3.0;
}
