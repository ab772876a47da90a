//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one frame at 60 Hz)
//! - Seeded RNG only (one `Pcg32` owned by `GameState`)
//! - Stable iteration order (collections keep insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod torus;

pub use collision::{circles_overlap, explosion_catches, first_asteroid_hit};
pub use spawn::{Placement, difficulty_level, min_asteroids_for_score, place_away};
pub use state::{
    ActiveEffects, Asteroid, Bullet, Explosion, GamePhase, GameState, Powerup, PowerupKind, Ship,
};
pub use tick::{TickInput, tick};
pub use torus::{toroidal_delta, toroidal_dist_sq, toroidal_distance, wrap};
