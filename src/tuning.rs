//! Data-driven game balance
//!
//! Every gameplay constant lives here so a settings file can override any
//! subset of them. Missing keys fall back to the defaults in [`crate::consts`].

use anyhow::ensure;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning (all speeds and durations are per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Ship ===
    pub ship_radius: f32,
    pub ship_thrust: f32,
    pub ship_friction: f32,
    pub ship_max_speed: f32,
    pub ship_turn_rate: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_ttl: u32,
    pub bullet_radius: f32,
    pub fire_cooldown: u32,

    // === Asteroids ===
    pub asteroid_radius: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_points: u64,
    pub split_threshold: f32,
    pub split_factor: f32,
    pub fragment_min_radius: f32,
    pub fragment_min_count: u32,
    pub fragment_max_count: u32,
    pub fragment_boost_max: f32,

    // === Spawning & difficulty ===
    pub safe_spawn_distance: f32,
    pub spawn_attempts: u32,
    pub base_min_asteroids: usize,
    pub difficulty_score_step: u64,
    pub asteroids_per_step: usize,
    pub max_min_asteroids: usize,

    // === Powerups ===
    pub powerup_spawn_min: u32,
    pub powerup_spawn_max: u32,
    pub powerup_cap: usize,
    pub powerup_ttl: u32,
    pub powerup_radius: f32,
    pub powerup_min_speed: f32,
    pub powerup_max_speed: f32,
    pub laser_duration: u32,
    pub points_bonus: u64,
    pub explosion_speed: f32,
    pub explosion_tolerance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            ship_radius: SHIP_RADIUS,
            ship_thrust: SHIP_THRUST,
            ship_friction: SHIP_FRICTION,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_turn_rate: SHIP_TURN_RATE,

            bullet_speed: BULLET_SPEED,
            bullet_ttl: BULLET_TTL,
            bullet_radius: BULLET_RADIUS,
            fire_cooldown: FIRE_COOLDOWN,

            asteroid_radius: ASTEROID_RADIUS,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_points: ASTEROID_POINTS,
            split_threshold: SPLIT_THRESHOLD,
            split_factor: SPLIT_FACTOR,
            fragment_min_radius: FRAGMENT_MIN_RADIUS,
            fragment_min_count: FRAGMENT_MIN_COUNT,
            fragment_max_count: FRAGMENT_MAX_COUNT,
            fragment_boost_max: FRAGMENT_BOOST_MAX,

            safe_spawn_distance: SAFE_SPAWN_DIST,
            spawn_attempts: SPAWN_ATTEMPTS,
            base_min_asteroids: BASE_MIN_ASTEROIDS,
            difficulty_score_step: DIFFICULTY_SCORE_STEP,
            asteroids_per_step: ASTEROIDS_PER_STEP,
            max_min_asteroids: MAX_MIN_ASTEROIDS,

            powerup_spawn_min: POWERUP_SPAWN_MIN,
            powerup_spawn_max: POWERUP_SPAWN_MAX,
            powerup_cap: POWERUP_CAP,
            powerup_ttl: POWERUP_TTL,
            powerup_radius: POWERUP_RADIUS,
            powerup_min_speed: POWERUP_MIN_SPEED,
            powerup_max_speed: POWERUP_MAX_SPEED,
            laser_duration: LASER_DURATION,
            points_bonus: POINTS_BONUS,
            explosion_speed: EXPLOSION_SPEED,
            explosion_tolerance: EXPLOSION_TOLERANCE,
        }
    }
}

impl Tuning {
    /// World size as a vector (width, height)
    #[inline]
    pub fn world(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.world_width > 0.0 && self.world_height > 0.0,
            "world must have a positive size, got {}x{}",
            self.world_width,
            self.world_height
        );
        ensure!(
            self.asteroid_min_speed <= self.asteroid_max_speed,
            "asteroid speed range is inverted ({} > {})",
            self.asteroid_min_speed,
            self.asteroid_max_speed
        );
        ensure!(
            self.powerup_min_speed <= self.powerup_max_speed,
            "powerup speed range is inverted ({} > {})",
            self.powerup_min_speed,
            self.powerup_max_speed
        );
        ensure!(
            self.powerup_spawn_min <= self.powerup_spawn_max,
            "powerup spawn interval is inverted ({} > {})",
            self.powerup_spawn_min,
            self.powerup_spawn_max
        );
        ensure!(
            self.fragment_min_count <= self.fragment_max_count,
            "fragment count range is inverted ({} > {})",
            self.fragment_min_count,
            self.fragment_max_count
        );
        ensure!(
            self.base_min_asteroids <= self.max_min_asteroids,
            "base asteroid minimum {} exceeds cap {}",
            self.base_min_asteroids,
            self.max_min_asteroids
        );
        ensure!(
            self.difficulty_score_step > 0,
            "difficulty_score_step must be positive"
        );
        ensure!(
            (0.0..1.0).contains(&self.ship_friction),
            "ship_friction must be in [0, 1), got {}",
            self.ship_friction
        );
        ensure!(
            self.bullet_speed < self.world_width.min(self.world_height),
            "bullet_speed {} would skip across the world in one tick",
            self.bullet_speed
        );
        for (name, radius) in [
            ("ship_radius", self.ship_radius),
            ("bullet_radius", self.bullet_radius),
            ("asteroid_radius", self.asteroid_radius),
            ("powerup_radius", self.powerup_radius),
            ("fragment_min_radius", self.fragment_min_radius),
        ] {
            ensure!(radius > 0.0, "{name} must be positive, got {radius}");
        }
        ensure!(self.bullet_ttl > 0, "bullet_ttl must be positive");
        ensure!(
            self.split_factor > 0.0 && self.split_factor < 1.0,
            "split_factor must be in (0, 1), got {}",
            self.split_factor
        );
        ensure!(
            self.fragment_boost_max >= 0.0,
            "fragment_boost_max must not be negative, got {}",
            self.fragment_boost_max
        );
        // A ring that never outgrows the world would pause replenishment forever
        ensure!(
            self.explosion_speed > 0.0,
            "explosion_speed must be positive, got {}",
            self.explosion_speed
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.world(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning: Tuning =
            serde_json::from_str(r#"{ "points_bonus": 75, "powerup_cap": 5 }"#).unwrap();
        assert_eq!(tuning.points_bonus, 75);
        assert_eq!(tuning.powerup_cap, 5);
        // Untouched keys keep their defaults
        assert_eq!(tuning.bullet_ttl, BULLET_TTL);
        assert_eq!(tuning.base_min_asteroids, BASE_MIN_ASTEROIDS);
    }

    #[test]
    fn test_validate_rejects_inverted_ranges() {
        let tuning = Tuning {
            powerup_spawn_min: 900,
            powerup_spawn_max: 480,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());

        let tuning = Tuning {
            world_width: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_fragment_boost() {
        let tuning: Tuning = serde_json::from_str(r#"{ "fragment_boost_max": -1.0 }"#).unwrap();
        assert!(tuning.validate().is_err());

        let tuning = Tuning {
            fragment_boost_max: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_stalled_explosion() {
        for speed in [0.0, -3.0] {
            let tuning = Tuning {
                explosion_speed: speed,
                ..Default::default()
            };
            assert!(tuning.validate().is_err(), "speed {speed} accepted");
        }
    }

    #[test]
    fn test_validate_rejects_degenerate_sizes() {
        let bad = [
            Tuning {
                bullet_ttl: 0,
                ..Default::default()
            },
            Tuning {
                asteroid_radius: 0.0,
                ..Default::default()
            },
            Tuning {
                ship_radius: -1.0,
                ..Default::default()
            },
            Tuning {
                powerup_radius: 0.0,
                ..Default::default()
            },
            Tuning {
                split_factor: 1.0,
                ..Default::default()
            },
            Tuning {
                split_factor: 0.0,
                ..Default::default()
            },
        ];
        for tuning in bad {
            assert!(tuning.validate().is_err(), "{tuning:?} accepted");
        }
    }
}
