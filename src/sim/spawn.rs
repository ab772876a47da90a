//! Spawn placement and score-driven difficulty
//!
//! New asteroids and powerups never appear on top of the ship: placement
//! draws random points until one is far enough away (toroidally), with a
//! fixed attempt budget and a deterministic fallback.

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, GameState, Powerup, PowerupKind};
use super::torus::{toroidal_dist_sq, wrap};
use crate::tuning::Tuning;

/// Minimum asteroid count for a score: a step function clamped to [base, cap]
pub fn min_asteroids_for_score(score: u64, tuning: &Tuning) -> usize {
    let steps = score / tuning.difficulty_score_step.max(1);
    let steps = usize::try_from(steps).unwrap_or(usize::MAX);
    let target = tuning
        .base_min_asteroids
        .saturating_add(steps.saturating_mul(tuning.asteroids_per_step));
    target.clamp(tuning.base_min_asteroids, tuning.max_min_asteroids)
}

/// Difficulty level shown to the player (1 at the base minimum)
pub fn difficulty_level(min_asteroids: usize, tuning: &Tuning) -> usize {
    let extra = min_asteroids.saturating_sub(tuning.base_min_asteroids);
    1 + extra / tuning.asteroids_per_step.max(1)
}

/// Outcome of a placement search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// A random point at least the safe distance away
    Random(Vec2),
    /// Attempts ran out; the point opposite the ship
    Fallback(Vec2),
}

impl Placement {
    #[inline]
    pub fn pos(self) -> Vec2 {
        match self {
            Placement::Random(pos) | Placement::Fallback(pos) => pos,
        }
    }
}

/// Find a uniformly random point at least `min_dist` from `avoid`
pub fn place_away<R: Rng + ?Sized>(
    rng: &mut R,
    avoid: Vec2,
    min_dist: f32,
    attempts: u32,
    world: Vec2,
) -> Placement {
    let min_dist_sq = min_dist * min_dist;
    for _ in 0..attempts {
        let candidate = Vec2::new(
            rng.random_range(0.0..world.x),
            rng.random_range(0.0..world.y),
        );
        if toroidal_dist_sq(candidate, avoid, world) >= min_dist_sq {
            return Placement::Random(candidate);
        }
    }
    Placement::Fallback(wrap(avoid + world / 2.0, world))
}

impl GameState {
    /// Current score-scaled asteroid minimum
    pub fn min_asteroids(&self) -> usize {
        min_asteroids_for_score(self.score, &self.tuning)
    }

    /// Current difficulty level for the HUD
    pub fn difficulty_level(&self) -> usize {
        difficulty_level(self.min_asteroids(), &self.tuning)
    }

    fn place_away_from_ship(&mut self) -> Vec2 {
        let placement = place_away(
            &mut self.rng,
            self.ship.pos,
            self.tuning.safe_spawn_distance,
            self.tuning.spawn_attempts,
            self.tuning.world(),
        );
        if let Placement::Fallback(pos) = placement {
            log::warn!(
                "No spawn point {} away from ship after {} attempts, using {:?}",
                self.tuning.safe_spawn_distance,
                self.tuning.spawn_attempts,
                pos
            );
        }
        placement.pos()
    }

    /// Full-size asteroid at a safe distance from the ship
    pub fn spawn_asteroid_away(&mut self) -> Asteroid {
        let pos = self.place_away_from_ship();
        Asteroid::drifting(&mut self.rng, pos, self.tuning.asteroid_radius, &self.tuning)
    }

    /// Random-kind powerup at a safe distance from the ship
    pub fn spawn_powerup_away(&mut self) -> Powerup {
        let kind = PowerupKind::roll(&mut self.rng);
        let pos = self.place_away_from_ship();
        Powerup::drifting(&mut self.rng, pos, kind, &self.tuning)
    }

    /// Spawn asteroids until the score-scaled minimum is met
    pub fn replenish_asteroids(&mut self) {
        let target = self.min_asteroids();
        while self.asteroids.len() < target {
            let asteroid = self.spawn_asteroid_away();
            self.asteroids.push(asteroid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::torus::toroidal_distance;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const WORLD: Vec2 = Vec2::new(320.0, 240.0);

    #[test]
    fn test_min_asteroids_step_function() {
        let tuning = Tuning::default();
        assert_eq!(min_asteroids_for_score(0, &tuning), 10);
        assert_eq!(min_asteroids_for_score(99, &tuning), 10);
        assert_eq!(min_asteroids_for_score(100, &tuning), 12);
        assert_eq!(min_asteroids_for_score(250, &tuning), 14);
        assert_eq!(min_asteroids_for_score(300, &tuning), 16);
        assert_eq!(min_asteroids_for_score(10_000, &tuning), 16);
        assert_eq!(min_asteroids_for_score(u64::MAX, &tuning), 16);
    }

    #[test]
    fn test_min_asteroids_non_decreasing() {
        let tuning = Tuning::default();
        let mut last = 0;
        for score in (0..2000).step_by(10) {
            let min = min_asteroids_for_score(score, &tuning);
            assert!(min >= last);
            last = min;
        }
    }

    #[test]
    fn test_difficulty_level() {
        let tuning = Tuning::default();
        assert_eq!(difficulty_level(10, &tuning), 1);
        assert_eq!(difficulty_level(12, &tuning), 2);
        assert_eq!(difficulty_level(16, &tuning), 4);
    }

    #[test]
    fn test_place_away_respects_distance() {
        let mut rng = Pcg32::seed_from_u64(3);
        let ship = Vec2::new(160.0, 120.0);
        for _ in 0..100 {
            let placement = place_away(&mut rng, ship, 160.0, 256, WORLD);
            let Placement::Random(pos) = placement else {
                panic!("expected a random placement, got {placement:?}");
            };
            assert!(toroidal_distance(pos, ship, WORLD) >= 160.0);
            assert!((0.0..WORLD.x).contains(&pos.x) && (0.0..WORLD.y).contains(&pos.y));
        }
    }

    #[test]
    fn test_place_away_falls_back_opposite() {
        let mut rng = Pcg32::seed_from_u64(3);
        // No point on this torus is further than 200 from anything
        let placement = place_away(&mut rng, Vec2::new(300.0, 200.0), 500.0, 16, WORLD);
        assert_eq!(placement, Placement::Fallback(Vec2::new(140.0, 80.0)));
    }

    #[test]
    fn test_replenish_meets_minimum() {
        let mut state = GameState::new(11, Tuning::default());
        state.asteroids.truncate(3);
        state.score = 120;
        state.replenish_asteroids();
        assert_eq!(state.asteroids.len(), 12);
        let world = state.world();
        for a in &state.asteroids[3..] {
            assert!(toroidal_distance(a.pos, state.ship.pos, world) >= 160.0);
            assert_eq!(a.radius, 8.0);
        }
    }

    #[test]
    fn test_spawned_powerup_keeps_safe_distance() {
        let mut state = GameState::new(21, Tuning::default());
        state.ship.pos = Vec2::new(40.0, 200.0);
        let world = state.world();
        for _ in 0..50 {
            let powerup = state.spawn_powerup_away();
            assert!(toroidal_distance(powerup.pos, state.ship.pos, world) >= 160.0);
            assert_eq!(powerup.ttl, 1200);
            assert_eq!(powerup.radius, 4.0);
            let speed = powerup.vel.length();
            assert!((0.02 - 1e-5..=0.08 + 1e-5).contains(&speed), "speed {speed}");
        }
    }
}
