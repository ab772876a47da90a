//! Game state and core simulation types
//!
//! Entities own their per-tick integrators; everything that couples them
//! (collisions, spawning, scoring) lives in `tick`.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use super::torus::wrap;
use crate::tuning::Tuning;

/// Angle between the nose and each wing of the ship triangle
const WING_ANGLE: f32 = 2.5;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ship is flying and takes input
    Alive,
    /// Ship hit an asteroid; waiting for restart
    Destroyed,
}

/// Random unit-speed heading scaled into a speed range
fn random_drift<R: Rng + ?Sized>(rng: &mut R, min_speed: f32, max_speed: f32) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    let speed = rng.random_range(min_speed..=max_speed);
    Vec2::from_angle(angle) * speed
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle in radians (0 = +x, screen y points down)
    pub angle: f32,
    pub radius: f32,
    pub thrust: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub turn_rate: f32,
}

impl Ship {
    /// Ship at rest at the world centre, facing up
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.world() / 2.0,
            vel: Vec2::ZERO,
            angle: -std::f32::consts::FRAC_PI_2,
            radius: tuning.ship_radius,
            thrust: tuning.ship_thrust,
            friction: tuning.ship_friction,
            max_speed: tuning.ship_max_speed,
            turn_rate: tuning.ship_turn_rate,
        }
    }

    /// Unit vector along the facing angle
    #[inline]
    pub fn facing(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Advance one tick: turn, thrust, friction, clamp, integrate, wrap
    pub fn update(&mut self, input: &TickInput, world: Vec2) {
        if input.turn_left {
            self.angle -= self.turn_rate;
        }
        if input.turn_right {
            self.angle += self.turn_rate;
        }

        let facing = self.facing();
        if input.thrust {
            self.vel += facing * self.thrust;
        }
        if input.reverse {
            self.vel -= facing * self.thrust;
        }

        self.vel *= 1.0 - self.friction;

        let speed = self.vel.length();
        if speed > self.max_speed {
            self.vel *= self.max_speed / speed.max(f32::EPSILON);
        }

        self.pos = wrap(self.pos + self.vel, world);
    }

    /// Tip of the ship triangle; bullets spawn here
    #[inline]
    pub fn nose(&self) -> Vec2 {
        self.pos + self.facing() * self.radius
    }

    /// Nose, left wing, right wing (unwrapped, relative to `pos`)
    pub fn triangle(&self) -> [Vec2; 3] {
        [
            self.nose(),
            self.pos + Vec2::from_angle(self.angle + WING_ANGLE) * self.radius,
            self.pos + Vec2::from_angle(self.angle - WING_ANGLE) * self.radius,
        ]
    }
}

/// A projectile fired from the ship's nose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub ttl: u32,
    pub radius: f32,
}

impl Bullet {
    pub fn new(origin: Vec2, angle: f32, tuning: &Tuning) -> Self {
        Self {
            pos: origin,
            vel: Vec2::from_angle(angle) * tuning.bullet_speed,
            ttl: tuning.bullet_ttl,
            radius: tuning.bullet_radius,
        }
    }

    /// Integrate, wrap, age. Returns whether the bullet is still alive.
    pub fn update(&mut self, world: Vec2) -> bool {
        self.pos = wrap(self.pos + self.vel, world);
        self.ttl = self.ttl.saturating_sub(1);
        self.is_alive()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.ttl > 0
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Asteroid {
    /// New asteroid at `pos` with a random slow drift
    pub fn drifting<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, radius: f32, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: random_drift(rng, tuning.asteroid_min_speed, tuning.asteroid_max_speed),
            radius,
        }
    }

    pub fn update(&mut self, world: Vec2) {
        self.pos = wrap(self.pos + self.vel, world);
    }

    /// True if a hit breaks this asteroid into fragments
    #[inline]
    pub fn can_split(&self, tuning: &Tuning) -> bool {
        self.radius > tuning.split_threshold
    }

    /// Fragments left behind when this asteroid is shot (empty if too small)
    ///
    /// Each fragment gets a fresh random drift plus a small random boost;
    /// the parent's own velocity is not inherited.
    pub fn fragments<R: Rng + ?Sized>(&self, rng: &mut R, tuning: &Tuning) -> Vec<Asteroid> {
        if !self.can_split(tuning) {
            return Vec::new();
        }

        let count = rng.random_range(tuning.fragment_min_count..=tuning.fragment_max_count);
        let radius = (self.radius * tuning.split_factor)
            .floor()
            .max(tuning.fragment_min_radius);

        let mut fragments = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut child = Asteroid::drifting(rng, self.pos, radius, tuning);
            let boost = rng.random_range(0.0..=tuning.fragment_boost_max);
            child.vel += Vec2::from_angle(rng.random_range(0.0..TAU)) * boost;
            fragments.push(child);
        }
        fragments
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Flat score bonus
    Points,
    /// Piercing bullets for a while
    Laser,
    /// Expanding ring that clears asteroids
    Bomb,
}

impl PowerupKind {
    /// Map a uniform roll in [0, 1] to a kind (50% points, 40% laser, 10% bomb)
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.5 {
            PowerupKind::Points
        } else if roll < 0.9 {
            PowerupKind::Laser
        } else {
            PowerupKind::Bomb
        }
    }

    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_roll(rng.random::<f32>())
    }
}

/// A drifting pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerupKind,
    pub ttl: u32,
    pub radius: f32,
}

impl Powerup {
    pub fn drifting<R: Rng + ?Sized>(
        rng: &mut R,
        pos: Vec2,
        kind: PowerupKind,
        tuning: &Tuning,
    ) -> Self {
        Self {
            pos,
            vel: random_drift(rng, tuning.powerup_min_speed, tuning.powerup_max_speed),
            kind,
            ttl: tuning.powerup_ttl,
            radius: tuning.powerup_radius,
        }
    }

    /// Integrate, wrap, age. Returns whether the powerup is still alive.
    pub fn update(&mut self, world: Vec2) -> bool {
        self.pos = wrap(self.pos + self.vel, world);
        self.ttl = self.ttl.saturating_sub(1);
        self.ttl > 0
    }
}

/// Expanding ring left by a bomb pickup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub origin: Vec2,
    pub radius: f32,
}

/// Active power-up effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    /// Ticks of piercing bullets left
    pub laser_ticks: u32,
}

impl ActiveEffects {
    #[inline]
    pub fn laser_active(&self) -> bool {
        self.laser_ticks > 0
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG started from
    pub seed: u64,
    /// Balance in force for this session
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Simulation tick counter (not reset on restart)
    pub time_ticks: u64,
    pub ship: Ship,
    /// Active entities, in insertion order
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub powerups: Vec<Powerup>,
    pub fire_cooldown: u32,
    /// Ticks until the next powerup spawn attempt
    pub powerup_timer: u32,
    pub effects: ActiveEffects,
    pub explosion: Option<Explosion>,
    /// The only source of randomness in the simulation
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            ship: Ship::new(&tuning),
            tuning,
            phase: GamePhase::Alive,
            score: 0,
            time_ticks: 0,
            bullets: Vec::new(),
            asteroids: Vec::new(),
            powerups: Vec::new(),
            fire_cooldown: 0,
            powerup_timer: 0,
            effects: ActiveEffects::default(),
            explosion: None,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.populate();
        state
    }

    /// Reset everything but the RNG stream and tick counter
    pub fn restart(&mut self) {
        self.ship = Ship::new(&self.tuning);
        self.phase = GamePhase::Alive;
        self.score = 0;
        self.bullets.clear();
        self.asteroids.clear();
        self.powerups.clear();
        self.fire_cooldown = 0;
        self.effects = ActiveEffects::default();
        self.explosion = None;
        self.populate();
        log::info!("Restarted (seed {}, tick {})", self.seed, self.time_ticks);
    }

    /// Fresh asteroid field and powerup timer
    fn populate(&mut self) {
        self.powerup_timer = self.roll_powerup_timer();
        self.replenish_asteroids();
    }

    #[inline]
    pub fn world(&self) -> Vec2 {
        self.tuning.world()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.phase == GamePhase::Alive
    }

    /// Score never goes down
    #[inline]
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) fn roll_powerup_timer(&mut self) -> u32 {
        self.rng
            .random_range(self.tuning.powerup_spawn_min..=self.tuning.powerup_spawn_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_rest() -> Ship {
        Ship::new(&Tuning::default())
    }

    #[test]
    fn test_ship_starts_centred_facing_up() {
        let ship = at_rest();
        assert_eq!(ship.pos, Vec2::new(160.0, 120.0));
        let nose = ship.nose();
        assert!((nose.x - 160.0).abs() < 1e-4);
        assert!((nose.y - 115.0).abs() < 1e-4);
    }

    #[test]
    fn test_ship_turn_inputs_cancel() {
        let mut ship = at_rest();
        let angle = ship.angle;
        let input = TickInput {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        ship.update(&input, Tuning::default().world());
        assert!((ship.angle - angle).abs() < 1e-6);
    }

    #[test]
    fn test_ship_thrust_applies_friction() {
        let mut ship = at_rest();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        ship.update(&input, Tuning::default().world());
        // Facing up: thrust goes to -y, scaled by (1 - friction)
        let expected = 0.06 * (1.0 - 0.002);
        assert!(ship.vel.x.abs() < 1e-6);
        assert!((ship.vel.y + expected).abs() < 1e-6);
        assert!((ship.pos.y - (120.0 - expected)).abs() < 1e-4);
    }

    #[test]
    fn test_ship_speed_clamped() {
        let mut ship = at_rest();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..200 {
            ship.update(&input, Tuning::default().world());
        }
        assert!(ship.vel.length() <= ship.max_speed + 1e-4);
        assert!(ship.vel.length() > ship.max_speed - 0.1);
    }

    #[test]
    fn test_reverse_opposes_thrust() {
        let mut ship = at_rest();
        let input = TickInput {
            thrust: true,
            reverse: true,
            ..Default::default()
        };
        ship.update(&input, Tuning::default().world());
        assert!(ship.vel.length() < 1e-6);
    }

    #[test]
    fn test_bullet_expires_after_ttl() {
        let tuning = Tuning::default();
        let mut bullet = Bullet::new(Vec2::new(10.0, 10.0), 0.0, &tuning);
        for _ in 0..59 {
            assert!(bullet.update(tuning.world()));
        }
        assert!(!bullet.update(tuning.world()));
    }

    #[test]
    fn test_powerup_expires_after_ttl() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut powerup = Powerup::drifting(&mut rng, Vec2::new(50.0, 50.0), PowerupKind::Laser, &tuning);
        assert_eq!(powerup.ttl, 1200);
        for _ in 0..1199 {
            assert!(powerup.update(tuning.world()));
        }
        assert!(!powerup.update(tuning.world()));
        assert_eq!(powerup.ttl, 0);
    }

    #[test]
    fn test_bullet_wraps() {
        let tuning = Tuning::default();
        let mut bullet = Bullet::new(Vec2::new(318.0, 10.0), 0.0, &tuning);
        bullet.update(tuning.world());
        assert!((bullet.pos.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_powerup_kind_partition() {
        assert_eq!(PowerupKind::from_roll(0.0), PowerupKind::Points);
        assert_eq!(PowerupKind::from_roll(0.49), PowerupKind::Points);
        assert_eq!(PowerupKind::from_roll(0.5), PowerupKind::Laser);
        assert_eq!(PowerupKind::from_roll(0.89), PowerupKind::Laser);
        assert_eq!(PowerupKind::from_roll(0.9), PowerupKind::Bomb);
        assert_eq!(PowerupKind::from_roll(1.0), PowerupKind::Bomb);
    }

    #[test]
    fn test_fragments_of_large_asteroid() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let parent = Asteroid {
            pos: Vec2::new(40.0, 40.0),
            vel: Vec2::new(5.0, 5.0),
            radius: 8.0,
        };
        for _ in 0..20 {
            let fragments = parent.fragments(&mut rng, &tuning);
            assert!((2..=3).contains(&fragments.len()));
            for f in &fragments {
                assert_eq!(f.radius, 4.0);
                assert_eq!(f.pos, parent.pos);
                // Fresh drift plus boost, never the parent's velocity
                assert!(f.vel.length() <= 0.4 + 0.3 + 1e-4);
            }
        }
    }

    #[test]
    fn test_fragment_radius_floor() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let parent = Asteroid {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 3.5,
        };
        let fragments = parent.fragments(&mut rng, &tuning);
        assert!(fragments.iter().all(|f| f.radius == 2.0));
    }

    #[test]
    fn test_small_asteroid_does_not_split() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let parent = Asteroid {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 3.0,
        };
        assert!(parent.fragments(&mut rng, &tuning).is_empty());
    }

    #[test]
    fn test_new_state_is_populated() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.seed, 1);
        assert_eq!(state.phase, GamePhase::Alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.asteroids.len(), 10);
        assert!((480..=900).contains(&state.powerup_timer));
        assert!(state.bullets.is_empty() && state.powerups.is_empty());
    }
}
