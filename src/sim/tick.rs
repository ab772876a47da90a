//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Each phase
//! rebuilds the collections it filters, so insertion order (and with it the
//! first-hit tie-break) is stable from tick to tick.

use super::collision::{circles_overlap, explosion_catches, first_asteroid_hit};
use super::state::{Asteroid, Bullet, Explosion, GamePhase, GameState, PowerupKind};

/// Input commands for a single tick (sampled once, immutable for the tick)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    /// Forward thrust
    pub thrust: bool,
    /// Reverse thrust
    pub reverse: bool,
    /// Fire held (level-sensitive, rate limited by the cooldown)
    pub fire: bool,
    /// Restart requested (edge-triggered, only honoured while destroyed)
    pub restart: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::Destroyed && input.restart {
        state.restart();
        return;
    }

    state.time_ticks += 1;
    let alive = state.is_alive();

    if alive {
        let world = state.world();
        state.ship.update(input, world);
        handle_fire(state, input);
    }

    advance_entities(state);

    if alive {
        advance_explosion(state);
    }

    run_powerup_spawner(state);
    state.effects.laser_ticks = state.effects.laser_ticks.saturating_sub(1);

    if alive {
        check_ship_collision(state);
    }
    if state.is_alive() {
        collect_powerups(state);
    }

    resolve_bullet_hits(state);
    maintain_population(state);
}

fn handle_fire(state: &mut GameState, input: &TickInput) {
    state.fire_cooldown = state.fire_cooldown.saturating_sub(1);
    if input.fire && state.fire_cooldown == 0 {
        let bullet = Bullet::new(state.ship.nose(), state.ship.angle, &state.tuning);
        state.bullets.push(bullet);
        state.fire_cooldown = state.tuning.fire_cooldown;
    }
}

/// Move every entity and drop the expired ones
fn advance_entities(state: &mut GameState) {
    let world = state.world();

    state.bullets = std::mem::take(&mut state.bullets)
        .into_iter()
        .filter_map(|mut bullet| bullet.update(world).then_some(bullet))
        .collect();

    for asteroid in &mut state.asteroids {
        asteroid.update(world);
    }

    state.powerups = std::mem::take(&mut state.powerups)
        .into_iter()
        .filter_map(|mut powerup| powerup.update(world).then_some(powerup))
        .collect();
}

/// Grow the bomb ring and clear whatever it reaches
fn advance_explosion(state: &mut GameState) {
    let Some(mut explosion) = state.explosion.take() else {
        return;
    };
    let world = state.world();
    let tolerance = state.tuning.explosion_tolerance;
    explosion.radius += state.tuning.explosion_speed;

    let (caught, surviving): (Vec<Asteroid>, Vec<Asteroid>) = std::mem::take(&mut state.asteroids)
        .into_iter()
        .partition(|a| explosion_catches(explosion.origin, explosion.radius, tolerance, a.pos, world));
    state.asteroids = surviving;
    state.add_score(caught.len() as u64 * state.tuning.asteroid_points);

    if explosion.radius > world.x {
        log::debug!("Explosion spent at radius {}", explosion.radius);
    } else {
        state.explosion = Some(explosion);
    }
}

fn run_powerup_spawner(state: &mut GameState) {
    if state.powerup_timer > 0 {
        state.powerup_timer -= 1;
        return;
    }
    if state.powerups.len() < state.tuning.powerup_cap {
        let powerup = state.spawn_powerup_away();
        log::debug!("Spawned {:?} powerup at {:?}", powerup.kind, powerup.pos);
        state.powerups.push(powerup);
    }
    state.powerup_timer = state.roll_powerup_timer();
}

/// First overlapping asteroid destroys the ship
fn check_ship_collision(state: &mut GameState) {
    let world = state.world();
    let ship = &state.ship;
    let hit = state
        .asteroids
        .iter()
        .any(|a| circles_overlap(a.pos, a.radius, ship.pos, ship.radius, world));
    if hit {
        state.phase = GamePhase::Destroyed;
        log::info!(
            "Ship destroyed at tick {} with score {}",
            state.time_ticks,
            state.score
        );
    }
}

fn collect_powerups(state: &mut GameState) {
    let world = state.world();
    let (ship_pos, ship_radius) = (state.ship.pos, state.ship.radius);

    let mut collected: Vec<PowerupKind> = Vec::new();
    state.powerups = std::mem::take(&mut state.powerups)
        .into_iter()
        .filter(|p| {
            if circles_overlap(p.pos, p.radius, ship_pos, ship_radius, world) {
                collected.push(p.kind);
                false
            } else {
                true
            }
        })
        .collect();

    for kind in collected {
        apply_powerup(state, kind);
    }
}

fn apply_powerup(state: &mut GameState, kind: PowerupKind) {
    log::info!("Picked up {:?} powerup", kind);
    match kind {
        PowerupKind::Laser => {
            state.effects.laser_ticks = state.tuning.laser_duration;
        }
        PowerupKind::Points => {
            state.add_score(state.tuning.points_bonus);
        }
        PowerupKind::Bomb => {
            log::debug!("Explosion started at {:?}", state.ship.pos);
            state.explosion = Some(Explosion {
                origin: state.ship.pos,
                radius: 0.0,
            });
        }
    }
}

/// Bullets against asteroids; hit asteroids split and score
fn resolve_bullet_hits(state: &mut GameState) {
    if state.bullets.is_empty() || state.asteroids.is_empty() {
        return;
    }
    let world = state.world();
    let piercing = state.effects.laser_active();

    let mut hit = vec![false; state.asteroids.len()];
    let mut fragments: Vec<Asteroid> = Vec::new();
    let mut kept: Vec<Bullet> = Vec::with_capacity(state.bullets.len());

    for bullet in std::mem::take(&mut state.bullets) {
        let Some(idx) = first_asteroid_hit(bullet.pos, bullet.radius, &state.asteroids, world)
        else {
            kept.push(bullet);
            continue;
        };
        // Several bullets on one asteroid still break it only once
        if !hit[idx] {
            hit[idx] = true;
            fragments.extend(state.asteroids[idx].fragments(&mut state.rng, &state.tuning));
        }
        if piercing {
            kept.push(bullet);
        }
    }
    state.bullets = kept;

    let destroyed = hit.iter().filter(|h| **h).count();
    if destroyed == 0 {
        return;
    }

    let mut next: Vec<Asteroid> = std::mem::take(&mut state.asteroids)
        .into_iter()
        .zip(hit)
        .filter_map(|(asteroid, was_hit)| (!was_hit).then_some(asteroid))
        .collect();
    next.extend(fragments);
    state.asteroids = next;
    state.add_score(destroyed as u64 * state.tuning.asteroid_points);
}

/// Top the field back up to the score-scaled minimum
fn maintain_population(state: &mut GameState) {
    if state.explosion.is_some() {
        return;
    }
    state.replenish_asteroids();
}
