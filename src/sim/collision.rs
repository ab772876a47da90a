//! Wrap-aware collision queries
//!
//! Every entity is a circle. Overlap is tested on squared toroidal distance
//! so no square roots are taken in the per-tick scans.

use glam::Vec2;

use super::state::Asteroid;
use super::torus::{toroidal_dist_sq, toroidal_distance};

/// True if two circles overlap (touching counts) on the torus
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32, world: Vec2) -> bool {
    let reach = ra + rb;
    toroidal_dist_sq(a, b, world) <= reach * reach
}

/// Index of the first asteroid (in collection order) overlapping the circle
pub fn first_asteroid_hit(
    pos: Vec2,
    radius: f32,
    asteroids: &[Asteroid],
    world: Vec2,
) -> Option<usize> {
    asteroids
        .iter()
        .position(|a| circles_overlap(pos, radius, a.pos, a.radius, world))
}

/// True if a point has been reached by an expanding explosion front
///
/// The front sweeps outward, so anything at or inside the ring (within the
/// tolerance band past it) is caught.
#[inline]
pub fn explosion_catches(
    origin: Vec2,
    ring_radius: f32,
    tolerance: f32,
    pos: Vec2,
    world: Vec2,
) -> bool {
    toroidal_distance(origin, pos, world) - ring_radius < tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WORLD: Vec2 = Vec2::new(320.0, 240.0);

    fn rock(x: f32, y: f32, radius: f32) -> Asteroid {
        Asteroid {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
        }
    }

    #[test]
    fn test_overlap_touching_counts() {
        assert!(circles_overlap(
            Vec2::new(10.0, 10.0),
            5.0,
            Vec2::new(23.0, 10.0),
            8.0,
            WORLD
        ));
        assert!(!circles_overlap(
            Vec2::new(10.0, 10.0),
            5.0,
            Vec2::new(23.5, 10.0),
            8.0,
            WORLD
        ));
    }

    #[test]
    fn test_overlap_across_seam() {
        // Ship at the left edge, asteroid just over the right edge
        assert!(circles_overlap(
            Vec2::new(2.0, 120.0),
            5.0,
            Vec2::new(316.0, 120.0),
            8.0,
            WORLD
        ));
    }

    #[test]
    fn test_first_hit_uses_collection_order() {
        let asteroids = vec![
            rock(200.0, 200.0, 8.0),
            rock(50.0, 50.0, 8.0),
            rock(52.0, 50.0, 8.0),
        ];
        assert_eq!(
            first_asteroid_hit(Vec2::new(51.0, 50.0), 1.0, &asteroids, WORLD),
            Some(1)
        );
        assert_eq!(
            first_asteroid_hit(Vec2::new(100.0, 100.0), 1.0, &asteroids, WORLD),
            None
        );
    }

    #[test]
    fn test_explosion_front() {
        let origin = Vec2::new(100.0, 100.0);
        // 10 units out, ring at 6: 4 past the ring is outside the band
        assert!(!explosion_catches(origin, 6.0, 3.0, Vec2::new(110.0, 100.0), WORLD));
        // Ring at 8: 2 past the ring is inside the band
        assert!(explosion_catches(origin, 8.0, 3.0, Vec2::new(110.0, 100.0), WORLD));
        // Behind the front
        assert!(explosion_catches(origin, 30.0, 3.0, Vec2::new(110.0, 100.0), WORLD));
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in 0.0f32..320.0, ay in 0.0f32..240.0,
            bx in 0.0f32..320.0, by in 0.0f32..240.0,
            ra in 0.5f32..20.0, rb in 0.5f32..20.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            // Skip points sitting on the contact boundary where rounding decides
            let gap = toroidal_distance(a, b, WORLD) - (ra + rb);
            prop_assume!(gap.abs() > 1e-3);
            prop_assert_eq!(
                circles_overlap(a, ra, b, rb, WORLD),
                circles_overlap(b, rb, a, ra, WORLD)
            );
        }
    }
}
