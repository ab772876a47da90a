//! Toroidal geometry for the wrap-around world
//!
//! The world is a W x H rectangle whose opposite edges are identified. All
//! collision tests and the camera projection go through [`toroidal_delta`],
//! so nothing jumps or slips through at a seam.

use glam::Vec2;

/// Reduce one coordinate into [0, span)
///
/// A single span correction covers normal motion. Anything further out
/// (fixtures, resized worlds) falls back to a Euclidean remainder.
#[inline]
pub fn wrap_axis(v: f32, span: f32) -> f32 {
    let mut v = v;
    if v < 0.0 {
        v += span;
    } else if v >= span {
        v -= span;
    }
    if !(0.0..span).contains(&v) {
        v = v.rem_euclid(span);
        // rem_euclid rounds tiny negatives up to exactly `span`
        if v >= span {
            v = 0.0;
        }
    }
    v
}

/// Wrap a position into [0, W) x [0, H)
#[inline]
pub fn wrap(pos: Vec2, world: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, world.x), wrap_axis(pos.y, world.y))
}

/// Shortest signed offset from `a` to `b` along one axis, in [-span/2, span/2]
#[inline]
pub fn delta_axis(a: f32, b: f32, span: f32) -> f32 {
    let half = span / 2.0;
    (b - a + half).rem_euclid(span) - half
}

/// Shortest signed offset from `a` to `b` on the torus
#[inline]
pub fn toroidal_delta(a: Vec2, b: Vec2, world: Vec2) -> Vec2 {
    Vec2::new(delta_axis(a.x, b.x, world.x), delta_axis(a.y, b.y, world.y))
}

/// Squared shortest distance between two points on the torus
#[inline]
pub fn toroidal_dist_sq(a: Vec2, b: Vec2, world: Vec2) -> f32 {
    toroidal_delta(a, b, world).length_squared()
}

/// Shortest distance between two points on the torus
#[inline]
pub fn toroidal_distance(a: Vec2, b: Vec2, world: Vec2) -> f32 {
    toroidal_delta(a, b, world).length()
}

/// Largest possible toroidal distance in a world of this size
#[inline]
pub fn max_distance(world: Vec2) -> f32 {
    (world / 2.0).length()
}
