//! Ship-centred camera over the torus

use glam::Vec2;

use crate::sim::toroidal_delta;

/// Camera that keeps a world point at the centre of the screen
///
/// Projection goes through the shortest toroidal offset, so an object that
/// crosses a world seam slides smoothly across the screen instead of jumping
/// to the opposite side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point shown at screen centre
    pub center: Vec2,
    /// World size (also the screen size)
    pub world: Vec2,
}

impl Camera {
    pub fn centered_on(center: Vec2, world: Vec2) -> Self {
        Self { center, world }
    }

    /// Screen position of a world point
    #[inline]
    pub fn world_to_screen(&self, pos: Vec2) -> Vec2 {
        self.world / 2.0 + toroidal_delta(self.center, pos, self.world)
    }
}
