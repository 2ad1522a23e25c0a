//! Obstacles the observer walks past
//!
//! Obstacles are owned by a [`HandleMap`](spatial_index::foundation::collections::HandleMap)
//! and indexed by reference. Highlighting goes through a [`Cell`] so it can
//! be toggled from the shared references a query hands back.

use std::cell::Cell;

use spatial_index::prelude::*;

/// Highlight flag plus a count of how often it changed
#[derive(Debug, Default)]
pub struct Highlight {
    on: Cell<bool>,
    toggles: Cell<u32>,
}

impl Highlight {
    /// Set the flag, counting a toggle only when it actually changes
    pub fn set(&self, on: bool) {
        if self.on.replace(on) != on {
            self.toggles.set(self.toggles.get() + 1);
        }
    }

    /// Current state
    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    /// Number of state changes so far
    pub fn toggles(&self) -> u32 {
        self.toggles.get()
    }
}

/// Anything carrying a [`Highlight`]
pub trait Highlighted {
    /// The highlight state
    fn highlight(&self) -> &Highlight;
}

/// Disc on the plane
#[derive(Debug)]
pub struct Obstacle2D {
    position: Vec2,
    radius: f32,
    highlight: Highlight,
}

impl Obstacle2D {
    /// Create an unhighlighted disc
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            highlight: Highlight::default(),
        }
    }
}

impl SpatialItem<Rect> for Obstacle2D {
    fn location(&self) -> Vec2 {
        self.position
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_extents(self.position, Vec2::repeat(self.radius))
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Highlighted for Obstacle2D {
    fn highlight(&self) -> &Highlight {
        &self.highlight
    }
}

/// Box in the volume
#[derive(Debug)]
pub struct Obstacle3D {
    center: Vec3,
    bounds: AABB,
    /// Distance from center to corner, cached at construction
    radius: f32,
    highlight: Highlight,
}

impl Obstacle3D {
    /// Create an unhighlighted box from its center and half-extents
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self {
            center,
            bounds: AABB::from_center_extents(center, extents),
            radius: extents.norm(),
            highlight: Highlight::default(),
        }
    }
}

impl SpatialItem<AABB> for Obstacle3D {
    fn location(&self) -> Vec3 {
        self.center
    }

    fn bounds(&self) -> AABB {
        self.bounds
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Highlighted for Obstacle3D {
    fn highlight(&self) -> &Highlight {
        &self.highlight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_highlight_counts_only_changes() {
        let highlight = Highlight::default();
        assert!(!highlight.is_on());

        highlight.set(true);
        highlight.set(true);
        highlight.set(false);
        assert!(!highlight.is_on());
        assert_eq!(highlight.toggles(), 2);
    }

    #[test]
    fn test_box_radius_reaches_corner() {
        let obstacle = Obstacle3D::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 2.0));
        assert_relative_eq!(obstacle.radius(), 3.0);
        assert_relative_eq!(obstacle.location(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(obstacle.bounds().extents(), Vec3::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn test_disc_bounds_square_the_radius() {
        let obstacle = Obstacle2D::new(Vec2::new(5.0, 5.0), 2.0);
        assert_eq!(obstacle.bounds(), Rect::new(Vec2::new(3.0, 3.0), Vec2::new(7.0, 7.0)));
    }
}
