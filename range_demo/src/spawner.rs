//! Random obstacle placement
//!
//! Positions are uniform over the world bounds; sizes are uniform in
//! `[min_radius, max_radius)`. A fixed seed reproduces the same world.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatial_index::foundation::collections::HandleMap;
use spatial_index::prelude::*;

use crate::obstacle::{Obstacle2D, Obstacle3D};

/// Seeded obstacle factory
pub struct ItemSpawner {
    rng: StdRng,
    min_radius: f32,
    max_radius: f32,
}

impl ItemSpawner {
    /// Create a spawner; `max_radius` must not be below `min_radius`
    pub fn new(seed: u64, min_radius: f32, max_radius: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            min_radius,
            max_radius,
        }
    }

    fn size(&mut self) -> f32 {
        if self.max_radius > self.min_radius {
            self.rng.gen_range(self.min_radius..self.max_radius)
        } else {
            self.min_radius
        }
    }

    fn coordinate(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..=max)
    }

    /// Scatter `count` discs over `area`
    pub fn spawn_2d(&mut self, count: usize, area: &Rect) -> HandleMap<Obstacle2D> {
        let mut obstacles = HandleMap::with_capacity(count);
        for _ in 0..count {
            let position = Vec2::new(
                self.coordinate(area.min.x, area.max.x),
                self.coordinate(area.min.y, area.max.y),
            );
            let radius = self.size();
            obstacles.insert(Obstacle2D::new(position, radius));
        }

        log::info!("Spawned {} obstacles over {:?}", obstacles.len(), area);
        obstacles
    }

    /// Scatter `count` boxes through `volume`; each half-extent is drawn
    /// independently
    pub fn spawn_3d(&mut self, count: usize, volume: &AABB) -> HandleMap<Obstacle3D> {
        let mut obstacles = HandleMap::with_capacity(count);
        for _ in 0..count {
            let center = Vec3::new(
                self.coordinate(volume.min.x, volume.max.x),
                self.coordinate(volume.min.y, volume.max.y),
                self.coordinate(volume.min.z, volume.max.z),
            );
            let extents = Vec3::new(self.size(), self.size(), self.size());
            obstacles.insert(Obstacle3D::new(center, extents));
        }

        log::info!("Spawned {} obstacles through {:?}", obstacles.len(), volume);
        obstacles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_2d_stays_in_bounds() {
        let area = Rect::from_position_size(-50.0, -50.0, 100.0, 100.0);
        let obstacles = ItemSpawner::new(3, 1.0, 2.0).spawn_2d(200, &area);

        assert_eq!(obstacles.len(), 200);
        for obstacle in obstacles.values() {
            assert!(area.contains_point(obstacle.location()));
            assert!((1.0..2.0).contains(&obstacle.radius()));
        }
    }

    #[test]
    fn test_spawn_3d_stays_in_bounds() {
        let volume = AABB::from_center_size(Vec3::zeros(), Vec3::repeat(40.0));
        let obstacles = ItemSpawner::new(3, 0.5, 1.0).spawn_3d(100, &volume);

        assert_eq!(obstacles.len(), 100);
        for obstacle in obstacles.values() {
            assert!(volume.contains_point(obstacle.location()));
            let extents = obstacle.bounds().extents();
            assert!(extents.iter().all(|e| (0.5..1.0).contains(e)));
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let area = Rect::from_position_size(0.0, 0.0, 10.0, 10.0);
        let a = ItemSpawner::new(11, 0.1, 0.5).spawn_2d(20, &area);
        let b = ItemSpawner::new(11, 0.1, 0.5).spawn_2d(20, &area);

        let locations = |map: &HandleMap<Obstacle2D>| map.values().map(|o| o.location()).collect::<Vec<_>>();
        assert_eq!(locations(&a), locations(&b));
    }

    #[test]
    fn test_fixed_size_when_range_is_empty() {
        let area = Rect::from_position_size(0.0, 0.0, 10.0, 10.0);
        let obstacles = ItemSpawner::new(1, 1.5, 1.5).spawn_2d(5, &area);
        assert!(obstacles.values().all(|o| o.radius() == 1.5));
    }
}
