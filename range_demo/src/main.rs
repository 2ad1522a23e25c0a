//! Range Tracking Demo
//!
//! Headless walk-through of the spatial index:
//! - Obstacles scattered over a square (quadtree) or cube (octree) world
//! - An observer walking one lap of a circle around the origin
//! - Obstacles highlighted as they enter the observer's range and cleared
//!   as they leave
//!
//! Usage: `range_demo [config.toml|config.ron]`

mod config;
mod obstacle;
mod player;
mod spawner;

use std::fmt;

use spatial_index::foundation::logging;
use spatial_index::foundation::time::Stopwatch;
use spatial_index::prelude::*;

use config::{DemoConfig, DemoMode};
use obstacle::{Highlighted, Obstacle2D, Obstacle3D};
use player::{CircularPath, Player};
use spawner::ItemSpawner;

/// End-of-run highlight totals
struct Summary {
    obstacles: usize,
    highlighted: usize,
    toggles: u32,
}

impl Summary {
    fn of<'a, T: Highlighted + 'a>(obstacles: impl IntoIterator<Item = &'a T>) -> Self {
        let mut summary = Self {
            obstacles: 0,
            highlighted: 0,
            toggles: 0,
        };
        for obstacle in obstacles {
            let highlight = obstacle.highlight();
            summary.obstacles += 1;
            summary.highlighted += usize::from(highlight.is_on());
            summary.toggles += highlight.toggles();
        }
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} obstacles, {} still highlighted, {} highlight toggles",
            self.obstacles, self.highlighted, self.toggles
        )
    }
}

fn run_planar(config: &DemoConfig) -> Result<Summary, IndexError> {
    let world = Rect::from_center_extents(Vec2::zeros(), Vec2::repeat(config.world_half_size));
    let obstacles =
        ItemSpawner::new(config.seed, config.min_radius, config.max_radius).spawn_2d(config.item_count, &world);

    let mut tree: Quadtree<'_, Obstacle2D> = Quadtree::new(config.index.clone())?;
    tree.prepare(world);
    tree.insert_all(obstacles.values())?;
    tree.log_stats();

    let path = CircularPath::new(config.path_radius, config.ticks);
    let mut player = Player::new(config.search_range);
    player.walk(&tree, (0..=config.ticks).map(|tick| path.planar(tick)))?;

    if let Some(query) = tree.last_query() {
        log::info!("Last query: {query}");
    }
    Ok(Summary::of(obstacles.values()))
}

fn run_volumetric(config: &DemoConfig) -> Result<Summary, IndexError> {
    let world = AABB::from_center_extents(Vec3::zeros(), Vec3::repeat(config.world_half_size));
    let obstacles =
        ItemSpawner::new(config.seed, config.min_radius, config.max_radius).spawn_3d(config.item_count, &world);

    let mut tree: Octree<'_, Obstacle3D> = Octree::new(config.index.clone())?;
    tree.prepare(world);
    tree.insert_all(obstacles.values())?;
    tree.log_stats();

    let core = AABB::from_center_extents(Vec3::zeros(), Vec3::repeat(config.search_range));
    log::info!(
        "{} obstacles touch the core, {} candidates before filtering",
        tree.find_in_box_exact(core)?.len(),
        tree.find_in_box(core)?.len()
    );

    let path = CircularPath::new(config.path_radius, config.ticks);
    let mut player = Player::new(config.search_range);
    player.walk(&tree, (0..=config.ticks).map(|tick| path.volumetric(tick)))?;

    if let Some(query) = tree.last_query() {
        log::info!("Last query: {query}");
    }
    Ok(Summary::of(obstacles.values()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load_from_file(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load config from {path}: {e}; using defaults");
            DemoConfig::default()
        }),
        None => {
            log::info!("No config file given; using defaults");
            DemoConfig::default()
        }
    };
    config.validate()?;

    log::info!("=== Range Tracking Demo ({:?}) ===", config.mode);
    let stopwatch = Stopwatch::start_new();
    let summary = match config.mode {
        DemoMode::Planar => run_planar(&config)?,
        DemoMode::Volumetric => run_volumetric(&config)?,
    };
    log::info!("{summary} in {:.2} ms", stopwatch.elapsed_millis());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(mut config: DemoConfig) -> DemoConfig {
        config.item_count = 150;
        config.ticks = 16;
        config
    }

    #[test]
    fn test_planar_run_completes() {
        let summary = run_planar(&small(DemoConfig::default())).unwrap();
        assert_eq!(summary.obstacles, 150);
        assert!(summary.highlighted <= summary.obstacles);
    }

    #[test]
    fn test_volumetric_run_completes() {
        let summary = run_volumetric(&small(DemoConfig::volumetric())).unwrap();
        assert_eq!(summary.obstacles, 150);
    }

    #[test]
    fn test_invalid_index_config_is_reported() {
        let mut config = small(DemoConfig::default());
        config.index.minimum_node_size = 0.0;
        assert!(matches!(run_planar(&config), Err(IndexError::InvalidConfiguration(_))));
    }
}
