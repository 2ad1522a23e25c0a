//! Demo configuration
//!
//! Loaded from the TOML or RON file named on the command line; every field
//! falls back to its default when missing.

use serde::{Deserialize, Serialize};
use spatial_index::prelude::*;

/// Which index the demo exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoMode {
    /// Quadtree over discs on a plane
    Planar,
    /// Octree over boxes in a volume
    Volumetric,
}

/// Demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Index to run
    pub mode: DemoMode,

    /// Number of obstacles to spawn
    pub item_count: usize,

    /// Smallest obstacle radius (or box half-extent in 3D)
    pub min_radius: f32,

    /// Upper bound on obstacle radius, exclusive
    pub max_radius: f32,

    /// Half the side length of the square/cubic world centered on the origin
    pub world_half_size: f32,

    /// Observer search range
    pub search_range: f32,

    /// Radius of the circle the observer walks
    pub path_radius: f32,

    /// Ticks to complete one lap of the path
    pub ticks: u32,

    /// Spawner seed
    pub seed: u64,

    /// Index settings
    pub index: IndexConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mode: DemoMode::Planar,
            item_count: 500,
            min_radius: 0.5,
            max_radius: 3.0,
            world_half_size: 100.0,
            search_range: 15.0,
            path_radius: 60.0,
            ticks: 120,
            seed: 7,
            index: IndexConfig::default(),
        }
    }
}

impl Config for DemoConfig {}

/// Demo settings that cannot produce a run
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DemoConfigError {
    /// Obstacle sizes are negative or the range is inverted
    #[error("radius range [{min}, {max}) is empty or negative")]
    RadiusRange {
        /// Configured lower bound
        min: f32,
        /// Configured upper bound
        max: f32,
    },

    /// World has no extent
    #[error("world_half_size must be positive, got {0}")]
    WorldSize(f32),

    /// Walk has no ticks
    #[error("ticks must be at least 1")]
    NoTicks,

    /// Embedded index settings are invalid
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl DemoConfig {
    /// Settings for the 3D demo, using the octree's coarser node floor
    pub fn volumetric() -> Self {
        Self {
            mode: DemoMode::Volumetric,
            index: IndexConfig::octree_default(),
            ..Self::default()
        }
    }

    /// Check the demo parameters and the embedded index settings
    pub fn validate(&self) -> Result<(), DemoConfigError> {
        if !(self.min_radius >= 0.0 && self.max_radius >= self.min_radius) {
            return Err(DemoConfigError::RadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if !(self.world_half_size > 0.0) {
            return Err(DemoConfigError::WorldSize(self.world_half_size));
        }
        if self.ticks == 0 {
            return Err(DemoConfigError::NoTicks);
        }
        self.index.validate()?;
        Ok(())
    }
}
