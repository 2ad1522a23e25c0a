//! Observer walking a circular path
//!
//! Each tick the player's [`RangeTracker`] is updated at its new location and
//! the resulting events switch obstacle highlights on and off.

use std::collections::HashSet;
use std::f32::consts::TAU;
use std::fmt;

use spatial_index::foundation::math::utils::lerp;
use spatial_index::prelude::*;
use spatial_index::spatial::Point;

use crate::obstacle::Highlighted;

/// Circle around the origin, completed in a fixed number of ticks
#[derive(Debug, Clone, Copy)]
pub struct CircularPath {
    radius: f32,
    ticks: u32,
}

impl CircularPath {
    /// Path of the given radius; `ticks` is clamped to at least one
    pub fn new(radius: f32, ticks: u32) -> Self {
        Self {
            radius,
            ticks: ticks.max(1),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn angle_at(&self, tick: u32) -> f32 {
        lerp(0.0, TAU, tick as f32 / self.ticks as f32)
    }

    /// Location on the plane at `tick`
    pub fn planar(&self, tick: u32) -> Vec2 {
        let angle = self.angle_at(tick);
        Vec2::new(angle.cos(), angle.sin()) * self.radius
    }

    /// Location in the XZ plane at `tick`
    pub fn volumetric(&self, tick: u32) -> Vec3 {
        let angle = self.angle_at(tick);
        Vec3::new(angle.cos(), 0.0, angle.sin()) * self.radius
    }
}

/// What changed on one tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Obstacles that came into range
    pub entered: usize,
    /// Obstacles that went out of range
    pub left: usize,
    /// Obstacles in range after the tick
    pub nearby: usize,
}

impl TickReport {
    /// Whether any obstacle entered or left
    pub fn changed(&self) -> bool {
        self.entered + self.left > 0
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{}, {} in range", self.entered, self.left, self.nearby)
    }
}

/// Observer that highlights whatever is in range
pub struct Player<'a, P, T: ?Sized> {
    tracker: RangeTracker<'a, P, T>,
}

impl<'a, P: Point, T: Highlighted + ?Sized> Player<'a, P, T> {
    /// Player that sees `range` units beyond each obstacle's radius
    pub fn new(range: f32) -> Self {
        Self {
            tracker: RangeTracker::new(range),
        }
    }

    /// Move to `location` and apply the resulting enter/exit events
    pub fn step<Q>(&mut self, index: &Q, location: P) -> Result<TickReport, IndexError>
    where
        Q: SpatialQuery<'a, Point = P, Item = T> + ?Sized,
    {
        let mut report = TickReport::default();
        for event in self.tracker.update_if_moved(index, location)? {
            match event {
                RangeEvent::Entered(item) => {
                    item.highlight().set(true);
                    report.entered += 1;
                }
                RangeEvent::Left(item) => {
                    item.highlight().set(false);
                    report.left += 1;
                }
            }
        }

        report.nearby = self.tracker.nearby().map_or(0, HashSet::len);
        Ok(report)
    }

    /// Step through every location in order, logging ticks that changed
    /// something
    pub fn walk<Q>(&mut self, index: &Q, locations: impl IntoIterator<Item = P>) -> Result<(), IndexError>
    where
        Q: SpatialQuery<'a, Point = P, Item = T> + ?Sized,
    {
        for (tick, location) in locations.into_iter().enumerate() {
            let report = self.step(index, location)?;
            if report.changed() {
                log::info!("Tick {tick}: {report}");
            } else {
                log::debug!("Tick {tick}: no change");
            }
        }
        Ok(())
    }
}
