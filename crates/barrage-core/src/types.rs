//! Fundamental identifiers, geometric helpers and simulation time.
//!
//! Screen space is y-down. Angles are in degrees and grow from +x toward +y,
//! so a positive rotation turns clockwise on screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Generation-tagged entity handle.
///
/// The index addresses the component tables; the generation is bumped every
/// time the index is freed, so a handle held past its entity's removal never
/// matches the entity that later reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

impl EntityId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}g{}", self.index, self.generation)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames simulated so far.
    pub frame: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.frame += 1;
        self.elapsed_secs += dt;
    }
}

/// Axis-aligned rectangle, `min` inclusive and `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Same centre, both sides multiplied by `factor`.
    pub fn scale_by(&self, factor: f32) -> Self {
        let center = self.center();
        let half = Vec2::new(self.width(), self.height()) * 0.5 * factor;
        Self::new(center - half, center + half)
    }
}

/// Unit vector pointing at `degrees`.
pub fn direction(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Angle of `v` in degrees, in `(-180, 180]`. Zero for the zero vector.
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// `v` rotated by `degrees`.
pub fn rotate(v: Vec2, degrees: f32) -> Vec2 {
    direction(degrees).rotate(v)
}
