//! Per-frame snapshot of everything the renderer needs.
//!
//! Built by the snapshot system after the pipeline has run. It is a read-only
//! view: nothing in it feeds back into the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::components::{Shape, SpriteKind};
use crate::types::{EntityId, SimTime};

/// Complete renderable state for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub sprites: Vec<SpriteView>,
    pub texts: Vec<TextView>,
    pub shapes: Vec<ShapeView>,
    pub counts: EntityCounts,
    /// Scheduler entries still waiting to fire.
    pub pending_jobs: usize,
}

/// A bullet sprite.
#[derive(Debug, Clone, Serialize)]
pub struct SpriteView {
    pub id: EntityId,
    pub sprite: SpriteKind,
    pub position: Vec2,
    pub alpha: f32,
}

/// A text label. Empty labels are skipped.
#[derive(Debug, Clone, Serialize)]
pub struct TextView {
    pub id: EntityId,
    pub text: String,
    pub size: u32,
    pub position: Vec2,
}

/// An outline drawn around an entity.
#[derive(Debug, Clone, Serialize)]
pub struct ShapeView {
    pub id: EntityId,
    pub shape: Shape,
    pub position: Vec2,
}

/// Population counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub entities: usize,
    /// Entities carrying a sprite.
    pub sprites: usize,
    /// Entities carrying a bullet source.
    pub patterns: usize,
}
