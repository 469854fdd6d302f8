//! Events emitted by the simulation for the driver to log or forward.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Something noteworthy that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The stage title changed.
    LabelChanged { at: f64, text: String },
    /// A pattern entity was created.
    PatternSpawned { at: f64, entity: EntityId, bullets: u32 },
    /// A pattern was rejected at construction.
    PatternRejected { at: f64, reason: String },
    /// The countdown moved on to a new label.
    CountdownShown { at: f64, text: String },
    /// The countdown ran out and its label was removed.
    CountdownFinished { at: f64 },
    /// The run statistics were written to the HUD.
    StatsShown {
        at: f64,
        slowest_fps: u32,
        slowest_sprites: usize,
        most_fps: u32,
        most_sprites: usize,
    },
    /// The timeline asked the run to end.
    Stopped { at: f64 },
}
