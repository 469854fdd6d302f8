//! Kinematic integration system.
//!
//! Updates position from momentum each frame: position += momentum * dt.

use crate::ecs::{occupied, World};

/// Run kinematic integration for all entities with position and momentum.
pub fn run(world: &mut World, dt: f32) {
    for idx in occupied(&world.momenta) {
        if let (Some(pos), Some(mom)) = (world.positions[idx].as_mut(), world.momenta[idx]) {
            *pos += mom * dt;
        }
    }
}
