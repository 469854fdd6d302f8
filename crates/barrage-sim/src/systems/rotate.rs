//! Rotate system: sweeps a ring's orientation over time.

use crate::ecs::{occupied, World};

/// Advance each pattern's rotation by `dt` and store it on its source.
pub fn run(world: &mut World, dt: f32) {
    for idx in occupied(&world.rotations) {
        let Some(source) = world.bullet_sources[idx].as_mut() else {
            continue;
        };
        if let Some(rotation) = world.rotations[idx].as_mut() {
            source.rotation = rotation.value(dt);
        }
    }
}
