//! Aim system: points target-tracking rings at their target.

use barrage_core::types::angle_of;

use crate::ecs::{occupied, World};

/// Set each tracking source's aim to the bearing of its target. A target
/// that no longer exists leaves the aim untouched.
pub fn run(world: &mut World) {
    for idx in occupied(&world.targets) {
        let (Some(target), Some(origin)) = (world.targets[idx], world.positions[idx]) else {
            continue;
        };
        let Some(target_pos) = world.slot(target.0).and_then(|t| world.positions[t]) else {
            continue;
        };
        if let Some(source) = world.bullet_sources[idx].as_mut() {
            source.aim = angle_of(target_pos - origin);
        }
    }
}
