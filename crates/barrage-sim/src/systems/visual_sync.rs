//! Visual-sync system: hands positions to the render handles.

use crate::ecs::{occupied, World};

/// Copy each sprite entity's position into its visual anchor.
pub fn run(world: &mut World) {
    for idx in occupied(&world.visuals) {
        if let (Some(visual), Some(pos)) = (world.visuals[idx].as_mut(), world.positions[idx]) {
            visual.anchor = pos;
        }
    }
}
