//! Fade system: drives sprite alpha from a temporary interpolation.

use crate::ecs::{occupied, World};

/// Advance every fade by `dt` and write the result to the sprite's alpha.
/// A fade that has finished is removed in the same frame.
pub fn run(world: &mut World, dt: f32) {
    for idx in occupied(&world.fades) {
        let Some(visual) = world.visuals[idx].as_mut() else {
            continue;
        };
        let Some(fade) = world.fades[idx].as_mut() else {
            continue;
        };
        visual.alpha = fade.value(dt);
        if fade.is_finished() {
            world.fades[idx] = None;
        }
    }
}
