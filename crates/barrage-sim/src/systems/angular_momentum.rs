//! Angular-momentum system: bends bullet paths.

use barrage_core::types::rotate;

use crate::ecs::{occupied, World};

/// Turn each momentum vector by `angular_momentum * dt` degrees.
pub fn run(world: &mut World, dt: f32) {
    for idx in occupied(&world.angular_momenta) {
        let (Some(rate), Some(momentum)) = (world.angular_momenta[idx], world.momenta[idx].as_mut())
        else {
            continue;
        };
        *momentum = rotate(*momentum, rate * dt);
    }
}
