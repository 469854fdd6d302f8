//! Entity spawn helpers for setting up a scenario world.
//!
//! Creates the bouncing target and the HUD labels. Bullets and patterns are
//! spawned later by the timeline through `factory`.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::components::{Bounce, Label};
use barrage_core::constants::*;
use barrage_core::types::{rotate, Bounds, EntityId};

use crate::ecs::World;
use crate::hud::Hud;

/// Spawn the target at the screen centre, heading somewhere between 15° and
/// 45° at constant speed. It reflects off the screen edges and is never culled.
pub fn spawn_target(world: &mut World, rng: &mut ChaCha8Rng, screen: &Bounds) -> EntityId {
    let heading = TARGET_HEADING_MIN + rng.gen::<f32>() * TARGET_HEADING_SPAN;
    let id = world.spawn();
    let idx = id.index as usize;
    world.positions[idx] = Some(screen.center());
    world.momenta[idx] = Some(rotate(Vec2::X, heading) * TARGET_SPEED);
    world.bounces[idx] = Some(Bounce);
    id
}

/// Spawn the HUD labels: stage title near the top, countdown in the centre,
/// and the two stats lines above and below the centre.
pub fn spawn_hud(world: &mut World, screen: &Bounds) -> Hud {
    let center = screen.center();
    let title = spawn_label(world, Vec2::new(center.x, LABEL_TOP), LABEL_SIZE);
    let slowest = spawn_label(world, center - Vec2::Y * STATS_OFFSET, LABEL_SIZE);
    let most = spawn_label(world, center + Vec2::Y * STATS_OFFSET, LABEL_SIZE);
    let countdown = spawn_label(world, center, COUNTDOWN_SIZE);
    Hud {
        title,
        countdown: Some(countdown),
        slowest,
        most,
    }
}

fn spawn_label(world: &mut World, position: Vec2, size: u32) -> EntityId {
    let id = world.spawn();
    let idx = id.index as usize;
    world.positions[idx] = Some(position);
    world.labels[idx] = Some(Label {
        text: String::new(),
        size,
    });
    id
}
