//! Bounds-cull system: removes world entities that drifted too far out.

use barrage_core::types::Bounds;

use crate::ecs::{occupied, World};

/// Despawn every `InWorld` entity whose position is outside `region`.
/// Returns the number removed.
pub fn run(world: &mut World, region: &Bounds) -> usize {
    let mut culled = 0;
    for idx in occupied(&world.in_world) {
        let outside = world.positions[idx].is_some_and(|p| !region.contains(p));
        if outside && world.despawn_at(idx) {
            culled += 1;
        }
    }
    culled
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::components::InWorld;
    use glam::Vec2;

    #[test]
    fn test_culls_outside_margin_only() {
        let mut world = World::new();
        let region = Bounds::from_size(1024.0, 768.0).scale_by(1.5);
        let mut spawn = |p: Vec2, in_world: bool| {
            let e = world.spawn();
            world.positions[e.index as usize] = Some(p);
            if in_world {
                world.in_world[e.index as usize] = Some(InWorld);
            }
            e
        };
        // just off screen but inside the margin
        let near = spawn(Vec2::new(-100.0, 384.0), true);
        let far = spawn(Vec2::new(-300.0, 384.0), true);
        let untracked = spawn(Vec2::new(5000.0, 5000.0), false);

        assert_eq!(run(&mut world, &region), 1);
        assert!(world.is_alive(near));
        assert!(!world.is_alive(far));
        assert!(world.is_alive(untracked));
    }
}
