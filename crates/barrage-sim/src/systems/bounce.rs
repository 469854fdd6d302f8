//! Bounce system: mirror reflection at the screen edges.

use barrage_core::types::Bounds;

use crate::ecs::{occupied, World};

/// Reflect every bouncing entity that has left `bounds`.
///
/// The overshoot is mirrored (`2 * edge - p`), not clamped, and the
/// momentum component along that axis flips sign.
pub fn run(world: &mut World, bounds: &Bounds) {
    for idx in occupied(&world.bounces) {
        let (Some(pos), Some(mom)) = (world.positions[idx].as_mut(), world.momenta[idx].as_mut())
        else {
            continue;
        };
        if bounds.contains(*pos) {
            continue;
        }
        if pos.x < bounds.min.x {
            pos.x = 2.0 * bounds.min.x - pos.x;
            mom.x = -mom.x;
        } else if pos.x > bounds.max.x {
            pos.x = 2.0 * bounds.max.x - pos.x;
            mom.x = -mom.x;
        }
        if pos.y < bounds.min.y {
            pos.y = 2.0 * bounds.min.y - pos.y;
            mom.y = -mom.y;
        } else if pos.y > bounds.max.y {
            pos.y = 2.0 * bounds.max.y - pos.y;
            mom.y = -mom.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::components::Bounce;
    use glam::Vec2;

    fn bouncer(world: &mut World, pos: Vec2, mom: Vec2) -> usize {
        let e = world.spawn();
        let idx = e.index as usize;
        world.positions[idx] = Some(pos);
        world.momenta[idx] = Some(mom);
        world.bounces[idx] = Some(Bounce);
        idx
    }

    #[test]
    fn test_reflects_off_left_edge() {
        let mut world = World::new();
        let idx = bouncer(&mut world, Vec2::new(-5.0, 10.0), Vec2::new(-20.0, 0.0));
        run(&mut world, &Bounds::from_size(800.0, 600.0));
        assert_eq!(world.positions[idx], Some(Vec2::new(5.0, 10.0)));
        assert_eq!(world.momenta[idx], Some(Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn test_reflects_off_corner() {
        let mut world = World::new();
        let idx = bouncer(&mut world, Vec2::new(810.0, 603.0), Vec2::new(30.0, 40.0));
        run(&mut world, &Bounds::from_size(800.0, 600.0));
        assert_eq!(world.positions[idx], Some(Vec2::new(790.0, 597.0)));
        assert_eq!(world.momenta[idx], Some(Vec2::new(-30.0, -40.0)));
    }

    #[test]
    fn test_inside_is_untouched() {
        let mut world = World::new();
        let idx = bouncer(&mut world, Vec2::new(400.0, 300.0), Vec2::new(-20.0, 5.0));
        run(&mut world, &Bounds::from_size(800.0, 600.0));
        assert_eq!(world.positions[idx], Some(Vec2::new(400.0, 300.0)));
        assert_eq!(world.momenta[idx], Some(Vec2::new(-20.0, 5.0)));
    }

    #[test]
    fn test_non_bouncing_entity_leaves() {
        let mut world = World::new();
        let e = world.spawn();
        let idx = e.index as usize;
        world.positions[idx] = Some(Vec2::new(-5.0, 10.0));
        world.momenta[idx] = Some(Vec2::new(-20.0, 0.0));
        run(&mut world, &Bounds::from_size(800.0, 600.0));
        assert_eq!(world.positions[idx], Some(Vec2::new(-5.0, 10.0)));
    }
}
