//! Lifetime system: expires entities whose countdown ran out.

use crate::ecs::{occupied, World};

/// Tick every lifetime by `dt` and despawn the entities that went cold.
/// Returns the number removed.
pub fn run(world: &mut World, dt: f32) -> usize {
    let mut expired = 0;
    for idx in occupied(&world.lifetimes) {
        let cold = match world.lifetimes[idx].as_mut() {
            Some(lifetime) => {
                lifetime.tick(dt);
                lifetime.is_cold()
            }
            None => false,
        };
        if cold && world.despawn_at(idx) {
            expired += 1;
        }
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::timing::Cooldown;

    #[test]
    fn test_expires_when_cold() {
        let mut world = World::new();
        let e = world.spawn();
        world.lifetimes[e.index as usize] = Some(Cooldown::new(1.0));
        assert_eq!(run(&mut world, 0.5), 0);
        assert!(world.is_alive(e));
        assert_eq!(run(&mut world, 0.5), 1);
        assert!(!world.is_alive(e));
        assert_eq!(run(&mut world, 0.5), 0);
    }

    #[test]
    fn test_pattern_expiry_keeps_bullets() {
        let mut world = World::new();
        let pattern = world.spawn();
        world.lifetimes[pattern.index as usize] = Some(Cooldown::new(0.1));
        let bullet = world.spawn();
        world.lifetimes[bullet.index as usize] = Some(Cooldown::new(5.0));
        run(&mut world, 0.2);
        assert!(!world.is_alive(pattern));
        assert!(world.is_alive(bullet));
    }
}
