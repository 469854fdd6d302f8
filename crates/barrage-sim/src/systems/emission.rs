//! Emission system: turns heartbeat beats into bullets.

use tracing::warn;

use crate::actions::CronAction;
use crate::cron::Cron;
use crate::ecs::{occupied, World};
use crate::error::SimError;
use crate::factory;

/// Advance every pattern's heartbeat and spawn the volleys that are due.
///
/// Bullets spawned here exist for every later system this frame. Returns
/// the number of bullets spawned.
pub fn run(world: &mut World, cron: &mut Cron<CronAction>, dt: f32) -> Result<usize, SimError> {
    let mut spawned = 0;
    for idx in occupied(&world.bullet_sources) {
        let Some(entity) = world.entity_at(idx) else {
            continue;
        };
        let Some(origin) = world.positions[idx] else {
            continue;
        };
        let Some(source) = world.bullet_sources[idx].as_mut() else {
            continue;
        };
        let shots = source.fire(dt);
        if shots.is_empty() {
            continue;
        }
        let Some(bullet) = world.bullet_factories[idx].clone() else {
            continue;
        };
        if !origin.is_finite() {
            warn!(%entity, "pattern position is not finite");
            return Err(SimError::NonFinitePosition { entity });
        }
        for (offset, direction) in shots {
            factory::spawn_from_factory(world, cron, &bullet, origin + offset, direction);
            spawned += 1;
        }
    }
    Ok(spawned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::components::{BulletFactory, FadeFlags, SpriteKind};
    use barrage_core::pattern::{BulletSource, Heartbeat, Ring};
    use barrage_core::types::angle_of;
    use glam::Vec2;

    use crate::factory::{spawn_pattern, PatternExtras};

    fn ring_pattern(world: &mut World, beats: &str, fade: FadeFlags) -> usize {
        let source = BulletSource::new(
            4,
            Ring::new(50.0, 4).unwrap(),
            Heartbeat::new(1.0, beats).unwrap(),
        )
        .unwrap();
        let e = spawn_pattern(
            world,
            Vec2::new(512.0, 384.0),
            source,
            BulletFactory::new(SpriteKind::HotPink, 100.0)
                .with_fade(fade)
                .with_lifetime(2.0),
            PatternExtras::default(),
        )
        .unwrap();
        e.index as usize
    }

    #[test]
    fn test_first_frame_emits_full_volley() {
        let mut world = World::new();
        let mut cron = Cron::new();
        ring_pattern(&mut world, "#.......#.......", FadeFlags::NONE);
        let spawned = run(&mut world, &mut cron, 1.0 / 60.0).unwrap();
        assert_eq!(spawned, 4);
        assert_eq!(world.entity_count(), 5);
        assert_eq!(occupied(&world.in_world).len(), 4);

        let mut angles: Vec<i32> = occupied(&world.momenta)
            .into_iter()
            .map(|i| angle_of(world.momenta[i].unwrap()).rem_euclid(360.0).round() as i32 % 360)
            .collect();
        angles.sort();
        assert_eq!(angles, vec![0, 90, 180, 270]);

        for i in occupied(&world.in_world) {
            let offset = world.positions[i].unwrap() - Vec2::new(512.0, 384.0);
            assert!((offset.length() - 50.0).abs() < 1e-3);
            assert!((world.momenta[i].unwrap().length() - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rest_beats_do_not_emit() {
        let mut world = World::new();
        let mut cron = Cron::new();
        ring_pattern(&mut world, "#.......#.......", FadeFlags::NONE);
        run(&mut world, &mut cron, 1.0 / 60.0).unwrap();
        let mut total = 0;
        for _ in 0..20 {
            total += run(&mut world, &mut cron, 1.0 / 60.0).unwrap();
        }
        assert_eq!(total, 0);
    }

    #[test]
    fn test_fade_out_requests_are_scheduled() {
        let mut world = World::new();
        let mut cron = Cron::new();
        ring_pattern(&mut world, "#...............", FadeFlags::OUT);
        run(&mut world, &mut cron, 0.01).unwrap();
        assert_eq!(cron.len(), 4);
        assert!((cron.next_due().unwrap() - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_position_aborts() {
        let mut world = World::new();
        let mut cron = Cron::new();
        let idx = ring_pattern(&mut world, "#...", FadeFlags::NONE);
        world.positions[idx] = Some(Vec2::new(f32::INFINITY, 0.0));
        let err = run(&mut world, &mut cron, 0.01).unwrap_err();
        assert!(matches!(err, SimError::NonFinitePosition { .. }));
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_pattern_without_factory_is_skipped() {
        let mut world = World::new();
        let mut cron = Cron::new();
        let idx = ring_pattern(&mut world, "#...", FadeFlags::NONE);
        world.bullet_factories[idx] = None;
        assert_eq!(run(&mut world, &mut cron, 0.01).unwrap(), 0);
    }
}
