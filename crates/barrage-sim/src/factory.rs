//! Bullet and pattern factories.
//!
//! These turn a bound description plus a point in space and time into an
//! entity with concrete components. Pattern entities are invisible and only
//! drive the emission system; bullets are what the renderer draws.

use glam::Vec2;

use barrage_core::components::{
    BulletExtras, BulletFactory, FadeFlags, InWorld, SpriteKind, Target, Visual,
};
use barrage_core::constants::FADE_DURATION;
use barrage_core::error::PatternError;
use barrage_core::pattern::BulletSource;
use barrage_core::timing::{Cooldown, LerpThing};
use barrage_core::types::EntityId;

use crate::actions::CronAction;
use crate::cron::Cron;
use crate::ecs::World;

/// Optional components attached to a pattern entity.
#[derive(Debug, Clone, Default)]
pub struct PatternExtras {
    /// Seconds until the pattern stops emitting and is removed.
    pub lifetime: Option<f32>,
    /// Sweep added to the ring's aim every frame.
    pub rotation: Option<LerpThing>,
    /// Entity the ring tracks.
    pub target: Option<EntityId>,
    /// Drift of the pattern origin.
    pub momentum: Option<Vec2>,
}

/// Create one bullet.
///
/// `momentum` is the unit direction; it is scaled by `speed`. A fade-out
/// request is scheduled on `cron` so the bullet reaches zero alpha exactly
/// when its lifetime runs out; without a lifetime there is nothing to time
/// it against and the request is ignored.
#[allow(clippy::too_many_arguments)]
pub fn spawn_bullet(
    world: &mut World,
    cron: &mut Cron<CronAction>,
    position: Vec2,
    momentum: Vec2,
    speed: f32,
    sprite: SpriteKind,
    fade: FadeFlags,
    extras: &BulletExtras,
) -> EntityId {
    let id = world.spawn();
    let idx = id.index as usize;

    world.positions[idx] = Some(position);
    world.momenta[idx] = Some(momentum * speed);
    world.in_world[idx] = Some(InWorld);

    let mut visual = if fade.fades_in() {
        world.fades[idx] = Some(LerpThing::fade_in());
        Visual::new(sprite, 0.0)
    } else {
        Visual::opaque(sprite)
    };
    visual.anchor = position;
    world.visuals[idx] = Some(visual);

    if let Some(lifetime) = extras.lifetime {
        world.lifetimes[idx] = Some(Cooldown::new(lifetime));
        if fade.fades_out() {
            cron.add(
                f64::from(lifetime - FADE_DURATION),
                CronAction::FadeOut { entity: id },
            );
        }
    }

    world.angular_momenta[idx] = extras.angular_momentum;

    if let Some(rotation) = &extras.rotation {
        let mut rotation = rotation.clone();
        rotation.reset();
        world.rotations[idx] = Some(rotation);
    }

    id
}

/// Create a bullet from a bound factory, flying along `direction`.
pub fn spawn_from_factory(
    world: &mut World,
    cron: &mut Cron<CronAction>,
    factory: &BulletFactory,
    position: Vec2,
    direction: Vec2,
) -> EntityId {
    spawn_bullet(
        world,
        cron,
        position,
        direction,
        factory.speed,
        factory.sprite,
        factory.fade,
        &factory.extras,
    )
}

/// Create a pattern entity. Malformed input is rejected before anything is
/// spawned.
pub fn spawn_pattern(
    world: &mut World,
    position: Vec2,
    mut source: BulletSource,
    factory: BulletFactory,
    extras: PatternExtras,
) -> Result<EntityId, PatternError> {
    source.validate()?;
    if !position.is_finite() {
        return Err(PatternError::NonFinite("pattern position"));
    }
    if extras.lifetime.is_some_and(|l| !l.is_finite()) {
        return Err(PatternError::NonFinite("pattern lifetime"));
    }
    if extras.momentum.is_some_and(|m| !m.is_finite()) {
        return Err(PatternError::NonFinite("pattern momentum"));
    }
    if !factory.speed.is_finite() {
        return Err(PatternError::NonFinite("bullet speed"));
    }

    source.heartbeat.reset();
    source.rotation = 0.0;

    let id = world.spawn();
    let idx = id.index as usize;
    world.positions[idx] = Some(position);
    world.bullet_sources[idx] = Some(source);
    world.bullet_factories[idx] = Some(factory);
    world.lifetimes[idx] = extras.lifetime.map(Cooldown::new);
    world.rotations[idx] = extras.rotation.map(|mut r| {
        r.reset();
        r
    });
    world.targets[idx] = extras.target.map(Target);
    world.momenta[idx] = extras.momentum;

    Ok(id)
}
