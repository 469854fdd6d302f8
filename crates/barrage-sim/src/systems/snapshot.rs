//! Snapshot system: read-only copy of the renderable state.

use barrage_core::state::{EntityCounts, FrameSnapshot, ShapeView, SpriteView, TextView};
use barrage_core::types::SimTime;

use crate::ecs::{occupied, World};

/// Collect sprites, non-empty labels and outlines into a `FrameSnapshot`.
/// Entries come out in table order, so equal worlds give equal snapshots.
pub fn build_snapshot(world: &World, time: &SimTime, pending_jobs: usize) -> FrameSnapshot {
    let sprites: Vec<SpriteView> = occupied(&world.visuals)
        .into_iter()
        .filter_map(|idx| {
            let id = world.entity_at(idx)?;
            let visual = world.visuals[idx]?;
            Some(SpriteView {
                id,
                sprite: visual.sprite,
                position: visual.anchor,
                alpha: visual.alpha,
            })
        })
        .collect();

    let texts = occupied(&world.labels)
        .into_iter()
        .filter_map(|idx| {
            let id = world.entity_at(idx)?;
            let label = world.labels[idx].as_ref()?;
            if label.text.is_empty() {
                return None;
            }
            Some(TextView {
                id,
                text: label.text.clone(),
                size: label.size,
                position: world.positions[idx].unwrap_or_default(),
            })
        })
        .collect();

    let shapes = occupied(&world.shapes)
        .into_iter()
        .filter_map(|idx| {
            let id = world.entity_at(idx)?;
            Some(ShapeView {
                id,
                shape: world.shapes[idx].clone()?,
                position: world.positions[idx]?,
            })
        })
        .collect();

    FrameSnapshot {
        time: *time,
        counts: EntityCounts {
            entities: world.entity_count(),
            sprites: sprites.len(),
            patterns: occupied(&world.bullet_sources).len(),
        },
        sprites,
        texts,
        shapes,
        pending_jobs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::components::{Label, Shape, SpriteKind, Visual};
    use glam::Vec2;

    #[test]
    fn test_snapshot_contents() {
        let mut world = World::new();
        let bullet = world.spawn();
        let mut visual = Visual::new(SpriteKind::Cyan, 128.0);
        visual.anchor = Vec2::new(1.0, 2.0);
        world.visuals[bullet.index as usize] = Some(visual);

        let empty = world.spawn();
        world.labels[empty.index as usize] = Some(Label {
            text: String::new(),
            size: 48,
        });
        let title = world.spawn();
        world.positions[title.index as usize] = Some(Vec2::new(512.0, 50.0));
        world.labels[title.index as usize] = Some(Label {
            text: "Ring stack".into(),
            size: 48,
        });

        let target = world.spawn();
        world.positions[target.index as usize] = Some(Vec2::new(100.0, 100.0));
        world.shapes[target.index as usize] = Some(Shape::Circle {
            radius: 16.0,
            color: "red".into(),
        });

        let time = SimTime {
            frame: 7,
            elapsed_secs: 0.5,
        };
        let snap = build_snapshot(&world, &time, 3);
        assert_eq!(snap.sprites.len(), 1);
        assert_eq!(snap.sprites[0].id, bullet);
        assert_eq!(snap.sprites[0].alpha, 128.0);
        assert_eq!(snap.sprites[0].position, Vec2::new(1.0, 2.0));
        assert_eq!(snap.texts.len(), 1);
        assert_eq!(snap.texts[0].text, "Ring stack");
        assert_eq!(snap.shapes.len(), 1);
        assert_eq!(snap.shapes[0].id, target);
        assert_eq!(
            snap.counts,
            EntityCounts {
                entities: 4,
                sprites: 1,
                patterns: 0
            }
        );
        assert_eq!(snap.pending_jobs, 3);
        assert_eq!(snap.time.frame, 7);
    }
}
