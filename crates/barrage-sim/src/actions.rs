//! Scheduler actions: bound-parameter records fired by the cron.
//!
//! Every deferred effect in the simulation is one of these values, so a
//! timeline can be inspected, serialized and replayed. `invoke` is the only
//! place they touch the simulation context.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use barrage_core::components::Shape;
use barrage_core::events::SimEvent;
use barrage_core::timing::LerpThing;
use barrage_core::types::EntityId;

use crate::cron::{Cron, Flow};
use crate::engine::SimContext;
use crate::error::SimError;
use crate::factory::{self, PatternExtras};
use crate::scenario::PatternSpec;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CronAction {
    /// Replace the stage title.
    SetLabel { text: String },
    /// Create a pattern entity.
    SpawnPattern(PatternSpec),
    /// Attach (`Some`) or remove (`None`) the outline around the target.
    SetTargetShape {
        #[serde(default)]
        shape: Option<Shape>,
    },
    /// Write the run statistics into the HUD.
    ShowStats,
    /// Start fading a bullet out, if it still exists.
    FadeOut { entity: EntityId },
    /// End the run.
    Stop,
}

impl CronAction {
    pub fn invoke(
        self,
        ctx: &mut SimContext,
        cron: &mut Cron<CronAction>,
    ) -> Result<Flow, SimError> {
        let now = cron.now();
        match self {
            CronAction::SetLabel { text } => {
                ctx.hud.set_title(&mut ctx.world, &text);
                info!(at = now, text = %text, "stage");
                ctx.events.push(SimEvent::LabelChanged { at: now, text });
            }
            CronAction::SpawnPattern(spec) => match spawn_pattern(ctx, spec) {
                Ok((entity, bullets)) => {
                    debug!(at = now, %entity, bullets, "pattern spawned");
                    ctx.events.push(SimEvent::PatternSpawned {
                        at: now,
                        entity,
                        bullets,
                    });
                }
                Err(err) => {
                    warn!(at = now, error = %err, "pattern rejected");
                    ctx.events.push(SimEvent::PatternRejected {
                        at: now,
                        reason: err.to_string(),
                    });
                }
            },
            CronAction::SetTargetShape { shape } => {
                match ctx.target.and_then(|t| ctx.world.slot(t)) {
                    Some(idx) => ctx.world.shapes[idx] = shape,
                    None => warn!(at = now, "target is gone, shape not changed"),
                }
            }
            CronAction::ShowStats => {
                ctx.hud.show_stats(&mut ctx.world, &ctx.stats);
                info!(
                    slowest_fps = ctx.stats.slowest_fps,
                    slowest_sprites = ctx.stats.slowest_sprites,
                    most_fps = ctx.stats.most_fps,
                    most_sprites = ctx.stats.most_sprites,
                    "run statistics"
                );
                ctx.events.push(SimEvent::StatsShown {
                    at: now,
                    slowest_fps: ctx.stats.slowest_fps,
                    slowest_sprites: ctx.stats.slowest_sprites,
                    most_fps: ctx.stats.most_fps,
                    most_sprites: ctx.stats.most_sprites,
                });
            }
            CronAction::FadeOut { entity } => {
                if let Some(idx) = ctx.world.slot(entity) {
                    ctx.world.fades[idx] = Some(LerpThing::fade_out());
                }
            }
            CronAction::Stop => {
                info!(at = now, "timeline finished");
                ctx.events.push(SimEvent::Stopped { at: now });
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }
}

/// Run the pattern factory for a spec, resolving `aim_at_target` against the
/// context's target.
pub(crate) fn spawn_pattern(
    ctx: &mut SimContext,
    spec: PatternSpec,
) -> Result<(EntityId, u32), barrage_core::error::PatternError> {
    let target = if spec.aim_at_target { ctx.target } else { None };
    let bullets = spec.source.bullets;
    let entity = factory::spawn_pattern(
        &mut ctx.world,
        spec.position,
        spec.source,
        spec.bullet,
        PatternExtras {
            lifetime: spec.lifetime,
            rotation: spec.rotation,
            target,
            momentum: spec.momentum,
        },
    )?;
    Ok((entity, bullets))
}
