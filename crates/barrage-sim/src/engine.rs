//! Simulation engine: the one object a driver holds.
//!
//! `SimulationEngine` owns the entity store, the cron scheduler, the HUD
//! countdown and the RNG. A frame is one `tick(dt)`: countdown, scheduler
//! drain, then the ten systems in order. Completely headless, so runs are
//! reproducible per seed and testable without a window.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use barrage_core::constants::{
    COUNTDOWN_TEXTS, CULL_SCALE, DEFAULT_FPS, MAX_DT_FRAMES, SCENARIO_START, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
use barrage_core::events::SimEvent;
use barrage_core::state::FrameSnapshot;
use barrage_core::types::{Bounds, EntityId, SimTime};

use crate::actions::{self, CronAction};
use crate::cron::{Cron, Flow};
use crate::ecs::{occupied, World};
use crate::error::SimError;
use crate::hud::{Countdown, CountdownStep, Hud, RunStats};
use crate::scenario::{PatternSpec, Scenario};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Nominal frame rate; also the unit for `max_dt_frames`.
    pub fps: u32,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Size of the cull region relative to the screen, around its centre.
    pub cull_scale: f32,
    /// Time of the first timeline stage, in seconds.
    pub start_delay: f64,
    /// Largest frame delta accepted, in nominal frames. Longer stalls are
    /// clamped.
    pub max_dt_frames: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fps: DEFAULT_FPS,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cull_scale: CULL_SCALE,
            start_delay: SCENARIO_START,
            max_dt_frames: MAX_DT_FRAMES,
        }
    }
}

impl SimConfig {
    pub fn screen(&self) -> Bounds {
        Bounds::from_size(self.screen_width, self.screen_height)
    }

    pub fn cull_bounds(&self) -> Bounds {
        self.screen().scale_by(self.cull_scale)
    }

    /// Clamp for the frame delta, in seconds.
    pub fn max_dt(&self) -> f64 {
        f64::from(self.max_dt_frames) / f64::from(self.fps.max(1))
    }
}

/// Everything a cron action may touch. Passed explicitly instead of living
/// in globals.
#[derive(Debug)]
pub struct SimContext {
    pub world: World,
    pub hud: Hud,
    /// The bouncing entity patterns can aim at.
    pub target: Option<EntityId>,
    pub stats: RunStats,
    /// Events raised since the driver last drained them.
    pub events: Vec<SimEvent>,
}

impl SimContext {
    /// Fresh world holding only the target and the HUD labels.
    pub fn new(screen: &Bounds, rng: &mut ChaCha8Rng) -> Self {
        let mut world = World::new();
        let target = world_setup::spawn_target(&mut world, rng, screen);
        let hud = world_setup::spawn_hud(&mut world, screen);
        Self {
            world,
            hud,
            target: Some(target),
            stats: RunStats::default(),
            events: Vec::new(),
        }
    }
}

/// The simulation engine. Owns the world, the scheduler and all run state.
pub struct SimulationEngine {
    config: SimConfig,
    scenario: Scenario,
    ctx: SimContext,
    cron: Cron<CronAction>,
    countdown: Countdown,
    rng: ChaCha8Rng,
    time: SimTime,
    finished: bool,
}

impl SimulationEngine {
    /// Create an engine for `scenario` and put it in its starting state.
    pub fn new(config: SimConfig, scenario: Scenario) -> Result<Self, SimError> {
        scenario.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let ctx = SimContext::new(&config.screen(), &mut rng);
        let mut engine = Self {
            config,
            scenario,
            ctx,
            cron: Cron::new(),
            countdown: Countdown::new(COUNTDOWN_TEXTS),
            rng,
            time: SimTime::default(),
            finished: false,
        };
        engine.reset();
        Ok(engine)
    }

    /// Engine running the bundled demo timeline.
    pub fn demo(config: SimConfig) -> Result<Self, SimError> {
        let scenario = Scenario::demo(&config.screen(), config.start_delay)?;
        Self::new(config, scenario)
    }

    /// Restart the scenario from scratch.
    ///
    /// Clears the scheduler and the world, re-seeds the RNG, respawns the
    /// target and HUD, and queues every timeline entry again. Calling it
    /// twice in a row leaves the same state as calling it once.
    pub fn reset(&mut self) {
        self.cron.reset();
        self.ctx.world.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        let screen = self.config.screen();
        self.ctx.target = Some(world_setup::spawn_target(
            &mut self.ctx.world,
            &mut self.rng,
            &screen,
        ));
        self.ctx.hud = world_setup::spawn_hud(&mut self.ctx.world, &screen);
        self.ctx.stats = RunStats::default();
        self.ctx.events.clear();

        self.countdown = Countdown::new(COUNTDOWN_TEXTS);
        if let Some(text) = self.countdown.start() {
            self.ctx.hud.show_countdown(&mut self.ctx.world, &text);
            self.ctx.events.push(SimEvent::CountdownShown { at: 0.0, text });
        }

        for entry in &self.scenario.entries {
            self.cron.add_at(entry.at, entry.action.clone());
        }

        self.time = SimTime::default();
        self.finished = false;
        info!(
            seed = self.config.seed,
            jobs = self.cron.len(),
            entities = self.ctx.world.entity_count(),
            "scenario reset"
        );
    }

    /// Advance the simulation by one frame of `raw_dt` seconds.
    ///
    /// Returns `Flow::Stop` once the timeline has ended; later calls keep
    /// returning it without simulating.
    pub fn tick(&mut self, raw_dt: f64) -> Result<Flow, SimError> {
        if self.finished {
            return Ok(Flow::Stop);
        }
        if !raw_dt.is_finite() || raw_dt < 0.0 {
            return Err(SimError::InvalidDelta(raw_dt));
        }
        let dt = raw_dt.min(self.config.max_dt());

        self.poll_countdown(dt as f32);

        let ctx = &mut self.ctx;
        let flow = self
            .cron
            .update(dt, |cron, action| action.invoke(ctx, cron))?;
        if flow == Flow::Stop {
            self.time.advance(dt);
            self.finished = true;
            return Ok(Flow::Stop);
        }

        self.run_systems(dt as f32)?;
        self.time.advance(dt);

        let fps = if raw_dt > 0.0 { 1.0 / raw_dt } else { 0.0 };
        let sprites = occupied(&self.ctx.world.visuals).len();
        self.ctx.stats.record(fps, sprites);
        Ok(Flow::Continue)
    }

    fn poll_countdown(&mut self, dt: f32) {
        let at = self.cron.now() + f64::from(dt);
        match self.countdown.poll(dt) {
            CountdownStep::Show(text) => {
                self.ctx.hud.show_countdown(&mut self.ctx.world, &text);
                self.ctx.events.push(SimEvent::CountdownShown { at, text });
            }
            CountdownStep::Finished => {
                self.ctx.hud.remove_countdown(&mut self.ctx.world);
                self.ctx.events.push(SimEvent::CountdownFinished { at });
            }
            CountdownStep::Hold | CountdownStep::Idle => {}
        }
    }

    /// Run all systems in pipeline order.
    fn run_systems(&mut self, dt: f32) -> Result<(), SimError> {
        let world = &mut self.ctx.world;
        systems::fade::run(world, dt);
        systems::aim::run(world);
        systems::rotate::run(world, dt);
        let spawned = systems::emission::run(world, &mut self.cron, dt)?;
        systems::angular_momentum::run(world, dt);
        systems::bounce::run(world, &self.config.screen());
        systems::movement::run(world, dt);
        systems::visual_sync::run(world);
        let culled = systems::bounds_cull::run(world, &self.config.cull_bounds());
        let expired = systems::lifetime::run(world, dt);
        debug!(
            frame = self.time.frame,
            spawned,
            culled,
            expired,
            entities = world.entity_count(),
            "frame"
        );
        Ok(())
    }

    /// Create a pattern outside the timeline.
    pub fn spawn_pattern(&mut self, spec: PatternSpec) -> Result<EntityId, SimError> {
        let (entity, _) = actions::spawn_pattern(&mut self.ctx, spec)?;
        Ok(entity)
    }

    /// Renderable state after the last frame.
    pub fn snapshot(&self) -> FrameSnapshot {
        systems::snapshot::build_snapshot(&self.ctx.world, &self.time, self.cron.len())
    }

    /// Take the events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.ctx.events)
    }

    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Scheduler clock, in seconds since the last reset.
    pub fn now(&self) -> f64 {
        self.cron.now()
    }

    pub fn pending_jobs(&self) -> usize {
        self.cron.len()
    }

    pub fn target(&self) -> Option<EntityId> {
        self.ctx.target
    }

    pub fn hud(&self) -> &Hud {
        &self.ctx.hud
    }

    pub fn stats(&self) -> &RunStats {
        &self.ctx.stats
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Mutable world access for tests that stage entities by hand.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.ctx.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.fps, 60);
        assert!((config.max_dt() - 0.05).abs() < 1e-12);
        let cull = config.cull_bounds();
        assert_eq!(cull.width(), 1536.0);
        assert_eq!(cull.center(), config.screen().center());
    }

    #[test]
    fn test_config_partial_json() {
        let config: SimConfig = serde_json::from_str(r#"{"seed": 7, "fps": 30}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.fps, 30);
        assert_eq!(config.screen_width, 1024.0);
        assert!((config.max_dt() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_new_engine_is_reset() {
        let engine = SimulationEngine::new(SimConfig::default(), Scenario::default()).unwrap();
        assert_eq!(engine.world().entity_count(), 5);
        assert_eq!(engine.pending_jobs(), 0);
        assert_eq!(engine.hud().countdown_text(engine.world()), Some("3"));
        assert!(!engine.is_finished());
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut engine =
            SimulationEngine::new(SimConfig::default(), Scenario::default()).unwrap();
        engine.tick(10.0).unwrap();
        assert!((engine.now() - 0.05).abs() < 1e-12);
        assert_eq!(engine.time().frame, 1);
    }
}
