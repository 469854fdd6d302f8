//! Scenario timelines: flat `(time, action)` lists fed to the scheduler.
//!
//! The built-in demo walks through every pattern feature in about three
//! and a half minutes. Timelines can also be loaded from and dumped to JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use barrage_core::components::{BulletFactory, FadeFlags, Shape, SpriteKind};
use barrage_core::constants::{STATS_HOLD, TARGET_MARKER_RADIUS};
use barrage_core::error::PatternError;
use barrage_core::pattern::{BulletSource, Heartbeat, Ring};
use barrage_core::timing::{LerpThing, Repeat};
use barrage_core::types::Bounds;

use crate::actions::CronAction;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("entry {index}: {source}")]
    InvalidEntry { index: usize, source: PatternError },
    #[error("entry {index}: time {at} is not a finite non-negative number")]
    InvalidTime { index: usize, at: f64 },
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Everything needed to create one pattern entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub position: Vec2,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum: Option<Vec2>,
    pub source: BulletSource,
    pub bullet: BulletFactory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<LerpThing>,
    /// Track the scenario's target entity.
    #[serde(default)]
    pub aim_at_target: bool,
}

impl PatternSpec {
    pub fn new(position: Vec2, source: BulletSource, bullet: BulletFactory) -> Self {
        Self {
            position,
            momentum: None,
            source,
            bullet,
            lifetime: None,
            rotation: None,
            aim_at_target: false,
        }
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    pub fn with_rotation(mut self, rotation: LerpThing) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_momentum(mut self, momentum: Vec2) -> Self {
        self.momentum = Some(momentum);
        self
    }

    pub fn aimed_at_target(mut self) -> Self {
        self.aim_at_target = true;
        self
    }

    pub fn validate(&self) -> Result<(), PatternError> {
        self.source.validate()?;
        if !self.position.is_finite() {
            return Err(PatternError::NonFinite("pattern position"));
        }
        if self.momentum.is_some_and(|m| !m.is_finite()) {
            return Err(PatternError::NonFinite("pattern momentum"));
        }
        if self.lifetime.is_some_and(|l| !l.is_finite()) {
            return Err(PatternError::NonFinite("pattern lifetime"));
        }
        if !self.bullet.speed.is_finite() {
            return Err(PatternError::NonFinite("bullet speed"));
        }
        Ok(())
    }
}

/// One timeline entry: fire `action` at absolute time `at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEntry {
    pub at: f64,
    pub action: CronAction,
}

/// A complete timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub entries: Vec<ScenarioEntry>,
}

impl Scenario {
    /// Parse and validate a JSON timeline.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.at.is_finite() || entry.at < 0.0 {
                return Err(ScenarioError::InvalidTime {
                    index,
                    at: entry.at,
                });
            }
            if let CronAction::SpawnPattern(spec) = &entry.action {
                spec.validate()
                    .map_err(|source| ScenarioError::InvalidEntry { index, source })?;
            }
        }
        Ok(())
    }

    /// Time of the last entry.
    pub fn end_time(&self) -> f64 {
        self.entries.iter().map(|e| e.at).fold(0.0, f64::max)
    }

    /// Times at which the stage title changes, with the new text.
    pub fn label_times(&self) -> Vec<(f64, &str)> {
        self.entries
            .iter()
            .filter_map(|e| match &e.action {
                CronAction::SetLabel { text } => Some((e.at, text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// The bundled demo, starting at `start` seconds on a `screen`-sized area.
    pub fn demo(screen: &Bounds, start: f64) -> Result<Self, ScenarioError> {
        let mut tl = Timeline::new(start);
        let center = screen.center();
        let (w, h) = (screen.width(), screen.height());
        let top = Vec2::new(center.x, 50.0);
        let spin = |secs: f32| LerpThing::new(0.0, 360.0, secs).with_repeat(Repeat::Forever);

        tl.label("Simple 4 step ring");
        tl.pattern(
            PatternSpec::new(center, full(4, 50.0, 4, 1.0, "#.......#.......")?, faded(SpriteKind::HotPink, 100.0))
                .with_lifetime(7.95),
        );
        tl.wait(8.0);

        tl.label("Ring stack");
        tl.pattern(
            PatternSpec::new(center, full(18, 50.0, 18, 1.0, "#.#.#...........")?, faded(SpriteKind::Cyan, 100.0))
                .with_lifetime(7.95),
        );
        tl.wait(8.0);

        tl.label("Simple ring + Stack with 10° aim");
        tl.pattern(
            PatternSpec::new(center, full(18, 50.0, 18, 1.0, "#.......#.......")?, faded(SpriteKind::HotPink, 100.0))
                .with_lifetime(7.95),
        );
        tl.pattern(
            PatternSpec::new(
                center,
                full(18, 50.0, 18, 1.0, "#.#.#...........")?.with_aim(10.0),
                faded(SpriteKind::Cyan, 100.0),
            )
            .with_lifetime(7.95),
        );
        tl.wait(8.0);

        for beats in ["#...............", "#.......#......."] {
            tl.label("Ring with 5 steps");
            tl.pattern(
                PatternSpec::new(center, full(5, 50.0, 5, 1.0, beats)?, faded(SpriteKind::Yellow, 100.0))
                    .with_lifetime(3.95),
            );
            tl.wait(4.0);
        }

        tl.label("Ring with 5 steps, rotating");
        tl.pattern(
            PatternSpec::new(
                center,
                full(5, 50.0, 5, 1.0, "#...#...#...#...")?,
                faded(SpriteKind::Yellow, 100.0).with_fade(FadeFlags::BOTH),
            )
            .with_rotation(spin(8.0))
            .with_lifetime(3.95),
        );
        tl.wait(4.0);

        tl.label("Ring with 1 step, rotating");
        tl.pattern(
            PatternSpec::new(center, full(1, 50.0, 1, 1.0, "################")?, faded(SpriteKind::Green, 100.0))
                .with_rotation(spin(8.0))
                .with_lifetime(1.95),
        );
        tl.wait(2.0);

        for count in [2, 4, 8] {
            tl.label(&format!("Ring with {count} steps, rotating"));
            tl.pattern(
                PatternSpec::new(center, full(count, 10.0, count, 1.0, "#...#...#...#...")?, faded(SpriteKind::Green, 100.0))
                    .with_rotation(spin(8.0))
                    .with_lifetime(1.95),
            );
            tl.wait(2.0);
        }

        tl.label("Ring with 36 steps, rotating");
        tl.pattern(
            PatternSpec::new(center, full(36, 10.0, 36, 1.0, "#...#...#...#...")?, faded(SpriteKind::Green, 100.0))
                .with_rotation(spin(8.0))
                .with_lifetime(3.95),
        );
        tl.wait(8.0);

        tl.label("Half rings");
        tl.pattern(
            PatternSpec::new(top, fan(18, 50.0, 18, 90.0, 180.0, 1.0, "#...#...#...#...")?, faded(SpriteKind::HotPink, 100.0))
                .with_lifetime(7.95),
        );
        tl.pattern(
            PatternSpec::new(
                Vec2::new(center.x, h - 50.0),
                fan(18, 50.0, 18, -90.0, 180.0, 1.0, "#...#...#...#...")?,
                faded(SpriteKind::Cyan, 100.0),
            )
            .with_lifetime(7.95),
        );
        tl.wait(4.0);

        tl.label("Quarter rings");
        tl.pattern(
            PatternSpec::new(Vec2::new(50.0, 50.0), fan(5, 0.0, 5, 45.0, 90.0, 2.0, "#.#.#.#.#.#.#.#.")?, faded(SpriteKind::Green, 100.0))
                .with_lifetime(7.95),
        );
        tl.pattern(
            PatternSpec::new(
                Vec2::new(w - 50.0, h - 50.0),
                fan(5, 0.0, 5, -135.0, 90.0, 2.0, "#.#.#.#.#.#.#.#.")?,
                faded(SpriteKind::Green, 100.0),
            )
            .with_lifetime(7.95),
        );
        tl.wait(4.0);

        tl.label("Actually any angle rings");
        tl.pattern(
            PatternSpec::new(
                Vec2::new(w / 4.0 * 3.0, 50.0),
                fan(4, 50.0, 4, 90.0, 30.0, 2.0, "#...#...#...#...")?,
                faded(SpriteKind::Yellow, 100.0),
            )
            .with_lifetime(3.95),
        );
        tl.pattern(
            PatternSpec::new(
                Vec2::new(w / 4.0, h - 50.0),
                fan(4, 50.0, 4, -90.0, 30.0, 1.0, "#...#...#...#...")?,
                faded(SpriteKind::Yellow, 100.0),
            )
            .with_lifetime(3.95),
        );
        tl.wait(8.0);

        tl.label("Oscillating partial ring");
        tl.pattern(
            PatternSpec::new(top, fan(5, 50.0, 5, 0.0, 30.0, 1.0, "#...#...#...#...")?, faded(SpriteKind::HotPink, 200.0))
                .with_rotation(LerpThing::new(165.0, 15.0, 2.0).with_repeat(Repeat::PingPong))
                .with_lifetime(7.95),
        );
        tl.wait(8.0);

        tl.label("Aiming partial ring");
        tl.action(CronAction::SetTargetShape {
            shape: Some(Shape::Circle {
                radius: TARGET_MARKER_RADIUS,
                color: "red".into(),
            }),
        });
        tl.pattern(
            PatternSpec::new(top, fan(5, 50.0, 5, -30.0, 30.0, 1.0, "#...#...#...#...")?, faded(SpriteKind::Green, 200.0))
                .with_lifetime(7.95)
                .aimed_at_target(),
        );
        tl.wait(8.0);

        tl.action(CronAction::SetTargetShape { shape: None });
        tl.label("Static ring, turning bullets");
        tl.pattern(
            PatternSpec::new(
                center,
                full(16, 250.0, 8, 1.0, "#...#...#...#...")?,
                faded(SpriteKind::Cyan, 150.0)
                    .with_lifetime(4.0)
                    .with_angular_momentum(90.0),
            )
            .with_lifetime(3.95),
        );
        tl.wait(8.0);

        tl.label("Slow turning bullets, negative speed");
        tl.pattern(
            PatternSpec::new(
                center,
                full(16, 250.0, 16, 1.0, "#...#...#...#...")?,
                faded(SpriteKind::Cyan, -150.0)
                    .with_lifetime(8.0)
                    .with_angular_momentum(15.0),
            )
            .with_lifetime(7.95),
        );
        tl.wait(8.0);

        tl.label("Fast turning bullets, negative speed");
        tl.pattern(
            PatternSpec::new(
                center,
                full(16, 100.0, 16, 1.0, "#...#...#...#...")?,
                faded(SpriteKind::Green, -150.0)
                    .with_fade(FadeFlags::BOTH)
                    .with_lifetime(8.0)
                    .with_angular_momentum(45.0),
            )
            .with_lifetime(8.0),
        );
        tl.wait(16.0);

        tl.label("Rotating 5 step ring in motion");
        tl.pattern(
            PatternSpec::new(
                Vec2::new(50.0, 50.0),
                full(5, 50.0, 5, 1.0, "#.#.#.#.#.#.#.#.")?,
                faded(SpriteKind::Yellow, 10.0)
                    .with_fade(FadeFlags::BOTH)
                    .with_lifetime(8.0),
            )
            .with_momentum(Vec2::new(w, h).normalize_or_zero() * 100.0)
            .with_rotation(spin(8.0))
            .with_lifetime(16.0),
        );
        tl.wait(16.0);

        // Stress run: emitters pile up in both top corners, then the bottom
        // corners and the centre join in.
        tl.label("Stress test");
        let corners = [Vec2::new(100.0, 100.0), Vec2::new(w - 100.0, 100.0)];
        for corner in corners {
            tl.pattern(
                PatternSpec::new(corner, full(8, 25.0, 8, 2.0, "###.............")?, plain(SpriteKind::Cyan, 100.0))
                    .with_lifetime(47.95),
            );
        }
        tl.wait(8.0);

        for (beats, lifetime, wait) in [
            ("........#.......", 39.95, 8.0),
            ("#...#...#...#...", 37.95, 4.0),
            ("#.#.#.#.#.#.#.#.", 33.95, 4.0),
        ] {
            for corner in corners {
                tl.pattern(
                    PatternSpec::new(corner, full(36, 50.0, 36, 2.0, beats)?, plain(SpriteKind::HotPink, 100.0))
                        .with_lifetime(lifetime),
                );
            }
            tl.wait(wait);
        }

        for corner in [Vec2::new(100.0, h - 100.0), Vec2::new(w - 100.0, h - 100.0)] {
            tl.pattern(
                PatternSpec::new(
                    corner,
                    full(10, 30.0, 10, 2.0, "#...#...#...#...")?,
                    plain(SpriteKind::Green, 100.0)
                        .with_angular_momentum(45.0)
                        .with_lifetime(10.0),
                )
                .with_lifetime(29.95),
            );
        }
        tl.wait(8.0);

        tl.pattern(
            PatternSpec::new(center, full(16, 100.0, 16, 2.0, "#.#.#.#.#.#.#.#.")?, faded(SpriteKind::Yellow, 100.0))
                .with_rotation(spin(5.0))
                .with_lifetime(21.95),
        );
        tl.wait(8.0);

        tl.pattern(
            PatternSpec::new(
                center,
                full(8, 100.0, 8, 1.0, "#.#.#.#.#.#.#.#.")?,
                faded(SpriteKind::LightBlue, -100.0).with_angular_momentum(10.0),
            )
            .with_rotation(spin(5.0))
            .with_lifetime(13.95),
        );
        tl.wait(8.0);

        tl.pattern(
            PatternSpec::new(
                center,
                full(6, 0.0, 6, 2.0, "################")?,
                plain(SpriteKind::Red, 150.0)
                    .with_angular_momentum(35.0)
                    .with_lifetime(16.0),
            )
            .with_rotation(spin(4.0))
            .with_lifetime(8.0),
        );
        tl.wait(24.0);

        tl.label("");
        tl.wait(3.0);

        tl.action(CronAction::ShowStats);
        tl.wait(STATS_HOLD);
        tl.action(CronAction::Stop);

        let scenario = tl.finish();
        scenario.validate()?;
        Ok(scenario)
    }
}

/// Cursor-based builder: entries are added at the cursor, `wait` moves it.
struct Timeline {
    t: f64,
    entries: Vec<ScenarioEntry>,
}

impl Timeline {
    fn new(start: f64) -> Self {
        Self {
            t: start,
            entries: Vec::new(),
        }
    }

    fn action(&mut self, action: CronAction) {
        self.entries.push(ScenarioEntry { at: self.t, action });
    }

    fn label(&mut self, text: &str) {
        self.action(CronAction::SetLabel { text: text.into() });
    }

    fn pattern(&mut self, spec: PatternSpec) {
        self.action(CronAction::SpawnPattern(spec));
    }

    fn wait(&mut self, secs: f64) {
        self.t += secs;
    }

    fn finish(self) -> Scenario {
        Scenario {
            entries: self.entries,
        }
    }
}

/// Full ring source.
fn full(
    bullets: u32,
    radius: f32,
    count: u32,
    period: f32,
    beats: &str,
) -> Result<BulletSource, PatternError> {
    BulletSource::new(bullets, Ring::new(radius, count)?, Heartbeat::new(period, beats)?)
}

/// Partial ring source.
#[allow(clippy::too_many_arguments)]
fn fan(
    bullets: u32,
    radius: f32,
    count: u32,
    aim: f32,
    width: f32,
    period: f32,
    beats: &str,
) -> Result<BulletSource, PatternError> {
    let ring = Ring::new(radius, count)?.with_aim(aim)?.with_width(width)?;
    BulletSource::new(bullets, ring, Heartbeat::new(period, beats)?)
}

fn faded(sprite: SpriteKind, speed: f32) -> BulletFactory {
    BulletFactory::new(sprite, speed).with_fade(FadeFlags::IN)
}

fn plain(sprite: SpriteKind, speed: f32) -> BulletFactory {
    BulletFactory::new(sprite, speed)
}
