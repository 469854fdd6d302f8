//! Timed values: countdowns and eased interpolations.
//!
//! Both are advanced explicitly by the caller's frame delta; nothing here
//! reads a wall clock. `Cooldown` drives lifetimes and the HUD countdown,
//! `LerpThing` drives alpha fades and ring rotation sweeps.

use serde::{Deserialize, Serialize};

use crate::constants::{ALPHA_MAX, FADE_DURATION};

/// A countdown of `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub duration: f32,
    #[serde(default)]
    elapsed: f32,
}

impl Cooldown {
    /// A fresh countdown with the full duration remaining.
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    /// A countdown that starts out expired.
    pub fn new_cold(duration: f32) -> Self {
        Self {
            duration,
            elapsed: duration,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Time left. Negative once the countdown has been overshot.
    pub fn remaining(&self) -> f32 {
        self.duration - self.elapsed
    }

    pub fn is_cold(&self) -> bool {
        self.remaining() <= 0.0
    }

    pub fn is_running(&self) -> bool {
        !self.is_cold()
    }

    /// Progress in `[0, 1]`. A zero-length countdown is always complete.
    pub fn normalized(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Restart, carrying the overshoot of the previous run into the new one.
    pub fn reset_wrapped(&mut self) {
        if self.duration <= 0.0 {
            self.elapsed = 0.0;
        } else {
            self.elapsed = (self.elapsed - self.duration).max(0.0);
        }
    }
}

/// Easing curve mapping linear progress `t` in `[0, 1]` onto `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InSine,
    OutSine,
    InOutSine,
    InCubic,
    OutCubic,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        use std::f32::consts::PI;
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::InQuad => t * t,
            Ease::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::InSine => 1.0 - (t * PI / 2.0).cos(),
            Ease::OutSine => (t * PI / 2.0).sin(),
            Ease::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Ease::InCubic => t * t * t,
            Ease::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// What a `LerpThing` does once its duration runs out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Clamp at `end`.
    #[default]
    Once,
    /// Wrap around this many more times, then clamp.
    Times(u32),
    /// Wrap around forever.
    Forever,
    /// Wrap forever, swapping direction on every pass.
    PingPong,
}

/// Serialized form of a `LerpThing`: its parameters without progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LerpSpec {
    pub start: f32,
    pub end: f32,
    pub duration: f32,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub repeat: Repeat,
}

/// Eased interpolation from `start` to `end` over a duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LerpSpec", into = "LerpSpec")]
pub struct LerpThing {
    pub start: f32,
    pub end: f32,
    pub ease: Ease,
    pub repeat: Repeat,
    duration: Cooldown,
    repeats_left: u32,
    reversed: bool,
}

impl LerpThing {
    pub fn new(start: f32, end: f32, duration: f32) -> Self {
        Self {
            start,
            end,
            ease: Ease::Linear,
            repeat: Repeat::Once,
            duration: Cooldown::new(duration),
            repeats_left: 0,
            reversed: false,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self.repeats_left = match repeat {
            Repeat::Times(n) => n,
            _ => 0,
        };
        self
    }

    /// Alpha ramp from transparent to opaque.
    pub fn fade_in() -> Self {
        Self::new(0.0, ALPHA_MAX, FADE_DURATION).with_ease(Ease::InQuad)
    }

    /// Alpha ramp from opaque to transparent.
    pub fn fade_out() -> Self {
        Self::new(ALPHA_MAX, 0.0, FADE_DURATION).with_ease(Ease::InQuad)
    }

    /// The underlying countdown.
    pub fn duration(&self) -> &Cooldown {
        &self.duration
    }

    /// Advance by `dt`, then sample.
    pub fn value(&mut self, dt: f32) -> f32 {
        self.advance(dt);
        self.peek()
    }

    /// Sample without advancing.
    pub fn peek(&self) -> f32 {
        let mut t = self.duration.normalized();
        if self.reversed {
            t = 1.0 - t;
        }
        self.start + (self.end - self.start) * self.ease.apply(t)
    }

    pub fn advance(&mut self, dt: f32) {
        self.duration.tick(dt);
        let d = self.duration.duration;
        if d <= 0.0 || self.duration.elapsed < d {
            return;
        }
        match self.repeat {
            Repeat::Once => {}
            Repeat::Times(_) => {
                while self.repeats_left > 0 && self.duration.elapsed >= d {
                    self.repeats_left -= 1;
                    self.duration.reset_wrapped();
                }
            }
            Repeat::Forever => {
                self.duration.elapsed = self.duration.elapsed.rem_euclid(d);
            }
            Repeat::PingPong => {
                let passes = (self.duration.elapsed / d).floor() as u64;
                if passes % 2 == 1 {
                    self.reversed = !self.reversed;
                }
                self.duration.elapsed = self.duration.elapsed.rem_euclid(d);
            }
        }
    }

    /// True once the interpolation has settled on its final value.
    pub fn is_finished(&self) -> bool {
        match self.repeat {
            Repeat::Once => self.duration.is_cold(),
            Repeat::Times(_) => self.repeats_left == 0 && self.duration.is_cold(),
            Repeat::Forever | Repeat::PingPong => false,
        }
    }

    /// Back to `start` with the full repeat budget.
    pub fn reset(&mut self) {
        self.duration.reset();
        self.reversed = false;
        self.repeats_left = match self.repeat {
            Repeat::Times(n) => n,
            _ => 0,
        };
    }
}

impl From<LerpSpec> for LerpThing {
    fn from(spec: LerpSpec) -> Self {
        LerpThing::new(spec.start, spec.end, spec.duration)
            .with_ease(spec.ease)
            .with_repeat(spec.repeat)
    }
}

impl From<LerpThing> for LerpSpec {
    fn from(lerp: LerpThing) -> Self {
        LerpSpec {
            start: lerp.start,
            end: lerp.end,
            duration: lerp.duration.duration,
            ease: lerp.ease,
            repeat: lerp.repeat,
        }
    }
}
