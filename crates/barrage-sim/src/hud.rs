//! On-screen text: stage title, start countdown and run statistics.
//!
//! HUD labels are ordinary entities with a `position` and a `label`, so they
//! survive in the store next to the target and are what a reset leaves
//! behind.

use std::collections::VecDeque;

use barrage_core::constants::{
    COUNTDOWN_STEP, STATS_MIN_FPS, STATS_MIN_SPRITES, STATS_SLOWEST_INIT,
};
use barrage_core::timing::Cooldown;
use barrage_core::types::EntityId;

use crate::ecs::World;

/// Entity ids of the HUD labels.
#[derive(Debug, Clone, Copy)]
pub struct Hud {
    pub title: EntityId,
    /// `None` once the countdown has finished.
    pub countdown: Option<EntityId>,
    pub slowest: EntityId,
    pub most: EntityId,
}

impl Hud {
    pub fn set_title(&self, world: &mut World, text: &str) -> bool {
        set_text(world, self.title, text)
    }

    pub fn title_text<'w>(&self, world: &'w World) -> Option<&'w str> {
        text_of(world, self.title)
    }

    pub fn show_countdown(&self, world: &mut World, text: &str) -> bool {
        match self.countdown {
            Some(id) => set_text(world, id, text),
            None => false,
        }
    }

    pub fn countdown_text<'w>(&self, world: &'w World) -> Option<&'w str> {
        self.countdown.and_then(|id| text_of(world, id))
    }

    /// Remove the countdown label from the store.
    pub fn remove_countdown(&mut self, world: &mut World) {
        if let Some(id) = self.countdown.take() {
            world.despawn(id);
        }
    }

    pub fn show_stats(&self, world: &mut World, stats: &RunStats) {
        set_text(world, self.slowest, &stats.slowest_text());
        set_text(world, self.most, &stats.most_text());
    }
}

fn set_text(world: &mut World, id: EntityId, text: &str) -> bool {
    let Some(idx) = world.slot(id) else {
        return false;
    };
    match world.labels[idx].as_mut() {
        Some(label) => {
            label.text.clear();
            label.text.push_str(text);
            true
        }
        None => false,
    }
}

fn text_of(world: &World, id: EntityId) -> Option<&str> {
    let idx = world.slot(id)?;
    world.labels[idx].as_ref().map(|l| l.text.as_str())
}

/// Result of polling the countdown for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownStep {
    /// Keep showing the current text.
    Hold,
    /// Switch to this text.
    Show(String),
    /// The queue just ran out; remove the label.
    Finished,
    /// Already finished on an earlier frame.
    Idle,
}

/// Finite queue of countdown labels, advanced once per step interval.
#[derive(Debug, Clone)]
pub struct Countdown {
    pending: VecDeque<String>,
    cooldown: Cooldown,
    exhausted: bool,
}

impl Countdown {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: texts.into_iter().map(Into::into).collect(),
            cooldown: Cooldown::new_cold(COUNTDOWN_STEP),
            exhausted: false,
        }
    }

    /// Take the first label and start the step timer.
    pub fn start(&mut self) -> Option<String> {
        let first = self.pending.pop_front();
        self.cooldown.reset();
        if first.is_none() {
            self.exhausted = true;
        }
        first
    }

    pub fn poll(&mut self, dt: f32) -> CountdownStep {
        if self.exhausted {
            return CountdownStep::Idle;
        }
        self.cooldown.tick(dt);
        if self.cooldown.is_running() {
            return CountdownStep::Hold;
        }
        match self.pending.pop_front() {
            Some(text) => {
                self.cooldown.reset();
                CountdownStep::Show(text)
            }
            None => {
                self.exhausted = true;
                CountdownStep::Finished
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

/// Frame-rate records kept over a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStats {
    pub slowest_fps: u32,
    pub slowest_sprites: usize,
    pub most_fps: u32,
    pub most_sprites: usize,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            slowest_fps: STATS_SLOWEST_INIT,
            slowest_sprites: 0,
            most_fps: 0,
            most_sprites: 0,
        }
    }
}

impl RunStats {
    /// Fold one frame in. `fps` of zero (no measurement yet) is ignored for
    /// the slowest-frame record.
    pub fn record(&mut self, fps: f64, sprites: usize) {
        if fps > 0.0 && sprites > STATS_MIN_SPRITES && fps < f64::from(self.slowest_fps) {
            self.slowest_fps = fps as u32;
            self.slowest_sprites = sprites;
        }
        if sprites > self.most_sprites && fps > STATS_MIN_FPS {
            self.most_fps = fps as u32;
            self.most_sprites = sprites;
        }
    }

    pub fn slowest_text(&self) -> String {
        format!(
            "Slowest: {} Sprites at {} FPS",
            self.slowest_sprites, self.slowest_fps
        )
    }

    pub fn most_text(&self) -> String {
        format!("Most: {} Sprites at {} FPS", self.most_sprites, self.most_fps)
    }
}
