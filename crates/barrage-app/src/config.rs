//! Command-line arguments and configuration layering.
//!
//! Precedence, lowest first: `SimConfig::default()`, the `--config` JSON
//! file, then individual flags.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use barrage_sim::engine::SimConfig;
use barrage_sim::scenario::Scenario;

use crate::game_loop::LoopConfig;

#[derive(Debug, Parser)]
#[command(name = "barrage", about = "Headless bullet-pattern simulation")]
pub struct Args {
    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames per second of the fixed step
    #[arg(long)]
    pub fps: Option<u32>,

    /// Screen width in pixels
    #[arg(long)]
    pub width: Option<f32>,

    /// Screen height in pixels
    #[arg(long)]
    pub height: Option<f32>,

    /// Stop after this many frames even if the timeline has not ended
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Pace frames against the wall clock instead of stepping as fast as possible
    #[arg(long)]
    pub realtime: bool,

    /// JSON file with a `SimConfig`; missing fields keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON scenario to run instead of the bundled demo
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Print the scenario as JSON and exit
    #[arg(long)]
    pub dump_scenario: bool,

    /// Write frame snapshots as JSON lines to this file
    #[arg(long)]
    pub snapshots: Option<PathBuf>,

    /// Write every n-th frame's snapshot
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub snapshot_every: u64,
}

impl Args {
    /// Resolve the simulation config from defaults, file and flags.
    pub fn sim_config(&self) -> anyhow::Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SimConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(width) = self.width {
            config.screen_width = width;
        }
        if let Some(height) = self.height {
            config.screen_height = height;
        }
        anyhow::ensure!(config.fps > 0, "fps must be positive");
        anyhow::ensure!(
            config.screen_width > 0.0 && config.screen_height > 0.0,
            "screen size must be positive, got {}x{}",
            config.screen_width,
            config.screen_height
        );
        Ok(config)
    }

    /// Load `--scenario`, or build the demo for `config`'s screen.
    pub fn scenario(&self, config: &SimConfig) -> anyhow::Result<Scenario> {
        match &self.scenario {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading scenario {}", path.display()))?;
                Scenario::from_json(&text)
                    .with_context(|| format!("loading scenario {}", path.display()))
            }
            None => Ok(Scenario::demo(&config.screen(), config.start_delay)?),
        }
    }

    pub fn loop_config(&self, config: &SimConfig) -> LoopConfig {
        LoopConfig {
            fps: config.fps,
            realtime: self.realtime,
            max_frames: self.max_frames,
            snapshot_every: self.snapshot_every,
        }
    }
}
