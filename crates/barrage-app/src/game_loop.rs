//! Frame loop: steps the engine, logs its events and streams snapshots.
//!
//! Headless runs use a fixed `1/fps` step and finish as fast as the CPU
//! allows. Realtime runs measure the wall clock between frames and sleep
//! until the next frame is due.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info, warn};

use barrage_core::events::SimEvent;
use barrage_sim::cron::Flow;
use barrage_sim::engine::SimulationEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    pub fps: u32,
    /// Pace against the wall clock.
    pub realtime: bool,
    /// Hard cap on simulated frames.
    pub max_frames: Option<u64>,
    /// Write one snapshot every this many frames.
    pub snapshot_every: u64,
}

impl LoopConfig {
    /// Nominal duration of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopReport {
    pub frames: u64,
    pub sim_secs: f64,
    /// `true` if the timeline ended the run, `false` if `max_frames` did.
    pub stopped: bool,
}

/// Run `engine` until its timeline stops or `max_frames` is reached.
///
/// Snapshots go to `sink` as one JSON object per line.
pub fn run(
    engine: &mut SimulationEngine,
    config: &LoopConfig,
    mut sink: Option<&mut dyn Write>,
) -> anyhow::Result<LoopReport> {
    let frame_duration = config.frame_duration();
    let every = config.snapshot_every.max(1);
    let mut frames = 0u64;
    let mut stopped = false;
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    info!(fps = config.fps, realtime = config.realtime, "loop started");

    while config.max_frames.map_or(true, |max| frames < max) {
        let dt = if config.realtime {
            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f64();
            last_frame = now;
            dt
        } else {
            frame_duration.as_secs_f64()
        };

        let flow = engine
            .tick(dt)
            .with_context(|| format!("frame {frames} failed"))?;
        frames += 1;

        for event in engine.drain_events() {
            log_event(&event);
        }

        if let Some(out) = sink.as_deref_mut() {
            if frames % every == 0 || flow == Flow::Stop {
                serde_json::to_writer(&mut *out, &engine.snapshot())?;
                out.write_all(b"\n")?;
            }
        }

        if flow == Flow::Stop {
            stopped = true;
            break;
        }

        if config.realtime {
            next_frame_time += frame_duration;
            let now = Instant::now();
            if next_frame_time > now {
                std::thread::sleep(next_frame_time - now);
            } else if now - next_frame_time > frame_duration * 2 {
                // too far behind, skip ahead instead of bursting
                next_frame_time = now;
            }
        }
    }

    if let Some(out) = sink {
        out.flush()?;
    }

    let report = LoopReport {
        frames,
        sim_secs: engine.time().elapsed_secs,
        stopped,
    };
    info!(
        frames = report.frames,
        sim_secs = report.sim_secs,
        stopped = report.stopped,
        "loop finished"
    );
    Ok(report)
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::LabelChanged { at, text } => info!(at, text = %text, "stage"),
        SimEvent::PatternSpawned { at, entity, bullets } => {
            debug!(at, %entity, bullets, "pattern spawned")
        }
        SimEvent::PatternRejected { at, reason } => warn!(at, reason = %reason, "pattern rejected"),
        SimEvent::CountdownShown { at, text } => debug!(at, text = %text, "countdown"),
        SimEvent::CountdownFinished { at } => debug!(at, "countdown finished"),
        SimEvent::StatsShown {
            slowest_fps,
            slowest_sprites,
            most_fps,
            most_sprites,
            ..
        } => info!(
            slowest_fps,
            slowest_sprites, most_fps, most_sprites, "run statistics"
        ),
        SimEvent::Stopped { at } => info!(at, "stopped"),
    }
}
