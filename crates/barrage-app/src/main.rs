use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use barrage_app::config::Args;
use barrage_app::game_loop;
use barrage_sim::engine::SimulationEngine;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("barrage=info")),
        )
        .init();

    let args = Args::parse();
    let config = args.sim_config()?;
    let scenario = args.scenario(&config)?;

    if args.dump_scenario {
        println!("{}", scenario.to_json()?);
        return Ok(());
    }

    info!(
        seed = config.seed,
        entries = scenario.entries.len(),
        end = scenario.end_time(),
        "scenario loaded"
    );

    let loop_config = args.loop_config(&config);
    let mut engine = SimulationEngine::new(config, scenario)?;

    let mut writer = match &args.snapshots {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => None,
    };
    let sink = writer.as_mut().map(|w| w as &mut dyn Write);

    let report = game_loop::run(&mut engine, &loop_config, sink)?;
    let stats = engine.stats();
    info!(
        frames = report.frames,
        sim_secs = report.sim_secs,
        most_sprites = stats.most_sprites,
        slowest_fps = stats.slowest_fps,
        "done"
    );
    Ok(())
}
