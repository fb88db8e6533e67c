use anyhow::{Context, Result};
use clap::Parser;
use contagion_lib::app::Runner;
use contagion_lib::model::config::AppConfig;
use contagion_lib::model::history::HistoryLogger;
use contagion_lib::model::world::World;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path; defaults are used if it does not exist
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Seed overriding the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Wall-clock length of one frame in ms; defaults to 1000 / target_fps
    #[arg(long)]
    frame_ms: Option<f64>,

    /// Log statistics every N frames (0 disables)
    #[arg(long, default_value_t = 600)]
    report_every: u64,

    /// Append events as JSON lines to this file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Print the final world snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn load_config(path: &PathBuf) -> Result<AppConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(AppConfig::from_toml(&content)?)
}

fn main() -> Result<()> {
    contagion_core::init_logging();

    let args = Args::parse();
    let mut config = load_config(&args.config)?;
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }

    let mut world = World::new(config)?;
    if let Some(path) = &args.events {
        world.set_logger(HistoryLogger::new_at(path)?);
    }
    println!("Config fingerprint: {}", world.config.fingerprint());

    let mut runner = Runner::from_world(world);
    let frame_ms = args.frame_ms.unwrap_or_else(|| runner.frame_interval_ms());
    runner.start();
    for frame in 1..=args.ticks {
        runner.frame(frame_ms)?;
        let stats = &runner.world.pop_stats;
        if args.report_every > 0 && frame % args.report_every == 0 {
            tracing::info!(
                tick = runner.world.tick,
                healthy = stats.healthy,
                infected = stats.infected,
                recovered = stats.recovered,
                deceased = stats.deceased,
                contagious = stats.contagious,
                "Progress"
            );
        }
        if runner.world.agents.is_empty() {
            break;
        }
    }
    runner.stop();
    runner.world.logger.flush()?;

    println!("{}", runner.world.observer.generate_macro_report());
    println!("{}", serde_json::to_string_pretty(&runner.world.pop_stats)?);
    println!("{}", serde_json::to_string_pretty(&runner.metrics.summary())?);
    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&runner.world.create_snapshot())?);
    }
    Ok(())
}
