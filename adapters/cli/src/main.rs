#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Lane Defence session.

mod level_file;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lane_defence_progress::{HttpSink, NullSink, ProgressSink};
use lane_defence_system_difficulty::{curve_named, HealthCurve, StandardCurve};
use lane_defence_world::{apply, query, World};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

/// Command-line options for the Lane Defence session runner.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", about = "Headless Lane Defence session runner")]
struct Options {
    /// Level layout TOML file; the bundled level is used when omitted.
    #[arg(long)]
    level: Option<PathBuf>,

    /// Player name reported to the progress service.
    #[arg(long, default_value = "guest")]
    username: String,

    /// Base URL of the progress service; reports are skipped when omitted.
    #[arg(long)]
    progress_url: Option<String>,

    /// Difficulty curve to scale enemy health with.
    #[arg(long, default_value = "standard")]
    difficulty: String,

    /// Simulated host frame rate.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Maximum number of frames to simulate.
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Build towers automatically on free tiles while coins last.
    #[arg(long)]
    autoplay: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let options = Options::parse();

    let mut world = World::new();
    println!("{}", query::welcome_banner(&world));

    if let Some(path) = &options.level {
        let level = level_file::load(path)?;
        apply(
            &mut world,
            lane_defence_core::Command::ConfigureLevel { level },
            &mut Vec::new(),
        );
    }

    let sink: Box<dyn ProgressSink> = match &options.progress_url {
        Some(url) => Box::new(HttpSink::new(url)?),
        None => Box::new(NullSink),
    };
    let curve: Box<dyn HealthCurve> = match curve_named(&options.difficulty) {
        Some(curve) => curve,
        None => {
            warn!(
                requested = options.difficulty,
                "unknown difficulty curve, using the standard curve"
            );
            Box::new(StandardCurve)
        }
    };

    let mut session = Session::new(world, curve, sink, options.username, options.autoplay);
    let report = session.run(options.ticks, options.fps);

    println!(
        "wave {wave} | lives {lives} | coins {coins} | kills {kills}{ended}",
        wave = report.wave,
        lives = report.lives,
        coins = report.coins,
        kills = report.enemies_killed,
        ended = if report.game_over { " | game over" } else { "" },
    );
    Ok(())
}
