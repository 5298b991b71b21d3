#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Risk Rush experience.

use std::{
    path::PathBuf,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::Parser;
use risk_rush_cli::{
    config::{load_or_default, ConfigSource},
    scene, Control, Supervisor,
};
use risk_rush_rendering::{FrameOutcome, Presentation, RenderingBackend, Scene};
use risk_rush_rendering_macroquad::MacroquadBackend;

const WINDOW_TITLE: &str = "Risk Rush";

/// Command-line arguments accepted by the Risk Rush binary.
#[derive(Debug, Parser)]
#[command(name = "risk-rush", about = "Dodge everyday risks and collect insurance policies.")]
struct CliArgs {
    /// Seed for every random stream; derived from the system clock when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding any subset of the built-in tuning.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Disables vertical sync.
    #[arg(long)]
    no_vsync: bool,
    /// Logs a frame-rate line once per second.
    #[arg(long)]
    show_fps: bool,
    /// Frame-rate cap used for frame pacing; defaults to the configured target.
    #[arg(long, value_name = "FPS", value_parser = clap::value_parser!(u32).range(1..))]
    fps_cap: Option<u32>,
    /// Session length in seconds.
    #[arg(long, value_name = "SECONDS")]
    duration: Option<f32>,
}

/// Entry point for the Risk Rush command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let (mut config, source) = load_or_default(args.config.as_deref());
    if let Some(duration) = args.duration {
        config.session.duration = duration;
    }
    let config = config.normalized();
    let seed = args.seed.unwrap_or_else(clock_seed);
    match &source {
        ConfigSource::Defaults => log::info!("using built-in tuning, seed {seed}"),
        ConfigSource::File(path) => {
            log::info!("using tuning from {}, seed {seed}", path.display());
        }
    }

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps)
        .with_frame_clamp(Duration::from_secs_f32(config.screen.max_frame_dt))
        .with_fps_cap(Some(args.fps_cap.unwrap_or(config.screen.target_fps)));
    let presentation = Presentation::new(
        WINDOW_TITLE,
        Scene::new(config.screen.width, config.screen.height),
    );

    let mut supervisor = Supervisor::new(config, seed);
    backend
        .run(presentation, move |dt, input, scene| {
            let simulation_start = Instant::now();
            if supervisor.frame(dt, input) == Control::Quit {
                return FrameOutcome::exit();
            }
            let simulation = simulation_start.elapsed();

            let scene_start = Instant::now();
            scene::populate(scene, supervisor.session());
            FrameOutcome::proceed(simulation, scene_start.elapsed())
        })
        .context("rendering backend failed")?;

    log::info!("shutting down");
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos() as u64
}
