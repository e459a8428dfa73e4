mod app;
mod config;
mod input;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use snake_engine::config::load_or_default;
use snake_engine::game::{GameEngine, GameSettings, SessionRng};
use snake_engine::{log, logger};

use app::SnakeApp;
use config::GameConfig;

#[derive(Parser)]
#[command(name = "snake_desktop_client")]
struct Args {
    /// Path to the YAML game config. A missing file uses defaults.
    #[arg(long, default_value = "snake_config.yaml")]
    config: PathBuf,

    /// Overrides the RNG seed from the config.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let game_config: GameConfig = load_or_default(&args.config)?;
    let settings = GameSettings::from(&game_config);

    let rng = match args.seed.or(game_config.seed) {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Starting {}x{} game with seed {}",
        game_config.field_width,
        game_config.field_height,
        rng.seed()
    );

    let engine = GameEngine::new(settings, rng)?;

    let window_width = (game_config.field_width * game_config.pixels_per_cell) as f32 + 20.0;
    let window_height = (game_config.field_height * game_config.pixels_per_cell) as f32 + 80.0;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window_width, window_height])
            .with_title("Snake"),
        ..Default::default()
    };

    eframe::run_native(
        "Snake",
        options,
        Box::new(|_cc| Ok(Box::new(SnakeApp::new(engine, game_config.pixels_per_cell)))),
    )?;

    Ok(())
}
