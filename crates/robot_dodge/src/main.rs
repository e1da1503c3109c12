//! Headless Robot Dodge runner
//!
//! Usage: `robot_dodge [CONFIG]`. Without an argument the shipped
//! `config/robot_dodge.toml` is used, or built-in defaults if it is absent.

use std::path::{Path, PathBuf};

use puddle_engine::assets::ObjLoader;
use puddle_engine::config::Config;
use puddle_engine::foundation::logging;
use puddle_engine::render::DrawRecorder;
use puddle_engine::Engine;
use robot_dodge::{Autopilot, GameConfig, RobotDodge};

const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/robot_dodge.toml");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting Robot Dodge");

    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let config = if config_path == Path::new(DEFAULT_CONFIG) {
        GameConfig::load_or_default(&config_path)?
    } else {
        GameConfig::load_from_file(&config_path)?
    };

    let asset_root = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&config.assets.root);
    let mut loader = ObjLoader::new(asset_root);

    let seed = config.gameplay.seed.unwrap_or_default();
    let mut engine = Engine::new(config.engine.clone())?;
    let mut game = match RobotDodge::new(config, &mut loader) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to start game: {}", e);
            return Err(e.into());
        }
    };

    let mut autopilot = Autopilot::new(seed, 45, 20);
    let mut target = DrawRecorder::default();
    let stats = engine.run(&mut game, &mut autopilot, &mut target)?;

    let hud = game.hud();
    log::info!(
        "Run finished: {} frames, {:.1}s simulated, {} draw submissions",
        stats.frames,
        stats.simulated_seconds,
        target.total_submissions()
    );
    log::info!(
        "Score {}, lives {}/{}{}",
        hud.score,
        hud.lives,
        hud.max_lives,
        if hud.game_over { " - Game Over -" } else { "" }
    );
    Ok(())
}
