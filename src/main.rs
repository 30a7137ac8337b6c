use std::fs::OpenOptions;

use anyhow::Context;
use flat_rasterizer::{
    create_clap_command, handle_clap_matches, renderers, AppConfig, DisplayTarget, Mesh, Scene,
};
use log::info;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

const LOG_FILE: &str = "flat_rasterizer.log";

fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    match config.target {
        // The terminal is the framebuffer there, so logs go to a file.
        DisplayTarget::Terminal => {
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(LOG_FILE)
                .with_context(|| format!("opening {LOG_FILE}"))?;
            WriteLogger::init(config.log_level, Config::default(), log_file)?;
        }
        DisplayTarget::Window | DisplayTarget::Image => {
            TermLogger::init(
                config.log_level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )?;
        }
    }
    Ok(())
}

fn build_scene(config: &AppConfig) -> anyhow::Result<Scene> {
    match &config.model {
        Some(path) => {
            let mesh = Mesh::from_obj(path).with_context(|| format!("loading model {path:?}"))?;
            Ok(Scene::demo_with(mesh))
        }
        None => Ok(Scene::demo()),
    }
}

fn main() -> anyhow::Result<()> {
    let matches = create_clap_command().get_matches();
    let config = handle_clap_matches(&matches);
    init_logging(&config)?;

    info!("Starting with {config:?}");
    let scene = build_scene(&config)?;

    match config.target {
        DisplayTarget::Window => renderers::window::run(&config, scene)?,
        DisplayTarget::Terminal => renderers::terminal::run(&config, scene)?,
        DisplayTarget::Image => renderers::headless::run(&config, scene)?,
    }

    info!("Shutting down");
    Ok(())
}
