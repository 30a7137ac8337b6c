use std::time::Duration;

use crate::pipeline::{Buffer, Pipeline, ShadeMode};
use crate::AppConfig;

pub mod headless;
pub mod terminal;
pub mod window;

/// Target pacing for the interactive loops (~60 FPS).
pub const FRAME_TIME: Duration = Duration::from_millis(16);

/// A pipeline sized and configured from the command line.
pub fn build_pipeline<B: Buffer>(config: &AppConfig, width: usize, height: usize) -> Pipeline<B> {
    let shade_mode = if config.vertex_colors {
        ShadeMode::VertexColors
    } else {
        ShadeMode::default()
    };
    Pipeline::new(width, height, config.fov, config.focal_length).with_shade_mode(shade_mode)
}
