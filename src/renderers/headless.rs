use log::info;

use crate::core::Scene;
use crate::error::Result;
use crate::pipeline::{FrameBuffer, Pipeline};
use crate::renderers::{build_pipeline, FRAME_TIME};
use crate::AppConfig;

/// Renders a single frame off-screen and writes it to `config.output` as a PNG.
pub fn run(config: &AppConfig, mut scene: Scene) -> Result<()> {
    let (width, height) = config.render_size();
    let mut pipeline: Pipeline<FrameBuffer> = build_pipeline(config, width, height);

    for _ in 0..config.frames {
        scene.advance(FRAME_TIME.as_secs_f32());
    }
    let stats = pipeline.render_frame(&scene, None)?;
    info!("Rendered {width}x{height}: {stats}");

    pipeline.surface().save_png(&config.output)?;
    info!("Wrote {:?}", config.output);
    Ok(())
}
