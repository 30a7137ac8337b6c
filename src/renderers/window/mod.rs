use std::time::Instant;

use log::info;
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use crate::core::Scene;
use crate::error::Result;
use crate::pipeline::{FrameBuffer, Pipeline};
use crate::renderers::build_pipeline;
use crate::AppConfig;

fn minifb_scale(scale: usize) -> Scale {
    match scale {
        2 => Scale::X2,
        4 => Scale::X4,
        8 => Scale::X8,
        _ => Scale::X1,
    }
}

/// Opens a resizable window and animates `scene` until Escape or close.
///
/// Space recolors the first mesh (visible with `--vertex-colors`).
pub fn run(config: &AppConfig, mut scene: Scene) -> Result<()> {
    let (width, height) = config.render_size();
    let scale = config.scale.max(1);

    info!("Creating {width}x{height} window (scale {scale})");
    let mut window = Window::new(
        "flat_rasterizer",
        width,
        height,
        WindowOptions {
            resize: true,
            scale: minifb_scale(scale),
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    let mut pipeline: Pipeline<FrameBuffer> = build_pipeline(config, width, height);
    let mut rng = rand::thread_rng();
    let mut last_frame = Instant::now();

    while window.is_open() {
        if window.is_key_down(Key::Escape) {
            info!("Escape pressed, exiting");
            break;
        }
        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            if let Some(entity) = scene.primary_mut() {
                entity.mesh.randomize_colors(&mut rng);
                info!("Recolored {entity}");
            }
        }

        let (win_w, win_h) = window.get_size();
        pipeline.resize(win_w / scale, win_h / scale);

        let now = Instant::now();
        let delta = now - last_frame;
        last_frame = now;
        if pipeline.metrics().ticks > 0 {
            scene.advance(delta.as_secs_f32());
        }

        if pipeline.viewport().is_empty() {
            // Nothing to draw, but the window still needs its events pumped.
            window.update();
        } else {
            pipeline.render_frame(&scene, Some(&mut window))?;
        }

        pipeline.update_metrics(delta);
        if pipeline.metrics().title_due() {
            window.set_title(&pipeline.metrics().to_string());
        }
    }

    info!("Window closed");
    Ok(())
}
