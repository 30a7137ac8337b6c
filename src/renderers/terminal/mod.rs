use std::io::{self, stdout};
use std::panic;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    style::SetBackgroundColor,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};

use crate::core::{Color, Scene};
use crate::error::Result;
use crate::pipeline::{Pipeline, TermBuffer};
use crate::renderers::{build_pipeline, FRAME_TIME};
use crate::AppConfig;

/// Raw mode + alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        // Restore the terminal before the panic message is printed
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = cleanup_terminal();
            eprintln!("\n=== Panic Occurred ===");
            original_hook(panic_info);
            error!("Panic occurred: {:?}", panic_info);
        }));

        enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            Hide,
            SetBackgroundColor(Color::BLACK.to_crossterm_color()),
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = cleanup_terminal();
    }
}

fn cleanup_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), Show, LeaveAlternateScreen)?;
    Ok(())
}

/// Draws `scene` into the terminal, one character cell per pixel, until `q` or Escape.
pub fn run(config: &AppConfig, mut scene: Scene) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let (tw, th) = terminal::size()?;
    info!("Terminal renderer at {tw}x{th}");
    let mut pipeline: Pipeline<TermBuffer> = build_pipeline(config, tw as usize, th as usize);
    let mut rng = rand::thread_rng();
    let mut last_frame = Instant::now();

    'mainloop: loop {
        if event::poll(Duration::from_millis(1))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break 'mainloop,
                    KeyCode::Char(' ') => {
                        if let Some(entity) = scene.primary_mut() {
                            entity.mesh.randomize_colors(&mut rng);
                            info!("Recolored {entity}");
                        }
                    }
                    _ => {}
                },
                Event::Resize(w, h) => pipeline.resize(w as usize, h as usize),
                _ => {}
            }
        }

        let now = Instant::now();
        let delta = now - last_frame;
        if delta >= FRAME_TIME {
            scene.advance(delta.as_secs_f32());
            pipeline.render_frame(&scene, None)?;
            pipeline.update_metrics(delta);
            last_frame = now;
        }
    }

    info!("Leaving terminal renderer");
    Ok(())
}
