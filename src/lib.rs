use std::{
    fmt::Display,
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;

pub mod core;
pub mod error;
pub mod pipeline;
pub mod renderers;

pub use self::core::{Color, Entity, Mesh, Scene};
pub use error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTarget {
    Terminal,
    Window,
    Image,
}

/// Frame timing, shown in the window title.
pub struct Metrics {
    pub last_frame: Instant,
    pub frame_time: Duration,
    pub ticks: u64,
    pub current_fps: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// How many frames pass between title refreshes.
    pub const TITLE_INTERVAL: u64 = 100;

    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frame_time: Duration::from_secs_f32(1.0 / 60.0),
            ticks: 0,
            current_fps: 0.0,
        }
    }

    pub fn update(&mut self, frame_delta: Duration) {
        self.ticks += 1;
        self.frame_time = frame_delta;
        let secs = frame_delta.as_secs_f32();
        self.current_fps = if secs > 0.0 { 1.0 / secs } else { 0.0 };
        self.last_frame = Instant::now();
    }

    pub fn title_due(&self) -> bool {
        self.ticks % Self::TITLE_INTERVAL == 0
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FPS: {:.2} | Delta Time: {:.2}ms",
            self.current_fps,
            self.frame_time.as_secs_f32() * 1000.0,
        )
    }
}

/// Everything the binary needs to know before it opens a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub target: DisplayTarget,
    pub width: usize,
    pub height: usize,
    /// Render resolution divisor
    pub scale: usize,
    pub fov: f32,
    pub focal_length: f32,
    pub model: Option<PathBuf>,
    pub vertex_colors: bool,
    pub output: PathBuf,
    pub frames: u32,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target: DisplayTarget::Window,
            width: 1280,
            height: 720,
            scale: 1,
            fov: 60.0,
            focal_length: 10.0,
            model: None,
            vertex_colors: false,
            output: PathBuf::from("frame.png"),
            frames: 0,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Size of the pixel grid actually rendered.
    pub fn render_size(&self) -> (usize, usize) {
        (self.width / self.scale, self.height / self.scale)
    }
}

pub fn create_clap_command() -> Command {
    Command::new("flat_rasterizer")
        .about("Flat-shaded software rasterizer")
        .version("0.1")
        .subcommand(
            Command::new("render")
                .about("Render the demo scene to a window, the terminal, or a PNG")
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .value_name("MODE")
                        .help("Where to draw ('window', 'terminal', 'image', or 'w', 't', 'i')")
                        .default_value("window")
                        .value_parser(["window", "terminal", "image", "w", "t", "i"]),
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .help("Window width in pixels")
                        .default_value("1280")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("height")
                        .long("height")
                        .help("Window height in pixels")
                        .default_value("720")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("scale")
                        .long("scale")
                        .help("Divide the render resolution by this factor")
                        .default_value("1")
                        .value_parser(["1", "2", "4", "8"]),
                )
                .arg(
                    Arg::new("fov")
                        .long("fov")
                        .help("Field of view in degrees")
                        .default_value("60")
                        .value_parser(value_parser!(f32)),
                )
                .arg(
                    Arg::new("focal-length")
                        .long("focal-length")
                        .help("Distance of the viewer from the origin along +z")
                        .default_value("10")
                        .value_parser(value_parser!(f32)),
                )
                .arg(
                    Arg::new("model")
                        .short('f')
                        .long("model")
                        .value_name("FILE")
                        .help("An .obj model to draw instead of the cube")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("vertex-colors")
                        .long("vertex-colors")
                        .help("Shade with the mesh's vertex colors instead of flat white")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("PNG written in image mode")
                        .default_value("frame.png")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("frames")
                        .long("frames")
                        .help("Image mode: animation frames to advance before capturing")
                        .default_value("0")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("log-level")
                        .long("log-level")
                        .default_value("info")
                        .value_parser(["off", "error", "warn", "info", "debug", "trace"]),
                ),
        )
}

pub fn handle_clap_matches(matches: &clap::ArgMatches) -> AppConfig {
    let Some(("render", sub)) = matches.subcommand() else {
        // Default behavior when no subcommand is provided
        return AppConfig::default();
    };
    let defaults = AppConfig::default();

    let target = match sub.get_one::<String>("mode").map(String::as_str) {
        Some("terminal" | "t") => DisplayTarget::Terminal,
        Some("image" | "i") => DisplayTarget::Image,
        _ => DisplayTarget::Window,
    };

    AppConfig {
        target,
        width: sub.get_one::<usize>("width").copied().unwrap_or(defaults.width),
        height: sub.get_one::<usize>("height").copied().unwrap_or(defaults.height),
        scale: sub
            .get_one::<String>("scale")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.scale),
        fov: sub.get_one::<f32>("fov").copied().unwrap_or(defaults.fov),
        focal_length: sub
            .get_one::<f32>("focal-length")
            .copied()
            .unwrap_or(defaults.focal_length),
        model: sub.get_one::<PathBuf>("model").cloned(),
        vertex_colors: sub.get_flag("vertex-colors"),
        output: sub.get_one::<PathBuf>("output").cloned().unwrap_or(defaults.output),
        frames: sub.get_one::<u32>("frames").copied().unwrap_or(defaults.frames),
        log_level: sub
            .get_one::<String>("log-level")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.log_level),
    }
}
