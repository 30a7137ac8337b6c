use glam::Vec3;
use log::warn;

use super::Viewport;

/// Perspective parameters plus the multipliers derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Field of view in degrees
    pub fov: f32,
    /// Distance along +z of the viewer from the origin
    pub focal_length: f32,
    /// height / width of the viewport
    pub aspect_ratio: f32,
    pub x_multiplier: f32,
    pub y_multiplier: f32,
}

impl Projection {
    pub fn new(fov: f32, focal_length: f32, viewport: Viewport) -> Self {
        let mut out = Self {
            fov,
            focal_length,
            aspect_ratio: 1.0,
            x_multiplier: 1.0,
            y_multiplier: 1.0,
        };
        out.set_viewport(viewport);
        out.update_multipliers();
        out
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.update_multipliers();
    }

    /// Picks up a new aspect ratio. A zero-area viewport keeps the previous one.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            warn!(
                "Ignoring aspect ratio of empty viewport {}x{}",
                viewport.width, viewport.height
            );
            return;
        }
        self.aspect_ratio = viewport.height as f32 / viewport.width as f32;
        self.update_multipliers();
    }

    fn update_multipliers(&mut self) {
        let scale = 1.0 / (self.fov.to_radians() * 0.5).tan();
        self.x_multiplier = self.aspect_ratio * scale;
        self.y_multiplier = scale;
    }

    /// Perspective divide. The returned z is `-p.z`, so smaller means nearer.
    ///
    /// Returns `None` when the divisor is zero (a point sitting at the focal plane).
    pub fn project(&self, p: Vec3) -> Option<Vec3> {
        let z = if p.z == 0.0 { 1.0 } else { p.z };
        let divisor = z - self.focal_length;
        if divisor == 0.0 {
            return None;
        }
        Some(Vec3::new(
            self.x_multiplier * p.x / divisor,
            self.y_multiplier * p.y / divisor,
            -p.z,
        ))
    }
}
