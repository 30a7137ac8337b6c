use glam::{IVec2, Vec2};

/// Pixel dimensions of the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// A viewport with no pixels renders nothing.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Maps normalized [-1, 1] coordinates (y up) to pixel coordinates (y down).
    ///
    /// Anything outside the viewport is pinned to the nearest edge pixel.
    pub fn to_screen(&self, p: Vec2) -> IVec2 {
        let w = self.width as i32;
        let h = self.height as i32;

        let x = ((p.x + 1.0) / 2.0 * self.width as f32) as i32;
        let y = h.saturating_sub(((p.y + 1.0) / 2.0 * self.height as f32) as i32);

        IVec2::new(x.clamp(0, (w - 1).max(0)), y.clamp(0, (h - 1).max(0)))
    }
}
