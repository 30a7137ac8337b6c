use glam::Vec3;

use crate::core::Color;

/// The single light. Deliberately left un-normalized.
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(0.1, 0.4, 0.5);

/// Where a triangle's colors come from before lighting is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeMode {
    /// Every triangle starts from the same base color.
    Flat(Color),
    /// Each corner starts from its mesh vertex color.
    VertexColors,
}

impl Default for ShadeMode {
    fn default() -> Self {
        ShadeMode::Flat(Color::WHITE)
    }
}

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Unit normal of a camera-space triangle after winding normalization.
///
/// If the triangle winds clockwise when viewed down -z, its first two
/// vertices are swapped, so the returned normal always has `z >= 0`.
/// A degenerate triangle yields the zero vector.
pub fn face_normal(verts: &[Vec3; 3]) -> Vec3 {
    let [mut v0, mut v1, v2] = *verts;
    if (v1 - v0).cross(v2 - v0).z < 0.0 {
        std::mem::swap(&mut v0, &mut v1);
    }
    let v = v1 - v0;
    let w = v2 - v0;
    v.cross(w).normalize_or_zero()
}

/// Logistic response of a face to [`LIGHT_DIRECTION`], in (0, 1).
pub fn light_intensity(normal: Vec3) -> f32 {
    sigmoid(normal.dot(LIGHT_DIRECTION))
}

/// Colors for the three corners of a camera-space triangle.
pub fn shade(mode: ShadeMode, verts: &[Vec3; 3], vertex_cols: &[Color; 3]) -> [Color; 3] {
    let intensity = light_intensity(face_normal(verts));
    match mode {
        ShadeMode::Flat(base) => [base.scale(intensity); 3],
        ShadeMode::VertexColors => vertex_cols.map(|c| c.scale(intensity)),
    }
}
