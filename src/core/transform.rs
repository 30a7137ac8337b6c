use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotates `p` about a principal axis by `theta` radians. The axis component is untouched.
pub fn rotate_axis(p: Vec3, theta: f32, axis: Axis) -> Vec3 {
    let (s, c) = theta.sin_cos();
    match axis {
        Axis::X => Vec3::new(p.x, c * p.y + p.z * s, c * p.z - p.y * s),
        Axis::Y => Vec3::new(c * p.x - p.z * s, p.y, c * p.z + p.x * s),
        Axis::Z => Vec3::new(c * p.x + p.y * s, c * p.y - p.x * s, p.z),
    }
}

/// Per-frame placement of a mesh: a translation followed by three axis rotations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// Radians about X, Y and Z.
    pub rotation: Vec3,
    pub translation: Vec3,
}

impl Transform {
    pub fn new(rotation: Vec3, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn from_rotation(rotation: Vec3) -> Self {
        Self::new(rotation, Vec3::ZERO)
    }

    /// Translate, then rotate about X, Y, Z in turn.
    ///
    /// Translation comes first, so a translated mesh orbits the world origin
    /// instead of spinning in place.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        let p = p + self.translation;
        let p = rotate_axis(p, self.rotation.x, Axis::X);
        let p = rotate_axis(p, self.rotation.y, Axis::Y);
        rotate_axis(p, self.rotation.z, Axis::Z)
    }
}
