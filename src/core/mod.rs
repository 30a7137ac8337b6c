pub mod color;
pub mod mesh;
pub mod scene;
pub mod transform;

pub use color::Color;
pub use mesh::Mesh;
pub use scene::{Entity, Scene};
pub use transform::{rotate_axis, Axis, Transform};
