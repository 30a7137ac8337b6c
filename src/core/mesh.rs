use std::path::Path;

use glam::Vec3;
use log::info;
use rand::Rng;

use crate::core::Color;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Mesh {
    pub points: Vec<Vec3>,          // Model-space positions
    pub cols: Vec<Color>,           // One color per point
    pub tris: Vec<[usize; 3]>,      // Indices into points/cols
}

impl Mesh {
    /// Builds a mesh, rejecting any triangle that points past the end of `points`.
    pub fn new(points: Vec<Vec3>, cols: Vec<Color>, tris: Vec<[usize; 3]>) -> Result<Self> {
        let mesh = Mesh { points, cols, tris };
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cols.len() != self.points.len() {
            return Err(Error::ColorCountMismatch {
                points: self.points.len(),
                cols: self.cols.len(),
            });
        }
        let len = self.points.len();
        for (tri, indices) in self.tris.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= len) {
                return Err(Error::IndexOutOfRange { tri, index, len });
            }
        }
        Ok(())
    }

    pub fn cube() -> Self {
        let points = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ];
        let cols = vec![
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::MAGENTA,
            Color::YELLOW,
            Color::CYAN,
            Color::RED,
            Color::GREEN,
        ];
        #[rustfmt::skip]
        let tris = vec![
            [1, 0, 2], [2, 3, 1],
            [0, 4, 6], [6, 2, 0],
            [4, 5, 7], [7, 6, 4],
            [5, 1, 3], [3, 7, 5],
            [2, 6, 7], [7, 3, 2],
            [1, 5, 4], [4, 0, 1],
        ];
        Mesh { points, cols, tris }
    }

    /// Two square pyramids glued at their bases.
    pub fn octahedron() -> Self {
        let points = vec![
            Vec3::new(-0.75, 0.0, -0.75),
            Vec3::new(-0.75, 0.0, 0.75),
            Vec3::new(0.75, 0.0, -0.75),
            Vec3::new(0.75, 0.0, 0.75),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        let cols = vec![
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::MAGENTA,
            Color::CYAN,
            Color::YELLOW,
        ];
        #[rustfmt::skip]
        let tris = vec![
            [0, 4, 1], [1, 4, 3], [3, 4, 2], [2, 4, 0],
            [5, 0, 1], [5, 1, 3], [5, 3, 2], [5, 2, 0],
        ];
        Mesh { points, cols, tris }
    }

    /// Loads every model in an OBJ file into a single mesh.
    ///
    /// Vertex colors are taken from the file when present, white otherwise.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut points = Vec::new();
        let mut cols = Vec::new();
        let mut tris = Vec::new();

        for model in models {
            let data = model.mesh;
            let base = points.len();

            points.extend(data.positions.chunks_exact(3).map(|p| Vec3::new(p[0], p[1], p[2])));

            let count = data.positions.len() / 3;
            if data.vertex_color.len() == data.positions.len() {
                cols.extend(data.vertex_color.chunks_exact(3).map(|c| {
                    Color::rgb(
                        (c[0].clamp(0.0, 1.0) * 255.0) as u8,
                        (c[1].clamp(0.0, 1.0) * 255.0) as u8,
                        (c[2].clamp(0.0, 1.0) * 255.0) as u8,
                    )
                }));
            } else {
                cols.extend(std::iter::repeat(Color::WHITE).take(count));
            }

            tris.extend(data.indices.chunks_exact(3).map(|f| {
                [
                    base + f[0] as usize,
                    base + f[1] as usize,
                    base + f[2] as usize,
                ]
            }));
        }

        info!(
            "Loaded {:?}: {} points, {} triangles",
            path,
            points.len(),
            tris.len()
        );
        Mesh::new(points, cols, tris)
    }

    pub fn randomize_colors<R: Rng>(&mut self, rng: &mut R) {
        for col in &mut self.cols {
            *col = Color::random(rng);
        }
    }
}
