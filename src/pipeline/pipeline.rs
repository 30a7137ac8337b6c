use std::fmt::{self, Display, Formatter};
use std::ops::AddAssign;

use glam::Vec3;
use log::{debug, info, trace};
use minifb::Window;

use crate::core::{Color, Mesh, Scene, Transform};
use crate::error::Result;
use crate::Metrics;

use super::{rasterizer, shading, Buffer, DepthBuffer, Projection, ShadeMode, Viewport};

/// Counters for one frame (or one mesh within it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub drawn: usize,
    pub degenerate: usize,
    pub unprojectable: usize,
    pub pixels: usize,
}

impl AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.triangles += rhs.triangles;
        self.drawn += rhs.drawn;
        self.degenerate += rhs.degenerate;
        self.unprojectable += rhs.unprojectable;
        self.pixels += rhs.pixels;
    }
}

impl Display for FrameStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tris ({} drawn, {} degenerate, {} unprojectable), {} pixels",
            self.triangles, self.drawn, self.degenerate, self.unprojectable, self.pixels
        )
    }
}

/// The render context: surface, depth buffer and projection state for one target.
///
/// Each frame:
/// 1. Clear the surface and reset the depth buffer
/// 2. For every entity, in order, transform → project → map to pixels → shade → rasterize
/// 3. Present the surface
pub struct Pipeline<B: Buffer> {
    viewport: Viewport,
    surface: B,
    depth: DepthBuffer,
    pub projection: Projection,
    pub shade_mode: ShadeMode,
    pub clear_color: Color,
    metrics: Metrics,
}

impl<B: Buffer> Pipeline<B> {
    pub fn new(width: usize, height: usize, fov: f32, focal_length: f32) -> Self {
        let viewport = Viewport::new(width, height);
        Self {
            viewport,
            surface: B::new(width, height),
            depth: DepthBuffer::new(width, height),
            projection: Projection::new(fov, focal_length, viewport),
            shade_mode: ShadeMode::default(),
            clear_color: Color::BLACK,
            metrics: Metrics::new(),
        }
    }

    pub fn with_shade_mode(mut self, shade_mode: ShadeMode) -> Self {
        self.shade_mode = shade_mode;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> &B {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut B {
        &mut self.surface
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn update_metrics(&mut self, frame_delta: std::time::Duration) {
        self.metrics.update(frame_delta);
    }

    /// Reallocates the surface and depth buffer and picks up the new aspect ratio.
    /// Must not be called mid-frame.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.viewport == Viewport::new(width, height) {
            return;
        }
        info!(
            "Resizing render target {}x{} -> {}x{}",
            self.viewport.width, self.viewport.height, width, height
        );
        self.viewport = Viewport::new(width, height);
        self.surface.resize(width, height);
        self.depth.resize(width, height);
        self.projection.set_viewport(self.viewport);
    }

    /// Renders one frame of `scene` and presents it, to `window` if given.
    ///
    /// An empty viewport renders nothing and presents nothing.
    pub fn render_frame(&mut self, scene: &Scene, window: Option<&mut Window>) -> Result<FrameStats> {
        if self.viewport.is_empty() {
            debug!("Skipping frame for empty viewport");
            return Ok(FrameStats::default());
        }

        self.surface.clear(self.clear_color);
        self.depth.reset();

        let mut stats = FrameStats::default();
        for entity in &scene.entities {
            stats += self.render_mesh(&entity.mesh, &entity.transform);
        }
        debug!("Frame: {stats}");

        match window {
            Some(window) => self.surface.present_window(window)?,
            None => self.surface.present()?,
        }
        Ok(stats)
    }

    /// Draws every triangle of `mesh` under `transform` into the current frame.
    ///
    /// Does not clear anything; call between the frame's reset and present.
    pub fn render_mesh(&mut self, mesh: &Mesh, transform: &Transform) -> FrameStats {
        let mut stats = FrameStats::default();
        if self.viewport.is_empty() {
            return stats;
        }

        for (i, tri) in mesh.tris.iter().enumerate() {
            stats.triangles += 1;

            let (Some(points), Some(cols)) = (gather(&mesh.points, tri), gather(&mesh.cols, tri))
            else {
                trace!("Skipping triangle {i}: index out of range");
                continue;
            };

            let camera: [Vec3; 3] = points.map(|p| transform.apply(p));

            let [Some(p0), Some(p1), Some(p2)] = camera.map(|p| self.projection.project(p)) else {
                trace!("Skipping triangle {i}: vertex on the focal plane");
                stats.unprojectable += 1;
                continue;
            };
            let projected = [p0, p1, p2];

            let screen = projected.map(|p| self.viewport.to_screen(p.truncate()));
            let depths = projected.map(|p| p.z);
            let colors = shading::shade(self.shade_mode, &camera, &cols);

            match rasterizer::draw_triangle(&mut self.surface, &mut self.depth, screen, depths, colors) {
                Some(pixels) => {
                    stats.drawn += 1;
                    stats.pixels += pixels;
                }
                None => stats.degenerate += 1,
            }
        }
        stats
    }
}

fn gather<T: Copy>(items: &[T], tri: &[usize; 3]) -> Option<[T; 3]> {
    Some([*items.get(tri[0])?, *items.get(tri[1])?, *items.get(tri[2])?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Entity;
    use crate::pipeline::FrameBuffer;

    fn single_tri(points: [Vec3; 3]) -> Mesh {
        Mesh::new(points.to_vec(), vec![Color::WHITE; 3], vec![[0, 1, 2]]).unwrap()
    }

    #[test]
    fn stats_accumulate() {
        let mut a = FrameStats {
            triangles: 1,
            drawn: 1,
            pixels: 10,
            ..Default::default()
        };
        a += FrameStats {
            triangles: 2,
            degenerate: 1,
            unprojectable: 1,
            ..Default::default()
        };
        assert_eq!(a.triangles, 3);
        assert_eq!((a.drawn, a.degenerate, a.unprojectable, a.pixels), (1, 1, 1, 10));
    }

    #[test]
    fn focal_plane_triangle_is_skipped() {
        let mut pipeline = Pipeline::<FrameBuffer>::new(32, 32, 90.0, 10.0);
        let mesh = single_tri([
            Vec3::new(-1.0, -1.0, 10.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        ]);
        let stats = pipeline.render_mesh(&mesh, &Transform::default());
        assert_eq!(stats.unprojectable, 1);
        assert_eq!(stats.pixels, 0);
    }

    #[test]
    fn edge_on_triangle_counts_as_degenerate() {
        let mut pipeline = Pipeline::<FrameBuffer>::new(32, 32, 90.0, 10.0);
        // All three points project onto the same vertical line.
        let mesh = single_tri([
            Vec3::new(0.0, -1.0, 5.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        ]);
        let stats = pipeline.render_mesh(&mesh, &Transform::default());
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.drawn, 0);
    }

    #[test]
    fn empty_viewport_is_a_no_op_frame() {
        let mut pipeline = Pipeline::<FrameBuffer>::new(0, 0, 60.0, 10.0);
        let stats = pipeline.render_frame(&Scene::demo(), None).unwrap();
        assert_eq!(stats, FrameStats::default());

        pipeline.resize(40, 0);
        let stats = pipeline.render_frame(&Scene::demo(), None).unwrap();
        assert_eq!(stats, FrameStats::default());
        assert!(pipeline.projection.x_multiplier.is_finite());
    }

    #[test]
    fn resize_reallocates_and_updates_aspect() {
        let mut pipeline = Pipeline::<FrameBuffer>::new(100, 100, 90.0, 10.0);
        pipeline.resize(200, 50);
        assert_eq!(pipeline.viewport(), Viewport::new(200, 50));
        assert_eq!(pipeline.surface().data.len(), 200 * 50);
        assert_eq!((pipeline.depth().width(), pipeline.depth().height()), (200, 50));
        assert!((pipeline.projection.aspect_ratio - 0.25).abs() < 1e-6);
        assert_eq!(pipeline.projection.fov, 90.0);
        assert_eq!(pipeline.projection.focal_length, 10.0);
    }

    #[test]
    fn depth_is_reset_between_frames() {
        let mut pipeline = Pipeline::<FrameBuffer>::new(64, 64, 90.0, 10.0);
        let mut scene = Scene::new();
        scene.add_entity(Entity::new(
            "tri",
            single_tri([
                Vec3::new(-1.0, -1.0, 5.0),
                Vec3::new(1.0, -1.0, 5.0),
                Vec3::new(0.0, 1.0, 5.0),
            ]),
        ));
        let first = pipeline.render_frame(&scene, None).unwrap();
        let second = pipeline.render_frame(&scene, None).unwrap();
        assert!(first.pixels > 0);
        assert_eq!(first, second);
    }

    #[test]
    fn bad_index_is_skipped_not_panicking() {
        let mut pipeline = Pipeline::<FrameBuffer>::new(16, 16, 90.0, 10.0);
        let mut mesh = Mesh::cube();
        mesh.tris.push([0, 1, 99]);
        let stats = pipeline.render_mesh(&mesh, &Transform::default());
        assert_eq!(stats.triangles, 13);
        assert_eq!(stats.drawn + stats.degenerate + stats.unprojectable, 12);
    }
}
