use glam::IVec2;
use log::trace;

use super::{Buffer, DepthBuffer};
use crate::core::Color;

/// Signed doubled area of (a, b, p): `cross(b - a, p - a)`.
pub fn edge_cross(a: IVec2, b: IVec2, p: IVec2) -> i64 {
    let ab = (b - a).as_i64vec2();
    let ap = (p - a).as_i64vec2();
    ab.x * ap.y - ab.y * ap.x
}

/// Fills a screen-space triangle, interpolating color and depth barycentrically.
///
/// Pixels are scanned over the half-open bounding box and a pixel is inside
/// when all three edge values are non-negative, so shared edges are drawn by
/// both neighbours. Only pixels strictly nearer than the depth buffer are
/// written.
///
/// Returns the number of pixels written, or `None` for a zero-area triangle,
/// which is skipped without touching any pixel.
pub fn draw_triangle<B: Buffer + ?Sized>(
    surface: &mut B,
    depth: &mut DepthBuffer,
    verts: [IVec2; 3],
    depths: [f32; 3],
    colors: [Color; 3],
) -> Option<usize> {
    let [mut v0, mut v1, v2] = verts;
    let [mut z0, mut z1, z2] = depths;
    let [mut c0, mut c1, c2] = colors;

    let min = v0.min(v1).min(v2);
    let max = v0.max(v1).max(v2);

    if edge_cross(v0, v1, v2) < 0 {
        std::mem::swap(&mut v0, &mut v1);
        std::mem::swap(&mut z0, &mut z1);
        std::mem::swap(&mut c0, &mut c1);
    }

    let area = edge_cross(v0, v1, v2);
    if area == 0 {
        trace!("Skipping zero-area triangle {v0} {v1} {v2}");
        return None;
    }
    let area = area as f32;
    let cols = [c0, c1, c2];

    let mut written = 0;
    for y in min.y..max.y {
        for x in min.x..max.x {
            let p = IVec2::new(x, y);

            let w0 = edge_cross(v1, v2, p);
            let w1 = edge_cross(v2, v0, p);
            let w2 = edge_cross(v0, v1, p);
            if w0 < 0 || w1 < 0 || w2 < 0 {
                continue;
            }

            let alpha = w0 as f32 / area;
            let beta = w1 as f32 / area;
            let gamma = w2 as f32 / area;

            let z = alpha * z0 + beta * z1 + gamma * z2;
            if x < 0 || y < 0 || !depth.test_and_set(x as usize, y as usize, z) {
                continue;
            }
            surface.put_pixel(x, y, Color::weighted(&cols, [alpha, beta, gamma]));
            written += 1;
        }
    }
    Some(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FrameBuffer;
    use std::collections::BTreeMap;

    fn target(w: usize, h: usize) -> (FrameBuffer, DepthBuffer) {
        let mut fb = FrameBuffer::new(w, h);
        fb.clear(Color::BLACK);
        (fb, DepthBuffer::new(w, h))
    }

    fn lit(fb: &FrameBuffer) -> BTreeMap<(usize, usize), u32> {
        let mut out = BTreeMap::new();
        for y in 0..fb.height {
            for x in 0..fb.width {
                let p = fb.data[x + y * fb.width];
                if p != Color::BLACK.to_u32() {
                    out.insert((x, y), p);
                }
            }
        }
        out
    }

    #[test]
    fn edge_cross_sign_follows_orientation() {
        let a = IVec2::new(0, 0);
        let b = IVec2::new(4, 0);
        assert!(edge_cross(a, b, IVec2::new(2, 3)) > 0);
        assert!(edge_cross(a, b, IVec2::new(2, -3)) < 0);
        assert_eq!(edge_cross(a, b, IVec2::new(7, 0)), 0);
    }

    #[test]
    fn winding_does_not_change_coverage() {
        let tri = [IVec2::new(2, 3), IVec2::new(25, 6), IVec2::new(10, 28)];
        let depths = [0.5; 3];
        let cols = [Color::YELLOW; 3];

        let (mut fb_a, mut depth_a) = target(32, 32);
        let n_a = draw_triangle(&mut fb_a, &mut depth_a, tri, depths, cols);

        let (mut fb_b, mut depth_b) = target(32, 32);
        let n_b = draw_triangle(&mut fb_b, &mut depth_b, [tri[2], tri[1], tri[0]], depths, cols);

        assert!(n_a.unwrap() > 0);
        assert_eq!(n_a, n_b);
        assert_eq!(lit(&fb_a), lit(&fb_b));
    }

    #[test]
    fn nearer_triangle_wins_in_either_order() {
        let big = [IVec2::new(0, 0), IVec2::new(20, 0), IVec2::new(0, 20)];
        let other = [IVec2::new(1, 1), IVec2::new(19, 1), IVec2::new(1, 19)];

        for near_first in [true, false] {
            let (mut fb, mut depth) = target(20, 20);
            let draws: [([IVec2; 3], f32, Color); 2] = if near_first {
                [(big, 0.2, Color::RED), (other, 0.8, Color::GREEN)]
            } else {
                [(other, 0.8, Color::GREEN), (big, 0.2, Color::RED)]
            };
            for (tri, z, col) in draws {
                draw_triangle(&mut fb, &mut depth, tri, [z; 3], [col; 3]);
            }
            assert_eq!(fb.get_pixel(5, 5), Some(Color::RED), "near_first = {near_first}");
            assert!((depth.get(5, 5).unwrap() - 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn equal_depth_keeps_first_drawn() {
        let tri = [IVec2::new(0, 0), IVec2::new(10, 0), IVec2::new(0, 10)];
        let (mut fb, mut depth) = target(10, 10);
        draw_triangle(&mut fb, &mut depth, tri, [0.5; 3], [Color::BLUE; 3]);
        let second = draw_triangle(&mut fb, &mut depth, tri, [0.5; 3], [Color::RED; 3]);
        assert_eq!(second, Some(0));
        assert_eq!(fb.get_pixel(2, 2), Some(Color::BLUE));
    }

    #[test]
    fn identical_vertices_draw_nothing() {
        let (mut fb, mut depth) = target(8, 8);
        let p = IVec2::new(3, 3);
        assert_eq!(draw_triangle(&mut fb, &mut depth, [p; 3], [0.0; 3], [Color::WHITE; 3]), None);
        assert!(lit(&fb).is_empty());
    }

    #[test]
    fn collinear_vertices_draw_nothing() {
        // Every pixel on the line has all-zero edge values, which would divide by zero.
        let (mut fb, mut depth) = target(16, 16);
        let tri = [IVec2::new(0, 0), IVec2::new(5, 5), IVec2::new(10, 10)];
        assert_eq!(draw_triangle(&mut fb, &mut depth, tri, [0.0; 3], [Color::WHITE; 3]), None);
        assert!(lit(&fb).is_empty());
        assert_eq!(depth.get(3, 3), Some(f32::INFINITY));
    }

    #[test]
    fn depth_is_interpolated_across_the_face() {
        let tri = [IVec2::new(0, 0), IVec2::new(16, 0), IVec2::new(0, 16)];
        let (mut fb, mut depth) = target(16, 16);
        draw_triangle(&mut fb, &mut depth, tri, [0.0, 1.0, 1.0], [Color::WHITE; 3]);
        let at_corner = depth.get(0, 0).unwrap();
        let further_in = depth.get(7, 7).unwrap();
        assert!(at_corner.abs() < 1e-6);
        assert!((further_in - 14.0 / 16.0).abs() < 1e-5);
    }

    #[test]
    fn vertex_colors_follow_their_vertex_through_the_winding_swap() {
        // Clockwise in pixel space, so the first two corners are swapped internally.
        let tri = [IVec2::new(0, 0), IVec2::new(0, 30), IVec2::new(30, 0)];
        assert!(edge_cross(tri[0], tri[1], tri[2]) < 0);

        let (mut fb, mut depth) = target(32, 32);
        draw_triangle(
            &mut fb,
            &mut depth,
            tri,
            [0.0; 3],
            [Color::RED, Color::GREEN, Color::BLUE],
        );
        let near_first = fb.get_pixel(0, 0).unwrap();
        let near_second = fb.get_pixel(0, 28).unwrap();
        assert!(near_first.r > 200 && near_first.g < 50);
        assert!(near_second.g > 200 && near_second.r < 50);
    }
}
