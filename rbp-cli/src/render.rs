//! PNG wireframe rendering of the 2D view.

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use rbp_core::Projection;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const EDGE: Rgb<u8> = Rgb([31, 119, 180]);

/// Clip the segment a-b to [0, width] x [0, height] (Liang-Barsky).
fn clip(a: (f64, f64), b: (f64, f64), width: f64, height: f64) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [(-dx, a.0), (dx, width - a.0), (-dy, a.1), (dy, height - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}

fn draw_line(img: &mut RgbImage, a: (f64, f64), b: (f64, f64), color: Rgb<u8>) {
    let (w, h) = (img.width(), img.height());
    let Some((a, b)) = clip(a, b, f64::from(w - 1), f64::from(h - 1)) else {
        return;
    };

    let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = f64::from(i) / f64::from(steps);
        let x = (a.0 + t * (b.0 - a.0)).round() as u32;
        let y = (a.1 + t * (b.1 - a.1)).round() as u32;
        if x < w && y < h {
            img.put_pixel(x, y, color);
        }
    }
}

/// Draw every projected triangle as a wireframe; `v` grows downward like the
/// image rows. Triangles touching a point in `skip` or a point at or behind
/// the camera plane are left out.
pub fn render_wireframe(
    projection: &Projection,
    width: u32,
    height: u32,
    skip: &[usize],
) -> RgbImage {
    let mut img = RgbImage::from_pixel(width.max(1), height.max(1), BACKGROUND);

    for (t, [p0, p1, p2]) in projection.triangles().enumerate() {
        if (3 * t..3 * t + 3).any(|i| skip.contains(&i) || !projection.is_in_front(i)) {
            continue;
        }
        draw_line(&mut img, p0, p1, EDGE);
        draw_line(&mut img, p1, p2, EDGE);
        draw_line(&mut img, p2, p0, EDGE);
    }
    img
}

pub fn write_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path)
        .with_context(|| format!("failed to write PNG: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbp_core::nalgebra::{Matrix3, Matrix4, Matrix4xX, Vector4};

    fn projection(points: &[[f64; 3]]) -> Projection {
        #[rustfmt::skip]
        let k = Matrix3::new(
            100.0, 0.0, 50.0,
            0.0, 100.0, 50.0,
            0.0, 0.0, 1.0,
        );
        let mut m = Matrix4xX::zeros(points.len());
        for (i, p) in points.iter().enumerate() {
            m.set_column(i, &Vector4::new(p[0], p[1], p[2], 1.0));
        }
        rbp_core::project(&Matrix4::identity(), &k, &m).unwrap()
    }

    #[test]
    fn test_clip_inside() {
        let seg = clip((1.0, 1.0), (5.0, 5.0), 10.0, 10.0).unwrap();
        assert_eq!(seg, ((1.0, 1.0), (5.0, 5.0)));
    }

    #[test]
    fn test_clip_crossing() {
        let (a, b) = clip((-10.0, 5.0), (20.0, 5.0), 10.0, 10.0).unwrap();
        assert!((a.0 - 0.0).abs() < 1e-12);
        assert!((b.0 - 10.0).abs() < 1e-12);
        assert_eq!(a.1, 5.0);
    }

    #[test]
    fn test_clip_outside() {
        assert!(clip((-5.0, -5.0), (-1.0, 20.0), 10.0, 10.0).is_none());
        assert!(clip((0.0, 11.0), (10.0, 11.0), 10.0, 10.0).is_none());
    }

    #[test]
    fn test_render_draws_edges() {
        let p = projection(&[[0.0, 0.0, 1.0], [0.3, 0.0, 1.0], [0.0, 0.3, 1.0]]);
        let img = render_wireframe(&p, 100, 100, &[]);

        assert_eq!(img.dimensions(), (100, 100));
        assert_eq!(*img.get_pixel(50, 50), EDGE);
        assert_eq!(*img.get_pixel(65, 50), EDGE);
        assert_eq!(*img.get_pixel(90, 90), BACKGROUND);
    }

    #[test]
    fn test_render_skips_degenerate_triangles() {
        let p = projection(&[[0.0, 0.0, 1.0], [0.3, 0.0, 1.0], [0.0, 0.3, 1.0]]);
        let img = render_wireframe(&p, 100, 100, &[1]);
        assert!(img.pixels().all(|px| *px == BACKGROUND));
    }

    #[test]
    fn test_render_skips_triangles_behind_camera() {
        // the last vertex would otherwise be mirrored to (30, 30)
        let p = projection(&[[0.0, 0.0, 1.0], [0.3, 0.0, 1.0], [0.2, 0.2, -1.0]]);
        let img = render_wireframe(&p, 100, 100, &[]);
        assert!(img.pixels().all(|px| *px == BACKGROUND));
    }

    #[test]
    fn test_far_points_are_clipped() {
        let p = projection(&[[0.0, 0.0, 1.0], [1e9, 0.0, 1.0], [0.0, 1e9, 1e-9]]);
        let img = render_wireframe(&p, 100, 100, &[]);
        assert_eq!(*img.get_pixel(50, 50), EDGE);
    }

    #[test]
    fn test_write_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.png");
        write_png(&RgbImage::from_pixel(4, 4, BACKGROUND), &path).unwrap();
        assert!(path.exists());
    }
}
