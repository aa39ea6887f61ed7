use nalgebra::{Matrix2xX, Matrix3, Matrix3x4, Matrix4, Matrix4xX, RowDVector};

use crate::error::ProjectionError;

/// Projected pixel coordinates, one column (u, v) per input point, plus the
/// homogeneous divisor each point was divided by (before any substitution)
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pixels: Matrix2xX<f64>,
    depths: RowDVector<f64>,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            pixels: Matrix2xX::zeros(0),
            depths: RowDVector::zeros(0),
        }
    }
}

impl Projection {
    pub fn len(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixel coordinates of the i-th point
    pub fn point(&self, i: usize) -> (f64, f64) {
        (self.pixels[(0, i)], self.pixels[(1, i)])
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.pixels.column_iter().map(|c| (c[0], c[1]))
    }

    pub fn pixels(&self) -> &Matrix2xX<f64> {
        &self.pixels
    }

    /// Homogeneous divisor of the i-th point; positive in front of the camera
    pub fn depth(&self, i: usize) -> f64 {
        self.depths[i]
    }

    pub fn is_in_front(&self, i: usize) -> bool {
        self.depths[i] > 0.0
    }

    /// Regroup points three at a time, matching a mesh's triangle order
    pub fn triangles(&self) -> impl Iterator<Item = [(f64, f64); 3]> + '_ {
        (0..self.len() / 3)
            .map(move |t| [self.point(3 * t), self.point(3 * t + 1), self.point(3 * t + 2)])
    }

    /// Number of points in front of the camera and inside a `width` x `height` image
    pub fn count_in_bounds(&self, width: f64, height: f64) -> usize {
        self.iter()
            .enumerate()
            .filter(|&(i, (u, v))| {
                self.is_in_front(i) && (0.0..=width).contains(&u) && (0.0..=height).contains(&v)
            })
            .count()
    }
}

/// Full 3x4 camera matrix P = K * [I | 0] * pose^-1
pub fn projection_matrix(
    pose: &Matrix4<f64>,
    k: &Matrix3<f64>,
) -> Result<Matrix3x4<f64>, ProjectionError> {
    let extrinsic = pose.try_inverse().ok_or(ProjectionError::SingularPose)?;
    let drop_row = Matrix3x4::<f64>::identity();
    Ok(k * (drop_row * extrinsic))
}

/// Project homogeneous world points (4xN) to pixel coordinates.
///
/// Points whose homogeneous divisor is exactly zero are reported through
/// [`ProjectionError::Degenerate`]; its fallback divides those points by 1
/// and every other point normally.
pub fn project(
    pose: &Matrix4<f64>,
    k: &Matrix3<f64>,
    points: &Matrix4xX<f64>,
) -> Result<Projection, ProjectionError> {
    let p = projection_matrix(pose, k)?;
    let homogeneous = p * points;

    let mut pixels = Matrix2xX::zeros(homogeneous.ncols());
    let depths = homogeneous.row(2).into_owned();
    let mut degenerate = Vec::new();
    for (i, col) in homogeneous.column_iter().enumerate() {
        let w = if col[2] == 0.0 {
            degenerate.push(i);
            1.0
        } else {
            col[2]
        };
        pixels[(0, i)] = col[0] / w;
        pixels[(1, i)] = col[1] / w;
    }

    let projection = Projection { pixels, depths };
    if degenerate.is_empty() {
        Ok(projection)
    } else {
        Err(ProjectionError::Degenerate {
            indices: degenerate,
            fallback: projection,
        })
    }
}
