//! Triangle mesh shared read-only by the projector and renderers

use nalgebra::{Matrix4xX, Point3, Vector4};

/// Three vertices in world coordinates
pub type Triangle = [Point3<f64>; 3];

/// A triangle list plus the same vertices as one 4xN homogeneous buffer.
///
/// Vertices are flattened in triangle order, so triangle `t` owns columns
/// `3t`, `3t + 1` and `3t + 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    points: Matrix4xX<f64>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let mut points = Matrix4xX::zeros(triangles.len() * 3);
        for (i, vertex) in triangles.iter().flatten().enumerate() {
            points.set_column(i, &Vector4::new(vertex.x, vertex.y, vertex.z, 1.0));
        }
        Self { points, triangles }
    }

    /// Homogeneous point buffer (4xN)
    pub fn points(&self) -> &Matrix4xX<f64> {
        &self.points
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned bounds (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut vertices = self.triangles.iter().flatten();
        let first = *vertices.next()?;
        Some(vertices.fold((first, first), |(lo, hi), v| (lo.inf(v), hi.sup(v))))
    }

    /// Built-in house-shaped solid framed by the canonical camera pose
    pub fn default_mesh() -> Self {
        let b = [
            Point3::new(-15.0, -15.0, 0.0),
            Point3::new(15.0, -15.0, 0.0),
            Point3::new(15.0, 15.0, 0.0),
            Point3::new(-15.0, 15.0, 0.0),
        ];
        let t = b.map(|p| Point3::new(p.x, p.y, 40.0));
        let apex = Point3::new(0.0, 0.0, 60.0);

        let mut triangles = vec![[b[0], b[2], b[1]], [b[0], b[3], b[2]]];
        for i in 0..4 {
            let j = (i + 1) % 4;
            triangles.push([b[i], b[j], t[j]]);
            triangles.push([b[i], t[j], t[i]]);
            triangles.push([t[i], t[j], apex]);
        }
        Self::from_triangles(triangles)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::default_mesh()
    }
}
