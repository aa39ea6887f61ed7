use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

use crate::transform::{AxisAction, rotation_x, translation};

/// Arrow length used when drawing the camera frame
pub const DEFAULT_AXIS_LENGTH: f64 = 10.0;

/// Starting viewpoint: the world-aligned frame rotated -90 deg about X,
/// then moved to (0, -60, 35)
pub fn canonical_pose() -> Matrix4<f64> {
    translation(0.0, -60.0, 35.0) * rotation_x(-90.0) * Matrix4::identity()
}

/// Camera frame drawn as three arrows from its origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAxes {
    pub origin: Point3<f64>,
    pub x: Vector3<f64>,
    pub y: Vector3<f64>,
    pub z: Vector3<f64>,
}

/// Camera pose plus the fixed reference pose used for camera-local moves
///
/// The pose columns are the camera basis vectors and origin expressed in
/// world coordinates. The reference is the world-aligned frame captured
/// before the canonical rotation and translation, i.e. the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pose: Matrix4<f64>,
    reference: Matrix4<f64>,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraState {
    pub fn new() -> Self {
        Self {
            pose: canonical_pose(),
            reference: Matrix4::identity(),
        }
    }

    /// Move or rotate the camera in its own frame.
    ///
    /// The delta is taken against the reference pose and layered onto the
    /// current pose: `pose = pose * (delta * reference)`. A zero value
    /// leaves the pose unchanged.
    pub fn apply_camera(&mut self, action: AxisAction, value: f64) {
        let delta = action.delta(value);
        self.pose *= delta * self.reference;
    }

    /// Move or rotate the camera in the world frame: `pose = delta * pose`
    pub fn apply_world(&mut self, action: AxisAction, value: f64) {
        let delta = action.delta(value);
        self.pose = delta * self.pose;
    }

    /// Restore the canonical pose and the identity reference
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn pose(&self) -> &Matrix4<f64> {
        &self.pose
    }

    pub fn reference(&self) -> &Matrix4<f64> {
        &self.reference
    }

    /// Camera centre in world coordinates
    pub fn origin(&self) -> Point3<f64> {
        Point3::new(self.pose[(0, 3)], self.pose[(1, 3)], self.pose[(2, 3)])
    }

    /// Camera basis vectors as columns
    pub fn basis(&self) -> Matrix3<f64> {
        self.pose.fixed_view::<3, 3>(0, 0).into_owned()
    }

    pub fn axes(&self, length: f64) -> CameraAxes {
        let basis = self.basis();
        CameraAxes {
            origin: self.origin(),
            x: basis.column(0) * length,
            y: basis.column(1) * length,
            z: basis.column(2) * length,
        }
    }
}
