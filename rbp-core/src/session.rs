//! Application state: mesh, camera pose, intrinsics and the values shown to the user

use std::sync::Arc;

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraState, IntrinsicField, IntrinsicParams};
use crate::error::{IntrinsicError, ProjectionError, Result, SessionError};
use crate::mesh::Mesh;
use crate::projection::{Projection, project};
use crate::transform::AxisAction;

/// Last value applied per axis action, kept for redisplay only
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdjustmentValues {
    values: [Option<f64>; 6],
}

impl AdjustmentValues {
    pub fn get(&self, action: AxisAction) -> Option<f64> {
        self.values[action.index()]
    }

    fn set(&mut self, action: AxisAction, value: f64) {
        self.values[action.index()] = Some(value);
    }

    pub fn clear(&mut self) {
        self.values = [None; 6];
    }

    pub fn iter(&self) -> impl Iterator<Item = (AxisAction, Option<f64>)> + '_ {
        AxisAction::ALL.iter().map(move |&a| (a, self.get(a)))
    }
}

/// Outcome of a batch of text edits; every field is applied independently
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport<K, E> {
    pub applied: Vec<K>,
    pub errors: Vec<E>,
}

impl<K, E> Default for BatchReport<K, E> {
    fn default() -> Self {
        Self {
            applied: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<K, E> BatchReport<K, E> {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A single user edit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum Edit {
    World { action: AxisAction, value: f64 },
    Camera { action: AxisAction, value: f64 },
    Intrinsic { field: IntrinsicField, value: f64 },
    Reset,
}

/// One mesh, one camera
#[derive(Debug, Clone)]
pub struct Session {
    mesh: Arc<Mesh>,
    camera: CameraState,
    intrinsics: IntrinsicParams,
    world_values: AdjustmentValues,
    camera_values: AdjustmentValues,
}

impl Session {
    pub fn new(mesh: Arc<Mesh>) -> Self {
        Self {
            mesh,
            camera: CameraState::new(),
            intrinsics: IntrinsicParams::default(),
            world_values: AdjustmentValues::default(),
            camera_values: AdjustmentValues::default(),
        }
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn intrinsics(&self) -> &IntrinsicParams {
        &self.intrinsics
    }

    pub fn world_values(&self) -> &AdjustmentValues {
        &self.world_values
    }

    pub fn camera_values(&self) -> &AdjustmentValues {
        &self.camera_values
    }

    pub fn calibration_matrix(&self) -> Matrix3<f64> {
        self.intrinsics.calibration_matrix()
    }

    pub fn apply_world(&mut self, action: AxisAction, value: f64) {
        self.camera.apply_world(action, value);
        self.world_values.set(action, value);
    }

    pub fn apply_camera(&mut self, action: AxisAction, value: f64) {
        self.camera.apply_camera(action, value);
        self.camera_values.set(action, value);
    }

    pub fn set_intrinsic(
        &mut self,
        field: IntrinsicField,
        value: f64,
    ) -> std::result::Result<(), IntrinsicError> {
        self.intrinsics.set_primary(field, value)
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<()> {
        match *edit {
            Edit::World { action, value } => self.apply_world(action, value),
            Edit::Camera { action, value } => self.apply_camera(action, value),
            Edit::Intrinsic { field, value } => self.set_intrinsic(field, value)?,
            Edit::Reset => self.reset(),
        }
        Ok(())
    }

    /// Apply world edits from text fields in order; blank fields are skipped
    pub fn update_world_text(
        &mut self,
        fields: &[(AxisAction, &str)],
    ) -> BatchReport<AxisAction, SessionError> {
        Self::update_pose_text(fields, |action, value| self.apply_world(action, value))
    }

    /// Apply camera edits from text fields in order; blank fields are skipped
    pub fn update_camera_text(
        &mut self,
        fields: &[(AxisAction, &str)],
    ) -> BatchReport<AxisAction, SessionError> {
        Self::update_pose_text(fields, |action, value| self.apply_camera(action, value))
    }

    fn update_pose_text(
        fields: &[(AxisAction, &str)],
        mut apply: impl FnMut(AxisAction, f64),
    ) -> BatchReport<AxisAction, SessionError> {
        let mut report = BatchReport::default();
        for &(action, text) in fields {
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    apply(action, value);
                    report.applied.push(action);
                }
                _ => report.errors.push(SessionError::InvalidNumber {
                    action,
                    text: text.to_string(),
                }),
            }
        }
        report
    }

    /// Validate and apply intrinsic fields from text; blank fields are skipped
    pub fn update_intrinsics_text(
        &mut self,
        fields: &[(IntrinsicField, &str)],
    ) -> BatchReport<IntrinsicField, IntrinsicError> {
        let mut report = BatchReport::default();
        for &(field, text) in fields {
            if text.trim().is_empty() {
                continue;
            }
            match self.intrinsics.set_primary_text(field, text) {
                Ok(()) => report.applied.push(field),
                Err(e) => report.errors.push(e),
            }
        }
        report
    }

    /// Back to the canonical pose, default intrinsics and blank display values
    pub fn reset(&mut self) {
        self.camera.reset();
        self.intrinsics = IntrinsicParams::default();
        self.world_values.clear();
        self.camera_values.clear();
    }

    /// Project the mesh with the current pose and intrinsics
    pub fn project(&self) -> std::result::Result<Projection, ProjectionError> {
        project(
            self.camera.pose(),
            &self.intrinsics.calibration_matrix(),
            self.mesh.points(),
        )
    }
}
