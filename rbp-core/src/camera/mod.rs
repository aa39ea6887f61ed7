//! Camera intrinsics and the camera/world pose state

mod intrinsics;
mod pose;

pub use intrinsics::{IntrinsicField, IntrinsicParams};
pub use pose::{CameraAxes, CameraState, canonical_pose, DEFAULT_AXIS_LENGTH};
