use thiserror::Error;

use crate::camera::IntrinsicField;
use crate::projection::Projection;
use crate::transform::AxisAction;

/// Common errors across the transformation and projection pipeline
#[derive(Error, Debug)]
pub enum RbpError {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Intrinsic parameter error: {0}")]
    Intrinsic(#[from] IntrinsicError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Camera pose is not invertible")]
    SingularPose,

    /// Some points sit on the camera plane. `fallback` holds the projection
    /// computed with a divisor of 1 for those points.
    #[error("Degenerate projection: {} point(s) have a zero homogeneous divisor", .indices.len())]
    Degenerate {
        indices: Vec<usize>,
        fallback: Projection,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntrinsicError {
    #[error("{field}: value {value} outside limits {min} to {max}")]
    OutOfRange {
        field: IntrinsicField,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field}: '{text}' is not a valid number")]
    NotANumber { field: IntrinsicField, text: String },

    #[error("Unknown intrinsic field: {0}")]
    UnknownField(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("{action}: '{text}' is not a valid number")]
    InvalidNumber { action: AxisAction, text: String },

    #[error("Unknown axis action: {0}")]
    UnknownAction(String),
}

pub type Result<T> = std::result::Result<T, RbpError>;
