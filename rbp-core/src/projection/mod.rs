//! Perspective projection of homogeneous point sets

mod projector;

pub use projector::{Projection, project, projection_matrix};
