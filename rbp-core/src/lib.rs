pub mod camera;
pub mod error;
pub mod mesh;
pub mod projection;
pub mod session;
pub mod transform;

pub use nalgebra;

pub use camera::{CameraAxes, CameraState, IntrinsicField, IntrinsicParams};
pub use error::{IntrinsicError, ProjectionError, RbpError, Result, SessionError};
pub use mesh::{Mesh, Triangle};
pub use projection::{Projection, project};
pub use session::{AdjustmentValues, BatchReport, Edit, Session};
pub use transform::{Axis, AxisAction};
