//! Mesh and scene file I/O

pub mod error;
pub mod scene;
pub mod stl;

pub use error::{MeshError, SceneError};
pub use scene::Scene;
pub use stl::{load_or_default, load_stl, read_stl};
