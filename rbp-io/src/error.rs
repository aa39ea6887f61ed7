use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Failed to open mesh {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse mesh {}: {source}", .path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("STL parse error: {0}")]
    Parse(#[from] std::io::Error),

    #[error("Mesh contains no triangles")]
    Empty,
}

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scene JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_error_display() {
        let err = MeshError::Empty;
        assert_eq!(err.to_string(), "Mesh contains no triangles");

        let err = MeshError::Io {
            path: PathBuf::from("assets/bear.stl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Failed to open mesh assets/bear.stl: not found");

        let err = MeshError::InvalidFile {
            path: PathBuf::from("assets/bear.stl"),
            source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated"),
        };
        assert_eq!(err.to_string(), "Failed to parse mesh assets/bear.stl: truncated");
    }

    #[test]
    fn test_mesh_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err: MeshError = io.into();
        assert!(matches!(err, MeshError::Parse(_)));
    }

    #[test]
    fn test_scene_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SceneError = json_err.into();
        assert!(matches!(err, SceneError::Json(_)));
    }
}
