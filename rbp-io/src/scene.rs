use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use rbp_core::{Edit, IntrinsicField, IntrinsicParams, RbpError, Session};
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Scripted session setup loaded from JSON
///
/// ```json
/// {
///   "mesh": "bear.stl",
///   "intrinsics": { "pixels_wide": 1280, "pixels_high": 720,
///                   "sensor_width": 36, "sensor_height": 24, "focal_length": 18 },
///   "steps": [
///     { "frame": "world", "action": "z-rotate", "value": 30 },
///     { "frame": "camera", "action": "x-move", "value": -5 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub mesh: Option<PathBuf>,
    #[serde(default)]
    pub intrinsics: Option<IntrinsicParams>,
    #[serde(default)]
    pub steps: Vec<Edit>,
}

impl FromStr for Scene {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Scene {
    /// Read a scene file; a relative mesh path is taken relative to the file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut scene: Scene = text.parse()?;
        if let (Some(mesh), Some(dir)) = (scene.mesh.as_mut(), path.parent()) {
            if mesh.is_relative() {
                *mesh = dir.join(&*mesh);
            }
        }
        Ok(scene)
    }

    /// Apply intrinsics and then every step in order.
    ///
    /// A failing step is skipped and reported; later steps still run.
    pub fn apply(&self, session: &mut Session) -> Vec<RbpError> {
        let mut errors = Vec::new();

        if let Some(intrinsics) = &self.intrinsics {
            for field in IntrinsicField::ALL {
                if let Err(e) = session.set_intrinsic(field, intrinsics.get(field)) {
                    errors.push(e.into());
                }
            }
        }

        for (i, step) in self.steps.iter().enumerate() {
            debug!("Scene step {i}: {step:?}");
            if let Err(e) = session.apply(step) {
                errors.push(e);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use rbp_core::{AxisAction, Mesh};

    const SCENE: &str = r#"{
        "mesh": "bear.stl",
        "intrinsics": { "pixels_wide": 1280, "pixels_high": 720,
                        "sensor_width": 32, "sensor_height": 18, "focal_length": 18 },
        "steps": [
            { "frame": "world", "action": "z-move", "value": 5 },
            { "frame": "intrinsic", "field": "skew", "value": 5000 },
            { "frame": "camera", "action": "x-rotate", "value": -10 }
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let scene: Scene = SCENE.parse().unwrap();
        assert_eq!(scene.mesh, Some(PathBuf::from("bear.stl")));
        assert_eq!(scene.steps.len(), 3);
        assert_eq!(
            scene.steps[0],
            Edit::World {
                action: AxisAction::ZMove,
                value: 5.0,
            }
        );
    }

    #[test]
    fn test_empty_scene() {
        let scene: Scene = "{}".parse().unwrap();
        assert_eq!(scene, Scene::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!("{\"meshes\": []}".parse::<Scene>().is_err());
    }

    #[test]
    fn test_apply_continues_after_error() {
        let scene: Scene = SCENE.parse().unwrap();
        let mut session = Session::new(Arc::new(Mesh::default_mesh()));

        let errors = scene.apply(&mut session);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], RbpError::Intrinsic(_)));

        assert_eq!(session.intrinsics().principal_point(), (640.0, 360.0));
        assert_eq!(session.world_values().get(AxisAction::ZMove), Some(5.0));
        assert_eq!(session.camera_values().get(AxisAction::XRotate), Some(-10.0));
    }

    #[test]
    fn test_from_path_resolves_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SCENE.as_bytes()).unwrap();

        let scene = Scene::from_path(&path).unwrap();
        assert_eq!(scene.mesh, Some(dir.path().join("bear.stl")));
    }

    #[test]
    fn test_from_path_missing() {
        let err = Scene::from_path("/nonexistent/scene.json").unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }
}
