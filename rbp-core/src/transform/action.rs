use std::fmt;
use std::str::FromStr;

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use super::primitives::{rotation_x, rotation_y, rotation_z, translation};
use crate::error::SessionError;

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A single-axis move (mm) or rotation (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisAction {
    XMove,
    XRotate,
    YMove,
    YRotate,
    ZMove,
    ZRotate,
}

impl AxisAction {
    /// All actions in display order
    pub const ALL: [AxisAction; 6] = [
        AxisAction::XMove,
        AxisAction::XRotate,
        AxisAction::YMove,
        AxisAction::YRotate,
        AxisAction::ZMove,
        AxisAction::ZRotate,
    ];

    pub fn axis(self) -> Axis {
        match self {
            AxisAction::XMove | AxisAction::XRotate => Axis::X,
            AxisAction::YMove | AxisAction::YRotate => Axis::Y,
            AxisAction::ZMove | AxisAction::ZRotate => Axis::Z,
        }
    }

    pub fn is_rotation(self) -> bool {
        matches!(
            self,
            AxisAction::XRotate | AxisAction::YRotate | AxisAction::ZRotate
        )
    }

    /// Position in [`AxisAction::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            AxisAction::XMove => "x-move",
            AxisAction::XRotate => "x-rotate",
            AxisAction::YMove => "y-move",
            AxisAction::YRotate => "y-rotate",
            AxisAction::ZMove => "z-move",
            AxisAction::ZRotate => "z-rotate",
        }
    }

    /// Build the homogeneous delta for this action
    pub fn delta(self, value: f64) -> Matrix4<f64> {
        match self {
            AxisAction::XMove => translation(value, 0.0, 0.0),
            AxisAction::YMove => translation(0.0, value, 0.0),
            AxisAction::ZMove => translation(0.0, 0.0, value),
            AxisAction::XRotate => rotation_x(value),
            AxisAction::YRotate => rotation_y(value),
            AxisAction::ZRotate => rotation_z(value),
        }
    }
}

impl fmt::Display for AxisAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AxisAction {
    type Err = SessionError;

    /// Accepts `x-move`, `x_move`, `xmove`, `X(move)` and the `angle`/`rotate` variants
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let action = match key.as_str() {
            "xmove" => AxisAction::XMove,
            "ymove" => AxisAction::YMove,
            "zmove" => AxisAction::ZMove,
            "xrotate" | "xangle" => AxisAction::XRotate,
            "yrotate" | "yangle" => AxisAction::YRotate,
            "zrotate" | "zangle" => AxisAction::ZRotate,
            _ => return Err(SessionError::UnknownAction(s.to_string())),
        };
        Ok(action)
    }
}
