//! Elementary homogeneous transforms and the axis actions built on them

mod action;
mod primitives;

pub use action::{Axis, AxisAction};
pub use primitives::{rotation_x, rotation_y, rotation_z, translation};
