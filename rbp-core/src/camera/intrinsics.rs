use std::fmt;
use std::str::FromStr;

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::error::IntrinsicError;

/// Primary (user settable) intrinsic fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntrinsicField {
    PixelsWide,
    PixelsHigh,
    SensorWidth,
    SensorHeight,
    FocalLength,
    Skew,
}

impl IntrinsicField {
    pub const ALL: [IntrinsicField; 6] = [
        IntrinsicField::PixelsWide,
        IntrinsicField::PixelsHigh,
        IntrinsicField::SensorWidth,
        IntrinsicField::SensorHeight,
        IntrinsicField::FocalLength,
        IntrinsicField::Skew,
    ];

    /// Inclusive (min, max) range accepted by [`IntrinsicParams::set_primary`]
    pub fn limits(self) -> (f64, f64) {
        match self {
            IntrinsicField::PixelsWide => (640.0, 1920.0),
            IntrinsicField::PixelsHigh => (480.0, 1080.0),
            IntrinsicField::SensorWidth | IntrinsicField::SensorHeight => (10.0, 50.0),
            IntrinsicField::FocalLength => (1.0, 1000.0),
            IntrinsicField::Skew => (-1000.0, 1000.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IntrinsicField::PixelsWide => "pixels-wide",
            IntrinsicField::PixelsHigh => "pixels-high",
            IntrinsicField::SensorWidth => "sensor-width",
            IntrinsicField::SensorHeight => "sensor-height",
            IntrinsicField::FocalLength => "focal-length",
            IntrinsicField::Skew => "skew",
        }
    }
}

impl fmt::Display for IntrinsicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IntrinsicField {
    type Err = IntrinsicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().trim_end_matches(':').replace('_', "-").to_ascii_lowercase();
        let field = match key.as_str() {
            "pixels-wide" | "width" | "n-pixels-base" => IntrinsicField::PixelsWide,
            "pixels-high" | "height" | "n-pixels-altura" => IntrinsicField::PixelsHigh,
            "sensor-width" | "ccd-x" => IntrinsicField::SensorWidth,
            "sensor-height" | "ccd-y" => IntrinsicField::SensorHeight,
            "focal-length" | "focal" | "dist-focal" => IntrinsicField::FocalLength,
            "skew" | "s-theta" => IntrinsicField::Skew,
            _ => return Err(IntrinsicError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

/// Serialized form: primary fields only
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PrimaryIntrinsics {
    pixels_wide: f64,
    pixels_high: f64,
    sensor_width: f64,
    sensor_height: f64,
    focal_length: f64,
    #[serde(default)]
    skew: f64,
}

/// Intrinsic camera parameters
///
/// The scale factors (pixels per mm) and the principal point are derived from
/// the primary fields and recomputed on every successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PrimaryIntrinsics", into = "PrimaryIntrinsics")]
pub struct IntrinsicParams {
    pixels_wide: f64,
    pixels_high: f64,
    sensor_width: f64,
    sensor_height: f64,
    focal_length: f64,
    skew: f64,
    sx: f64,
    sy: f64,
    ox: f64,
    oy: f64,
}

impl Default for IntrinsicParams {
    /// 1050x700 px on a 36x24 mm sensor, 10 mm focal length, no skew
    fn default() -> Self {
        let mut params = Self {
            pixels_wide: 1050.0,
            pixels_high: 700.0,
            sensor_width: 36.0,
            sensor_height: 24.0,
            focal_length: 10.0,
            skew: 0.0,
            sx: 0.0,
            sy: 0.0,
            ox: 0.0,
            oy: 0.0,
        };
        params.recompute();
        params
    }
}

impl IntrinsicParams {
    /// Set a primary field, rejecting non-finite or out-of-range values
    pub fn set_primary(&mut self, field: IntrinsicField, value: f64) -> Result<(), IntrinsicError> {
        let (min, max) = field.limits();
        if !value.is_finite() || value < min || value > max {
            return Err(IntrinsicError::OutOfRange { field, value, min, max });
        }

        *self.primary_mut(field) = value;
        self.recompute();
        Ok(())
    }

    /// Parse `text` and set the field
    pub fn set_primary_text(
        &mut self,
        field: IntrinsicField,
        text: &str,
    ) -> Result<(), IntrinsicError> {
        let value: f64 = text.trim().parse().map_err(|_| IntrinsicError::NotANumber {
            field,
            text: text.to_string(),
        })?;
        self.set_primary(field, value)
    }

    /// Recompute scale factors and principal point from the primary fields
    pub fn recompute(&mut self) {
        self.sx = self.pixels_wide / self.sensor_width;
        self.sy = self.pixels_high / self.sensor_height;
        self.ox = self.pixels_wide / 2.0;
        self.oy = self.pixels_high / 2.0;
    }

    pub fn get(&self, field: IntrinsicField) -> f64 {
        match field {
            IntrinsicField::PixelsWide => self.pixels_wide,
            IntrinsicField::PixelsHigh => self.pixels_high,
            IntrinsicField::SensorWidth => self.sensor_width,
            IntrinsicField::SensorHeight => self.sensor_height,
            IntrinsicField::FocalLength => self.focal_length,
            IntrinsicField::Skew => self.skew,
        }
    }

    fn primary_mut(&mut self, field: IntrinsicField) -> &mut f64 {
        match field {
            IntrinsicField::PixelsWide => &mut self.pixels_wide,
            IntrinsicField::PixelsHigh => &mut self.pixels_high,
            IntrinsicField::SensorWidth => &mut self.sensor_width,
            IntrinsicField::SensorHeight => &mut self.sensor_height,
            IntrinsicField::FocalLength => &mut self.focal_length,
            IntrinsicField::Skew => &mut self.skew,
        }
    }

    /// Pixels per mm (sx, sy)
    pub fn scale(&self) -> (f64, f64) {
        (self.sx, self.sy)
    }

    /// Principal point (ox, oy) in pixels
    pub fn principal_point(&self) -> (f64, f64) {
        (self.ox, self.oy)
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Image size in whole pixels (width, height)
    pub fn image_size(&self) -> (u32, u32) {
        (self.pixels_wide.round() as u32, self.pixels_high.round() as u32)
    }

    /// K = [[f*sx, f*s_theta, ox], [0, f*sy, oy], [0, 0, 1]]
    #[rustfmt::skip]
    pub fn calibration_matrix(&self) -> Matrix3<f64> {
        let f = self.focal_length;
        Matrix3::new(
            f * self.sx, f * self.skew, self.ox,
            0.0, f * self.sy, self.oy,
            0.0, 0.0, 1.0,
        )
    }
}

impl TryFrom<PrimaryIntrinsics> for IntrinsicParams {
    type Error = IntrinsicError;

    fn try_from(primary: PrimaryIntrinsics) -> Result<Self, Self::Error> {
        let mut params = Self::default();
        params.set_primary(IntrinsicField::PixelsWide, primary.pixels_wide)?;
        params.set_primary(IntrinsicField::PixelsHigh, primary.pixels_high)?;
        params.set_primary(IntrinsicField::SensorWidth, primary.sensor_width)?;
        params.set_primary(IntrinsicField::SensorHeight, primary.sensor_height)?;
        params.set_primary(IntrinsicField::FocalLength, primary.focal_length)?;
        params.set_primary(IntrinsicField::Skew, primary.skew)?;
        Ok(params)
    }
}

impl From<IntrinsicParams> for PrimaryIntrinsics {
    fn from(params: IntrinsicParams) -> Self {
        Self {
            pixels_wide: params.pixels_wide,
            pixels_high: params.pixels_high,
            sensor_width: params.sensor_width,
            sensor_height: params.sensor_height,
            focal_length: params.focal_length,
            skew: params.skew,
        }
    }
}
