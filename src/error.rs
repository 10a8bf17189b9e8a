//! Validation failures for the two calculations.
//!
//! Every failure is detected before any arithmetic runs and names the field
//! that was wrong. The `Display` text is the client-facing message used by
//! both the HTTP layer and the CLI.

use thiserror::Error;

/// Which sensor argument failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorRole {
    /// `sensorSize` of the aperture calculation.
    Sensor,
    /// `originalSensor` of the focal calculation.
    OriginalSensor,
}

/// Which focal length was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocalField {
    Original,
    New,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{}", sensor_message(.role))]
    InvalidSensor { role: SensorRole, id: String },
    #[error("Invalid aperture value")]
    InvalidAperture,
    #[error("{}", focal_message(.field))]
    InvalidFocalLength { field: FocalField },
}

fn sensor_message(role: &SensorRole) -> &'static str {
    match role {
        SensorRole::Sensor => "Invalid sensor size",
        SensorRole::OriginalSensor => "Invalid original sensor size",
    }
}

fn focal_message(field: &FocalField) -> &'static str {
    match field {
        FocalField::Original => "Invalid original focal length",
        FocalField::New => "Invalid new focal length",
    }
}

impl ValidationError {
    /// Name of the offending request field, as spelled on the wire.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidSensor {
                role: SensorRole::Sensor,
                ..
            } => "sensorSize",
            Self::InvalidSensor {
                role: SensorRole::OriginalSensor,
                ..
            } => "originalSensor",
            Self::InvalidAperture => "aperture",
            Self::InvalidFocalLength {
                field: FocalField::Original,
            } => "originalFocal",
            Self::InvalidFocalLength {
                field: FocalField::New,
            } => "newFocal",
        }
    }
}
