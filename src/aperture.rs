//! Equivalent aperture at a fixed focal length.
//!
//! Multiplying an f-number by the sensor's crop factor gives the f-number a
//! full-frame camera would need for the same depth of field and total light.

use serde::Serialize;

use crate::error::{SensorRole, ValidationError};
use crate::numeric::{require_positive, round_to};
use crate::sensors;

/// Result of [`compute_aperture_equivalence`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApertureResult {
    pub sensor_id: String,
    pub sensor_name: String,
    pub crop_factor: f64,
    /// Input f-number, rounded to 1 decimal.
    pub input_aperture: f64,
    /// `aperture * crop_factor`, rounded to 1 decimal.
    pub equivalent_aperture: f64,
}

/// Full-frame equivalent aperture for `aperture` on `sensor_id`.
///
/// Fails with [`ValidationError::InvalidSensor`] when the id is not
/// registered and [`ValidationError::InvalidAperture`] when the aperture is
/// not a finite positive number.
pub fn compute_aperture_equivalence(
    sensor_id: &str,
    aperture: f64,
) -> Result<ApertureResult, ValidationError> {
    let sensor = sensors::lookup(sensor_id).ok_or_else(|| ValidationError::InvalidSensor {
        role: SensorRole::Sensor,
        id: sensor_id.to_string(),
    })?;
    let aperture = require_positive(aperture, ValidationError::InvalidAperture)?;

    Ok(ApertureResult {
        sensor_id: sensor.id.to_string(),
        sensor_name: sensor.name.to_string(),
        crop_factor: sensor.crop_factor,
        input_aperture: round_to(aperture, 1),
        equivalent_aperture: round_to(aperture * sensor.crop_factor, 1),
    })
}
