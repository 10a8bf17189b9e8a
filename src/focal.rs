//! Focal-length change simulated as digital zoom.
//!
//! Moving from `original_focal` to `new_focal` without changing optics is the
//! same as cropping the centre of the original sensor. Everything reported
//! here follows from the zoom ratio `new_focal / original_focal`:
//!
//! - crop factor scales linearly with the ratio (it is a diagonal ratio)
//! - used sensor area scales with its square
//! - a `1/<d>` format's denominator scales with the linear ratio, so zooming
//!   in reads as a "smaller" fractional-inch sensor
//!
//! The exact crop factor is also matched against the registry to name the
//! closest real sensor format.

use serde::Serialize;

use crate::error::{FocalField, SensorRole, ValidationError};
use crate::numeric::{format_denominator, format_percent, require_positive, round_to};
use crate::sensors::{self, FRACTIONAL_PREFIX, SensorSpec};

/// A sensor as echoed back in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSummary {
    pub id: String,
    pub name: String,
    pub crop_factor: f64,
}

impl From<&SensorSpec> for SensorSummary {
    fn from(spec: &SensorSpec) -> Self {
        Self {
            id: spec.id.to_string(),
            name: spec.name.to_string(),
            crop_factor: spec.crop_factor,
        }
    }
}

/// Result of [`compute_focal_equivalence`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalenceReport {
    /// Crop factor after the zoom, 2 decimals.
    pub exact_crop_factor: f64,
    pub closest_sensor: SensorSummary,
    /// `1/<d>` for fractional-inch originals, otherwise the closest sensor's name.
    pub effective_sensor_size: String,
    /// Distance from `exact_crop_factor` to the closest sensor, 3 decimals.
    pub crop_factor_difference: f64,
    pub equivalent_aperture: f64,
    pub original_focal_length: f64,
    pub new_focal_length: f64,
    pub original_sensor: SensorSummary,
    /// Positive when the field of view widens.
    pub angle_of_view_change: String,
    /// Mirror of `angle_of_view_change`, framed as telephoto compression.
    pub perspective_change: String,
    pub relative_sensor_area: f64,
    pub area_ratio: f64,
    pub original_equivalent_focal_length: f64,
    pub new_equivalent_focal_length: f64,
}

/// Closest registered sensor to `crop_factor` and the absolute difference.
///
/// Walks the registry in table order and only replaces the current best on
/// a strictly smaller difference, so the earlier entry wins a tie.
pub fn closest_sensor(crop_factor: f64) -> (&'static SensorSpec, f64) {
    let all = sensors::all();
    let mut best = (&all[0], (all[0].crop_factor - crop_factor).abs());
    for spec in &all[1..] {
        let diff = (spec.crop_factor - crop_factor).abs();
        if diff < best.1 {
            best = (spec, diff);
        }
    }
    best
}

/// Label for the sensor area actually in use after the zoom.
fn effective_sensor_size(original_id: &str, zoom: f64, closest: &SensorSpec) -> String {
    match sensors::fractional_denominator(original_id) {
        Some(denominator) => {
            format!("{FRACTIONAL_PREFIX}{}", format_denominator(denominator * zoom))
        }
        None => closest.name.to_string(),
    }
}

/// Full equivalence report for shooting `original_sensor_id` at `new_focal`
/// instead of `original_focal`, by cropping rather than changing lenses.
///
/// Inputs are checked in order (sensor, original focal length, new focal
/// length, aperture) and the first failure is returned.
pub fn compute_focal_equivalence(
    original_sensor_id: &str,
    original_focal: f64,
    new_focal: f64,
    aperture: f64,
) -> Result<EquivalenceReport, ValidationError> {
    let original = sensors::lookup(original_sensor_id).ok_or_else(|| {
        ValidationError::InvalidSensor {
            role: SensorRole::OriginalSensor,
            id: original_sensor_id.to_string(),
        }
    })?;
    let original_focal = require_positive(
        original_focal,
        ValidationError::InvalidFocalLength {
            field: FocalField::Original,
        },
    )?;
    let new_focal = require_positive(
        new_focal,
        ValidationError::InvalidFocalLength {
            field: FocalField::New,
        },
    )?;
    let aperture = require_positive(aperture, ValidationError::InvalidAperture)?;

    let zoom = new_focal / original_focal;
    let area_ratio = zoom * zoom;
    let new_crop_factor = round_to(original.crop_factor * zoom, 2);

    let (closest, difference) = closest_sensor(new_crop_factor);
    // sqrt(area_ratio) == zoom
    let effective = effective_sensor_size(original.id, area_ratio.sqrt(), closest);

    Ok(EquivalenceReport {
        exact_crop_factor: new_crop_factor,
        closest_sensor: closest.into(),
        effective_sensor_size: effective,
        crop_factor_difference: round_to(difference, 3),
        equivalent_aperture: round_to(aperture * new_crop_factor, 1),
        original_focal_length: original_focal,
        new_focal_length: new_focal,
        original_sensor: original.into(),
        angle_of_view_change: format_percent((1.0 - zoom) * 100.0),
        perspective_change: format_percent((zoom - 1.0) * 100.0),
        relative_sensor_area: round_to(1.0 / area_ratio, 2),
        area_ratio: round_to(area_ratio, 2),
        original_equivalent_focal_length: round_to(original_focal * original.crop_factor, 1),
        new_equivalent_focal_length: round_to(new_focal * new_crop_factor, 1),
    })
}
