//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Sensors
//!
//! ```text
//! medium-format       Medium Format        0.7×
//! full-frame          Full Frame           1×
//! ...
//! ```
//!
//! ## Aperture
//!
//! ```text
//! Micro Four Thirds (micro-four-thirds)
//!     Crop factor: 2×
//!     Aperture: f/1.8 → f/3.6 (full-frame equivalent)
//! ```
//!
//! ## Focal
//!
//! ```text
//! Full Frame (full-frame) 50mm → 35mm
//!     Exact crop factor: 0.7×
//!     Closest sensor: Medium Format (0.7×, off by 0)
//!     Effective sensor size: Medium Format
//!     Equivalent aperture: f/1
//!     Equivalent focal length: 50mm → 24.5mm
//!     Angle of view: 30.0%
//!     Perspective: -30.0%
//!     Sensor area used: 0.49× (relative area 2.04×)
//! ```

use crate::aperture::ApertureResult;
use crate::focal::EquivalenceReport;
use crate::sensors::SensorSpec;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn num(value: f64) -> String {
    format!("{value}")
}

/// One line per sensor: id, name, crop factor, in table order.
pub fn format_sensors(sensors: &[SensorSpec]) -> Vec<String> {
    let id_width = sensors.iter().map(|s| s.id.len()).max().unwrap_or(0);
    let name_width = sensors.iter().map(|s| s.name.len()).max().unwrap_or(0);
    sensors
        .iter()
        .map(|s| {
            format!(
                "{:<id_width$}  {:<name_width$}  {}×",
                s.id,
                s.name,
                num(s.crop_factor)
            )
        })
        .collect()
}

pub fn format_aperture(result: &ApertureResult) -> Vec<String> {
    vec![
        format!("{} ({})", result.sensor_name, result.sensor_id),
        format!("{}Crop factor: {}×", indent(1), num(result.crop_factor)),
        format!(
            "{}Aperture: f/{} → f/{} (full-frame equivalent)",
            indent(1),
            num(result.input_aperture),
            num(result.equivalent_aperture)
        ),
    ]
}

pub fn format_focal(report: &EquivalenceReport) -> Vec<String> {
    let i = indent(1);
    vec![
        format!(
            "{} ({}) {}mm → {}mm",
            report.original_sensor.name,
            report.original_sensor.id,
            num(report.original_focal_length),
            num(report.new_focal_length)
        ),
        format!("{i}Exact crop factor: {}×", num(report.exact_crop_factor)),
        format!(
            "{i}Closest sensor: {} ({}×, off by {})",
            report.closest_sensor.name,
            num(report.closest_sensor.crop_factor),
            num(report.crop_factor_difference)
        ),
        format!("{i}Effective sensor size: {}", report.effective_sensor_size),
        format!("{i}Equivalent aperture: f/{}", num(report.equivalent_aperture)),
        format!(
            "{i}Equivalent focal length: {}mm → {}mm",
            num(report.original_equivalent_focal_length),
            num(report.new_equivalent_focal_length)
        ),
        format!("{i}Angle of view: {}", report.angle_of_view_change),
        format!("{i}Perspective: {}", report.perspective_change),
        format!(
            "{i}Sensor area used: {}× (relative area {}×)",
            num(report.area_ratio),
            num(report.relative_sensor_area)
        ),
    ]
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_sensors(sensors: &[SensorSpec]) {
    print_lines(format_sensors(sensors));
}

pub fn print_aperture(result: &ApertureResult) {
    print_lines(format_aperture(result));
}

pub fn print_focal(report: &EquivalenceReport) {
    print_lines(format_focal(report));
}
