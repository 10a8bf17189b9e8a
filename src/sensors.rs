//! The sensor registry.
//!
//! A fixed, compiled-in table of sensor formats and their crop factors. The
//! table is ordered: listings, the HTML select box, and the nearest-sensor
//! search all walk it front to back, so the first entry wins when two
//! formats are equally close to a crop factor.
//!
//! ## Identifier Families
//!
//! Identifiers come in two shapes:
//! - Named formats: `full-frame`, `aps-c`, `micro-four-thirds`, `1-inch`, ...
//! - Fractional-inch formats: `1/` followed by the optical-format denominator,
//!   e.g. `1/2.3`. The denominator carries meaning (a bigger denominator is a
//!   smaller sensor) and is parsed back out by [`fractional_denominator`].

use serde::Serialize;

/// One entry of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSpec {
    pub id: &'static str,
    pub name: &'static str,
    /// Diagonal ratio against full frame. Always > 0.
    pub crop_factor: f64,
}

const fn sensor(id: &'static str, name: &'static str, crop_factor: f64) -> SensorSpec {
    SensorSpec {
        id,
        name,
        crop_factor,
    }
}

static SENSORS: [SensorSpec; 32] = [
    sensor("medium-format", "Medium Format", 0.7),
    sensor("full-frame", "Full Frame", 1.0),
    sensor("aps-h", "APS-H", 1.3),
    sensor("aps-c-canon", "APS-C (Canon)", 1.6),
    sensor("aps-c", "APS-C", 1.5),
    sensor("micro-four-thirds", "Micro Four Thirds", 2.0),
    sensor("1-inch", "1-inch", 2.7),
    sensor("1/1.14", "1/1.14-inch", 3.05),
    sensor("1/1.28", "1/1.28-inch", 3.26),
    sensor("1/1.3", "1/1.3-inch", 3.4),
    sensor("1/1.31", "1/1.31-inch", 3.43),
    sensor("1/1.35", "1/1.35-inch", 3.47),
    sensor("1/1.4", "1/1.4-inch", 3.7),
    sensor("1/1.49", "1/1.49-inch", 3.85),
    sensor("1/1.5", "1/1.5-inch", 3.9),
    sensor("1/1.56", "1/1.56-inch", 4.0),
    sensor("1/1.57", "1/1.57-inch", 4.05),
    sensor("1/1.6", "1/1.6-inch", 4.1),
    sensor("1/1.7", "1/1.7-inch", 4.5),
    sensor("1/1.74", "1/1.74-inch", 4.6),
    sensor("1/1.78", "1/1.78-inch", 4.7),
    sensor("1/1.95", "1/1.95-inch", 5.0),
    sensor("1/2", "1/2-inch", 5.1),
    sensor("1/2.3", "1/2.3-inch", 5.64),
    sensor("1/2.55", "1/2.55-inch", 6.3),
    sensor("1/2.76", "1/2.76-inch", 6.7),
    sensor("1/3", "1/3-inch", 7.21),
    sensor("1/3.06", "1/3.06-inch", 7.4),
    sensor("1/3.2", "1/3.2-inch", 7.7),
    sensor("1/3.4", "1/3.4-inch", 8.1),
    sensor("1/3.6", "1/3.6-inch", 8.6),
    sensor("1/4", "1/4-inch", 9.6),
];

/// Prefix shared by every fractional-inch identifier.
pub const FRACTIONAL_PREFIX: &str = "1/";

/// All registered sensors, in table order.
pub fn all() -> &'static [SensorSpec] {
    &SENSORS
}

/// Look up a sensor by identifier. `None` means the id is not registered.
pub fn lookup(id: &str) -> Option<&'static SensorSpec> {
    SENSORS.iter().find(|s| s.id == id)
}

/// Parse the optical-format denominator out of a `1/<d>` identifier.
///
/// Returns `None` for named formats, and for a `1/` tail that is not a
/// positive finite number.
///
/// ```
/// # use lensify::sensors::fractional_denominator;
/// assert_eq!(fractional_denominator("1/2.3"), Some(2.3));
/// assert_eq!(fractional_denominator("full-frame"), None);
/// ```
pub fn fractional_denominator(id: &str) -> Option<f64> {
    let tail = id.strip_prefix(FRACTIONAL_PREFIX)?;
    tail.parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d > 0.0)
}
