//! Numeric helpers shared by both calculations.
//!
//! Every derived field is rounded to a fixed number of decimals before it is
//! reported, and every input is checked for being finite and positive before
//! any arithmetic runs. Keeping both here means the two calculations cannot
//! drift apart on either.

/// Round `value` to `decimals` places.
///
/// Rounding looks at the exact binary value, so `3.1499999999999999` (the
/// product `4.5 * 0.7`) stays below the half and rounds down. Values that are
/// exactly halfway round away from zero.
///
/// ```
/// # use lensify::numeric::round_to;
/// assert_eq!(round_to(1.4 * 0.7, 1), 1.0);
/// assert_eq!(round_to(4.5 * 0.7, 1), 3.1);
/// assert_eq!(round_to(0.125, 2), 0.13);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let magnitude = value.abs();
    let rounded = if is_exact_half(magnitude, decimals) {
        // magnitude * scale is exactly k + 0.5 here
        let scale = 10f64.powi(decimals as i32);
        (magnitude * scale).round() / scale
    } else {
        format!("{magnitude:.prec$}", prec = decimals as usize)
            .parse()
            .unwrap_or(magnitude)
    };
    // -0.0 would print as "-0"
    if rounded == 0.0 { 0.0 } else { rounded.copysign(value) }
}

/// True when `magnitude` lies exactly halfway between two multiples of
/// `10^-decimals`, i.e. `magnitude * 2^(decimals + 1)` is an odd integer.
fn is_exact_half(magnitude: f64, decimals: u32) -> bool {
    let scaled = magnitude * 2f64.powi(decimals as i32 + 1);
    scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 == 1.0
}

/// Format a percentage with one fixed decimal and a trailing `%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", round_to(value, 1))
}

/// Round a fractional-inch denominator to 2 places and print it in its
/// shortest form (`2.3`, `3.45`, `4`).
pub fn format_denominator(value: f64) -> String {
    format!("{}", round_to(value, 2))
}

/// `Some(value)` when it is finite and strictly positive.
pub fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Reject anything that is not a finite, strictly positive number.
pub fn require_positive<E>(value: f64, err: E) -> Result<f64, E> {
    positive(value).ok_or(err)
}

/// Parse an optional transport-level string into a number.
///
/// Missing or unparseable input becomes `NaN`, which [`require_positive`]
/// then rejects with the field-specific error.
pub fn parse_or_nan(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
