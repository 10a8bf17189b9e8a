//! Server-rendered calculator page.
//!
//! Two plain GET forms (aperture, focal length) submit back to `/`. When the
//! query carries a form's fields, the page runs the same core calculation
//! the JSON API uses and renders the result below the form. There is no
//! client-side script, so there is no second copy of the math to keep in
//! step with the server.

use maud::{DOCTYPE, Markup, html};
use serde::Deserialize;

use crate::aperture::{ApertureResult, compute_aperture_equivalence};
use crate::error::ValidationError;
use crate::focal::{EquivalenceReport, compute_focal_equivalence};
use crate::numeric::parse_or_nan;
use crate::sensors;

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 44rem; margin: 2rem auto; padding: 0 1rem; color: #111; }
section { border-top: 1px solid #e0e0e0; padding: 1rem 0; }
label { display: block; margin-top: .5rem; }
input, select { width: 100%; padding: .3rem; box-sizing: border-box; }
button { margin-top: .8rem; padding: .4rem 1rem; }
table { border-collapse: collapse; margin-top: 1rem; width: 100%; }
th { text-align: left; font-weight: normal; color: #666; }
td, th { padding: .2rem .5rem; border-bottom: 1px solid #eee; }
.error { color: #b00020; }
"#;

/// Query string of the page; both forms share it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub sensor_size: Option<String>,
    pub aperture: Option<String>,
    pub original_sensor: Option<String>,
    pub original_focal: Option<String>,
    pub new_focal: Option<String>,
    pub focal_aperture: Option<String>,
}

/// Render the page, including results for any submitted form.
pub fn render(query: &PageQuery) -> Markup {
    let aperture = query.sensor_size.as_deref().map(|id| {
        compute_aperture_equivalence(id, parse_or_nan(query.aperture.as_deref()))
    });
    let focal = query.original_sensor.as_deref().map(|id| {
        compute_focal_equivalence(
            id,
            parse_or_nan(query.original_focal.as_deref()),
            parse_or_nan(query.new_focal.as_deref()),
            parse_or_nan(query.focal_aperture.as_deref()),
        )
    });

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Lensify" }
                style { (CSS) }
            }
            body {
                h1 { "Lensify" }
                p { "Sensor size, crop factor and equivalent aperture." }
                (aperture_section(query, aperture.as_ref()))
                (focal_section(query, focal.as_ref()))
            }
        }
    }
}

fn sensor_select(name: &str, selected: Option<&str>) -> Markup {
    let selected = selected.unwrap_or("full-frame");
    html! {
        select name=(name) id=(name) {
            @for s in sensors::all() {
                option value=(s.id) selected[s.id == selected] {
                    (s.name) " (" (num(s.crop_factor)) "×)"
                }
            }
        }
    }
}

fn aperture_section(
    query: &PageQuery,
    result: Option<&Result<ApertureResult, ValidationError>>,
) -> Markup {
    html! {
        section id="aperture-calculator" {
            h2 { "Aperture" }
            form method="get" action="/" {
                label for="sensorSize" { "Sensor" }
                (sensor_select("sensorSize", query.sensor_size.as_deref()))
                label for="aperture" { "Aperture (f/)" }
                input type="text" inputmode="decimal" name="aperture" id="aperture"
                    value=(query.aperture.as_deref().unwrap_or("2.8"));
                button type="submit" { "Calculate" }
            }
            @match result {
                Some(Ok(r)) => {
                    table {
                        (row("Sensor", &r.sensor_name))
                        (row("Crop factor", &num(r.crop_factor)))
                        (row("Input aperture", &format!("f/{}", num(r.input_aperture))))
                        (row("Equivalent aperture", &format!("f/{}", num(r.equivalent_aperture))))
                    }
                }
                Some(Err(e)) => { p.error { (e.to_string()) } }
                None => {}
            }
        }
    }
}

fn focal_section(
    query: &PageQuery,
    result: Option<&Result<EquivalenceReport, ValidationError>>,
) -> Markup {
    html! {
        section id="focal-calculator" {
            h2 { "Focal length" }
            form method="get" action="/" {
                label for="originalSensor" { "Original sensor" }
                (sensor_select("originalSensor", query.original_sensor.as_deref()))
                label for="originalFocal" { "Original focal length (mm)" }
                input type="text" inputmode="decimal" name="originalFocal" id="originalFocal"
                    value=(query.original_focal.as_deref().unwrap_or("50"));
                label for="newFocal" { "New focal length (mm)" }
                input type="text" inputmode="decimal" name="newFocal" id="newFocal"
                    value=(query.new_focal.as_deref().unwrap_or("35"));
                label for="focalAperture" { "Aperture (f/)" }
                input type="text" inputmode="decimal" name="focalAperture" id="focalAperture"
                    value=(query.focal_aperture.as_deref().unwrap_or("1.8"));
                button type="submit" { "Calculate" }
            }
            @match result {
                Some(Ok(r)) => {
                    table {
                        (row("Original sensor", &format!(
                            "{} ({}×)", r.original_sensor.name, num(r.original_sensor.crop_factor)
                        )))
                        (row("Focal length", &format!(
                            "{}mm → {}mm", num(r.original_focal_length), num(r.new_focal_length)
                        )))
                        (row("Exact crop factor", &num(r.exact_crop_factor)))
                        (row("Closest sensor", &format!(
                            "{} ({}×, off by {})",
                            r.closest_sensor.name,
                            num(r.closest_sensor.crop_factor),
                            num(r.crop_factor_difference)
                        )))
                        (row("Effective sensor size", &r.effective_sensor_size))
                        (row("Equivalent aperture", &format!("f/{}", num(r.equivalent_aperture))))
                        (row("Full-frame equivalent focal length", &format!(
                            "{}mm → {}mm",
                            num(r.original_equivalent_focal_length),
                            num(r.new_equivalent_focal_length)
                        )))
                        (row("Angle of view change", &r.angle_of_view_change))
                        (row("Perspective change", &r.perspective_change))
                        (row("Sensor area used", &format!("{}×", num(r.area_ratio))))
                        (row("Relative sensor area", &format!("{}×", num(r.relative_sensor_area))))
                    }
                }
                Some(Err(e)) => { p.error { (e.to_string()) } }
                None => {}
            }
        }
    }
}

fn row(label: &str, value: &str) -> Markup {
    html! {
        tr { th { (label) } td { (value) } }
    }
}

/// Shortest display form of a reported number (`2.8`, `4`).
fn num(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(query: PageQuery) -> String {
        render(&query).into_string()
    }

    #[test]
    fn empty_query_renders_both_forms_without_results() {
        let html = page(PageQuery::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="aperture-calculator""#));
        assert!(html.contains(r#"id="focal-calculator""#));
        assert!(!html.contains("<table>"));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn select_lists_every_sensor_in_order() {
        let html = page(PageQuery::default());
        let mut last = 0;
        for s in sensors::all() {
            let needle = format!(r#"value="{}""#, s.id);
            let pos = html[last..].find(&needle).map(|p| p + last);
            assert!(pos.is_some(), "{} missing or out of order", s.id);
            last = pos.unwrap();
        }
    }

    #[test]
    fn aperture_result_rendered() {
        let html = page(PageQuery {
            sensor_size: Some("micro-four-thirds".into()),
            aperture: Some("1.8".into()),
            ..Default::default()
        });
        assert!(html.contains("f/3.6"));
        assert!(html.contains(r#"<option value="micro-four-thirds" selected>"#));
    }

    #[test]
    fn focal_result_rendered() {
        let html = page(PageQuery {
            original_sensor: Some("full-frame".into()),
            original_focal: Some("50".into()),
            new_focal: Some("35".into()),
            focal_aperture: Some("1.4".into()),
            ..Default::default()
        });
        assert!(html.contains("30.0%"));
        assert!(html.contains("Medium Format"));
        assert!(html.contains("f/1"));
    }

    #[test]
    fn validation_error_rendered_inline() {
        let html = page(PageQuery {
            sensor_size: Some("full-frame".into()),
            aperture: Some("-1".into()),
            ..Default::default()
        });
        assert!(html.contains("Invalid aperture value"));
    }

    #[test]
    fn submitted_values_are_kept_in_inputs() {
        let html = page(PageQuery {
            original_sensor: Some("1/2.3".into()),
            original_focal: Some("4.3".into()),
            new_focal: Some("8.6".into()),
            focal_aperture: Some("3.5".into()),
            ..Default::default()
        });
        assert!(html.contains(r#"value="4.3""#));
        assert!(html.contains(r#"value="8.6""#));
        assert!(html.contains("1/4.6"));
    }

    #[test]
    fn num_uses_shortest_form() {
        assert_eq!(num(4.0), "4");
        assert_eq!(num(2.8), "2.8");
    }
}
