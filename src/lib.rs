//! # Lensify
//!
//! Photographic equivalence across sensor sizes: what aperture a full-frame
//! camera would need to match a smaller sensor, and what a focal-length
//! change done as digital zoom does to crop factor, aperture, field of view
//! and effective sensor size.
//!
//! # Architecture: Pure Core, Thin Surfaces
//!
//! ```text
//! sensors ─┐
//! numeric ─┼─> aperture ─┐
//! error  ──┘   focal ────┼─> api (axum JSON + page)   lensify serve
//!                        └─> output (text)            lensify aperture|focal
//! ```
//!
//! The calculations are synchronous, stateless functions of their scalar
//! inputs. They take `&str`/`f64`, return plain serializable structs, and
//! reject bad input with a [`ValidationError`](error::ValidationError) before
//! any arithmetic runs. The HTTP API, the HTML page and the CLI all call the
//! same two functions, so there is a single source of truth for the math.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sensors`] | The fixed, ordered sensor registry and fractional-inch id parsing |
//! | [`numeric`] | Rounding, percent/denominator formatting, positivity checks |
//! | [`error`] | `ValidationError`, with the field that failed |
//! | [`aperture`] | Equivalent aperture at a fixed focal length |
//! | [`focal`] | Digital-zoom equivalence report and nearest-sensor search |
//! | [`config`] | `lensify.toml` loading, merging and validation |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`api`] | axum router, CORS, `serve` |
//! | [`page`] | Server-rendered calculator page (Maud) |
//! | [`output`] | CLI text formatting |
//!
//! # Design Decisions
//!
//! ## Strict Validation
//!
//! Unknown sensors and non-positive or non-finite numbers are rejected with
//! an error naming the field. Nothing is silently defaulted: a crop factor of
//! 1.0 for an unknown sensor would produce plausible-looking but wrong output.
//!
//! ## Ordered Registry
//!
//! The registry is a static array rather than a map. The nearest-sensor
//! search keeps the first minimum it sees, so table order decides ties and
//! must not depend on hashing.

pub mod api;
pub mod aperture;
pub mod config;
pub mod error;
pub mod focal;
pub mod logging;
pub mod numeric;
pub mod output;
pub mod page;
pub mod sensors;

pub use aperture::{ApertureResult, compute_aperture_equivalence};
pub use error::ValidationError;
pub use focal::{EquivalenceReport, compute_focal_equivalence};

/// Package version reported by the health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
