//! Geometry helpers used by the routing pipeline.
//!
//! # Responsibilities
//! - Great-circle distance between two coordinates (straight-line fallback)
//! - Decoding of encoded polylines returned by Valhalla-compatible providers
//!
//! Both are pure functions with no I/O.

pub mod haversine;
pub mod polyline;

pub use haversine::{haversine_distance_km, EARTH_RADIUS_KM};
pub use polyline::{decode_polyline, decode_polyline_with_precision, PolylineError, DEFAULT_PRECISION};
