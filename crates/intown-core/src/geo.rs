//! Great-circle distance between coordinates.
//!
//! Coordinates are decimal degrees. Ranges are not validated: latitudes
//! outside [-90, 90] or longitudes outside [-180, 180] still produce a number,
//! but it has no geographic meaning.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine distance to `other` in kilometers.
    #[must_use]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance_km(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Haversine distance in kilometers between two lat/lng points.
#[must_use]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round to `places` decimal places.
///
/// Rounds the exact binary value through decimal formatting, so `0.245`
/// (stored just below the tie) becomes `0.24`. Scaling by `10^places` first
/// would round the inexact product instead.
#[must_use]
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Round a kilometer distance the way it is displayed to clients.
#[must_use]
pub fn round_km(km: f64) -> f64 {
    round_to(km, 2)
}
