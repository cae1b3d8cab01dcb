// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Great-circle distance.

use crate::angle::{dcos, dsin};
use crate::coordinates::{Coordinates, KAABA};

/// Earth's mean radius in kilometres.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6_371.0;

/// Haversine distance between two points, in kilometres.
pub fn calculate_distance(a: Coordinates, b: Coordinates) -> f64 {
    let half_d_lat = (b.lat() - a.lat()) / 2.0;
    let half_d_lon = (b.lon() - a.lon()) / 2.0;
    let h = dsin(half_d_lat).powi(2) + dcos(a.lat()) * dcos(b.lat()) * dsin(half_d_lon).powi(2);
    // Rounding can push h just past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_MEAN_RADIUS_KM * c
}

/// Distance from `coords` to the Kaaba, in kilometres.
#[inline]
pub fn distance_to_kaaba(coords: Coordinates) -> f64 {
    calculate_distance(coords, KAABA)
}
