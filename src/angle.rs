// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Degree-based trigonometry and range normalisation.
//!
//! The solar and prayer formulas are written in degrees and hours; these
//! helpers keep the radian conversions in one place.

/// Normalise an angle in degrees to `[0, 360)`.
#[inline]
pub fn fix_angle(degrees: f64) -> f64 {
    wrap(degrees, 360.0)
}

/// Normalise a time of day in hours to `[0, 24)`.
#[inline]
pub fn fix_hour(hours: f64) -> f64 {
    wrap(hours, 24.0)
}

#[inline]
fn wrap(value: f64, period: f64) -> f64 {
    let wrapped = value - period * (value / period).floor();
    // Guards against `-1e-17 - 360 * -1 == 360.0` after rounding.
    if wrapped >= period {
        wrapped - period
    } else {
        wrapped
    }
}

#[inline]
pub fn dsin(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

#[inline]
pub fn dcos(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

#[inline]
pub fn dtan(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

#[inline]
pub fn darcsin(x: f64) -> f64 {
    x.asin().to_degrees()
}

#[inline]
pub fn darccos(x: f64) -> f64 {
    x.acos().to_degrees()
}

#[inline]
pub fn darctan(x: f64) -> f64 {
    x.atan().to_degrees()
}

#[inline]
pub fn darctan2(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_angle_wraps_into_range() {
        assert_eq!(fix_angle(0.0), 0.0);
        assert_eq!(fix_angle(360.0), 0.0);
        assert!((fix_angle(-90.0) - 270.0).abs() < 1e-12);
        assert!((fix_angle(725.5) - 5.5).abs() < 1e-12);
        let tiny = fix_angle(-1e-17);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn fix_hour_wraps_into_range() {
        assert!((fix_hour(25.5) - 1.5).abs() < 1e-12);
        assert!((fix_hour(-0.25) - 23.75).abs() < 1e-12);
        assert_eq!(fix_hour(24.0), 0.0);
    }

    #[test]
    fn degree_trig_matches_known_values() {
        assert!((dsin(30.0) - 0.5).abs() < 1e-12);
        assert!((dcos(60.0) - 0.5).abs() < 1e-12);
        assert!((dtan(45.0) - 1.0).abs() < 1e-12);
        assert!((darcsin(0.5) - 30.0).abs() < 1e-9);
        assert!((darccos(0.5) - 60.0).abs() < 1e-9);
        assert!((darctan(1.0) - 45.0).abs() < 1e-9);
        assert!((darctan2(1.0, -1.0) - 135.0).abs() < 1e-9);
    }
}
