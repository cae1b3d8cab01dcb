// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-precision solar position.
//!
//! First-order analytical model of the apparent Sun (the "low precision"
//! almanac formulas): mean anomaly and mean longitude are linear in days
//! since J2000.0, the equation of centre is truncated after two terms and
//! obliquity drifts linearly. Prayer-time accuracy is ≈1–2 minutes.

use crate::angle::{darcsin, darctan2, dcos, dsin, fix_angle, fix_hour};
use crate::julian::JulianDay;
use qtty::Degrees;

/// Sun's declination and the equation of time at an instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolarPosition {
    /// Apparent geocentric declination.
    pub declination: Degrees,
    /// Apparent minus mean solar time, in hours, wrapped into `(-12, 12]`.
    pub equation_of_time: f64,
    /// Apparent ecliptic longitude.
    pub ecliptic_longitude: Degrees,
}

impl SolarPosition {
    /// Solar position at `jd`.
    pub fn at(jd: JulianDay) -> Self {
        let d = jd.days_since_j2000().value();

        let g = fix_angle(357.529 + 0.985_600_28 * d);
        let q = fix_angle(280.459 + 0.985_647_36 * d);
        let l = fix_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2.0 * g));

        let e = 23.439 - 0.000_000_36 * d;
        let declination = darcsin(dsin(e) * dsin(l));
        let right_ascension = darctan2(dcos(e) * dsin(l), dcos(l)) / 15.0;

        let mut equation_of_time = q / 15.0 - fix_hour(right_ascension);
        // q and RA wrap independently; the raw difference may be off by a day.
        if equation_of_time > 12.0 {
            equation_of_time -= 24.0;
        } else if equation_of_time <= -12.0 {
            equation_of_time += 24.0;
        }

        Self {
            declination: Degrees::new(declination),
            equation_of_time,
            ecliptic_longitude: Degrees::new(l),
        }
    }

    /// Equation of time in minutes.
    #[inline]
    pub fn equation_of_time_minutes(&self) -> f64 {
        self.equation_of_time * 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32) -> SolarPosition {
        SolarPosition::at(JulianDay::from_utc(
            Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn solstice_declination_near_obliquity() {
        let june = at(2024, 6, 21);
        let december = at(2024, 12, 21);
        assert!((june.declination.value() - 23.43).abs() < 0.05);
        assert!((december.declination.value() + 23.43).abs() < 0.05);
    }

    #[test]
    fn equinox_declination_near_zero() {
        let march = at(2024, 3, 20);
        assert!(march.declination.value().abs() < 0.5);
        assert!(march.ecliptic_longitude.value() < 1.0 || march.ecliptic_longitude.value() > 359.0);
    }

    #[test]
    fn equation_of_time_matches_known_extremes() {
        // Early November: sundial ahead by ≈16.4 min.
        let november = at(2024, 11, 3);
        assert!((november.equation_of_time_minutes() - 16.4).abs() < 1.0);
        // Mid February: sundial behind by ≈14.2 min.
        let february = at(2024, 2, 11);
        assert!((february.equation_of_time_minutes() + 14.2).abs() < 1.0);
    }

    #[test]
    fn equation_of_time_is_wrapped_near_ram_crossing() {
        // Around the March equinox q and RA straddle the 0h/24h boundary.
        let march = at(2024, 3, 20);
        assert!(march.equation_of_time.abs() < 0.5);
    }
}
