// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Prayer time computation.
//!
//! Every time is an hour angle away from solar noon. For a target solar
//! altitude `a` the hour angle `H` solves
//!
//! ```text
//! cos H = (sin a − sin φ · sin δ) / (cos φ · cos δ)
//! ```
//!
//! and the event happens at `dhuhr ∓ H/15` hours. When `|cos H| > 1` the Sun
//! never reaches `a` on that day and the time is reported as
//! [`PrayerTime::Unavailable`]; the computation itself never fails.

use crate::angle::{darccos, darctan, dcos, dsin, dtan, fix_hour};
use crate::coordinates::Coordinates;
use crate::julian::JulianDay;
use crate::method::{CalculationMethod, IshaRule, Madhab};
use crate::prayer::{Adjustments, ClockTime, Prayer, PrayerTime, PrayerTimes};
use crate::solar::SolarPosition;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use log::debug;

/// Altitude of the Sun's upper limb at apparent sunrise and sunset:
/// 34′ of refraction plus a 16′ semi-diameter.
pub const SUNRISE_ALTITUDE: f64 = -0.833;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Direction {
    /// Before solar noon.
    Rising,
    /// After solar noon.
    Setting,
}

/// Fractional-hour times of one day, before rounding and adjustments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RawTimes {
    pub fajr: Option<f64>,
    pub sunrise: Option<f64>,
    pub dhuhr: f64,
    pub asr: Option<f64>,
    pub maghrib: Option<f64>,
    pub isha: Option<f64>,
}

impl RawTimes {
    /// Solve all six times for an instant.
    ///
    /// `utc_offset_hours` places the result on the caller's wall clock.
    pub fn solve(
        jd: JulianDay,
        coords: Coordinates,
        method: CalculationMethod,
        madhab: Madhab,
        utc_offset_hours: f64,
    ) -> Self {
        let sun = SolarPosition::at(jd);
        let lat = coords.lat();
        let dec = sun.declination.value();

        let dhuhr = fix_hour(12.0 + utc_offset_hours - coords.lon() / 15.0 - sun.equation_of_time);

        let sun_time = |altitude: f64, direction: Direction| -> Option<f64> {
            let cos_h = (dsin(altitude) - dsin(lat) * dsin(dec)) / (dcos(lat) * dcos(dec));
            // NaN (e.g. at the poles) fails the range test as well.
            if !(-1.0..=1.0).contains(&cos_h) {
                return None;
            }
            let h = darccos(cos_h) / 15.0;
            Some(match direction {
                Direction::Rising => dhuhr - h,
                Direction::Setting => dhuhr + h,
            })
        };

        let params = method.params();
        let fajr = sun_time(-params.fajr_angle.value(), Direction::Rising);
        let sunrise = sun_time(SUNRISE_ALTITUDE, Direction::Rising);
        let maghrib = sun_time(SUNRISE_ALTITUDE, Direction::Setting);
        let isha = match params.isha {
            IshaRule::Angle(angle) => sun_time(-angle.value(), Direction::Setting),
            IshaRule::AfterMaghrib(minutes) => maghrib.map(|m| m + f64::from(minutes) / 60.0),
        };

        let asr_altitude =
            darctan(1.0 / (madhab.shadow_factor() + dtan((lat - dec).abs())));
        let asr = sun_time(asr_altitude, Direction::Setting);

        Self {
            fajr,
            sunrise,
            dhuhr,
            asr,
            maghrib,
            isha,
        }
    }

    pub fn get(&self, prayer: Prayer) -> Option<f64> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => Some(self.dhuhr),
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }
}

/// Wall-clock reading of `instant` at `utc_offset_hours` east of UTC.
pub fn local_datetime(instant: DateTime<Utc>, utc_offset_hours: f64) -> NaiveDateTime {
    let offset_secs = (utc_offset_hours * 3_600.0).round() as i64;
    TimeDelta::try_seconds(offset_secs)
        .and_then(|d| instant.naive_utc().checked_add_signed(d))
        .unwrap_or_else(|| instant.naive_utc())
}

/// Compute the six times of the day containing `instant`.
///
/// `utc_offset_hours` is the local offset east of UTC (e.g. `6.0` for
/// Dhaka); the returned date is the local civil date of `instant`.
pub fn compute_prayer_times(
    instant: DateTime<Utc>,
    coords: Coordinates,
    method: CalculationMethod,
    madhab: Madhab,
    adjustments: &Adjustments,
    utc_offset_hours: f64,
) -> PrayerTimes {
    let raw = RawTimes::solve(
        JulianDay::from_utc(instant),
        coords,
        method,
        madhab,
        utc_offset_hours,
    );

    let local = local_datetime(instant, utc_offset_hours);

    let time = |prayer: Prayer| -> PrayerTime {
        let t = PrayerTime::from(raw.get(prayer).and_then(ClockTime::from_fractional_hours));
        if !t.is_available() {
            debug!(target: "miqat", "{prayer} unavailable at {coords} on {}", local.date());
        }
        t.adjusted(adjustments.get(prayer))
    };

    PrayerTimes {
        date: local.date(),
        fajr: time(Prayer::Fajr),
        sunrise: time(Prayer::Sunrise),
        dhuhr: time(Prayer::Dhuhr),
        asr: time(Prayer::Asr),
        maghrib: time(Prayer::Maghrib),
        isha: time(Prayer::Isha),
    }
}

/// [`compute_prayer_times`] with the UTC offset taken from `instant`.
pub fn compute_prayer_times_local(
    instant: DateTime<FixedOffset>,
    coords: Coordinates,
    method: CalculationMethod,
    madhab: Madhab,
    adjustments: &Adjustments,
) -> PrayerTimes {
    let offset_hours = f64::from(instant.offset().local_minus_utc()) / 3_600.0;
    compute_prayer_times(
        instant.with_timezone(&Utc),
        coords,
        method,
        madhab,
        adjustments,
        offset_hours,
    )
}

/// Location and method settings bundled for repeated computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerCalculator {
    pub coordinates: Coordinates,
    pub method: CalculationMethod,
    pub madhab: Madhab,
    pub adjustments: Adjustments,
    pub utc_offset_hours: f64,
}

impl PrayerCalculator {
    pub fn new(coordinates: Coordinates, utc_offset_hours: f64) -> Self {
        Self {
            coordinates,
            method: CalculationMethod::default(),
            madhab: Madhab::default(),
            adjustments: Adjustments::default(),
            utc_offset_hours,
        }
    }

    pub fn with_method(mut self, method: CalculationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = madhab;
        self
    }

    pub fn with_adjustments(mut self, adjustments: Adjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    /// Wall-clock reading of `instant` at this calculator's offset.
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        local_datetime(instant, self.utc_offset_hours)
    }

    pub fn times_at(&self, instant: DateTime<Utc>) -> PrayerTimes {
        compute_prayer_times(
            instant,
            self.coordinates,
            self.method,
            self.madhab,
            &self.adjustments,
            self.utc_offset_hours,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DHAKA: Coordinates = Coordinates::new(23.8103, 90.4125);

    fn dhaka_noon() -> DateTime<Utc> {
        // 12:00 local (UTC+6)
        Utc.with_ymd_and_hms(2024, 3, 15, 6, 0, 0).unwrap()
    }

    fn minutes(t: PrayerTime) -> u32 {
        t.minutes().expect("available")
    }

    #[test]
    fn dhaka_mwl_matches_reference_minutes() {
        let times = compute_prayer_times(
            dhaka_noon(),
            DHAKA,
            CalculationMethod::Mwl,
            Madhab::Shafi,
            &Adjustments::default(),
            6.0,
        );
        assert_eq!(times.date.to_string(), "2024-03-15");
        assert_eq!(times.fajr.to_string(), "04:52 AM");
        assert_eq!(times.sunrise.to_string(), "06:07 AM");
        assert_eq!(times.dhuhr.to_string(), "12:07 PM");
        assert_eq!(times.asr.to_string(), "03:32 PM");
        assert_eq!(times.maghrib.to_string(), "06:07 PM");
        assert_eq!(times.isha.to_string(), "07:18 PM");
    }

    #[test]
    fn hanafi_asr_is_later() {
        let shafi = compute_prayer_times(
            dhaka_noon(),
            DHAKA,
            CalculationMethod::Mwl,
            Madhab::Shafi,
            &Adjustments::default(),
            6.0,
        );
        let hanafi = compute_prayer_times(
            dhaka_noon(),
            DHAKA,
            CalculationMethod::Mwl,
            Madhab::Hanafi,
            &Adjustments::default(),
            6.0,
        );
        assert_eq!(hanafi.asr.to_string(), "04:27 PM");
        assert!(minutes(hanafi.asr) > minutes(shafi.asr));
        assert_eq!(hanafi.fajr, shafi.fajr);
    }

    #[test]
    fn umm_al_qura_isha_is_ninety_minutes_after_maghrib() {
        let times = compute_prayer_times(
            dhaka_noon(),
            DHAKA,
            CalculationMethod::UmmAlQura,
            Madhab::Shafi,
            &Adjustments::default(),
            6.0,
        );
        assert_eq!(minutes(times.isha), minutes(times.maghrib) + 90);
        assert_eq!(times.fajr.to_string(), "04:50 AM");
    }

    #[test]
    fn polar_summer_reports_unavailable() {
        let tromso = Coordinates::new(70.0, 20.0);
        let instant = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let times = compute_prayer_times(
            instant,
            tromso,
            CalculationMethod::Mwl,
            Madhab::Shafi,
            &Adjustments::default(),
            1.0,
        );
        assert_eq!(times.fajr, PrayerTime::Unavailable);
        assert_eq!(times.sunrise, PrayerTime::Unavailable);
        assert_eq!(times.maghrib, PrayerTime::Unavailable);
        assert_eq!(times.isha, PrayerTime::Unavailable);
        assert!(times.dhuhr.is_available());
        assert_eq!(times.isha.to_string(), "--:--");
    }

    #[test]
    fn raw_dhuhr_is_noon_corrected_by_equation_of_time() {
        let raw = RawTimes::solve(
            JulianDay::from_utc(dhaka_noon()),
            DHAKA,
            CalculationMethod::Mwl,
            Madhab::Shafi,
            6.0,
        );
        // 12 + 6 − 90.4125/15 ≈ 11.97; eq. of time ≈ −8.8 min in mid March.
        assert!((raw.dhuhr - 12.1199).abs() < 0.01);
    }

    #[test]
    fn local_variant_reads_offset_from_instant() {
        let offset = FixedOffset::east_opt(6 * 3_600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let a = compute_prayer_times_local(
            local,
            DHAKA,
            CalculationMethod::Mwl,
            Madhab::Shafi,
            &Adjustments::default(),
        );
        let b = PrayerCalculator::new(DHAKA, 6.0).times_at(dhaka_noon());
        assert_eq!(a, b);
    }

    #[test]
    fn local_date_follows_offset() {
        // 20:00 UTC on the 14th is 02:00 on the 15th in Dhaka.
        let instant = Utc.with_ymd_and_hms(2024, 3, 14, 20, 0, 0).unwrap();
        let times = PrayerCalculator::new(DHAKA, 6.0).times_at(instant);
        assert_eq!(times.date.to_string(), "2024-03-15");
    }
}
