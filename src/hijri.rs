// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tabular (arithmetic) Hijri calendar.
//!
//! The civil tabular calendar repeats every 30 years of 10 631 days. Odd
//! months have 30 days and even months 29, except that Dhu al-Hijjah gains a
//! 30th day in the 11 leap years of each cycle (`(11·y + 14) mod 30 < 11`).
//! Day 1 Muharram 1 AH is Julian Day number 1 948 440 (16 July 622, Julian).
//!
//! Conversions go through chronological Julian Day numbers. A signed day
//! offset lets users align the arithmetic calendar with a local sighting; it
//! is added to the Gregorian date before conversion to Hijri and subtracted
//! on the way back, so both directions agree for any offset.
//!
//! The formulas are total: no bound is placed on the year, although the
//! arithmetic calendar has no historical meaning before 1 AH.

use crate::error::{Error, Result};
use crate::julian::JulianDay;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Month names, Muharram first.
pub const MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-awwal",
    "Rabi' al-thani",
    "Jumada al-ula",
    "Jumada al-akhira",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

/// Julian Day number of 1 Muharram 1 AH.
const EPOCH_DAY_NUMBER: i64 = 1_948_440;
/// Days in one 30-year cycle.
const CYCLE_DAYS: i64 = 10_631;

/// `true` when Dhu al-Hijjah of `year` has 30 days.
pub fn is_leap_year(year: i64) -> bool {
    (11 * year + 14).rem_euclid(30) < 11
}

/// Number of days in `month` (1–12) of `year`.
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        12 if is_leap_year(year) => 30,
        12 => 29,
        m if m % 2 == 1 => 30,
        _ => 29,
    }
}

/// Chronological Julian Day number of a Hijri date.
fn to_day_number(year: i64, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    (11 * year + 3).div_euclid(30) + 354 * year + 30 * month - (month - 1).div_euclid(2)
        + i64::from(day)
        + EPOCH_DAY_NUMBER
        - 385
}

/// A date in the tabular Hijri calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HijriDate {
    pub year: i64,
    /// 1 = Muharram … 12 = Dhu al-Hijjah.
    pub month: u32,
    pub day: u32,
}

impl HijriDate {
    /// Checked constructor.
    pub fn new(year: i64, month: u32, day: u32) -> Result<Self> {
        if (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month) {
            Ok(Self { year, month, day })
        } else {
            Err(Error::InvalidHijriDate { year, month, day })
        }
    }

    /// Hijri date of a chronological Julian Day number.
    ///
    /// Exact inverse of [`HijriDate::day_number`].
    pub fn from_day_number(day_number: i64) -> Self {
        let year = (30 * (day_number - EPOCH_DAY_NUMBER) + 10_646).div_euclid(CYCLE_DAYS);
        let into_year = day_number - (29 + to_day_number(year, 1, 1));
        // ceil(into_year / 29.5) + 1
        let month = (-(-2 * into_year).div_euclid(59) + 1).clamp(1, 12) as u32;
        let day = (day_number - to_day_number(year, month, 1) + 1) as u32;
        Self { year, month, day }
    }

    /// Chronological Julian Day number of this date.
    pub fn day_number(&self) -> i64 {
        to_day_number(self.year, self.month, self.day)
    }

    /// English transliterated month name.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES
            .get(self.month.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or("")
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// First day of the following month.
    pub fn next_month(&self) -> Self {
        let (year, month) = if self.month >= 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self { year, month, day: 1 }
    }

    /// First day of the preceding month.
    pub fn previous_month(&self) -> Self {
        let (year, month) = if self.month <= 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self { year, month, day: 1 }
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name(), self.year)
    }
}

/// Hijri date of a Gregorian civil date, shifted by `day_offset` days.
pub fn gregorian_to_hijri(date: NaiveDate, day_offset: i32) -> HijriDate {
    let day_number = JulianDay::from_date(date).day_number() + i64::from(day_offset);
    HijriDate::from_day_number(day_number)
}

/// Hijri date of the UTC day containing `instant`.
pub fn hijri_from_instant(instant: DateTime<Utc>, day_offset: i32) -> HijriDate {
    let day_number = JulianDay::from_utc(instant).day_number() + i64::from(day_offset);
    HijriDate::from_day_number(day_number)
}

/// Gregorian civil date of a Hijri date, undoing `day_offset`.
///
/// The inputs are not validated; out-of-range months and days are carried
/// through the arithmetic. Returns `None` only outside chrono's date range.
pub fn hijri_to_gregorian(year: i64, month: u32, day: u32, day_offset: i32) -> Option<NaiveDate> {
    let day_number = to_day_number(year, month, day) - i64::from(day_offset);
    JulianDay::from_day_number(day_number).to_date()
}

/// Gregorian date of every day of a Hijri month, in order.
pub fn month_days(year: i64, month: u32, day_offset: i32) -> Vec<(HijriDate, NaiveDate)> {
    (1..=days_in_month(year, month))
        .filter_map(|day| {
            let gregorian = hijri_to_gregorian(year, month, day, day_offset)?;
            Some((HijriDate { year, month, day }, gregorian))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn known_conversions() {
        let h = gregorian_to_hijri(date(2024, 3, 15), 0);
        assert_eq!((h.year, h.month, h.day), (1445, 9, 5));
        assert_eq!(h.month_name(), "Ramadan");
        assert_eq!(h.to_string(), "5 Ramadan 1445 AH");

        assert_eq!(hijri_to_gregorian(1445, 9, 1, 0), Some(date(2024, 3, 11)));
    }

    #[test]
    fn epoch_is_first_of_muharram() {
        let h = HijriDate::from_day_number(EPOCH_DAY_NUMBER);
        assert_eq!((h.year, h.month, h.day), (1, 1, 1));
        assert_eq!(h.day_number(), EPOCH_DAY_NUMBER);
    }

    #[test]
    fn offset_shifts_and_roundtrips() {
        let base = gregorian_to_hijri(date(2024, 3, 15), 0);
        let plus_one = gregorian_to_hijri(date(2024, 3, 15), 1);
        assert_eq!(plus_one.day, base.day + 1);

        for offset in -5..=5 {
            let g = hijri_to_gregorian(1445, 9, 5, offset).unwrap();
            let h = gregorian_to_hijri(g, offset);
            assert_eq!((h.year, h.month, h.day), (1445, 9, 5), "offset {offset}");
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(1445, 1), 30);
        assert_eq!(days_in_month(1445, 2), 29);
        assert!(is_leap_year(1445) || days_in_month(1445, 12) == 29);
        // Leap years of the cycle: 2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29.
        let leaps: Vec<i64> = (1..=30).filter(|&y| is_leap_year(y)).collect();
        assert_eq!(leaps, vec![2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29]);
        assert_eq!(days_in_month(2, 12), 30);
        assert_eq!(days_in_month(3, 12), 29);
    }

    #[test]
    fn cycle_has_10631_days() {
        let start = HijriDate::new(1441, 1, 1).unwrap().day_number();
        let end = HijriDate::new(1471, 1, 1).unwrap().day_number();
        assert_eq!(end - start, CYCLE_DAYS);
    }

    #[test]
    fn checked_constructor_rejects_invalid_days() {
        assert!(HijriDate::new(1445, 2, 30).is_err());
        assert!(HijriDate::new(1445, 13, 1).is_err());
        assert!(HijriDate::new(1445, 0, 1).is_err());
        assert!(HijriDate::new(1445, 1, 0).is_err());
        assert!(HijriDate::new(1445, 1, 30).is_ok());
    }

    #[test]
    fn month_navigation_wraps_years() {
        let h = HijriDate::new(1445, 12, 10).unwrap();
        assert_eq!(h.next_month(), HijriDate::new(1446, 1, 1).unwrap());
        let h = HijriDate::new(1446, 1, 10).unwrap();
        assert_eq!(h.previous_month(), HijriDate::new(1445, 12, 1).unwrap());
    }

    #[test]
    fn month_grid_is_consecutive() {
        let days = month_days(1445, 9, 0);
        assert_eq!(days.len(), 30);
        for pair in days.windows(2) {
            assert_eq!(pair[1].1.signed_duration_since(pair[0].1).num_days(), 1);
        }
        assert_eq!(days[0].1, date(2024, 3, 11));
    }

    #[test]
    fn instant_uses_utc_day() {
        use chrono::TimeZone;
        let late = Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap();
        assert_eq!(hijri_from_instant(late, 0), gregorian_to_hijri(date(2024, 3, 15), 0));
    }
}
