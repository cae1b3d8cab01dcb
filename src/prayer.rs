// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Prayer identifiers, clock times and the daily result record.
//!
//! Times are carried as whole minutes of the local civil day. Formatting to
//! the 12-hour display form happens only at the edge, so the scheduler can
//! compare integers instead of strings.

use crate::error::Error;
use chrono::{NaiveDate, NaiveTime};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display marker for a time that does not occur on the given day.
pub const UNAVAILABLE: &str = "--:--";

const MINUTES_PER_DAY: i64 = 1_440;

// ═══════════════════════════════════════════════════════════════════════════
// Prayer
// ═══════════════════════════════════════════════════════════════════════════

/// The six daily events, in civil order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Self::Fajr,
        Self::Sunrise,
        Self::Dhuhr,
        Self::Asr,
        Self::Maghrib,
        Self::Isha,
    ];

    /// Prayers that carry an azan, in the order the scheduler checks them.
    pub const AZAN: [Prayer; 5] = [
        Self::Fajr,
        Self::Dhuhr,
        Self::Asr,
        Self::Maghrib,
        Self::Isha,
    ];

    /// Stable lowercase key used in settings and event ids.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Fajr => "fajr",
            Self::Sunrise => "sunrise",
            Self::Dhuhr => "dhuhr",
            Self::Asr => "asr",
            Self::Maghrib => "maghrib",
            Self::Isha => "isha",
        }
    }

    pub const fn has_azan(self) -> bool {
        !matches!(self, Self::Sunrise)
    }

    /// Position within [`Prayer::AZAN`], `None` for sunrise.
    pub const fn azan_index(self) -> Option<usize> {
        match self {
            Self::Fajr => Some(0),
            Self::Sunrise => None,
            Self::Dhuhr => Some(1),
            Self::Asr => Some(2),
            Self::Maghrib => Some(3),
            Self::Isha => Some(4),
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Prayer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownPrayer(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ClockTime
// ═══════════════════════════════════════════════════════════════════════════

/// A wall-clock time of day with minute resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    pub const MIDNIGHT: Self = Self { minutes: 0 };

    /// Build from any minute count; wraps into the day.
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            minutes: minutes.rem_euclid(MINUTES_PER_DAY) as u16,
        }
    }

    pub fn from_hm(hour: u32, minute: u32) -> Self {
        Self::from_minutes(i64::from(hour) * 60 + i64::from(minute))
    }

    /// Round a fractional hour to the nearest minute.
    ///
    /// Equivalent to flooring the hour and rounding the remaining minutes.
    /// Returns `None` for NaN or infinite input.
    pub fn from_fractional_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() {
            return None;
        }
        Some(Self::from_minutes((hours * 60.0).round() as i64))
    }

    /// Minutes since local midnight, in `0..1440`.
    #[inline]
    pub const fn minutes(self) -> u32 {
        self.minutes as u32
    }

    #[inline]
    pub const fn hour(self) -> u32 {
        self.minutes() / 60
    }

    #[inline]
    pub const fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Shift by a signed number of minutes, wrapping around midnight.
    pub fn offset(self, minutes: i32) -> Self {
        Self::from_minutes(i64::from(self.minutes) + i64::from(minutes))
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(self.minutes() * 60, 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// `"05:30 AM"`, `"12:05 PM"`, `"12:00 AM"` for midnight.
    pub fn format_12h(self) -> String {
        let meridiem = if self.hour() < 12 { "AM" } else { "PM" };
        let hour = match self.hour() % 12 {
            0 => 12,
            h => h,
        };
        format!("{:02}:{:02} {}", hour, self.minute(), meridiem)
    }

    /// `"17:30"`.
    pub fn format_24h(self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        use chrono::Timelike;
        Self::from_hm(time.hour(), time.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_12h())
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    /// Accepts `"hh:mm"` (24-hour) or `"hh:mm AM|PM"` (12-hour).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || Error::InvalidClockTime(s.to_string());
        let mut parts = s.split_whitespace();
        let clock = parts.next().ok_or_else(err)?;
        let meridiem = parts.next();
        if parts.next().is_some() {
            return Err(err());
        }

        let (h, m) = clock.split_once(':').ok_or_else(err)?;
        let mut hour: u32 = h.parse().map_err(|_| err())?;
        let minute: u32 = m.parse().map_err(|_| err())?;
        if minute >= 60 {
            return Err(err());
        }

        match meridiem.map(str::to_ascii_uppercase).as_deref() {
            None if hour < 24 => {}
            Some("AM") if (1..=12).contains(&hour) => {
                if hour == 12 {
                    hour = 0;
                }
            }
            Some("PM") if (1..=12).contains(&hour) => {
                if hour < 12 {
                    hour += 12;
                }
            }
            _ => return Err(err()),
        }
        Ok(Self::from_hm(hour, minute))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PrayerTime
// ═══════════════════════════════════════════════════════════════════════════

/// A computed prayer time, or the sentinel for an unsolvable solar angle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrayerTime {
    At(ClockTime),
    /// The sun never reaches the required altitude on this day.
    Unavailable,
}

impl PrayerTime {
    #[inline]
    pub fn clock(self) -> Option<ClockTime> {
        match self {
            Self::At(t) => Some(t),
            Self::Unavailable => None,
        }
    }

    #[inline]
    pub fn minutes(self) -> Option<u32> {
        self.clock().map(ClockTime::minutes)
    }

    #[inline]
    pub fn is_available(self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Apply a minute adjustment; the sentinel stays unavailable.
    pub fn adjusted(self, minutes: i32) -> Self {
        match self {
            Self::At(t) => Self::At(t.offset(minutes)),
            Self::Unavailable => Self::Unavailable,
        }
    }
}

impl From<Option<ClockTime>> for PrayerTime {
    fn from(value: Option<ClockTime>) -> Self {
        value.map_or(Self::Unavailable, Self::At)
    }
}

impl fmt::Display for PrayerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(t) => t.fmt(f),
            Self::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Adjustments
// ═══════════════════════════════════════════════════════════════════════════

/// Per-prayer minute offsets added after the angle computation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Adjustments {
    pub fajr: i32,
    pub sunrise: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl Adjustments {
    pub fn get(&self, prayer: Prayer) -> i32 {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    pub fn set(&mut self, prayer: Prayer, minutes: i32) {
        let slot = match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Sunrise => &mut self.sunrise,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
        };
        *slot = minutes;
    }

    /// Builder form of [`Adjustments::set`].
    pub fn with(mut self, prayer: Prayer, minutes: i32) -> Self {
        self.set(prayer, minutes);
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PrayerTimes
// ═══════════════════════════════════════════════════════════════════════════

/// The six times of one local civil day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerTimes {
    pub date: NaiveDate,
    pub fajr: PrayerTime,
    pub sunrise: PrayerTime,
    pub dhuhr: PrayerTime,
    pub asr: PrayerTime,
    pub maghrib: PrayerTime,
    pub isha: PrayerTime,
}

impl PrayerTimes {
    pub fn get(&self, prayer: Prayer) -> PrayerTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, PrayerTime)> + '_ {
        Prayer::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Available times on a minute axis anchored at dhuhr.
    ///
    /// Morning times after dhuhr belong to the night before and evening
    /// times before dhuhr to the night after, so an isha that wraps past
    /// midnight sorts after maghrib. Axis values may leave `0..1440`.
    fn timeline(&self) -> Vec<(Prayer, ClockTime, i64)> {
        let anchor = self.dhuhr.minutes().map_or(720, i64::from);
        self.iter()
            .filter_map(|(p, t)| t.clock().map(|c| (p, c)))
            .map(|(p, c)| {
                let m = i64::from(c.minutes());
                let axis = match p {
                    Prayer::Fajr | Prayer::Sunrise if m > anchor => m - MINUTES_PER_DAY,
                    Prayer::Asr | Prayer::Maghrib | Prayer::Isha if m < anchor => {
                        m + MINUTES_PER_DAY
                    }
                    _ => m,
                };
                (p, c, axis)
            })
            .collect()
    }

    /// [`PrayerTimes::timeline`] preceded by last night's wrapped times.
    fn chain(&self) -> (Vec<(Prayer, ClockTime, i64)>, bool) {
        let timeline = self.timeline();
        let mut chain: Vec<_> = timeline
            .iter()
            .filter(|&&(_, _, axis)| axis >= MINUTES_PER_DAY)
            .map(|&(p, c, axis)| (p, c, axis - MINUTES_PER_DAY))
            .collect();
        let wrapped = !chain.is_empty();
        chain.extend(timeline);
        (chain, wrapped)
    }

    /// The prayer whose period contains `now` (minute of the day).
    ///
    /// Before fajr the night still belongs to the previous isha. When isha
    /// falls after midnight, the minutes between midnight and isha belong to
    /// maghrib.
    pub fn current_prayer(&self, now: ClockTime) -> Prayer {
        let now = i64::from(now.minutes());
        let (chain, wrapped) = self.chain();
        if let Some(&(p, _, _)) = chain.iter().rev().find(|&&(_, _, axis)| axis <= now) {
            return p;
        }
        if !wrapped {
            return Prayer::Isha;
        }
        chain
            .iter()
            .rev()
            .find(|&&(_, _, axis)| (0..MINUTES_PER_DAY).contains(&axis))
            .map_or(Prayer::Isha, |&(p, _, _)| p)
    }

    /// The first available time strictly after `now`, if any remains today.
    ///
    /// An isha past midnight still counts as tonight's.
    pub fn next_prayer(&self, now: ClockTime) -> Option<(Prayer, ClockTime)> {
        let now = i64::from(now.minutes());
        self.chain()
            .0
            .into_iter()
            .find(|&(_, _, axis)| axis > now)
            .map(|(p, c, _)| (p, c))
    }
}

impl fmt::Display for PrayerTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        for (prayer, time) in self.iter() {
            writeln!(f, "  {:<8} {}", prayer.key(), time)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> PrayerTime {
        PrayerTime::At(ClockTime::from_hm(h, m))
    }

    fn sample() -> PrayerTimes {
        PrayerTimes {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            fajr: hm(4, 52),
            sunrise: hm(6, 7),
            dhuhr: hm(12, 7),
            asr: hm(15, 32),
            maghrib: hm(18, 7),
            isha: hm(19, 18),
        }
    }

    #[test]
    fn twelve_hour_formatting_edges() {
        assert_eq!(ClockTime::from_hm(0, 0).format_12h(), "12:00 AM");
        assert_eq!(ClockTime::from_hm(5, 30).format_12h(), "05:30 AM");
        assert_eq!(ClockTime::from_hm(12, 5).format_12h(), "12:05 PM");
        assert_eq!(ClockTime::from_hm(23, 59).format_12h(), "11:59 PM");
        assert_eq!(ClockTime::from_hm(17, 30).format_24h(), "17:30");
    }

    #[test]
    fn parse_handles_meridiem_edges() {
        assert_eq!("12:00 AM".parse::<ClockTime>().unwrap().minutes(), 0);
        assert_eq!("12:30 PM".parse::<ClockTime>().unwrap().minutes(), 750);
        assert_eq!("05:30 AM".parse::<ClockTime>().unwrap().minutes(), 330);
        assert_eq!("07:15 pm".parse::<ClockTime>().unwrap().minutes(), 1155);
        assert_eq!("19:15".parse::<ClockTime>().unwrap().minutes(), 1155);
        assert!("13:00 PM".parse::<ClockTime>().is_err());
        assert!("00:10 AM".parse::<ClockTime>().is_err());
        assert!("5:75".parse::<ClockTime>().is_err());
        assert!(UNAVAILABLE.parse::<ClockTime>().is_err());
    }

    #[test]
    fn format_then_parse_is_identity() {
        for minutes in (0..1440).step_by(7) {
            let t = ClockTime::from_minutes(minutes);
            assert_eq!(t.format_12h().parse::<ClockTime>().unwrap(), t);
        }
    }

    #[test]
    fn fractional_hours_round_to_minute() {
        assert_eq!(ClockTime::from_fractional_hours(5.5).unwrap().minutes(), 330);
        assert_eq!(ClockTime::from_fractional_hours(4.999).unwrap().minutes(), 300);
        assert_eq!(ClockTime::from_fractional_hours(-0.25).unwrap().minutes(), 1425);
        assert_eq!(ClockTime::from_fractional_hours(24.5).unwrap().minutes(), 30);
        assert!(ClockTime::from_fractional_hours(f64::NAN).is_none());
    }

    #[test]
    fn offset_wraps_midnight() {
        assert_eq!(ClockTime::from_hm(23, 55).offset(10), ClockTime::from_hm(0, 5));
        assert_eq!(ClockTime::from_hm(0, 5).offset(-10), ClockTime::from_hm(23, 55));
    }

    #[test]
    fn unavailable_displays_marker_and_ignores_adjustment() {
        assert_eq!(PrayerTime::Unavailable.to_string(), UNAVAILABLE);
        assert_eq!(PrayerTime::Unavailable.adjusted(5), PrayerTime::Unavailable);
        assert_eq!(hm(5, 0).adjusted(5), hm(5, 5));
    }

    #[test]
    fn adjustments_get_set() {
        let adj = Adjustments::default().with(Prayer::Asr, -3);
        assert_eq!(adj.get(Prayer::Asr), -3);
        assert_eq!(adj.get(Prayer::Fajr), 0);
    }

    #[test]
    fn current_prayer_follows_periods() {
        let times = sample();
        assert_eq!(times.current_prayer(ClockTime::from_hm(3, 0)), Prayer::Isha);
        assert_eq!(times.current_prayer(ClockTime::from_hm(4, 52)), Prayer::Fajr);
        assert_eq!(times.current_prayer(ClockTime::from_hm(6, 30)), Prayer::Sunrise);
        assert_eq!(times.current_prayer(ClockTime::from_hm(13, 0)), Prayer::Dhuhr);
        assert_eq!(times.current_prayer(ClockTime::from_hm(23, 0)), Prayer::Isha);
    }

    #[test]
    fn next_prayer_skips_unavailable() {
        let mut times = sample();
        times.asr = PrayerTime::Unavailable;
        assert_eq!(
            times.next_prayer(ClockTime::from_hm(13, 0)),
            Some((Prayer::Maghrib, ClockTime::from_hm(18, 7)))
        );
        assert_eq!(times.next_prayer(ClockTime::from_hm(20, 0)), None);
    }

    #[test]
    fn isha_after_midnight_extends_maghrib() {
        let times = PrayerTimes {
            date: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            fajr: hm(2, 30),
            sunrise: hm(3, 40),
            dhuhr: hm(13, 20),
            asr: hm(17, 40),
            maghrib: hm(22, 50),
            isha: hm(0, 20),
        };
        let at = |h, m| ClockTime::from_hm(h, m);
        assert_eq!(times.current_prayer(at(23, 0)), Prayer::Maghrib);
        assert_eq!(times.current_prayer(at(0, 10)), Prayer::Maghrib);
        assert_eq!(times.current_prayer(at(0, 30)), Prayer::Isha);
        assert_eq!(times.current_prayer(at(2, 30)), Prayer::Fajr);
        assert_eq!(times.next_prayer(at(23, 0)), Some((Prayer::Isha, at(0, 20))));
        assert_eq!(times.next_prayer(at(0, 10)), Some((Prayer::Isha, at(0, 20))));
        assert_eq!(times.next_prayer(at(0, 30)), Some((Prayer::Fajr, at(2, 30))));
    }

    #[test]
    fn azan_prayers_exclude_sunrise() {
        assert!(!Prayer::AZAN.contains(&Prayer::Sunrise));
        for (i, p) in Prayer::AZAN.into_iter().enumerate() {
            assert_eq!(p.azan_index(), Some(i));
        }
        assert_eq!("Maghrib".parse::<Prayer>().unwrap(), Prayer::Maghrib);
    }
}
