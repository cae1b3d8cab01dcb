// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Islamic prayer times, qibla and tabular Hijri calendar.
//!
//! `miqat` computes the six daily prayer times from a first-order solar
//! model, the qibla bearing and great-circle distance to the Kaaba, and
//! converts between Gregorian and arithmetic Hijri dates. An
//! [`EventScheduler`] turns a table of prayer times into at-most-once azan
//! and reminder events for a host that ticks it with the wall clock.
//!
//! # Core types
//!
//! - [`JulianDay`]: instant on the Julian Day axis, built on [`qtty::Days`].
//! - [`Coordinates`]: latitude and longitude as [`qtty::Degrees`].
//! - [`CalculationMethod`] / [`Madhab`]: twilight angles and asr shadow rule.
//! - [`PrayerTimes`]: one day's [`PrayerTime`]s with minute resolution.
//! - [`HijriDate`]: tabular Hijri calendar date.
//! - [`EventScheduler`]: de-duplicating azan and reminder ticks.
//! - [`PrayerJournal`]: performed prayers per day, with monthly progress.
//! - [`Preferences`]: persisted settings (JSON with the `serde` feature).
//!
//! # Calculators
//!
//! | Function | Result |
//! |----------|--------|
//! | [`compute_prayer_times`] | [`PrayerTimes`] for the local day of an instant |
//! | [`calculate_qibla`] | bearing to the Kaaba, degrees clockwise from north |
//! | [`calculate_distance`] | haversine distance in kilometres |
//! | [`gregorian_to_hijri`] / [`hijri_to_gregorian`] | calendar conversion with a day offset |
//!
//! All calculators are total: a solar altitude the Sun never reaches yields
//! [`PrayerTime::Unavailable`] rather than an error.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use miqat::{compute_prayer_times, Adjustments, CalculationMethod, Coordinates, Madhab};
//!
//! let dhaka = Coordinates::new(23.8103, 90.4125);
//! let now = Utc.with_ymd_and_hms(2024, 3, 15, 6, 0, 0).unwrap();
//! let times = compute_prayer_times(
//!     now,
//!     dhaka,
//!     CalculationMethod::Mwl,
//!     Madhab::Shafi,
//!     &Adjustments::default(),
//!     6.0,
//! );
//! assert_eq!(times.dhuhr.to_string(), "12:07 PM");
//! ```
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade under the `miqat` target. The
//! crate never installs a logger.

pub mod angle;
mod config;
mod coordinates;
mod distance;
mod engine;
mod error;
mod hijri;
mod journal;
mod julian;
mod method;
mod notify;
mod prayer;
mod qibla;
mod scheduler;
mod solar;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use config::{AzanConfig, Preferences, PrayerToggles, ReminderConfig};
pub use coordinates::{Coordinates, KAABA};
pub use distance::{calculate_distance, distance_to_kaaba, EARTH_MEAN_RADIUS_KM};
pub use engine::{
    compute_prayer_times, compute_prayer_times_local, local_datetime, PrayerCalculator, RawTimes,
    SUNRISE_ALTITUDE,
};
pub use error::{Error, Result};
pub use hijri::{
    days_in_month, gregorian_to_hijri, hijri_from_instant, hijri_to_gregorian, is_leap_year,
    month_days, HijriDate, MONTH_NAMES,
};
pub use journal::{JournalEntry, PrayerJournal};
pub use julian::JulianDay;
pub use method::{
    CalculationMethod, IshaRule, Madhab, MethodParams, UMM_AL_QURA_ISHA_INTERVAL_MINUTES,
};
pub use notify::{AzanMode, Language, NotificationSink, NullSink, RecordingSink, SinkCall};
pub use prayer::{Adjustments, ClockTime, Prayer, PrayerTime, PrayerTimes, UNAVAILABLE};
pub use qibla::{calculate_qibla, relative_qibla};
pub use scheduler::{
    EventScheduler, MinuteKey, NotificationEvent, NotificationKind, PrayerNotifier,
    SharedScheduler,
};
pub use solar::SolarPosition;

// Typed quantities used throughout the public API.
pub use qtty;
