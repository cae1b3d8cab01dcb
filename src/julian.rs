// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day instants.
//!
//! [`JulianDay`] stores a single [`Days`] quantity counted from the start of
//! the Julian Period. It is the common time axis shared by the solar model
//! (fractional days since J2000.0) and the tabular Hijri calendar (integer
//! day numbers).
//!
//! Civil UTC is mapped onto the axis directly: the low-precision solar model
//! used for prayer times does not distinguish UT from TT, so no ΔT correction
//! is applied.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use qtty::*;
use std::ops::{Add, Sub};

/// A point on the Julian Day axis.
///
/// The struct is `Copy` and layout-identical to a single `f64`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDay {
    quantity: Days,
}

impl JulianDay {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// Julian Day of 1970-01-01T00:00:00 UTC.
    pub const UNIX_EPOCH: Self = Self::new(2_440_587.5);

    /// Chronological day number of 1970-01-01.
    const UNIX_EPOCH_DAY_NUMBER: i64 = 2_440_588;

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw Julian Day value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
        }
    }

    /// Julian Day at noon of the given chronological day number.
    ///
    /// Day number `n` starts at JD `n − 0.5` and ends at JD `n + 0.5`.
    #[inline]
    pub const fn from_day_number(day_number: i64) -> Self {
        Self::new(day_number as f64)
    }

    /// Julian Day at 00:00 UTC of a civil date.
    pub fn from_date(date: NaiveDate) -> Self {
        let days = date
            .signed_duration_since(DateTime::UNIX_EPOCH.date_naive())
            .num_days();
        Self::from_day_number(days + Self::UNIX_EPOCH_DAY_NUMBER) - Days::new(0.5)
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let seconds_since_epoch = Seconds::new(datetime.timestamp() as f64);
        let nanos = Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        Self::UNIX_EPOCH + (seconds_since_epoch + nanos).to::<Day>()
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Days elapsed since J2000.0 (negative before the epoch).
    #[inline]
    pub fn days_since_j2000(&self) -> Days {
        *self - Self::J2000
    }

    /// Chronological day number containing this instant.
    #[inline]
    pub fn day_number(&self) -> i64 {
        (self.value() + 0.5).floor() as i64
    }

    /// Civil UTC date containing this instant.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    pub fn to_date(&self) -> Option<NaiveDate> {
        let offset = TimeDelta::try_days(self.day_number() - Self::UNIX_EPOCH_DAY_NUMBER)?;
        DateTime::UNIX_EPOCH.date_naive().checked_add_signed(offset)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self {
            quantity: self.quantity + rhs,
        }
    }
}

impl Sub<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self {
            quantity: self.quantity - rhs,
        }
    }
}

impl Sub for JulianDay {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
