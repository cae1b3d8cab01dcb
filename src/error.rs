// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Crate error type.
//!
//! The calculators themselves are total and never return errors; this type
//! covers identifier parsing, checked constructors, journal updates,
//! configuration I/O and notification delivery.

use crate::prayer::Prayer;
use thiserror::Error;

/// Errors reported by `miqat`.
#[derive(Debug, Error)]
pub enum Error {
    /// Latitude outside `[-90, 90]`, longitude outside `[-180, 180]`, or non-finite.
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// A Hijri (year, month, day) triple that does not name a calendar day.
    #[error("invalid hijri date: {year}-{month:02}-{day:02}")]
    InvalidHijriDate { year: i64, month: u32, day: u32 },

    #[error("unknown calculation method `{0}`")]
    UnknownMethod(String),

    #[error("unknown madhab `{0}`")]
    UnknownMadhab(String),

    #[error("unknown prayer `{0}`")]
    UnknownPrayer(String),

    /// Neither `hh:mm` nor `hh:mm AM|PM`.
    #[error("invalid clock time `{0}`")]
    InvalidClockTime(String),

    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("unknown notification mode `{0}`")]
    UnknownMode(String),

    /// Sunrise has no journal slot.
    #[error("{0} cannot be marked as performed")]
    UntrackedPrayer(Prayer),

    /// The notification collaborator failed to deliver an event.
    #[error("notification failed: {0}")]
    Notification(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
