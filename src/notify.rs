// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Notification collaborator interface and message text.
//!
//! Playing audio, vibrating and posting system notifications are host
//! capabilities. The scheduler only calls into a [`NotificationSink`].

use crate::error::{Error, Result};
use crate::prayer::Prayer;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an azan is announced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AzanMode {
    #[default]
    Sound,
    Vibrate,
    Silent,
}

impl AzanMode {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Sound => "sound",
            Self::Vibrate => "vibrate",
            Self::Silent => "silent",
        }
    }
}

impl fmt::Display for AzanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AzanMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        [Self::Sound, Self::Vibrate, Self::Silent]
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}

/// Host capability that delivers azan and reminder events.
///
/// Implementations report delivery problems as [`Error::Notification`]; the
/// scheduler logs them and keeps ticking.
pub trait NotificationSink {
    /// Start the azan audio or vibration pattern.
    fn trigger_azan(&mut self, mode: AzanMode, sound_id: &str, pitch: f64) -> Result<()>;

    /// Post a user-visible notification.
    fn show_notification(&mut self, title: &str, body: &str) -> Result<()>;
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn trigger_azan(&mut self, _mode: AzanMode, _sound_id: &str, _pitch: f64) -> Result<()> {
        Ok(())
    }

    fn show_notification(&mut self, _title: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}

/// One call received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Azan {
        mode: AzanMode,
        sound_id: String,
        pitch: f64,
    },
    Notification {
        title: String,
        body: String,
    },
}

/// Sink that records every call in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn azan_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SinkCall::Azan { .. }))
            .count()
    }

    pub fn notifications(&self) -> impl Iterator<Item = (&str, &str)> {
        self.calls.iter().filter_map(|c| match c {
            SinkCall::Notification { title, body } => Some((title.as_str(), body.as_str())),
            SinkCall::Azan { .. } => None,
        })
    }
}

impl NotificationSink for RecordingSink {
    fn trigger_azan(&mut self, mode: AzanMode, sound_id: &str, pitch: f64) -> Result<()> {
        self.calls.push(SinkCall::Azan {
            mode,
            sound_id: sound_id.to_string(),
            pitch,
        });
        Ok(())
    }

    fn show_notification(&mut self, title: &str, body: &str) -> Result<()> {
        self.calls.push(SinkCall::Notification {
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Message text
// ═══════════════════════════════════════════════════════════════════════════

/// Interface language for notification text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Language {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "en"))]
    English,
    #[cfg_attr(feature = "serde", serde(rename = "bn"))]
    Bangla,
    #[cfg_attr(feature = "serde", serde(rename = "ar"))]
    Arabic,
    #[cfg_attr(feature = "serde", serde(rename = "id"))]
    Indonesian,
}

impl Language {
    /// ISO 639-1 code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Bangla => "bn",
            Self::Arabic => "ar",
            Self::Indonesian => "id",
        }
    }

    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Arabic)
    }

    pub const fn prayer_name(self, prayer: Prayer) -> &'static str {
        use Prayer::*;
        match (self, prayer) {
            (Self::English, Fajr) => "Fajr",
            (Self::English, Sunrise) => "Sunrise",
            (Self::English, Dhuhr) => "Dhuhr",
            (Self::English, Asr) => "Asr",
            (Self::English, Maghrib) => "Maghrib",
            (Self::English, Isha) => "Isha",
            (Self::Bangla, Fajr) => "ফজর",
            (Self::Bangla, Sunrise) => "সূর্যোদয়",
            (Self::Bangla, Dhuhr) => "যোহর",
            (Self::Bangla, Asr) => "আসর",
            (Self::Bangla, Maghrib) => "মাগরিব",
            (Self::Bangla, Isha) => "এশা",
            (Self::Arabic, Fajr) => "الفجر",
            (Self::Arabic, Sunrise) => "الشروق",
            (Self::Arabic, Dhuhr) => "الظهر",
            (Self::Arabic, Asr) => "العصر",
            (Self::Arabic, Maghrib) => "المغرب",
            (Self::Arabic, Isha) => "العشاء",
            (Self::Indonesian, Fajr) => "Subuh",
            (Self::Indonesian, Sunrise) => "Terbit",
            (Self::Indonesian, Dhuhr) => "Dzuhur",
            (Self::Indonesian, Asr) => "Ashar",
            (Self::Indonesian, Maghrib) => "Maghrib",
            (Self::Indonesian, Isha) => "Isya",
        }
    }

    /// Body of the notification shown with an azan.
    pub const fn azan_body(self) -> &'static str {
        match self {
            Self::English => "It's time for prayer",
            Self::Bangla => "নামাজের সময় হয়েছে",
            Self::Arabic => "حان وقت الصلاة",
            Self::Indonesian => "Waktunya sholat",
        }
    }

    /// Body of a reminder sent `minutes` before the prayer.
    pub fn reminder_body(self, minutes: u32) -> String {
        match self {
            Self::English => format!("{minutes} minutes remaining"),
            Self::Bangla => format!("{minutes} মিনিট বাকি"),
            Self::Arabic => format!("بعد {minutes} دقائق"),
            Self::Indonesian => format!("{minutes} menit lagi"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        [Self::English, Self::Bangla, Self::Arabic, Self::Indonesian]
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}
