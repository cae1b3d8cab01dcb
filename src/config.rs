// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! User preferences.
//!
//! [`Preferences`] is the record a host persists between runs. With the
//! `serde` feature it reads and writes JSON; fields missing from a stored
//! document take their default values, so older files keep loading.

use crate::coordinates::Coordinates;
use crate::engine::PrayerCalculator;
use crate::method::{CalculationMethod, Madhab};
use crate::notify::{AzanMode, Language};
use crate::prayer::{Adjustments, Prayer};

#[cfg(feature = "serde")]
use crate::error::Result;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::path::Path;

/// Per-prayer on/off switches for the five azan-eligible prayers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrayerToggles {
    pub fajr: bool,
    pub dhuhr: bool,
    pub asr: bool,
    pub maghrib: bool,
    pub isha: bool,
}

impl PrayerToggles {
    pub const ALL_ON: Self = Self::all(true);
    pub const ALL_OFF: Self = Self::all(false);

    const fn all(on: bool) -> Self {
        Self {
            fajr: on,
            dhuhr: on,
            asr: on,
            maghrib: on,
            isha: on,
        }
    }

    /// Sunrise has no toggle and is always off.
    pub fn is_enabled(&self, prayer: Prayer) -> bool {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => false,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    pub fn set(&mut self, prayer: Prayer, on: bool) {
        match prayer {
            Prayer::Fajr => self.fajr = on,
            Prayer::Sunrise => {}
            Prayer::Dhuhr => self.dhuhr = on,
            Prayer::Asr => self.asr = on,
            Prayer::Maghrib => self.maghrib = on,
            Prayer::Isha => self.isha = on,
        }
    }
}

impl Default for PrayerToggles {
    fn default() -> Self {
        Self::ALL_ON
    }
}

/// Azan announcement settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AzanConfig {
    pub enabled: PrayerToggles,
    pub selected_sound_id: String,
    /// Playback rate multiplier.
    pub pitch: f64,
    pub mode: AzanMode,
}

impl Default for AzanConfig {
    fn default() -> Self {
        Self {
            enabled: PrayerToggles::ALL_ON,
            selected_sound_id: "makkah".to_string(),
            pitch: 1.0,
            mode: AzanMode::Sound,
        }
    }
}

/// Pre-prayer reminder settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ReminderConfig {
    pub enabled: PrayerToggles,
    /// Minutes before the prayer time.
    pub offset_minutes: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: PrayerToggles::ALL_ON,
            offset_minutes: 10,
        }
    }
}

/// Everything a host persists for the prayer core.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Preferences {
    pub language: Language,
    pub method: CalculationMethod,
    pub madhab: Madhab,
    pub coordinates: Coordinates,
    pub location_name: String,
    /// Local offset east of UTC, in hours.
    pub utc_offset_hours: f64,
    /// Signed day correction for the Hijri calendar.
    pub hijri_offset: i32,
    pub adjustments: Adjustments,
    pub azan: AzanConfig,
    pub reminders: ReminderConfig,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: Language::English,
            method: CalculationMethod::Mwl,
            madhab: Madhab::Shafi,
            coordinates: Coordinates::new(23.8103, 90.4125),
            location_name: "Dhaka, Bangladesh".to_string(),
            utc_offset_hours: 6.0,
            hijri_offset: 0,
            adjustments: Adjustments::default(),
            azan: AzanConfig::default(),
            reminders: ReminderConfig::default(),
        }
    }
}

impl Preferences {
    /// Calculator configured from these preferences.
    pub fn calculator(&self) -> PrayerCalculator {
        PrayerCalculator::new(self.coordinates, self.utc_offset_hours)
            .with_method(self.method)
            .with_madhab(self.madhab)
            .with_adjustments(self.adjustments)
    }
}

#[cfg(feature = "serde")]
impl Preferences {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read preferences from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!(target: "miqat", "loaded preferences from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Write preferences to a JSON file, replacing it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_run_settings() {
        let prefs = Preferences::default();
        assert_eq!(prefs.method, CalculationMethod::Mwl);
        assert_eq!(prefs.madhab, Madhab::Shafi);
        assert_eq!(prefs.reminders.offset_minutes, 10);
        assert_eq!(prefs.azan.selected_sound_id, "makkah");
        assert!(Prayer::AZAN.iter().all(|&p| prefs.azan.enabled.is_enabled(p)));
        assert!(!prefs.azan.enabled.is_enabled(Prayer::Sunrise));
    }

    #[test]
    fn toggles_set_individually() {
        let mut toggles = PrayerToggles::ALL_OFF;
        toggles.set(Prayer::Asr, true);
        toggles.set(Prayer::Sunrise, true);
        assert!(toggles.is_enabled(Prayer::Asr));
        assert!(!toggles.is_enabled(Prayer::Sunrise));
        assert!(!toggles.is_enabled(Prayer::Isha));
    }

    #[test]
    fn calculator_carries_settings() {
        let mut prefs = Preferences::default();
        prefs.method = CalculationMethod::Karachi;
        prefs.adjustments.isha = 2;
        let calc = prefs.calculator();
        assert_eq!(calc.method, CalculationMethod::Karachi);
        assert_eq!(calc.adjustments.isha, 2);
        assert_eq!(calc.utc_offset_hours, 6.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_roundtrip_and_partial_documents() {
        let prefs = Preferences::default();
        let json = prefs.to_json_string().unwrap();
        assert!(json.contains("\"method\": \"MWL\""));
        assert!(json.contains("\"offsetMinutes\": 10"));
        assert_eq!(Preferences::from_json_str(&json).unwrap(), prefs);

        let partial = r#"{ "method": "ISNA", "madhab": "Hanafi", "azan": { "mode": "vibrate" } }"#;
        let parsed = Preferences::from_json_str(partial).unwrap();
        assert_eq!(parsed.method, CalculationMethod::Isna);
        assert_eq!(parsed.madhab, Madhab::Hanafi);
        assert_eq!(parsed.azan.mode, AzanMode::Vibrate);
        assert_eq!(parsed.azan.selected_sound_id, "makkah");
        assert_eq!(parsed.coordinates, Preferences::default().coordinates);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_method_is_rejected() {
        let err = Preferences::from_json_str(r#"{ "method": "Jafari" }"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }
}
