// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Daily prayer journal.
//!
//! A [`PrayerJournal`] records which of the five obligatory prayers were
//! performed on each local civil date. Sunrise is a time of day, not a
//! prayer, and cannot be marked. Dates with no record read as all-unmarked.
//!
//! With the `serde` feature the journal is stored as a JSON object keyed by
//! ISO date:
//!
//! ```json
//! { "2024-03-15": { "fajr": true, "dhuhr": false, "asr": true, "maghrib": false, "isha": false } }
//! ```

use crate::error::{Error, Result};
use crate::hijri::{month_days, HijriDate};
use crate::prayer::Prayer;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::path::Path;

// ═══════════════════════════════════════════════════════════════════════════
// JournalEntry
// ═══════════════════════════════════════════════════════════════════════════

/// Performed flags of one day.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JournalEntry {
    pub fajr: bool,
    pub dhuhr: bool,
    pub asr: bool,
    pub maghrib: bool,
    pub isha: bool,
}

impl JournalEntry {
    /// Whether `prayer` is marked. Always `false` for sunrise.
    pub fn get(&self, prayer: Prayer) -> bool {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => false,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    pub fn set(&mut self, prayer: Prayer, performed: bool) -> Result<()> {
        let slot = match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Sunrise => return Err(Error::UntrackedPrayer(prayer)),
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
        };
        *slot = performed;
        Ok(())
    }

    /// Number of performed prayers, `0..=5`.
    pub fn completed_count(&self) -> u32 {
        Prayer::AZAN.into_iter().filter(|&p| self.get(p)).count() as u32
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PrayerJournal
// ═══════════════════════════════════════════════════════════════════════════

/// Performed prayers keyed by local civil date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PrayerJournal {
    entries: BTreeMap<NaiveDate, JournalEntry>,
}

impl PrayerJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// The day's flags; an unrecorded date is all-unmarked.
    pub fn entry(&self, date: NaiveDate) -> JournalEntry {
        self.entries.get(&date).copied().unwrap_or_default()
    }

    pub fn is_performed(&self, date: NaiveDate, prayer: Prayer) -> bool {
        self.entry(date).get(prayer)
    }

    /// Mark or unmark one prayer.
    ///
    /// Fails with [`Error::UntrackedPrayer`] for sunrise, leaving the journal
    /// unchanged.
    pub fn set(&mut self, date: NaiveDate, prayer: Prayer, performed: bool) -> Result<()> {
        let mut entry = self.entry(date);
        entry.set(prayer, performed)?;
        self.entries.insert(date, entry);
        Ok(())
    }

    /// Flip one prayer and return its new state.
    pub fn toggle(&mut self, date: NaiveDate, prayer: Prayer) -> Result<bool> {
        let performed = !self.is_performed(date, prayer);
        self.set(date, prayer, performed)?;
        log::debug!(target: "miqat", "journal {date} {prayer}: {performed}");
        Ok(performed)
    }

    pub fn completed_count(&self, date: NaiveDate) -> u32 {
        self.entry(date).completed_count()
    }

    /// Number of recorded dates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, JournalEntry)> + '_ {
        self.entries.iter().map(|(&d, &e)| (d, e))
    }

    /// Every day of a Hijri month with its Gregorian date and completed count.
    pub fn month_progress(
        &self,
        year: i64,
        month: u32,
        day_offset: i32,
    ) -> Vec<(HijriDate, NaiveDate, u32)> {
        month_days(year, month, day_offset)
            .into_iter()
            .map(|(hijri, date)| (hijri, date, self.completed_count(date)))
            .collect()
    }
}

#[cfg(feature = "serde")]
impl PrayerJournal {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a journal from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!(target: "miqat", "loaded journal from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Write the journal to a JSON file, replacing it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn toggle_flips_and_counts() {
        let mut journal = PrayerJournal::new();
        assert!(!journal.is_performed(day(), Prayer::Fajr));
        assert!(journal.toggle(day(), Prayer::Fajr).unwrap());
        assert!(journal.toggle(day(), Prayer::Asr).unwrap());
        assert!(journal.is_performed(day(), Prayer::Fajr));
        assert_eq!(journal.completed_count(day()), 2);

        assert!(!journal.toggle(day(), Prayer::Fajr).unwrap());
        assert_eq!(journal.completed_count(day()), 1);
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn sunrise_cannot_be_marked() {
        let mut journal = PrayerJournal::new();
        let err = journal.toggle(day(), Prayer::Sunrise).unwrap_err();
        assert!(matches!(err, Error::UntrackedPrayer(Prayer::Sunrise)));
        assert!(journal.set(day(), Prayer::Sunrise, true).is_err());
        assert!(journal.is_empty());
        assert!(!journal.is_performed(day(), Prayer::Sunrise));
    }

    #[test]
    fn dates_are_independent() {
        let mut journal = PrayerJournal::new();
        let tomorrow = day().succ_opt().unwrap();
        for prayer in Prayer::AZAN {
            journal.set(day(), prayer, true).unwrap();
        }
        assert_eq!(journal.completed_count(day()), 5);
        assert_eq!(journal.completed_count(tomorrow), 0);
        assert_eq!(journal.entry(tomorrow), JournalEntry::default());
    }

    #[test]
    fn month_progress_reports_each_day() {
        let mut journal = PrayerJournal::new();
        // 5 Ramadan 1445 is 2024-03-15.
        journal.set(day(), Prayer::Isha, true).unwrap();
        journal.set(day(), Prayer::Dhuhr, true).unwrap();
        let progress = journal.month_progress(1445, 9, 0);
        assert_eq!(progress.len(), 30);
        let counts: Vec<u32> = progress.iter().map(|&(_, _, n)| n).collect();
        assert_eq!(counts.iter().sum::<u32>(), 2);
        let (hijri, date, count) = progress[4];
        assert_eq!((hijri.day, date, count), (5, day(), 2));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_is_keyed_by_date() {
        let mut journal = PrayerJournal::new();
        journal.toggle(day(), Prayer::Maghrib).unwrap();
        let json = journal.to_json_string().unwrap();
        assert!(json.contains("\"2024-03-15\""));
        assert!(json.contains("\"maghrib\": true"));
        assert_eq!(PrayerJournal::from_json_str(&json).unwrap(), journal);

        let partial = PrayerJournal::from_json_str(r#"{"2024-03-16": {"fajr": true}}"#).unwrap();
        assert_eq!(partial.completed_count(day().succ_opt().unwrap()), 1);
    }
}
