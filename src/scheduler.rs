// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! At-most-once azan and reminder scheduling.
//!
//! The host ticks an [`EventScheduler`] with the current local wall-clock
//! time, typically once per second. Each tick compares the current minute of
//! the day against the day's [`PrayerTimes`] and reports the events that
//! became due. Each prayer's azan and reminder fire at most once per local
//! date, so repeated ticks inside the same minute fire nothing new, and
//! neither does a prayer whose time moves later in the day after it fired.
//!
//! State lives only in the instance: building a new scheduler forgets what
//! has fired. [`SharedScheduler`] puts the whole check-and-record step behind
//! one mutex for hosts that tick from several threads, and
//! [`PrayerNotifier`] wires preferences, computation and dispatch together.

use crate::config::{AzanConfig, Preferences, ReminderConfig};
use crate::engine::PrayerCalculator;
use crate::hijri::{gregorian_to_hijri, HijriDate};
use crate::notify::{Language, NotificationSink};
use crate::prayer::{ClockTime, Prayer, PrayerTimes};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use log::{debug, info, warn};
use std::fmt;
use std::sync::{Mutex, PoisonError};

const AZAN_PRAYERS: usize = Prayer::AZAN.len();

// ═══════════════════════════════════════════════════════════════════════════
// Events
// ═══════════════════════════════════════════════════════════════════════════

/// What an event announces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Azan,
    Reminder,
}

impl NotificationKind {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Azan => "azan",
            Self::Reminder => "reminder",
        }
    }
}

/// A local civil date and minute of that day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinuteKey {
    pub date: NaiveDate,
    /// Minutes since local midnight.
    pub minute: u32,
}

impl MinuteKey {
    /// Truncate a wall-clock reading to its minute.
    pub fn of(now: NaiveDateTime) -> Self {
        Self {
            date: now.date(),
            minute: now.hour() * 60 + now.minute(),
        }
    }

    pub fn clock(self) -> ClockTime {
        ClockTime::from_minutes(i64::from(self.minute))
    }
}

impl fmt::Display for MinuteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.clock().format_24h())
    }
}

/// One event reported by a tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NotificationEvent {
    pub prayer: Prayer,
    pub kind: NotificationKind,
    /// Minute at which the event fired.
    pub key: MinuteKey,
}

impl NotificationEvent {
    /// Stable identifier, e.g. `fajr-reminder-2024-03-15`.
    pub fn id(&self) -> String {
        match self.kind {
            NotificationKind::Azan => format!("{}-azan-{}", self.prayer, self.key),
            NotificationKind::Reminder => format!("{}-reminder-{}", self.prayer, self.key.date),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EventScheduler
// ═══════════════════════════════════════════════════════════════════════════

/// De-duplicating tick handler for the five azan prayers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventScheduler {
    last_azan: [Option<MinuteKey>; AZAN_PRAYERS],
    last_reminder: [Option<NaiveDate>; AZAN_PRAYERS],
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last minute an azan fired for `prayer`.
    pub fn last_azan(&self, prayer: Prayer) -> Option<MinuteKey> {
        prayer.azan_index().and_then(|i| self.last_azan[i])
    }

    /// Last date a reminder fired for `prayer`.
    pub fn last_reminder(&self, prayer: Prayer) -> Option<NaiveDate> {
        prayer.azan_index().and_then(|i| self.last_reminder[i])
    }

    /// Report and record the events due at `now`.
    ///
    /// `now` is local wall-clock time. `times` must belong to `now`'s date;
    /// a mismatched table is ignored for this tick.
    pub fn tick(
        &mut self,
        now: NaiveDateTime,
        times: &PrayerTimes,
        azan: &AzanConfig,
        reminders: &ReminderConfig,
    ) -> Vec<NotificationEvent> {
        let key = MinuteKey::of(now);
        if times.date != key.date {
            debug!(target: "miqat", "skipping tick at {key}: prayer times are for {}", times.date);
            return Vec::new();
        }

        let mut events = Vec::new();
        for (i, prayer) in Prayer::AZAN.into_iter().enumerate() {
            let Some(minute) = times.get(prayer).minutes() else {
                continue;
            };

            if azan.enabled.is_enabled(prayer)
                && minute == key.minute
                && self.last_azan[i].map(|k| k.date) != Some(key.date)
            {
                self.last_azan[i] = Some(key);
                events.push(NotificationEvent {
                    prayer,
                    kind: NotificationKind::Azan,
                    key,
                });
            }

            // A reminder that would land on the previous day is dropped.
            let reminder_minute = minute.checked_sub(reminders.offset_minutes);
            if reminders.enabled.is_enabled(prayer)
                && reminder_minute == Some(key.minute)
                && self.last_reminder[i] != Some(key.date)
            {
                self.last_reminder[i] = Some(key.date);
                events.push(NotificationEvent {
                    prayer,
                    kind: NotificationKind::Reminder,
                    key,
                });
            }
        }

        for event in &events {
            info!(target: "miqat", "{} {} due at {}", event.prayer, event.kind.id(), event.key);
        }
        events
    }

    /// [`EventScheduler::tick`], then deliver each event to `sink`.
    ///
    /// Delivery failures are logged and do not stop later events or ticks.
    pub fn tick_with(
        &mut self,
        now: NaiveDateTime,
        times: &PrayerTimes,
        azan: &AzanConfig,
        reminders: &ReminderConfig,
        language: Language,
        sink: &mut dyn NotificationSink,
    ) -> Vec<NotificationEvent> {
        let events = self.tick(now, times, azan, reminders);
        for event in &events {
            dispatch(event, azan, reminders, language, sink);
        }
        events
    }
}

fn dispatch(
    event: &NotificationEvent,
    azan: &AzanConfig,
    reminders: &ReminderConfig,
    language: Language,
    sink: &mut dyn NotificationSink,
) {
    let title = language.prayer_name(event.prayer);
    let result = match event.kind {
        NotificationKind::Azan => sink
            .trigger_azan(azan.mode, &azan.selected_sound_id, azan.pitch)
            .and_then(|()| sink.show_notification(title, language.azan_body())),
        NotificationKind::Reminder => {
            sink.show_notification(title, &language.reminder_body(reminders.offset_minutes))
        }
    };
    if let Err(err) = result {
        warn!(target: "miqat", "delivering {} failed: {err}", event.id());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SharedScheduler
// ═══════════════════════════════════════════════════════════════════════════

/// [`EventScheduler`] behind a single mutex.
///
/// The comparison and the state update of a tick happen under one lock, so
/// concurrent ticks cannot fire the same event twice.
#[derive(Debug, Default)]
pub struct SharedScheduler {
    inner: Mutex<EventScheduler>,
}

impl SharedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(
        &self,
        now: NaiveDateTime,
        times: &PrayerTimes,
        azan: &AzanConfig,
        reminders: &ReminderConfig,
    ) -> Vec<NotificationEvent> {
        self.lock().tick(now, times, azan, reminders)
    }

    pub fn tick_with(
        &self,
        now: NaiveDateTime,
        times: &PrayerTimes,
        azan: &AzanConfig,
        reminders: &ReminderConfig,
        language: Language,
        sink: &mut dyn NotificationSink,
    ) -> Vec<NotificationEvent> {
        self.lock()
            .tick_with(now, times, azan, reminders, language, sink)
    }

    /// Forget everything that has fired.
    pub fn reset(&self) {
        *self.lock() = EventScheduler::new();
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> EventScheduler {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EventScheduler> {
        // A panic inside a sink must not wedge later ticks.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PrayerNotifier
// ═══════════════════════════════════════════════════════════════════════════

/// Preferences, computation and scheduling for one running host.
///
/// Prayer times are computed once per local date and cached until the date
/// changes or the preferences are replaced.
#[derive(Debug, Clone)]
pub struct PrayerNotifier {
    preferences: Preferences,
    calculator: PrayerCalculator,
    scheduler: EventScheduler,
    cache: Option<PrayerTimes>,
}

impl PrayerNotifier {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            calculator: preferences.calculator(),
            preferences,
            scheduler: EventScheduler::new(),
            cache: None,
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Replace the preferences and drop cached times.
    ///
    /// Fired-event state is kept, so an adjustment that moves an already
    /// announced prayer later in the day does not repeat its azan.
    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.calculator = preferences.calculator();
        self.preferences = preferences;
        self.cache = None;
    }

    /// Prayer times of the local day containing `now`.
    pub fn times(&mut self, now: DateTime<Utc>) -> &PrayerTimes {
        let date = self.calculator.local_time(now).date();
        if self.cache.as_ref().is_some_and(|t| t.date != date) {
            self.cache = None;
        }
        let calculator = &self.calculator;
        self.cache.get_or_insert_with(|| {
            debug!(target: "miqat", "computing prayer times for {date}");
            calculator.times_at(now)
        })
    }

    /// Next prayer still ahead today, if any.
    pub fn next_prayer(&mut self, now: DateTime<Utc>) -> Option<(Prayer, ClockTime)> {
        let clock = ClockTime::from(self.calculator.local_time(now).time());
        self.times(now).next_prayer(clock)
    }

    /// Hijri date of the local day, with the configured offset.
    pub fn hijri_date(&self, now: DateTime<Utc>) -> HijriDate {
        let date = self.calculator.local_time(now).date();
        gregorian_to_hijri(date, self.preferences.hijri_offset)
    }

    /// Tick the scheduler at `now` and deliver due events to `sink`.
    pub fn tick(
        &mut self,
        now: DateTime<Utc>,
        sink: &mut dyn NotificationSink,
    ) -> Vec<NotificationEvent> {
        let local = self.calculator.local_time(now);
        self.times(now);
        let Some(times) = self.cache.as_ref() else {
            return Vec::new();
        };
        self.scheduler.tick_with(
            local,
            times,
            &self.preferences.azan,
            &self.preferences.reminders,
            self.preferences.language,
            sink,
        )
    }
}
