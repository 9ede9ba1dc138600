//! Mood and garden state container.
//!
//! [`MoodGarden`] is the single writer of the check-in entries and the
//! flowers derived from them. Every mutation goes through `&mut self`, is
//! persisted through the [`EntryStore`] and announced to subscribers.
//!
//! Storage is best effort: a failed load starts from an empty list and a
//! failed save is logged, while the in-memory entries stay authoritative for
//! the lifetime of the process.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::events::{Event, SubscriptionId, Subscribers};
use crate::garden::{grow_garden, GardenFlower};
use crate::mood::{self, CheckInDraft, MoodEntry, MoodLevel, WellnessFactor};
use crate::storage::config::{CheckInConfig, Config, GardenConfig};
use crate::storage::EntryStore;

/// Result of a check-in submission.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInOutcome {
    Recorded(MoodEntry),
    /// Nothing changed.
    Rejected(CheckInRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInRejection {
    NoMoodSelected,
    AlreadyCheckedInToday,
}

impl CheckInOutcome {
    pub fn entry(&self) -> Option<&MoodEntry> {
        match self {
            CheckInOutcome::Recorded(entry) => Some(entry),
            CheckInOutcome::Rejected(_) => None,
        }
    }
}

/// Summary figures for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodSummary {
    pub entry_count: usize,
    pub checked_in_today: bool,
    pub streak: u32,
    pub streak_label: String,
    pub weekly_average: Option<f64>,
    pub affirmation: &'static str,
}

pub struct MoodGarden {
    entries: Vec<MoodEntry>,
    flowers: Vec<GardenFlower>,
    draft: CheckInDraft,
    store: Box<dyn EntryStore>,
    clock: Arc<dyn Clock>,
    checkin: CheckInConfig,
    garden: GardenConfig,
    rng: Mcg128Xsl64,
    subscribers: Subscribers,
}

impl MoodGarden {
    /// Load entries from `store` and grow the initial garden.
    pub fn open(store: impl EntryStore + 'static, config: &Config, clock: Arc<dyn Clock>) -> Self {
        let mut entries = match store.load() {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not load entries, starting empty");
                Vec::new()
            }
        };
        entries.sort_by_key(|e| e.timestamp);
        tracing::debug!(count = entries.len(), "entries loaded");

        let rng = match config.garden.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };

        let mut garden = Self {
            entries,
            flowers: Vec::new(),
            draft: CheckInDraft::default(),
            store: Box::new(store),
            clock,
            checkin: config.checkin.clone(),
            garden: config.garden.clone(),
            rng,
            subscribers: Subscribers::new(),
        };
        garden.flowers = grow_garden(&garden.entries, &garden.garden, &mut garden.rng);
        garden
    }

    /// [`MoodGarden::open`] on the system clock.
    pub fn with_system_clock(store: impl EntryStore + 'static, config: &Config) -> Self {
        Self::open(store, config, Arc::new(SystemClock))
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Entries, oldest first.
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// One flower per entry, in entry order.
    pub fn flowers(&self) -> &[GardenFlower] {
        &self.flowers
    }

    pub fn draft(&self) -> &CheckInDraft {
        &self.draft
    }

    pub fn has_checked_in_today(&self) -> bool {
        mood::has_checked_in_today(&self.entries, self.clock.as_ref())
    }

    pub fn streak(&self) -> u32 {
        mood::streak(&self.entries, self.clock.as_ref())
    }

    pub fn streak_label(&self) -> String {
        mood::streak_label(self.streak())
    }

    pub fn weekly_average(&self) -> Option<f64> {
        mood::weekly_average(&self.entries, self.clock.as_ref())
    }

    pub fn affirmation(&self) -> &'static str {
        mood::daily_affirmation(self.clock.today())
    }

    pub fn summary(&self) -> MoodSummary {
        let streak = self.streak();
        MoodSummary {
            entry_count: self.entries.len(),
            checked_in_today: self.has_checked_in_today(),
            streak,
            streak_label: mood::streak_label(streak),
            weekly_average: self.weekly_average(),
            affirmation: self.affirmation(),
        }
    }

    // ── Draft ────────────────────────────────────────────────────────

    pub fn select_mood(&mut self, mood: Option<MoodLevel>) {
        self.draft.mood = mood;
    }

    /// Returns whether `factor` is now selected.
    pub fn toggle_factor(&mut self, factor: WellnessFactor) -> bool {
        self.draft.toggle_factor(factor)
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.draft.note = note.into();
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record the current draft as a new entry.
    ///
    /// Rejected without touching any state when no mood is selected, or when
    /// single daily check-ins are enforced and today already has one.
    pub fn submit_check_in(&mut self) -> CheckInOutcome {
        let Some(mood) = self.draft.mood else {
            tracing::debug!("check-in ignored: no mood selected");
            return CheckInOutcome::Rejected(CheckInRejection::NoMoodSelected);
        };
        if self.checkin.one_per_day && self.has_checked_in_today() {
            tracing::debug!("check-in ignored: already checked in today");
            return CheckInOutcome::Rejected(CheckInRejection::AlreadyCheckedInToday);
        }

        // Entries stay in timestamp order even if the clock steps back.
        let now = self.clock.now();
        let timestamp = self
            .entries
            .last()
            .map_or(now, |last| last.timestamp.max(now));

        let draft = std::mem::take(&mut self.draft);
        let entry = MoodEntry::new(timestamp, mood, draft.factors, draft.note);
        self.entries.push(entry.clone());
        tracing::info!(id = %entry.id, mood = entry.mood.value(), "check-in recorded");

        self.persist();
        self.subscribers.notify(&Event::CheckInRecorded {
            entry_id: entry.id,
            mood: entry.mood,
            at: entry.timestamp,
        });
        self.regenerate_flowers();

        CheckInOutcome::Recorded(entry)
    }

    /// Replace the draft with the given values and submit it.
    pub fn check_in(
        &mut self,
        mood: Option<MoodLevel>,
        factors: impl IntoIterator<Item = WellnessFactor>,
        note: impl Into<String>,
    ) -> CheckInOutcome {
        self.draft = CheckInDraft {
            mood,
            factors: factors.into_iter().collect::<BTreeSet<_>>(),
            note: note.into(),
        };
        self.submit_check_in()
    }

    /// Rebuild every flower from the entry list.
    pub fn regenerate_flowers(&mut self) {
        self.flowers = grow_garden(&self.entries, &self.garden, &mut self.rng);
        self.subscribers.notify(&Event::GardenRegenerated {
            flower_count: self.flowers.len(),
            at: self.clock.now(),
        });
    }

    pub fn subscribe(&mut self, callback: impl Fn(&Event) + Send + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.entries) {
            tracing::warn!(error = %e, "could not save entries, keeping them in memory");
        }
    }
}

impl std::fmt::Debug for MoodGarden {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodGarden")
            .field("entries", &self.entries.len())
            .field("flowers", &self.flowers.len())
            .field("draft", &self.draft)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::Mutex;

    const NO_FACTORS: [WellnessFactor; 0] = [];

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn seeded_config() -> Config {
        let mut config = Config::default();
        config.garden.seed = Some(11);
        config
    }

    fn open_with(store: MemoryStore, config: &Config) -> (MoodGarden, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(noon()));
        let garden = MoodGarden::open(store, config, clock.clone());
        (garden, clock)
    }

    #[test]
    fn submit_without_mood_is_noop() {
        let store = MemoryStore::new();
        let (mut garden, _) = open_with(store.clone(), &seeded_config());
        garden.toggle_factor(WellnessFactor::Sleep);

        let outcome = garden.submit_check_in();
        assert_eq!(
            outcome,
            CheckInOutcome::Rejected(CheckInRejection::NoMoodSelected)
        );
        assert!(garden.entries().is_empty());
        assert!(garden.flowers().is_empty());
        assert_eq!(store.save_count(), 0);
        assert!(garden.draft().factors.contains(&WellnessFactor::Sleep));
    }

    #[test]
    fn submit_records_persists_and_clears_draft() {
        let store = MemoryStore::new();
        let (mut garden, _) = open_with(store.clone(), &seeded_config());
        garden.select_mood(Some(MoodLevel::High));
        garden.toggle_factor(WellnessFactor::Exercise);
        garden.set_note("morning run");

        let entry = garden.submit_check_in().entry().cloned().unwrap();
        assert_eq!(entry.mood, MoodLevel::High);
        assert_eq!(entry.timestamp, noon());
        assert_eq!(entry.note, "morning run");
        assert!(entry.factors.contains(&WellnessFactor::Exercise));

        assert_eq!(garden.entries(), &[entry.clone()][..]);
        assert_eq!(garden.flowers().len(), 1);
        assert_eq!(garden.flowers()[0].entry_id, entry.id);
        assert!(garden.draft().is_empty());
        assert_eq!(store.saved(), Some(vec![entry]));
    }

    #[test]
    fn one_flower_per_entry_in_order() {
        let (mut garden, clock) = open_with(MemoryStore::new(), &seeded_config());
        for mood in MoodLevel::ALL {
            garden.check_in(Some(mood), NO_FACTORS, "");
            clock.advance(Duration::hours(1));
        }
        let entry_ids: Vec<_> = garden.entries().iter().map(|e| e.id).collect();
        let flower_ids: Vec<_> = garden.flowers().iter().map(|f| f.entry_id).collect();
        assert_eq!(entry_ids, flower_ids);
        assert_eq!(garden.flowers().len(), 5);
    }

    #[test]
    fn one_per_day_rejects_second_check_in() {
        let mut config = seeded_config();
        config.checkin.one_per_day = true;
        let (mut garden, clock) = open_with(MemoryStore::new(), &config);

        assert!(garden.check_in(Some(MoodLevel::Low), NO_FACTORS, "").entry().is_some());
        clock.advance(Duration::hours(2));
        assert_eq!(
            garden.check_in(Some(MoodLevel::High), NO_FACTORS, "again"),
            CheckInOutcome::Rejected(CheckInRejection::AlreadyCheckedInToday)
        );
        assert_eq!(garden.entries().len(), 1);
        assert_eq!(garden.draft().note, "again");

        clock.advance(Duration::days(1));
        assert!(garden.check_in(Some(MoodLevel::High), NO_FACTORS, "").entry().is_some());
        assert_eq!(garden.entries().len(), 2);
    }

    #[test]
    fn multiple_check_ins_allowed_by_default() {
        let (mut garden, clock) = open_with(MemoryStore::new(), &seeded_config());
        garden.check_in(Some(MoodLevel::Low), NO_FACTORS, "");
        clock.advance(Duration::minutes(5));
        garden.check_in(Some(MoodLevel::High), NO_FACTORS, "");
        assert_eq!(garden.entries().len(), 2);
        assert_eq!(garden.streak(), 1);
    }

    #[test]
    fn save_failure_keeps_memory_state() {
        let store = MemoryStore::new();
        store.set_fail_saves(true);
        let (mut garden, _) = open_with(store.clone(), &seeded_config());

        let outcome = garden.check_in(Some(MoodLevel::Neutral), [WellnessFactor::Nature], "");
        assert!(outcome.entry().is_some());
        assert_eq!(garden.entries().len(), 1);
        assert_eq!(garden.flowers().len(), 1);
        assert_eq!(store.saved(), None);
    }

    #[test]
    fn hostile_garden_config_does_not_panic() {
        let mut config = seeded_config();
        config.garden.scale_min = f64::NAN;
        config.garden.sway_degrees = 1e308;
        config.garden.jitter_x = f64::INFINITY;
        let existing = MoodEntry::new(noon() - Duration::days(1), MoodLevel::Low, BTreeSet::new(), "");
        let (mut garden, _) = open_with(MemoryStore::with_entries(vec![existing]), &config);
        assert_eq!(garden.flowers().len(), 1);

        garden.check_in(Some(MoodLevel::High), NO_FACTORS, "");
        assert_eq!(garden.flowers().len(), 2);
        assert!(garden.flowers().iter().all(|f| f.scale.is_finite() && f.sway_degrees.abs() <= 8.0));
    }

    #[test]
    fn loaded_entries_are_sorted() {
        let later = MoodEntry::new(noon(), MoodLevel::High, BTreeSet::new(), "");
        let earlier = MoodEntry::new(noon() - Duration::days(1), MoodLevel::Low, BTreeSet::new(), "");
        let store = MemoryStore::with_entries(vec![later.clone(), earlier.clone()]);
        let (garden, _) = open_with(store, &seeded_config());

        assert_eq!(garden.entries(), &[earlier, later][..]);
        assert_eq!(garden.flowers().len(), 2);
        assert_eq!(garden.streak(), 2);
        assert!(garden.has_checked_in_today());
    }

    #[test]
    fn clock_stepping_back_keeps_timestamps_ordered() {
        let (mut garden, clock) = open_with(MemoryStore::new(), &seeded_config());
        garden.check_in(Some(MoodLevel::Neutral), NO_FACTORS, "");
        clock.set(noon() - Duration::hours(1));
        garden.check_in(Some(MoodLevel::High), NO_FACTORS, "");

        let ts: Vec<_> = garden.entries().iter().map(|e| e.timestamp).collect();
        assert_eq!(ts, vec![noon(), noon()]);
    }

    #[test]
    fn summary_reflects_entries() {
        let (mut garden, clock) = open_with(MemoryStore::new(), &seeded_config());
        assert_eq!(garden.weekly_average(), None);
        assert_eq!(garden.streak(), 0);

        clock.set(noon() - Duration::days(1));
        garden.check_in(Some(MoodLevel::VeryHigh), NO_FACTORS, "");
        clock.set(noon());
        garden.check_in(Some(MoodLevel::High), NO_FACTORS, "");
        garden.check_in(Some(MoodLevel::Neutral), NO_FACTORS, "");

        let summary = garden.summary();
        assert_eq!(summary.entry_count, 3);
        assert!(summary.checked_in_today);
        assert_eq!(summary.streak, 2);
        assert_eq!(summary.streak_label, "2 days");
        assert_eq!(summary.weekly_average, Some(4.0));
    }

    #[test]
    fn subscribers_see_check_in_then_garden() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (mut garden, _) = open_with(MemoryStore::new(), &seeded_config());
        let id = {
            let seen = Arc::clone(&seen);
            garden.subscribe(move |event| {
                let name = match event {
                    Event::CheckInRecorded { .. } => "check_in",
                    Event::GardenRegenerated { .. } => "garden",
                    _ => "other",
                };
                seen.lock().unwrap().push(name);
            })
        };

        garden.check_in(Some(MoodLevel::Neutral), NO_FACTORS, "");
        garden.check_in(None, NO_FACTORS, "");
        assert!(garden.unsubscribe(id));
        garden.check_in(Some(MoodLevel::Neutral), NO_FACTORS, "");

        assert_eq!(*seen.lock().unwrap(), vec!["check_in", "garden"]);
    }

    #[test]
    fn seeded_gardens_are_reproducible() {
        let entries: Vec<_> = (0..6)
            .map(|d| MoodEntry::new(noon() - Duration::days(d), MoodLevel::High, BTreeSet::new(), ""))
            .collect();
        let (a, _) = open_with(MemoryStore::with_entries(entries.clone()), &seeded_config());
        let (b, _) = open_with(MemoryStore::with_entries(entries), &seeded_config());
        assert_eq!(a.flowers(), b.flowers());
    }
}
