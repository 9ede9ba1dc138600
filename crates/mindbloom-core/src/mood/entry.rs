use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::level::{MoodLevel, WellnessFactor};

/// A single mood check-in. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub mood: MoodLevel,
    #[serde(default)]
    pub factors: BTreeSet<WellnessFactor>,
    #[serde(default)]
    pub note: String,
}

impl MoodEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        mood: MoodLevel,
        factors: BTreeSet<WellnessFactor>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            mood,
            factors,
            note: note.into(),
        }
    }
}

/// Check-in form state held between edits and submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckInDraft {
    pub mood: Option<MoodLevel>,
    pub factors: BTreeSet<WellnessFactor>,
    pub note: String,
}

impl CheckInDraft {
    /// Flip a factor's membership. Returns whether it is now selected.
    pub fn toggle_factor(&mut self, factor: WellnessFactor) -> bool {
        if self.factors.remove(&factor) {
            false
        } else {
            self.factors.insert(factor);
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mood.is_none() && self.factors.is_empty() && self.note.is_empty()
    }
}
