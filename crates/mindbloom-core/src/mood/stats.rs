//! Derived check-in statistics.
//!
//! All functions are pure over an entry slice and a [`Clock`], so they can be
//! evaluated against any point in time.

use chrono::Duration;

use super::entry::MoodEntry;
use crate::clock::Clock;

/// Length of the trailing window used by [`weekly_average`].
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// True if the most recent entry falls on today's local calendar day.
pub fn has_checked_in_today(entries: &[MoodEntry], clock: &dyn Clock) -> bool {
    entries
        .last()
        .map(|last| clock.local_date(last.timestamp) == clock.today())
        .unwrap_or(false)
}

/// Consecutive calendar days with at least one entry, counted back from today.
///
/// A run that does not include today counts as broken: with no entry today
/// the streak is 0. Several entries on the same day count once.
pub fn streak(entries: &[MoodEntry], clock: &dyn Clock) -> u32 {
    let mut days: Vec<_> = entries
        .iter()
        .map(|e| clock.local_date(e.timestamp))
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));

    let mut expected = clock.today();
    let mut count = 0;
    for day in days {
        if day == expected {
            count += 1;
            match expected.pred_opt() {
                Some(prev) => expected = prev,
                None => break,
            }
        } else if day < expected {
            break;
        }
    }
    count
}

/// Mean mood over entries from the trailing seven days.
///
/// `None` when the window is empty; callers decide how to present that.
pub fn weekly_average(entries: &[MoodEntry], clock: &dyn Clock) -> Option<f64> {
    let cutoff = clock.now() - Duration::days(WEEKLY_WINDOW_DAYS);
    let (sum, count) = entries
        .iter()
        .filter(|e| e.timestamp >= cutoff)
        .fold((0u32, 0u32), |(sum, count), e| {
            (sum + u32::from(e.mood.value()), count + 1)
        });
    if count == 0 {
        None
    } else {
        Some(f64::from(sum) / f64::from(count))
    }
}

pub fn streak_label(streak: u32) -> String {
    if streak == 1 {
        "1 day".to_string()
    } else {
        format!("{streak} days")
    }
}
