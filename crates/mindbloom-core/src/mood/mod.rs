mod entry;
mod insights;
mod level;
pub mod stats;

pub use entry::{CheckInDraft, MoodEntry};
pub use insights::{daily_affirmation, greeting};
pub use level::{MoodLevel, Rgb, WellnessFactor};
pub use stats::{has_checked_in_today, streak, streak_label, weekly_average};
