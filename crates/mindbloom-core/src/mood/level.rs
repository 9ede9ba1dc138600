use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Display color as normalized RGB components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form for terminals and web views.
    pub fn hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
    }
}

/// Five-point mood scale used for the daily check-in.
///
/// Stored as its integer value (1..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MoodLevel {
    VeryLow = 1,
    Low = 2,
    Neutral = 3,
    High = 4,
    VeryHigh = 5,
}

impl MoodLevel {
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::VeryLow,
        MoodLevel::Low,
        MoodLevel::Neutral,
        MoodLevel::High,
        MoodLevel::VeryHigh,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodLevel::VeryLow => "Very Low",
            MoodLevel::Low => "Low",
            MoodLevel::Neutral => "Neutral",
            MoodLevel::High => "High",
            MoodLevel::VeryHigh => "Very High",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodLevel::VeryLow => "😞",
            MoodLevel::Low => "😕",
            MoodLevel::Neutral => "😐",
            MoodLevel::High => "🙂",
            MoodLevel::VeryHigh => "😄",
        }
    }

    /// Petal color of the flower grown from an entry with this mood.
    pub fn petal_color(self) -> Rgb {
        match self {
            MoodLevel::VeryLow => Rgb::new(0.55, 0.60, 0.80),
            MoodLevel::Low => Rgb::new(0.55, 0.78, 0.88),
            MoodLevel::Neutral => Rgb::new(0.55, 0.85, 0.70),
            MoodLevel::High => Rgb::new(1.00, 0.84, 0.40),
            MoodLevel::VeryHigh => Rgb::new(1.00, 0.60, 0.45),
        }
    }

    pub fn accent_color(self) -> Rgb {
        match self {
            MoodLevel::VeryLow => Rgb::new(0.35, 0.38, 0.65),
            MoodLevel::Low => Rgb::new(0.25, 0.55, 0.75),
            MoodLevel::Neutral => Rgb::new(0.20, 0.65, 0.45),
            MoodLevel::High => Rgb::new(0.85, 0.65, 0.10),
            MoodLevel::VeryHigh => Rgb::new(0.90, 0.35, 0.20),
        }
    }
}

impl TryFrom<u8> for MoodLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MoodLevel::VeryLow),
            2 => Ok(MoodLevel::Low),
            3 => Ok(MoodLevel::Neutral),
            4 => Ok(MoodLevel::High),
            5 => Ok(MoodLevel::VeryHigh),
            other => Err(ValidationError::MoodOutOfRange(other as i64)),
        }
    }
}

impl From<MoodLevel> for u8 {
    fn from(mood: MoodLevel) -> Self {
        mood.value()
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

/// Lifestyle factors the user can tag during a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellnessFactor {
    Sleep,
    Exercise,
    Social,
    Nutrition,
    Nature,
    Gratitude,
    Learning,
}

impl WellnessFactor {
    pub const ALL: [WellnessFactor; 7] = [
        WellnessFactor::Sleep,
        WellnessFactor::Exercise,
        WellnessFactor::Social,
        WellnessFactor::Nutrition,
        WellnessFactor::Nature,
        WellnessFactor::Gratitude,
        WellnessFactor::Learning,
    ];

    /// Tag used in storage and on the command line.
    pub fn tag(self) -> &'static str {
        match self {
            WellnessFactor::Sleep => "sleep",
            WellnessFactor::Exercise => "exercise",
            WellnessFactor::Social => "social",
            WellnessFactor::Nutrition => "nutrition",
            WellnessFactor::Nature => "nature",
            WellnessFactor::Gratitude => "gratitude",
            WellnessFactor::Learning => "learning",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WellnessFactor::Sleep => "Sleep",
            WellnessFactor::Exercise => "Exercise",
            WellnessFactor::Social => "Social",
            WellnessFactor::Nutrition => "Nutrition",
            WellnessFactor::Nature => "Nature",
            WellnessFactor::Gratitude => "Gratitude",
            WellnessFactor::Learning => "Learning",
        }
    }
}

impl FromStr for WellnessFactor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        WellnessFactor::ALL
            .into_iter()
            .find(|f| f.tag() == wanted)
            .ok_or_else(|| ValidationError::UnknownFactor(s.to_string()))
    }
}

impl fmt::Display for WellnessFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
