//! The garden: one flower per check-in entry.
//!
//! Flowers are a disposable projection of the entry list. They are rebuilt
//! in full whenever entries change and never persisted. Randomness only
//! touches cosmetics (jitter, scale, sway, petals), never count or order.

pub mod layout;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mood::{MoodEntry, MoodLevel};
use crate::storage::config::GardenConfig;

pub use layout::{base_position, layout_position, Jitter, Position};

/// One flower in the garden, positioned as fractions of the canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenFlower {
    /// Entry this flower was grown from.
    pub entry_id: Uuid,
    pub position: Position,
    pub scale: f64,
    /// Sway rotation offset in degrees.
    pub sway_degrees: f64,
    /// 0.0 (bud) ..= 1.0 (full bloom).
    pub bloom_progress: f64,
    pub petal_count: u8,
    pub mood: MoodLevel,
}

impl GardenFlower {
    /// Flowers of neutral or better moods open their petals.
    pub fn is_blooming(&self) -> bool {
        self.mood >= MoodLevel::Neutral
    }
}

/// Grow the full garden for `entries`, in entry order.
///
/// Out-of-bounds ranges in `config` fall back to their defaults.
pub fn grow_garden<R: Rng + ?Sized>(
    entries: &[MoodEntry],
    config: &GardenConfig,
    rng: &mut R,
) -> Vec<GardenFlower> {
    let config = &config.sanitized();
    let total = entries.len();
    let jitter = Jitter {
        x: config.jitter_x,
        y: config.jitter_y,
    };
    let (scale_lo, scale_hi) = ordered(config.scale_min, config.scale_max);
    let sway = config.sway_degrees.abs();

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| GardenFlower {
            entry_id: entry.id,
            position: layout_position(index, total, jitter, rng),
            scale: rng.gen_range(scale_lo..=scale_hi),
            sway_degrees: rng.gen_range(-sway..=sway),
            bloom_progress: 1.0,
            petal_count: rng.gen_range(5..=8),
            mood: entry.mood,
        })
        .collect()
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;
    use std::collections::BTreeSet;

    fn entries(moods: &[MoodLevel]) -> Vec<MoodEntry> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        moods
            .iter()
            .enumerate()
            .map(|(i, m)| MoodEntry::new(start + Duration::days(i as i64), *m, BTreeSet::new(), ""))
            .collect()
    }

    #[test]
    fn empty_entries_grow_nothing() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        assert!(grow_garden(&[], &GardenConfig::default(), &mut rng).is_empty());
    }

    #[test]
    fn flowers_follow_entry_order() {
        let entries = entries(&[MoodLevel::Low, MoodLevel::VeryHigh, MoodLevel::Neutral]);
        let mut rng = Mcg128Xsl64::seed_from_u64(2);
        let flowers = grow_garden(&entries, &GardenConfig::default(), &mut rng);

        let ids: Vec<_> = flowers.iter().map(|f| f.entry_id).collect();
        let expected: Vec<_> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(flowers[1].mood, MoodLevel::VeryHigh);
        assert!(!flowers[0].is_blooming());
        assert!(flowers[2].is_blooming());
    }

    #[test]
    fn same_seed_same_garden() {
        let entries = entries(&[MoodLevel::High; 6]);
        let config = GardenConfig::default();
        let a = grow_garden(&entries, &config, &mut Mcg128Xsl64::seed_from_u64(42));
        let b = grow_garden(&entries, &config, &mut Mcg128Xsl64::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn swapped_scale_bounds_are_tolerated() {
        let config = GardenConfig {
            scale_min: 1.2,
            scale_max: 0.7,
            ..GardenConfig::default()
        };
        let entries = entries(&[MoodLevel::Neutral; 3]);
        let flowers = grow_garden(&entries, &config, &mut Mcg128Xsl64::seed_from_u64(3));
        assert!(flowers.iter().all(|f| (0.7..=1.2).contains(&f.scale)));
    }

    #[test]
    fn unusable_ranges_fall_back_to_defaults() {
        let entries = entries(&[MoodLevel::High; 4]);
        let defaults = GardenConfig::default();
        for config in [
            GardenConfig { scale_min: f64::NAN, ..GardenConfig::default() },
            GardenConfig { sway_degrees: f64::INFINITY, ..GardenConfig::default() },
            GardenConfig { sway_degrees: 1e308, ..GardenConfig::default() },
            GardenConfig { jitter_x: f64::NEG_INFINITY, jitter_y: f64::NAN, ..GardenConfig::default() },
        ] {
            let flowers = grow_garden(&entries, &config, &mut Mcg128Xsl64::seed_from_u64(5));
            assert_eq!(flowers.len(), 4);
            for f in &flowers {
                assert!((defaults.scale_min..=defaults.scale_max).contains(&f.scale));
                assert!(f.sway_degrees.abs() <= defaults.sway_degrees);
            }
        }
    }

    proptest! {
        #[test]
        fn one_flower_per_entry(count in 0usize..64, seed in any::<u64>()) {
            let entries = entries(&vec![MoodLevel::Neutral; count]);
            let config = GardenConfig::default();
            let flowers = grow_garden(&entries, &config, &mut Mcg128Xsl64::seed_from_u64(seed));
            prop_assert_eq!(flowers.len(), count);
            for f in &flowers {
                prop_assert!((config.scale_min..=config.scale_max).contains(&f.scale));
                prop_assert!(f.sway_degrees.abs() <= config.sway_degrees);
                prop_assert!((5..=8).contains(&f.petal_count));
                prop_assert_eq!(f.bloom_progress, 1.0);
            }
        }
    }
}
