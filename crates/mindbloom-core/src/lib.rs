//! # MindBloom Core Library
//!
//! This library provides the core logic of MindBloom, a small personal
//! wellness companion: daily mood check-ins, a garden of flowers grown from
//! those check-ins, and a guided box-breathing exercise. The `mindbloom` CLI
//! and any GUI are thin layers over the same state model.
//!
//! ## Architecture
//!
//! - **Mood/Garden state**: [`MoodGarden`] owns the check-in entries, derives
//!   streak and weekly-average statistics, and regrows the garden layout on
//!   every change. Observers subscribe for change events.
//! - **Breathing**: [`BreathingSession`] is a pure phase state machine driven
//!   by `tick()`; [`BreathingDriver`] supplies the cancellable phase timer.
//! - **Storage**: one JSON file of entries plus TOML configuration.
//!
//! ## Key Components
//!
//! - [`MoodGarden`]: Check-in state container
//! - [`garden::layout`]: Deterministic flower grid layout
//! - [`BreathingSession`]: Breathing phase state machine
//! - [`EntryStore`]: Trait for entry persistence
//! - [`Config`]: Application configuration management

pub mod breathing;
pub mod clock;
pub mod error;
pub mod events;
pub mod garden;
pub mod mood;
pub mod state;
pub mod storage;

pub use breathing::{BreathPhase, BreathingDriver, BreathingSession};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use events::{Event, SubscriptionId};
pub use garden::{GardenFlower, Position};
pub use mood::{CheckInDraft, MoodEntry, MoodLevel, WellnessFactor};
pub use state::{CheckInOutcome, CheckInRejection, MoodGarden, MoodSummary};
pub use storage::{Config, EntryStore, JsonFileStore, MemoryStore};
