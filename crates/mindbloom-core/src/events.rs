use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::breathing::BreathPhase;
use crate::mood::MoodLevel;

/// Every state change in the system produces an Event.
/// The presentation layer subscribes to them to know when to re-render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    CheckInRecorded {
        entry_id: Uuid,
        mood: MoodLevel,
        at: DateTime<Utc>,
    },
    GardenRegenerated {
        flower_count: usize,
        at: DateTime<Utc>,
    },
    BreathingStarted {
        cycle_cap: Option<u32>,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        phase: BreathPhase,
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
    BreathingCompleted {
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
    BreathingStopped {
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
}

/// Handle returned by [`Subscribers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn Fn(&Event) + Send>;

/// Observer list. Callbacks run synchronously, in subscription order.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl Fn(&Event) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    pub fn notify(&self, event: &Event) {
        for (_, callback) in &self.callbacks {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
