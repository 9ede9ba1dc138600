//! Breathing session state machine.
//!
//! Pure transition logic with no timing of its own: the caller waits out
//! each phase's duration and then calls `tick()`. See
//! [`super::BreathingDriver`] for a tokio-backed caller.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -start-> Inhale -> HoldIn -> Exhale -> HoldOut -> Inhale ...
//!                                                  \-> Complete (cap reached)
//! any -stop-> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = BreathingSession::new(Some(4));
//! session.start();
//! // After session.phase().duration() elapses:
//! session.tick(); // Returns Some(Event) describing the transition
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::phase::BreathPhase;
use crate::events::Event;

/// Default number of cycles per session.
pub const DEFAULT_CYCLE_CAP: u32 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingSession {
    phase: BreathPhase,
    is_breathing: bool,
    cycles_completed: u32,
    /// `None` runs until stopped.
    cycle_cap: Option<u32>,
    /// Bumped by `start()` and `stop()` so timers armed for an earlier
    /// session can be recognized and dropped.
    generation: u64,
}

impl Default for BreathingSession {
    fn default() -> Self {
        Self::new(Some(DEFAULT_CYCLE_CAP))
    }
}

impl BreathingSession {
    /// A zero cap is treated as uncapped.
    pub fn new(cycle_cap: Option<u32>) -> Self {
        Self {
            phase: BreathPhase::Idle,
            is_breathing: false,
            cycles_completed: 0,
            cycle_cap: cycle_cap.filter(|cap| *cap > 0),
            generation: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn is_breathing(&self) -> bool {
        self.is_breathing
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    pub fn cycle_cap(&self) -> Option<u32> {
        self.cycle_cap
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// "2/4 cycles", or "2 cycles" when uncapped.
    pub fn progress_label(&self) -> String {
        progress_label(self.cycles_completed, self.cycle_cap)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new session at `Inhale`. Restarts from zero if one is running.
    pub fn start(&mut self) -> Option<Event> {
        self.generation = self.generation.wrapping_add(1);
        self.cycles_completed = 0;
        self.is_breathing = true;
        self.phase = BreathPhase::Inhale;
        tracing::debug!(generation = self.generation, cap = ?self.cycle_cap, "breathing started");
        Some(Event::BreathingStarted {
            cycle_cap: self.cycle_cap,
            at: Utc::now(),
        })
    }

    /// End the session immediately, whatever the current phase.
    pub fn stop(&mut self) -> Option<Event> {
        let was_breathing = self.is_breathing;
        self.generation = self.generation.wrapping_add(1);
        self.is_breathing = false;
        self.phase = BreathPhase::Idle;
        if !was_breathing {
            return None;
        }
        tracing::debug!(cycles = self.cycles_completed, "breathing stopped");
        Some(Event::BreathingStopped {
            cycles_completed: self.cycles_completed,
            at: Utc::now(),
        })
    }

    /// Advance to the next phase. No-op unless a session is running.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_breathing || !self.phase.is_active() {
            return None;
        }

        let next = self.phase.next();
        if self.phase == BreathPhase::HoldOut && next == BreathPhase::Inhale {
            self.cycles_completed += 1;
            if self.cycle_cap.is_some_and(|cap| self.cycles_completed >= cap) {
                self.phase = BreathPhase::Complete;
                self.is_breathing = false;
                tracing::info!(cycles = self.cycles_completed, "breathing session complete");
                return Some(Event::BreathingCompleted {
                    cycles_completed: self.cycles_completed,
                    at: Utc::now(),
                });
            }
        }

        self.phase = next;
        tracing::debug!(phase = ?self.phase, cycles = self.cycles_completed, "breath phase advanced");
        Some(Event::PhaseChanged {
            phase: self.phase,
            cycles_completed: self.cycles_completed,
            at: Utc::now(),
        })
    }

    /// `tick()` on behalf of a timer armed during `generation`. Dropped if
    /// the session has since been stopped or restarted.
    pub fn tick_for(&mut self, generation: u64) -> Option<Event> {
        if generation != self.generation {
            tracing::debug!(stale = generation, current = self.generation, "dropping stale tick");
            return None;
        }
        self.tick()
    }
}

/// "2/4 cycles" when capped, "1 cycle" / "3 cycles" otherwise.
pub fn progress_label(cycles_completed: u32, cycle_cap: Option<u32>) -> String {
    match cycle_cap {
        Some(cap) => format!("{cycles_completed}/{cap} cycles"),
        None if cycles_completed == 1 => "1 cycle".to_string(),
        None => format!("{cycles_completed} cycles"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases_after_ticks(session: &mut BreathingSession, ticks: usize) -> Vec<BreathPhase> {
        (0..ticks)
            .map(|_| {
                session.tick();
                session.phase()
            })
            .collect()
    }

    #[test]
    fn starts_idle() {
        let session = BreathingSession::default();
        assert_eq!(session.phase(), BreathPhase::Idle);
        assert!(!session.is_breathing());
        assert_eq!(session.cycles_completed(), 0);
        assert_eq!(session.cycle_cap(), Some(4));
    }

    #[test]
    fn one_cycle_in_four_ticks() {
        let mut session = BreathingSession::default();
        session.start();
        assert_eq!(session.phase(), BreathPhase::Inhale);

        let phases = phases_after_ticks(&mut session, 4);
        assert_eq!(
            phases,
            vec![
                BreathPhase::HoldIn,
                BreathPhase::Exhale,
                BreathPhase::HoldOut,
                BreathPhase::Inhale
            ]
        );
        assert_eq!(session.cycles_completed(), 1);
        assert!(session.is_breathing());
    }

    #[test]
    fn capped_session_completes_after_sixteen_ticks() {
        let mut session = BreathingSession::new(Some(4));
        session.start();
        for _ in 0..15 {
            assert!(session.tick().is_some());
        }
        let last = session.tick();
        assert!(matches!(
            last,
            Some(Event::BreathingCompleted {
                cycles_completed: 4,
                ..
            })
        ));
        assert_eq!(session.phase(), BreathPhase::Complete);
        assert!(!session.is_breathing());
        assert_eq!(session.cycles_completed(), 4);

        assert!(session.tick().is_none());
        assert_eq!(session.phase(), BreathPhase::Complete);
        assert_eq!(session.cycles_completed(), 4);
    }

    #[test]
    fn uncapped_session_keeps_cycling() {
        let mut session = BreathingSession::new(None);
        session.start();
        phases_after_ticks(&mut session, 40);
        assert_eq!(session.cycles_completed(), 10);
        assert_eq!(session.phase(), BreathPhase::Inhale);
        assert!(session.is_breathing());
    }

    #[test]
    fn zero_cap_is_uncapped() {
        assert_eq!(BreathingSession::new(Some(0)).cycle_cap(), None);
    }

    #[test]
    fn stop_mid_phase_returns_to_idle() {
        let mut session = BreathingSession::default();
        session.start();
        session.tick();
        session.tick();
        assert_eq!(session.phase(), BreathPhase::Exhale);

        assert!(session.stop().is_some());
        assert_eq!(session.phase(), BreathPhase::Idle);
        assert!(!session.is_breathing());

        assert!(session.tick().is_none());
        assert_eq!(session.phase(), BreathPhase::Idle);
    }

    #[test]
    fn stop_when_idle_reports_nothing() {
        let mut session = BreathingSession::default();
        assert!(session.stop().is_none());
        assert_eq!(session.phase(), BreathPhase::Idle);
    }

    #[test]
    fn tick_before_start_is_noop() {
        let mut session = BreathingSession::default();
        assert!(session.tick().is_none());
        assert_eq!(session.phase(), BreathPhase::Idle);
    }

    #[test]
    fn restart_resets_counters() {
        let mut session = BreathingSession::default();
        session.start();
        phases_after_ticks(&mut session, 6);
        assert_eq!(session.cycles_completed(), 1);

        session.start();
        assert_eq!(session.cycles_completed(), 0);
        assert_eq!(session.phase(), BreathPhase::Inhale);
        assert!(session.is_breathing());
    }

    #[test]
    fn stale_generation_tick_is_dropped() {
        let mut session = BreathingSession::default();
        session.start();
        let armed = session.generation();

        session.stop();
        session.start();
        assert!(session.tick_for(armed).is_none());
        assert_eq!(session.phase(), BreathPhase::Inhale);

        let current = session.generation();
        assert!(session.tick_for(current).is_some());
        assert_eq!(session.phase(), BreathPhase::HoldIn);
    }

    #[test]
    fn progress_label_formats() {
        let mut capped = BreathingSession::new(Some(4));
        capped.start();
        phases_after_ticks(&mut capped, 8);
        assert_eq!(capped.progress_label(), "2/4 cycles");

        let mut open = BreathingSession::new(None);
        open.start();
        phases_after_ticks(&mut open, 4);
        assert_eq!(open.progress_label(), "1 cycle");
        assert_eq!(progress_label(0, None), "0 cycles");
        assert_eq!(progress_label(3, Some(5)), "3/5 cycles");
    }
}
