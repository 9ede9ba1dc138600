//! Timer driver for [`BreathingSession`].
//!
//! Owns the only timing primitive in the breathing path: a tokio task that
//! sleeps for the current phase's duration and then ticks the session.
//! Stopping aborts the pending sleep, and any tick that still lands is
//! discarded by the session's generation check.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::session::BreathingSession;
use crate::error::{CoreError, Result};
use crate::events::Event;

const EVENT_CAPACITY: usize = 64;

pub struct BreathingDriver {
    session: Arc<Mutex<BreathingSession>>,
    events: broadcast::Sender<Event>,
    /// Multiplier applied to every phase duration.
    time_scale: f64,
    task: Option<JoinHandle<()>>,
}

impl BreathingDriver {
    pub fn new(session: BreathingSession) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            session: Arc::new(Mutex::new(session)),
            events,
            time_scale: 1.0,
            task: None,
        }
    }

    /// Scale phase durations, e.g. `0.1` for a ten times faster session.
    /// Zero, negative and non-finite values are ignored.
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        if time_scale.is_finite() && time_scale > 0.0 {
            self.time_scale = time_scale;
        }
        self
    }

    /// Receive every event the session emits from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> BreathingSession {
        lock(&self.session).clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Start (or restart) a session and arm the phase timer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoRuntime`] when called outside a tokio runtime.
    pub fn start(&mut self) -> Result<()> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| CoreError::NoRuntime)?;
        self.cancel_timer();

        let (event, generation) = {
            let mut session = lock(&self.session);
            let event = session.start();
            (event, session.generation())
        };
        if let Some(event) = event {
            let _ = self.events.send(event);
        }

        self.task = Some(handle.spawn(run_phases(
            Arc::clone(&self.session),
            self.events.clone(),
            self.time_scale,
            generation,
        )));
        Ok(())
    }

    /// Stop the session and cancel the pending phase timer.
    pub fn stop(&mut self) {
        self.cancel_timer();
        let event = lock(&self.session).stop();
        if let Some(event) = event {
            let _ = self.events.send(event);
        }
    }

    /// Wait for the running session to finish. Never returns for an
    /// uncapped session unless another handle stops it.
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for BreathingDriver {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

async fn run_phases(
    session: Arc<Mutex<BreathingSession>>,
    events: broadcast::Sender<Event>,
    time_scale: f64,
    generation: u64,
) {
    loop {
        let wait = {
            let session = lock(&session);
            if session.generation() != generation || !session.is_breathing() {
                break;
            }
            scaled(session.phase().duration(), time_scale)
        };

        tokio::time::sleep(wait).await;

        let event = lock(&session).tick_for(generation);
        match event {
            Some(event) => {
                let finished = matches!(event, Event::BreathingCompleted { .. });
                let _ = events.send(event);
                if finished {
                    break;
                }
            }
            None => break,
        }
    }
}

fn scaled(duration: Duration, time_scale: f64) -> Duration {
    Duration::try_from_secs_f64(duration.as_secs_f64() * time_scale).unwrap_or(duration)
}

fn lock(session: &Mutex<BreathingSession>) -> MutexGuard<'_, BreathingSession> {
    session.lock().unwrap_or_else(|e| e.into_inner())
}
