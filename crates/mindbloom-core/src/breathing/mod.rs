mod driver;
mod phase;
mod session;

pub use driver::BreathingDriver;
pub use phase::BreathPhase;
pub use session::{progress_label, BreathingSession, DEFAULT_CYCLE_CAP};
