//! Local state machines driven by a one-second tick: the focus timer and the
//! breathing exercise.

pub mod breathing;
pub mod focus;
pub mod ticker;

pub use breathing::{
    BreathingCycle, BreathingEvent, BreathingPattern, BreathingPhase, BreathingState,
};
pub use focus::{FocusEvent, FocusPhase, FocusTimer};
pub use ticker::{TICK_PERIOD, Tickable, TickerHandle, spawn_ticker};
