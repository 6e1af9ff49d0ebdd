//! One-second tick driver for the timer state machines.
//!
//! Ticks are applied one at a time while holding the target's mutex, and the
//! cancellation flag is set under that same mutex. Once [`TickerHandle::stop`]
//! returns, no further tick can touch the target.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::breathing::{BreathingCycle, BreathingEvent};
use super::focus::{FocusEvent, FocusTimer};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub trait Tickable: Send + 'static {
    type Event: Send + 'static;

    fn tick(&mut self) -> Vec<Self::Event>;
}

impl Tickable for FocusTimer {
    type Event = FocusEvent;

    fn tick(&mut self) -> Vec<FocusEvent> {
        FocusTimer::tick(self)
    }
}

impl Tickable for BreathingCycle {
    type Event = BreathingEvent;

    fn tick(&mut self) -> Vec<BreathingEvent> {
        BreathingCycle::tick(self)
    }
}

pub struct TickerHandle<T> {
    target: Arc<Mutex<T>>,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl<T> TickerHandle<T> {
    /// Stop ticking. Waits for an in-flight tick to finish first.
    pub fn stop(&self) {
        match self.target.lock() {
            Ok(_guard) => self.cancelled.store(true, Ordering::SeqCst),
            Err(poisoned) => {
                let _guard = poisoned.into_inner();
                self.cancelled.store(true, Ordering::SeqCst);
            }
        }
        self.task.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl<T> Drop for TickerHandle<T> {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }
}

/// Tick `target` every `period` on the current tokio runtime.
///
/// `on_events` runs with the target still locked, right after the tick that
/// produced the events. It must not lock the target itself.
pub fn spawn_ticker<T, F>(
    target: Arc<Mutex<T>>,
    period: Duration,
    mut on_events: F,
) -> TickerHandle<T>
where
    T: Tickable,
    F: FnMut(Vec<T::Event>) + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));

    let task = {
        let target = Arc::clone(&target);
        let cancelled = Arc::clone(&cancelled);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;

                let Ok(mut guard) = target.lock() else {
                    warn!("Ticker target lock poisoned, stopping");
                    break;
                };
                if cancelled.load(Ordering::SeqCst) {
                    break;
                }

                let events = guard.tick();
                if !events.is_empty() {
                    on_events(events);
                }
            }

            debug!("ticker stopped");
        })
    };

    TickerHandle {
        target,
        cancelled,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::FocusPhase;
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn test_ticker_runs_focus_session_to_break() {
        let timer = Arc::new(Mutex::new(FocusTimer::default()));
        timer.lock().unwrap().start();

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let handle = spawn_ticker(Arc::clone(&timer), TICK_PERIOD, move |events| {
            sink.lock().unwrap().extend(events);
        });

        tokio::time::sleep(Duration::from_millis(1500 * 1000 + 500)).await;

        {
            let timer = timer.lock().unwrap();
            assert_eq!(timer.phase(), FocusPhase::BreakPaused);
            assert_eq!(timer.completed_sessions(), 1);
        }
        assert_eq!(
            *received.lock().unwrap(),
            vec![FocusEvent::FocusTimeEarned(25)]
        );

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_ticker_makes_no_further_changes() {
        let timer = Arc::new(Mutex::new(FocusTimer::default()));
        timer.lock().unwrap().start();

        let handle = spawn_ticker(Arc::clone(&timer), TICK_PERIOD, |_| {});
        tokio::time::sleep(Duration::from_millis(3500)).await;
        handle.stop();
        assert!(handle.is_stopped());

        let frozen = timer.lock().unwrap().remaining();
        assert_eq!(frozen, (24, 57));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(timer.lock().unwrap().remaining(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_ticker() {
        let cycle = Arc::new(Mutex::new(BreathingCycle::default()));
        cycle.lock().unwrap().start();

        let handle = spawn_ticker(Arc::clone(&cycle), TICK_PERIOD, |_| {});
        tokio::time::sleep(Duration::from_millis(19 * 1000 + 500)).await;
        assert_eq!(cycle.lock().unwrap().completed_cycles(), 1);

        drop(handle);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(cycle.lock().unwrap().completed_cycles(), 1);
    }
}
