use std::fmt;

/// Focus lengths the timer can be set to, in minutes.
pub const FOCUS_DURATIONS: [u32; 5] = [15, 25, 30, 45, 60];
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const BREAK_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPhase {
    /// Ready to start a focus segment with a full clock.
    #[default]
    Idle,
    FocusRunning,
    FocusPaused,
    BreakRunning,
    /// Break pending or paused; `start` runs it.
    BreakPaused,
}

impl FocusPhase {
    pub fn is_running(self) -> bool {
        matches!(self, FocusPhase::FocusRunning | FocusPhase::BreakRunning)
    }

    pub fn is_break(self) -> bool {
        matches!(self, FocusPhase::BreakRunning | FocusPhase::BreakPaused)
    }
}

impl fmt::Display for FocusPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusPhase::Idle => write!(f, "READY"),
            FocusPhase::FocusRunning => write!(f, "FOCUS"),
            FocusPhase::FocusPaused => write!(f, "FOCUS (paused)"),
            FocusPhase::BreakRunning => write!(f, "BREAK"),
            FocusPhase::BreakPaused => write!(f, "BREAK (paused)"),
        }
    }
}

/// Rewards produced when a focus segment runs to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusEvent {
    FocusTimeEarned(u32),
    TaskCompleted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    phase: FocusPhase,
    minutes: u32,
    seconds: u32,
    focus_minutes: u32,
    break_minutes: u32,
    current_task: Option<String>,
    completed_sessions: u32,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MINUTES)
    }
}

impl FocusTimer {
    /// Unsupported durations fall back to the default length.
    pub fn new(focus_minutes: u32) -> Self {
        let focus_minutes = if FOCUS_DURATIONS.contains(&focus_minutes) {
            focus_minutes
        } else {
            DEFAULT_FOCUS_MINUTES
        };

        Self {
            phase: FocusPhase::Idle,
            minutes: focus_minutes,
            seconds: 0,
            focus_minutes,
            break_minutes: BREAK_MINUTES,
            current_task: None,
            completed_sessions: 0,
        }
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn remaining(&self) -> (u32, u32) {
        (self.minutes, self.seconds)
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn current_task(&self) -> Option<&str> {
        self.current_task.as_deref()
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    /// Change the focus length. Rejected while running or for lengths outside
    /// [`FOCUS_DURATIONS`]. A focus segment that has not finished restarts
    /// with the new length.
    pub fn set_duration(&mut self, minutes: u32) -> bool {
        if self.is_running() || !FOCUS_DURATIONS.contains(&minutes) {
            return false;
        }

        self.focus_minutes = minutes;
        if matches!(self.phase, FocusPhase::Idle | FocusPhase::FocusPaused) {
            self.phase = FocusPhase::Idle;
            self.set_clock(minutes);
        }
        true
    }

    /// Pick the todo a focus segment is working on. Rejected while running.
    pub fn select_task(&mut self, task_id: Option<String>) -> bool {
        if self.is_running() {
            return false;
        }
        self.current_task = task_id;
        true
    }

    pub fn start(&mut self) {
        self.phase = match self.phase {
            FocusPhase::Idle | FocusPhase::FocusPaused => FocusPhase::FocusRunning,
            FocusPhase::BreakPaused => FocusPhase::BreakRunning,
            running => running,
        };
    }

    pub fn pause(&mut self) {
        self.phase = match self.phase {
            FocusPhase::FocusRunning => FocusPhase::FocusPaused,
            FocusPhase::BreakRunning => FocusPhase::BreakPaused,
            other => other,
        };
    }

    /// Back to a full, stopped focus clock. Completed sessions are kept.
    pub fn reset(&mut self) {
        self.phase = FocusPhase::Idle;
        self.set_clock(self.focus_minutes);
    }

    /// End the running segment now, without any reward.
    pub fn skip(&mut self) {
        if self.is_running() {
            self.end_segment();
        }
    }

    /// Advance one second. Returns the rewards earned if a focus segment
    /// completed on this tick.
    pub fn tick(&mut self) -> Vec<FocusEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        }

        if self.minutes == 0 && self.seconds == 0 {
            self.complete_segment()
        } else {
            Vec::new()
        }
    }

    /// Fraction of the current segment that has elapsed, 0.0..=1.0.
    pub fn progress(&self) -> f64 {
        let total = if self.phase.is_break() {
            self.break_minutes
        } else {
            self.focus_minutes
        } * 60;
        let left = self.minutes * 60 + self.seconds;
        if total == 0 {
            return 0.0;
        }
        f64::from(total.saturating_sub(left)) / f64::from(total)
    }

    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }

    fn complete_segment(&mut self) -> Vec<FocusEvent> {
        let mut events = Vec::new();

        if !self.phase.is_break() {
            events.push(FocusEvent::FocusTimeEarned(self.focus_minutes));
            if let Some(task) = &self.current_task {
                events.push(FocusEvent::TaskCompleted(task.clone()));
            }
            self.completed_sessions += 1;
        }

        self.end_segment();
        events
    }

    /// Switch to the other kind of segment, stopped with a full clock.
    fn end_segment(&mut self) {
        if self.phase.is_break() {
            self.phase = FocusPhase::Idle;
            self.set_clock(self.focus_minutes);
        } else {
            self.phase = FocusPhase::BreakPaused;
            self.set_clock(self.break_minutes);
        }
    }

    fn set_clock(&mut self, minutes: u32) {
        self.minutes = minutes;
        self.seconds = 0;
    }
}
