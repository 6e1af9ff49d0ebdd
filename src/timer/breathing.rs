use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathingPattern {
    pub key: &'static str,
    pub name: &'static str,
    pub inhale: u32,
    pub hold: u32,
    pub exhale: u32,
}

pub const PATTERNS: [BreathingPattern; 3] = [
    BreathingPattern {
        key: "4-7-8",
        name: "4-7-8 Relaxing",
        inhale: 4,
        hold: 7,
        exhale: 8,
    },
    BreathingPattern {
        key: "4-4-4",
        name: "Box Breathing",
        inhale: 4,
        hold: 4,
        exhale: 4,
    },
    BreathingPattern {
        key: "6-2-6",
        name: "Calm Focus",
        inhale: 6,
        hold: 2,
        exhale: 6,
    },
];

impl BreathingPattern {
    /// Look up a preset by key, falling back to 4-7-8.
    pub fn by_key(key: &str) -> BreathingPattern {
        PATTERNS
            .iter()
            .find(|p| p.key == key.trim())
            .copied()
            .unwrap_or(PATTERNS[0])
    }

    pub fn seconds_for(&self, phase: BreathingPhase) -> u32 {
        match phase {
            BreathingPhase::Inhale => self.inhale,
            BreathingPhase::Hold => self.hold,
            BreathingPhase::Exhale => self.exhale,
        }
    }
}

impl Default for BreathingPattern {
    fn default() -> Self {
        PATTERNS[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathingPhase {
    pub fn next(self) -> BreathingPhase {
        match self {
            BreathingPhase::Inhale => BreathingPhase::Hold,
            BreathingPhase::Hold => BreathingPhase::Exhale,
            BreathingPhase::Exhale => BreathingPhase::Inhale,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "Breathe in slowly...",
            BreathingPhase::Hold => "Hold your breath...",
            BreathingPhase::Exhale => "Breathe out gently...",
        }
    }
}

impl fmt::Display for BreathingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreathingPhase::Inhale => write!(f, "Inhale"),
            BreathingPhase::Hold => write!(f, "Hold"),
            BreathingPhase::Exhale => write!(f, "Exhale"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreathingState {
    #[default]
    Inactive,
    Active {
        phase: BreathingPhase,
        remaining: u32,
    },
    Paused {
        phase: BreathingPhase,
        remaining: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingEvent {
    PhaseChanged(BreathingPhase),
    CycleCompleted(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BreathingCycle {
    pattern: BreathingPattern,
    state: BreathingState,
    completed_cycles: u32,
}

impl BreathingCycle {
    pub fn new(pattern: BreathingPattern) -> Self {
        Self {
            pattern,
            state: BreathingState::Inactive,
            completed_cycles: 0,
        }
    }

    pub fn pattern(&self) -> BreathingPattern {
        self.pattern
    }

    pub fn state(&self) -> BreathingState {
        self.state
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, BreathingState::Active { .. })
    }

    pub fn current_phase(&self) -> Option<BreathingPhase> {
        match self.state {
            BreathingState::Inactive => None,
            BreathingState::Active { phase, .. } | BreathingState::Paused { phase, .. } => {
                Some(phase)
            }
        }
    }

    pub fn instruction(&self) -> Option<&'static str> {
        self.current_phase().map(BreathingPhase::instruction)
    }

    /// Only allowed while inactive.
    pub fn select_pattern(&mut self, pattern: BreathingPattern) -> bool {
        if self.state != BreathingState::Inactive {
            return false;
        }
        self.pattern = pattern;
        true
    }

    /// Begin a fresh session at the inhale phase.
    pub fn start(&mut self) {
        self.state = BreathingState::Active {
            phase: BreathingPhase::Inhale,
            remaining: self.pattern.inhale,
        };
        self.completed_cycles = 0;
    }

    pub fn pause(&mut self) {
        if let BreathingState::Active { phase, remaining } = self.state {
            self.state = BreathingState::Paused { phase, remaining };
        }
    }

    pub fn resume(&mut self) {
        if let BreathingState::Paused { phase, remaining } = self.state {
            self.state = BreathingState::Active { phase, remaining };
        }
    }

    pub fn reset(&mut self) {
        self.state = BreathingState::Inactive;
        self.completed_cycles = 0;
    }

    pub fn tick(&mut self) -> Vec<BreathingEvent> {
        let BreathingState::Active { phase, remaining } = self.state else {
            return Vec::new();
        };

        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.state = BreathingState::Active { phase, remaining };
            return Vec::new();
        }

        let mut events = Vec::new();
        let next = phase.next();
        if phase == BreathingPhase::Exhale {
            self.completed_cycles += 1;
            events.push(BreathingEvent::CycleCompleted(self.completed_cycles));
        }
        events.push(BreathingEvent::PhaseChanged(next));
        self.state = BreathingState::Active {
            phase: next,
            remaining: self.pattern.seconds_for(next),
        };
        events
    }
}
