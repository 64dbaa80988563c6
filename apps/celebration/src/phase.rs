//! The scripted stages of the experience and a pull-based change watcher.

/// Exactly one phase is current at a time. Intended order is declaration order;
/// `PhotoWall` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Countdown5,
    Countdown4,
    Countdown3,
    Countdown2,
    Countdown1,
    YearReveal,
    TreeFormation,
    PhotoWall,
}

impl Phase {
    pub const ALL: [Phase; 9] = [
        Phase::Idle,
        Phase::Countdown5,
        Phase::Countdown4,
        Phase::Countdown3,
        Phase::Countdown2,
        Phase::Countdown1,
        Phase::YearReveal,
        Phase::TreeFormation,
        Phase::PhotoWall,
    ];

    /// Stable numeric code sent to the host.
    pub fn code(self) -> u32 {
        match self {
            Phase::Idle => 0,
            Phase::Countdown5 => 1,
            Phase::Countdown4 => 2,
            Phase::Countdown3 => 3,
            Phase::Countdown2 => 4,
            Phase::Countdown1 => 5,
            Phase::YearReveal => 6,
            Phase::TreeFormation => 7,
            Phase::PhotoWall => 8,
        }
    }

    pub fn from_code(code: u32) -> Option<Phase> {
        Phase::ALL.get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Countdown5 => "COUNTDOWN_5",
            Phase::Countdown4 => "COUNTDOWN_4",
            Phase::Countdown3 => "COUNTDOWN_3",
            Phase::Countdown2 => "COUNTDOWN_2",
            Phase::Countdown1 => "COUNTDOWN_1",
            Phase::YearReveal => "YEAR_REVEAL",
            Phase::TreeFormation => "TREE_FORMATION",
            Phase::PhotoWall => "PHOTO_WALL",
        }
    }

    /// The digit shown during a countdown phase.
    pub fn countdown_digit(self) -> Option<u8> {
        match self {
            Phase::Countdown5 => Some(5),
            Phase::Countdown4 => Some(4),
            Phase::Countdown3 => Some(3),
            Phase::Countdown2 => Some(2),
            Phase::Countdown1 => Some(1),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Holds the current phase. Every `set` bumps the revision, even when the
/// phase does not change, so watchers see repeated sets as changes.
#[derive(Debug, Default)]
pub struct PhaseMachine {
    current: Phase,
    revision: u64,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional overwrite; no predecessor check.
    pub fn set(&mut self, phase: Phase) {
        if phase != self.current {
            log::info!("phase {} -> {}", self.current, phase);
        }
        self.current = phase;
        self.revision += 1;
    }

    pub fn current(&self) -> Phase {
        self.current
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// A watcher that has already seen the current state.
    pub fn watch(&self) -> PhaseWatcher {
        PhaseWatcher { seen: self.revision }
    }
}

/// Remembers the last revision it saw.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseWatcher {
    seen: u64,
}

impl PhaseWatcher {
    /// Returns the current phase if it was set since the last poll.
    pub fn poll(&mut self, machine: &PhaseMachine) -> Option<Phase> {
        if machine.revision() == self.seen {
            return None;
        }
        self.seen = machine.revision();
        Some(machine.current())
    }
}
