//! The scripted countdown timeline as one cancellable task.

use crate::phase::{Phase, PhaseMachine};

/// Offsets from start, in milliseconds, at which each later phase begins.
/// `Countdown5` is entered immediately on start.
pub const SCHEDULE: [(f64, Phase); 7] = [
    (1000.0, Phase::Countdown4),
    (2000.0, Phase::Countdown3),
    (3000.0, Phase::Countdown2),
    (4000.0, Phase::Countdown1),
    (5000.0, Phase::YearReveal),
    (8500.0, Phase::TreeFormation),
    (15500.0, Phase::PhotoWall),
];

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SequenceError {
    #[error("sequence already running ({elapsed_ms:.0} ms in)")]
    AlreadyRunning { elapsed_ms: f64 },
}

/// Advanced by wall-clock deltas, independent of how often frames render.
#[derive(Debug, Default)]
pub struct SequenceDirector {
    running: bool,
    elapsed_ms: f64,
    next_step: usize,
}

impl SequenceDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Countdown5` and begin the timeline. Rejected while running.
    pub fn start(&mut self, phase: &mut PhaseMachine) -> Result<(), SequenceError> {
        if self.running {
            return Err(SequenceError::AlreadyRunning { elapsed_ms: self.elapsed_ms });
        }
        self.running = true;
        self.elapsed_ms = 0.0;
        self.next_step = 0;
        phase.set(Phase::Countdown5);
        log::info!("sequence started");
        Ok(())
    }

    /// Stop without touching the current phase.
    pub fn cancel(&mut self) {
        if self.running {
            log::info!("sequence cancelled at {:.0} ms", self.elapsed_ms);
        }
        self.running = false;
    }

    /// Advance by `dt` seconds, firing every step that became due, in order.
    /// Returns true on the call that completes the timeline.
    pub fn advance(&mut self, dt: f32, phase: &mut PhaseMachine) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms += f64::from(dt.max(0.0)) * 1000.0;

        while let Some(&(at, next)) = SCHEDULE.get(self.next_step) {
            if self.elapsed_ms < at {
                break;
            }
            phase.set(next);
            self.next_step += 1;
        }

        if self.next_step == SCHEDULE.len() {
            self.running = false;
            log::info!("sequence complete");
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run at 60 fps until at least `until_ms` has passed.
    fn run(director: &mut SequenceDirector, phase: &mut PhaseMachine, until_ms: f64) {
        let dt = 1.0 / 60.0;
        while director.elapsed_ms() < until_ms && director.is_running() {
            director.advance(dt, phase);
        }
    }

    #[test]
    fn start_enters_first_countdown() {
        let mut phase = PhaseMachine::new();
        let mut director = SequenceDirector::new();
        director.start(&mut phase).unwrap();
        assert_eq!(phase.current(), Phase::Countdown5);
        assert!(director.is_running());
    }

    #[test]
    fn timeline_hits_each_phase() {
        let mut phase = PhaseMachine::new();
        let mut director = SequenceDirector::new();
        director.start(&mut phase).unwrap();

        run(&mut director, &mut phase, 980.0);
        assert_eq!(phase.current(), Phase::Countdown5);
        run(&mut director, &mut phase, 1020.0);
        assert_eq!(phase.current(), Phase::Countdown4);
        run(&mut director, &mut phase, 5020.0);
        assert_eq!(phase.current(), Phase::YearReveal);
        run(&mut director, &mut phase, 8520.0);
        assert_eq!(phase.current(), Phase::TreeFormation);
        run(&mut director, &mut phase, 15520.0);
        assert_eq!(phase.current(), Phase::PhotoWall);
        assert!(!director.is_running());
    }

    #[test]
    fn large_jump_fires_every_step_in_order() {
        let mut phase = PhaseMachine::new();
        let mut director = SequenceDirector::new();
        director.start(&mut phase).unwrap();
        let before = phase.revision();
        assert!(director.advance(20.0, &mut phase));
        assert_eq!(phase.current(), Phase::PhotoWall);
        assert_eq!(phase.revision() - before, SCHEDULE.len() as u64);
    }

    #[test]
    fn retrigger_is_rejected() {
        let mut phase = PhaseMachine::new();
        let mut director = SequenceDirector::new();
        director.start(&mut phase).unwrap();
        director.advance(2.5, &mut phase);
        let err = director.start(&mut phase).unwrap_err();
        assert_eq!(err, SequenceError::AlreadyRunning { elapsed_ms: 2500.0 });
        assert_eq!(phase.current(), Phase::Countdown3);
    }

    #[test]
    fn cancel_stops_and_allows_restart() {
        let mut phase = PhaseMachine::new();
        let mut director = SequenceDirector::new();
        director.start(&mut phase).unwrap();
        director.advance(1.5, &mut phase);
        director.cancel();
        director.advance(30.0, &mut phase);
        assert_eq!(phase.current(), Phase::Countdown4);

        director.start(&mut phase).unwrap();
        assert_eq!(phase.current(), Phase::Countdown5);
    }

    #[test]
    fn completed_sequence_can_run_again() {
        let mut phase = PhaseMachine::new();
        let mut director = SequenceDirector::new();
        director.start(&mut phase).unwrap();
        director.advance(16.0, &mut phase);
        assert!(director.start(&mut phase).is_ok());
    }
}
