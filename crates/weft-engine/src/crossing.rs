//! The railroad crossing state machine.

use rand::{Rng, RngExt};
use weft_core::Flow;
use weft_gen::RailTiming;

/// Phase of a railroad crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossingState {
    /// Quiet; the lane is safe.
    Waiting,
    /// Lights flashing; a train is imminent.
    Warning,
    /// A train is sweeping the lane.
    Moving,
}

/// A transition the crossing performed this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrossingEvent {
    /// Entered `Warning`: start the lights and bell.
    SignalStarted,
    /// Entered `Moving`: the train is on the lane.
    TrainEntered {
        /// Side the train sweeps from.
        flow: Flow,
    },
    /// Returned to `Waiting`: the lane is clear again.
    TrainExited,
}

/// Timer-driven `Waiting -> Warning -> Moving -> Waiting` loop for one
/// railroad lane.
///
/// The quiet interval, the train's side, and its speed are
/// re-randomized every cycle. Each [`tick`](TrainCrossing::tick)
/// performs at most one transition; a huge `dt` cannot skip the
/// warning phase, which is what gives the player a guaranteed reaction
/// window.
#[derive(Clone, Debug)]
pub struct TrainCrossing {
    timing: RailTiming,
    span: f64,
    state: CrossingState,
    clock: f64,
    wait_target: f64,
    flow: Flow,
    speed: f64,
    position: f64,
}

impl TrainCrossing {
    /// Arm a crossing over a lane of the given span; the first quiet
    /// interval is drawn immediately.
    pub fn new(timing: RailTiming, span: f64, rng: &mut impl Rng) -> Self {
        let wait_target = rng.random_range(timing.interval.0..=timing.interval.1);
        Self {
            timing,
            span,
            state: CrossingState::Waiting,
            clock: 0.0,
            wait_target,
            flow: Flow::Still,
            speed: 0.0,
            position: 0.0,
        }
    }

    /// Current phase.
    pub fn state(&self) -> CrossingState {
        self.state
    }

    /// Leading-edge position of the train while one is on the lane.
    pub fn train_position(&self) -> Option<f64> {
        (self.state == CrossingState::Moving).then_some(self.position)
    }

    /// Advance the crossing by `dt` seconds.
    ///
    /// Returns the transition performed, if any. Leftover time past a
    /// transition boundary is discarded rather than cascaded, keeping
    /// the one-transition-per-tick contract.
    pub fn tick(&mut self, dt: f64, rng: &mut impl Rng) -> Option<CrossingEvent> {
        match self.state {
            CrossingState::Waiting => {
                self.clock += dt;
                if self.clock < self.wait_target {
                    return None;
                }
                self.state = CrossingState::Warning;
                self.clock = 0.0;
                Some(CrossingEvent::SignalStarted)
            }
            CrossingState::Warning => {
                self.clock += dt;
                if self.clock < self.timing.warning_secs {
                    return None;
                }
                self.state = CrossingState::Moving;
                self.clock = 0.0;
                self.speed = rng.random_range(self.timing.speed.0..=self.timing.speed.1);
                self.flow = if rng.random::<bool>() {
                    Flow::Left
                } else {
                    Flow::Right
                };
                self.position = match self.flow {
                    Flow::Left => self.span,
                    _ => -self.timing.train_length,
                };
                Some(CrossingEvent::TrainEntered { flow: self.flow })
            }
            CrossingState::Moving => {
                let cleared = match self.flow {
                    Flow::Left => {
                        self.position -= self.speed * dt;
                        self.position + self.timing.train_length < 0.0
                    }
                    _ => {
                        self.position += self.speed * dt;
                        self.position > self.span
                    }
                };
                if !cleared {
                    return None;
                }
                self.state = CrossingState::Waiting;
                self.clock = 0.0;
                self.wait_target =
                    rng.random_range(self.timing.interval.0..=self.timing.interval.1);
                Some(CrossingEvent::TrainExited)
            }
        }
    }
}
