//! The rolling-window board runtime.
//!
//! [`Board`] chains lane generation row to row and drives every live
//! lane's dynamics once per tick. Generation and ticking are both
//! deterministic: each row owns a ChaCha8 stream derived from the world
//! seed, consumed first by generation and then by that lane's runtime
//! draws (log gaps, train cycles), so a board replays identically from
//! its seed.

use std::time::Instant;

use indexmap::IndexMap;
use rand::{Rng, RngExt};
use rand_chacha::ChaCha8Rng;
use weft_core::{Flow, GenError, PassMask, Row, Strip, TickId};
use weft_gen::{row_rng, GeneratedLane, LaneDetail, LaneKind};

use crate::config::{BoardConfig, ConfigError};
use crate::crossing::{CrossingEvent, TrainCrossing};
use crate::events::Event;
use crate::metrics::StepMetrics;
use crate::traffic::{LogFlow, VehicleTrack};

// ── StepResult ──────────────────────────────────────────────────

/// Result of a [`Board::step_sync()`] call.
#[derive(Debug)]
pub struct StepResult {
    /// Side effects for the presentation layer, in row order.
    pub events: Vec<Event>,
    /// Performance and activity metrics for this tick.
    pub metrics: StepMetrics,
}

// ── LaneState ───────────────────────────────────────────────────

/// Runtime state attached to a generated lane.
#[derive(Clone, Debug)]
pub enum Dynamics {
    /// Nothing moves: grass and lily-pad lanes.
    Static,
    /// A wrapping vehicle loop.
    Traffic(VehicleTrack),
    /// A continuous log stream.
    Logs(LogFlow),
    /// A warned train crossing.
    Crossing(TrainCrossing),
}

/// One live lane: its generated plan plus runtime dynamics.
#[derive(Clone, Debug)]
pub struct LaneState {
    /// The generated lane.
    pub lane: GeneratedLane,
    /// Its dynamic hazards, advanced each tick.
    pub dynamics: Dynamics,
    /// Continuation of the row's RNG stream for runtime draws.
    rng: ChaCha8Rng,
}

// ── Board ───────────────────────────────────────────────────────

/// Single-threaded board runtime.
///
/// Created from a [`BoardConfig`] via [`new()`](Board::new). Call
/// [`extend()`](Board::extend) to generate the next row (retiring the
/// oldest once the window is full) and [`step_sync()`](Board::step_sync)
/// once per frame to advance every lane's hazards.
pub struct Board {
    strip: Strip,
    seed: u64,
    safe_kind: LaneKind,
    choices: Vec<(LaneKind, f64)>,
    total_weight: f64,
    window: usize,
    safe_rows: i32,
    lanes: IndexMap<i32, LaneState>,
    next_row: i32,
    prev_pass: PassMask,
    prev_flow: Flow,
    tick: TickId,
    rows_generated: u64,
}

impl Board {
    /// Create a board from a validated configuration.
    ///
    /// The first generated row sees an all-passable virtual
    /// predecessor, so the chain has somewhere to anchor.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let BoardConfig {
            strip,
            seed,
            grass,
            road,
            river,
            railroad,
            weights,
            window,
            safe_rows,
            first_row,
        } = config;

        let choices = vec![
            (LaneKind::Grass(grass.clone()), weights.grass),
            (LaneKind::Road(road), weights.road),
            (LaneKind::River(river), weights.river),
            (LaneKind::Railroad(railroad), weights.railroad),
        ];
        let total_weight = weights.total();
        let prev_pass = PassMask::open(strip.active_tiles());

        Ok(Self {
            strip,
            seed,
            safe_kind: LaneKind::Grass(grass),
            choices,
            total_weight,
            window,
            safe_rows,
            lanes: IndexMap::new(),
            next_row: first_row,
            prev_pass,
            prev_flow: Flow::Still,
            tick: TickId(0),
            rows_generated: 0,
        })
    }

    /// Weighted kind draw for rows past the spawn zone.
    fn pick_kind(&self, rng: &mut impl Rng) -> &LaneKind {
        let mut draw = rng.random::<f64>() * self.total_weight;
        for (kind, weight) in &self.choices {
            if draw < *weight {
                return kind;
            }
            draw -= weight;
        }
        // Floating-point slack on the last entry.
        &self.choices[self.choices.len() - 1].0
    }

    /// Generate the next row and retire rows that fell out of the
    /// window. Returns the new row's number.
    pub fn extend(&mut self) -> Result<Row, GenError> {
        let row = Row(self.next_row);
        let mut rng = row_rng(self.seed, row);

        let kind = if row.0 <= self.safe_rows {
            &self.safe_kind
        } else {
            self.pick_kind(&mut rng)
        };
        let lane = weft_gen::generate(
            kind,
            &self.strip,
            row,
            &self.prev_pass,
            self.prev_flow,
            &mut rng,
        )?;

        let span = self.strip.total_span();
        let dynamics = match &lane.detail {
            LaneDetail::Road(plan) => Dynamics::Traffic(VehicleTrack::new(plan)),
            LaneDetail::Logs(schedule) => {
                Dynamics::Logs(LogFlow::new(schedule.clone(), span, &mut rng))
            }
            LaneDetail::Railroad(plan) => {
                Dynamics::Crossing(TrainCrossing::new(plan.timing.clone(), span, &mut rng))
            }
            LaneDetail::Grass(_) | LaneDetail::Lily(_) => Dynamics::Static,
        };

        self.prev_pass = lane.passable.clone();
        self.prev_flow = lane.flow;
        self.lanes.insert(row.0, LaneState { lane, dynamics, rng });
        self.next_row += 1;
        self.rows_generated += 1;

        while self.lanes.len() > self.window {
            let _ = self.lanes.shift_remove_index(0);
        }
        Ok(row)
    }

    /// Advance every live lane's dynamics by `dt` seconds.
    ///
    /// Each lane performs at most one state transition per call.
    ///
    /// # Panics
    ///
    /// Panics if `dt` is negative or non-finite.
    pub fn step_sync(&mut self, dt: f64) -> StepResult {
        assert!(
            dt.is_finite() && dt >= 0.0,
            "dt must be finite and non-negative, got {dt}"
        );
        let start = Instant::now();
        self.tick = TickId(self.tick.0 + 1);

        let mut events = Vec::new();
        let mut metrics = StepMetrics::default();

        for (&row, state) in self.lanes.iter_mut() {
            let row = Row(row);
            match &mut state.dynamics {
                Dynamics::Static => {}
                Dynamics::Traffic(track) => {
                    track.tick(dt);
                    metrics.lanes_ticked += 1;
                }
                Dynamics::Logs(flow) => {
                    metrics.lanes_ticked += 1;
                    let report = flow.tick(dt, &mut state.rng);
                    if let Some(class) = report.spawned {
                        events.push(Event::LogSpawned { row, class });
                        metrics.logs_spawned += 1;
                    }
                    for _ in 0..report.retired {
                        events.push(Event::LogRetired { row });
                    }
                    metrics.logs_retired += report.retired;
                }
                Dynamics::Crossing(crossing) => {
                    metrics.lanes_ticked += 1;
                    if let Some(ev) = crossing.tick(dt, &mut state.rng) {
                        metrics.fsm_transitions += 1;
                        events.push(match ev {
                            CrossingEvent::SignalStarted => Event::SignalStarted { row },
                            CrossingEvent::TrainEntered { flow } => {
                                Event::TrainEntered { row, flow }
                            }
                            CrossingEvent::TrainExited => Event::TrainExited { row },
                        });
                    }
                }
            }
        }

        metrics.events_emitted = events.len() as u32;
        metrics.total_us = start.elapsed().as_micros() as u64;
        StepResult { events, metrics }
    }

    /// Live lanes in row order.
    pub fn lanes(&self) -> impl Iterator<Item = &LaneState> {
        self.lanes.values()
    }

    /// The live lane at `row`, if it has been generated and not yet
    /// retired.
    pub fn lane(&self, row: Row) -> Option<&LaneState> {
        self.lanes.get(&row.0)
    }

    /// Oldest live row.
    pub fn back_row(&self) -> Option<Row> {
        self.lanes.keys().next().map(|&r| Row(r))
    }

    /// Newest live row.
    pub fn front_row(&self) -> Option<Row> {
        self.lanes.keys().next_back().map(|&r| Row(r))
    }

    /// Ticks stepped so far.
    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    /// Rows generated over the board's lifetime, retired ones included.
    pub fn rows_generated(&self) -> u64 {
        self.rows_generated
    }

    /// The shared lane geometry.
    pub fn strip(&self) -> &Strip {
        &self.strip
    }
}
