//! Dynamic hazards that drift through a lane: vehicle loops and logs.

use rand::{Rng, RngExt};
use smallvec::SmallVec;
use weft_core::Flow;
use weft_gen::{LogSchedule, VehiclePlan};

/// Positions of one road lane's vehicles, advanced once per tick.
///
/// Vehicles live on the loop `[0, span)` and wrap; the whole lane
/// shares one speed and one footprint, so relative spacing is constant
/// forever.
#[derive(Clone, Debug)]
pub struct VehicleTrack {
    velocity: f64,
    length: f64,
    span: f64,
    positions: SmallVec<[f64; 8]>,
}

impl VehicleTrack {
    /// Lay out the loop from a generated traffic plan.
    pub fn new(plan: &VehiclePlan) -> Self {
        let velocity = match plan.flow {
            Flow::Left => -plan.speed,
            _ => plan.speed,
        };
        Self {
            velocity,
            length: plan.length,
            span: plan.span,
            positions: plan.spawn_positions().into_iter().collect(),
        }
    }

    /// Advance every vehicle by `dt` seconds, wrapping at the loop
    /// edges.
    pub fn tick(&mut self, dt: f64) {
        for p in &mut self.positions {
            *p = (*p + self.velocity * dt).rem_euclid(self.span);
        }
    }

    /// Current vehicle positions along the loop.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Shared vehicle footprint in world units.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Whether the lane carries any vehicles at all.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// One drifting log.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Log {
    /// Position of the log's leading edge along the lane span.
    pub position: f64,
    /// Index into the lane's log class table.
    pub class: usize,
    /// Log length in world units.
    pub length: f64,
    /// Whether the log carries a coin pickup.
    pub coin: bool,
}

/// What one [`LogFlow::tick`] did, for the board to turn into events.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LogTickReport {
    /// Class of the log spawned this tick, if any.
    pub spawned: Option<usize>,
    /// Number of logs that drifted off the far edge.
    pub retired: u32,
}

/// Continuous log spawning and drift for one river lane.
///
/// A countdown timer spawns at most one log per tick (cooperative
/// single-transition ticking), re-arming with a fresh gap drawn from
/// the schedule's range. Logs drift with the lane's flow and retire
/// once fully past the far edge.
#[derive(Clone, Debug)]
pub struct LogFlow {
    schedule: LogSchedule,
    span: f64,
    speed: f64,
    timer: f64,
    logs: Vec<Log>,
}

impl LogFlow {
    /// Start a lane's log stream; the lane speed and first gap are
    /// drawn immediately.
    pub fn new(schedule: LogSchedule, span: f64, rng: &mut impl Rng) -> Self {
        let speed = rng.random_range(schedule.speed.0..=schedule.speed.1);
        let timer = rng.random_range(schedule.gap.0..=schedule.gap.1);
        Self {
            schedule,
            span,
            speed,
            timer,
            logs: Vec::new(),
        }
    }

    /// Draw a log class from the schedule's cumulative table.
    fn draw_class(&self, rng: &mut impl Rng) -> usize {
        let u = rng.random::<f64>();
        self.schedule
            .class_cum
            .iter()
            .position(|&c| u < c)
            .unwrap_or(self.schedule.classes.len() - 1)
    }

    /// Advance the stream by `dt` seconds.
    pub fn tick(&mut self, dt: f64, rng: &mut impl Rng) -> LogTickReport {
        let mut report = LogTickReport::default();

        self.timer -= dt;
        if self.timer <= 0.0 {
            let class = self.draw_class(rng);
            let length = self.schedule.classes[class].length;
            let coin = rng.random::<f64>() < self.schedule.coin_prob;
            let position = match self.schedule.flow {
                Flow::Left => self.span,
                _ => -length,
            };
            self.logs.push(Log {
                position,
                class,
                length,
                coin,
            });
            report.spawned = Some(class);
            self.timer = rng.random_range(self.schedule.gap.0..=self.schedule.gap.1);
        }

        // One speed per lane: logs drift in lockstep and never collide.
        let drift = match self.schedule.flow {
            Flow::Left => -self.speed * dt,
            _ => self.speed * dt,
        };
        for log in &mut self.logs {
            log.position += drift;
        }

        let span = self.span;
        let flow = self.schedule.flow;
        let before = self.logs.len();
        self.logs.retain(|log| match flow {
            Flow::Left => log.position + log.length > 0.0,
            _ => log.position < span,
        });
        report.retired = (before - self.logs.len()) as u32;

        report
    }

    /// Logs currently drifting through the lane.
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Seconds until the next spawn attempt.
    pub fn next_spawn_in(&self) -> f64 {
        self.timer
    }
}
