//! Per-tick performance metrics for the board runtime.

/// Timing and activity metrics collected during a single tick.
///
/// The board populates these after each [`step_sync`](crate::Board::step_sync)
/// call; consumers (telemetry, pacing heuristics) read them from the
/// most recent tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Lanes whose dynamics were advanced this tick.
    pub lanes_ticked: u32,
    /// Crossing state-machine transitions this tick.
    pub fsm_transitions: u32,
    /// Logs spawned this tick.
    pub logs_spawned: u32,
    /// Logs retired this tick.
    pub logs_retired: u32,
    /// Events emitted this tick.
    pub events_emitted: u32,
}
