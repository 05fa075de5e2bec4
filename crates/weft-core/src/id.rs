//! Strongly-typed row and tick identifiers.

use std::fmt;

/// A signed row number on the generated board.
///
/// Rows increase monotonically as the board extends away from the start.
/// Row 0 is the spawn row and is always hazard-free; negative rows sit
/// behind the spawn point and get progressively denser blocking the
/// further back they are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Row(pub i32);

impl Row {
    /// The spawn row. Generators treat it specially: no hazards ever
    /// spawn here.
    pub const SPAWN: Row = Row(0);
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Row {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time the board runtime advances one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
