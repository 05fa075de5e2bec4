//! Events surfaced by the board runtime.

use weft_core::{Flow, Row};

/// A side effect the presentation layer should react to.
///
/// The original design routed these through global singletons (sound
/// manager, warning lights); here they are plain data returned from
/// [`step_sync`](crate::Board::step_sync) for the caller to consume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// A log entered a river lane.
    LogSpawned {
        /// Lane the log entered.
        row: Row,
        /// Index into the lane's log class table.
        class: usize,
    },
    /// A log drifted out of a river lane.
    LogRetired {
        /// Lane the log left.
        row: Row,
    },
    /// A railroad crossing started flashing its warning lights; cue
    /// the bell.
    SignalStarted {
        /// Lane whose crossing is warning.
        row: Row,
    },
    /// A train entered a railroad lane.
    TrainEntered {
        /// Lane the train entered.
        row: Row,
        /// Side the train sweeps from.
        flow: Flow,
    },
    /// A train cleared its lane.
    TrainExited {
        /// Lane the train cleared.
        row: Row,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_compare_by_value() {
        assert_eq!(
            Event::SignalStarted { row: Row(3) },
            Event::SignalStarted { row: Row(3) }
        );
        assert_ne!(
            Event::TrainExited { row: Row(3) },
            Event::TrainExited { row: Row(4) }
        );
    }
}
