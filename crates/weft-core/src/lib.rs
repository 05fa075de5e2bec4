//! Core types for the Weft lane generation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the generators and the board runtime: row
//! and tick identifiers, the hazard drift direction, the tile masks
//! exchanged between consecutive lanes, and the validated strip
//! geometry.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod flow;
mod id;
mod mask;
mod strip;

pub use error::GenError;
pub use flow::Flow;
pub use id::{Row, TickId};
pub use mask::{OccupancyMask, PassMask};
pub use strip::{Strip, StripError};
