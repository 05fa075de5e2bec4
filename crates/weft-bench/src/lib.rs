//! Benchmark profiles for the Weft lane generation engine.
//!
//! Provides pre-built [`BoardConfig`] profiles shared by the criterion
//! benches:
//!
//! - [`reference_profile`]: the stock 9-tile mobile layout
//! - [`wide_profile`]: a 64-tile strip for stressing the propagation walks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use weft_core::Strip;
use weft_engine::BoardConfig;

/// The stock mobile layout: 9 playable tiles, 3-tile margins.
pub fn reference_profile(seed: u64) -> BoardConfig {
    BoardConfig::stock(Strip::new(9, 3, 1.0).unwrap(), seed)
}

/// A wide 64-tile strip that makes the per-tile work dominate.
pub fn wide_profile(seed: u64) -> BoardConfig {
    let mut config = BoardConfig::stock(Strip::new(64, 8, 1.0).unwrap(), seed);
    config.window = 64;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_validates() {
        reference_profile(42).validate().unwrap();
    }

    #[test]
    fn wide_profile_validates() {
        wide_profile(42).validate().unwrap();
    }
}
