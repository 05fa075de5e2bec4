//! Test utilities and scripted RNGs for Weft development.
//!
//! Provides deterministic [`TryRng`] implementations for pinning
//! generator decisions in tests ([`ConstRng`], [`ScriptedRng`]) and
//! terse mask fixtures ([`pass_mask`], [`occupancy_mask`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::VecDeque;

use rand::TryRng;
use weft_core::{OccupancyMask, PassMask};

/// Raw 64-bit draw that makes `random::<f64>()` produce `value`.
///
/// The standard distribution maps the top 53 bits of a draw onto
/// `[0, 1)`, so the inverse is a shift back up.
fn bits_for(value: f64) -> u64 {
    assert!(
        (0.0..1.0).contains(&value),
        "unit draws live in [0, 1), got {value}"
    );
    ((value * (1u64 << 53) as f64) as u64) << 11
}

/// An RNG whose every unit draw is one fixed value.
///
/// `random::<f64>()` returns exactly the configured value; integer
/// range draws land proportionally (a 0.5 generator picks the middle
/// of `0..n`). Useful for pinning a generator's branch decisions.
#[derive(Clone, Debug)]
pub struct ConstRng {
    bits: u64,
}

impl ConstRng {
    /// A generator whose unit draws all equal `value` (in `[0, 1)`).
    pub fn new(value: f64) -> Self {
        Self {
            bits: bits_for(value),
        }
    }
}

impl TryRng for ConstRng {
    type Error = core::convert::Infallible;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Ok((self.bits >> 32) as u32)
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Ok(self.bits)
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.bits.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
        Ok(())
    }
}

/// An RNG that replays a scripted sequence of unit draws.
///
/// Panics when the script runs dry: a test consuming more draws than
/// it scripted is asking a question it did not mean to ask.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    draws: VecDeque<u64>,
}

impl ScriptedRng {
    /// Script a sequence of unit draws (each in `[0, 1)`).
    pub fn from_unit_draws(values: &[f64]) -> Self {
        Self {
            draws: values.iter().map(|&v| bits_for(v)).collect(),
        }
    }

    /// Number of draws left in the script.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl TryRng for ScriptedRng {
    type Error = core::convert::Infallible;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Ok((self.try_next_u64()? >> 32) as u32)
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Ok(self.draws.pop_front().expect("scripted rng ran dry"))
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.try_next_u64()?.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
        Ok(())
    }
}

/// Build a [`PassMask`] from a pattern of `1` (passable) and `0`.
///
/// ```
/// use weft_test_utils::pass_mask;
///
/// let mask = pass_mask("10110");
/// assert!(mask.is_passable(0));
/// assert!(!mask.is_passable(1));
/// assert_eq!(mask.count(), 3);
/// ```
pub fn pass_mask(pattern: &str) -> PassMask {
    let mut mask = PassMask::closed(pattern.len());
    for (i, c) in pattern.chars().enumerate() {
        match c {
            '1' => mask.set_passable(i),
            '0' => {}
            other => panic!("pass mask patterns use 1/0, got {other:?}"),
        }
    }
    mask
}

/// Build an [`OccupancyMask`] from a pattern of `x` (blocked) and `.`.
pub fn occupancy_mask(pattern: &str) -> OccupancyMask {
    let mut mask = OccupancyMask::clear(pattern.len());
    for (i, c) in pattern.chars().enumerate() {
        match c {
            'x' => mask.occupy(i),
            '.' => {}
            other => panic!("occupancy patterns use x/., got {other:?}"),
        }
    }
    mask
}
