//! Validated 1D lane geometry.

use std::fmt;

/// Errors arising from strip construction.
#[derive(Debug, Clone, PartialEq)]
pub enum StripError {
    /// Attempted to construct a strip with zero active tiles.
    EmptyStrip,
    /// Active tile count exceeds the addressable maximum.
    TooManyTiles {
        /// The offending count.
        count: u32,
        /// The maximum supported count.
        max: u32,
    },
    /// Tile size is not a finite positive number.
    InvalidTileSize {
        /// The offending size.
        size: f64,
    },
}

impl fmt::Display for StripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStrip => write!(f, "strip must have at least one active tile"),
            Self::TooManyTiles { count, max } => {
                write!(f, "active tile count {count} exceeds maximum {max}")
            }
            Self::InvalidTileSize { size } => {
                write!(f, "tile size must be finite and positive, got {size}")
            }
        }
    }
}

impl std::error::Error for StripError {}

/// The 1D geometry of every lane on a board.
///
/// A lane is a horizontal strip of `active` playable tiles flanked on
/// each side by `edge` cosmetic tiles. Dynamic hazards loop across the
/// *total* span (active plus both margins) so they enter and leave the
/// screen fully off the playable area.
///
/// Tiles are addressed `0..active` left to right; the offset-from-center
/// view used by placement code is provided by [`offset_of`](Strip::offset_of)
/// and [`index_of`](Strip::index_of). For `active = 9` the offsets run
/// `-4..=4`; for `active = 8` they run `-4..=3`.
///
/// # Examples
///
/// ```
/// use weft_core::Strip;
///
/// let strip = Strip::new(9, 3, 1.0).unwrap();
/// assert_eq!(strip.active_tiles(), 9);
/// assert_eq!(strip.center(), 4);
/// assert_eq!(strip.offset_of(0), -4);
/// assert_eq!(strip.index_of(4), Some(8));
/// assert_eq!(strip.index_of(5), None);
/// assert_eq!(strip.total_span(), 15.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Strip {
    active: u32,
    edge: u32,
    tile_size: f64,
}

impl Strip {
    /// Maximum active tile count: offsets use `i32`, so the count must fit.
    pub const MAX_TILES: u32 = i32::MAX as u32;

    /// Create a strip with `active` playable tiles, `edge` cosmetic
    /// tiles per side, and the given tile size in world units.
    ///
    /// Returns `Err(StripError::EmptyStrip)` if `active == 0`,
    /// `Err(StripError::TooManyTiles)` if `active > i32::MAX`, or
    /// `Err(StripError::InvalidTileSize)` for a non-finite or
    /// non-positive `tile_size`.
    pub fn new(active: u32, edge: u32, tile_size: f64) -> Result<Self, StripError> {
        if active == 0 {
            return Err(StripError::EmptyStrip);
        }
        if active > Self::MAX_TILES {
            return Err(StripError::TooManyTiles {
                count: active,
                max: Self::MAX_TILES,
            });
        }
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(StripError::InvalidTileSize { size: tile_size });
        }
        Ok(Self {
            active,
            edge,
            tile_size,
        })
    }

    /// Number of playable tiles.
    pub fn active_tiles(&self) -> usize {
        self.active as usize
    }

    /// Number of cosmetic tiles on each side.
    pub fn edge_tiles(&self) -> usize {
        self.edge as usize
    }

    /// Playable plus both cosmetic margins.
    pub fn total_tiles(&self) -> usize {
        (self.active + 2 * self.edge) as usize
    }

    /// Tile size in world units.
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Index of the center tile (`active / 2`, rounding left for even
    /// counts).
    pub fn center(&self) -> usize {
        (self.active / 2) as usize
    }

    /// Signed offset of `tile` from the center tile.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is not a valid active tile index.
    pub fn offset_of(&self, tile: usize) -> i32 {
        assert!(
            tile < self.active_tiles(),
            "tile {tile} out of bounds for {} active tiles",
            self.active
        );
        tile as i32 - self.center() as i32
    }

    /// Active tile index for a signed center offset, or `None` if the
    /// offset leaves the strip.
    pub fn index_of(&self, offset: i32) -> Option<usize> {
        let idx = offset + self.center() as i32;
        (0..self.active as i32).contains(&idx).then_some(idx as usize)
    }

    /// Whether `tile` sits at least `margin` tiles away from both ends
    /// of the playable area.
    pub fn has_margin(&self, tile: usize, margin: usize) -> bool {
        tile >= margin && tile + margin < self.active_tiles()
    }

    /// World-unit width of the playable area.
    pub fn active_span(&self) -> f64 {
        self.active as f64 * self.tile_size
    }

    /// World-unit width of the full loop hazards travel, including both
    /// cosmetic margins.
    pub fn total_span(&self) -> f64 {
        self.total_tiles() as f64 * self.tile_size
    }
}
