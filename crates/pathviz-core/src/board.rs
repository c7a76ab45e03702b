//! The [`Board`] type: a fixed-size grid of passable or blocked [`Tile`]s.
//!
//! A board is plain owned data: cloning it yields an independent copy, which
//! is how a search run takes its own view of the grid while the user keeps
//! editing the original.

use crate::geom::{Point, Range};

/// Passability of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Open,
    Wall,
}

impl Tile {
    #[inline]
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A rectangular grid of [`Tile`]s anchored at (0, 0).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    tiles: Vec<Tile>,
    bounds: Range,
}

impl Board {
    /// Create a board of the given dimensions with every tile open.
    ///
    /// Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            tiles: vec![Tile::Open; bounds.len()],
            bounds,
        }
    }

    /// Returns the bounding range of the board.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Returns the size as a Point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Get the tile at a point, or `None` if out of bounds.
    #[inline]
    pub fn tile(&self, p: Point) -> Option<Tile> {
        self.bounds.index(p).map(|i| self.tiles[i])
    }

    /// Whether `p` is inside the board and open.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.tile(p).is_some_and(Tile::is_passable)
    }

    /// Set the tile at a point. Returns `false` (and changes nothing) if
    /// `p` is out of bounds.
    pub fn set_tile(&mut self, p: Point, tile: Tile) -> bool {
        match self.bounds.index(p) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Set every tile to `tile`.
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Open every tile.
    pub fn clear(&mut self) {
        self.fill(Tile::Open);
    }

    /// Fill the board using a function of each point.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Point) -> Tile) {
        for (i, p) in self.bounds.iter().enumerate() {
            self.tiles[i] = f(p);
        }
    }

    /// Count how many tiles equal `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Iterate over `(Point, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds.iter().zip(self.tiles.iter().copied())
    }
}
