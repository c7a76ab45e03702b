//! Random wall generation for boards.

use rand::Rng;

use crate::board::{Board, Tile};

/// Random layout generator.
pub struct MapGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MapGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Turn each tile into a wall with probability `density` (clamped to
    /// 0.0–1.0) and open it otherwise.
    ///
    /// Returns the number of walls placed.
    pub fn scatter(&mut self, board: &mut Board, density: f64) -> usize {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let rng = &mut self.rng;
        board.fill_fn(|_| {
            if rng.random_bool(density) {
                Tile::Wall
            } else {
                Tile::Open
            }
        });
        board.count(Tile::Wall)
    }
}
