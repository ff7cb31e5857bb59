use log::warn;
use rand::Rng;

use crate::grid::{CellState, Grid, Pos};

/// Sampling budget before falling back to a scan of free cells. Rejection
/// sampling is cheap while the snake covers a small fraction of the grid,
/// but it must not loop forever on a near-full board.
const MAX_SAMPLE_ATTEMPTS: u32 = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceError {
    /// The snake occupies every cell; there is nowhere to put food.
    GridFull,
}

/// Marks a uniformly random non-Snake cell as Food. Re-marking the existing
/// food cell is a harmless no-op. The caller decides what a full grid means
/// (the engine treats it as a win).
pub fn place_random_food(grid: &Grid, rng: &mut impl Rng) -> Result<Grid, PlaceError> {
    let size = grid.size() as i32;

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let pos = Pos::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if grid.cell(pos) != CellState::Snake {
            return Ok(grid.with_cell(pos, CellState::Food));
        }
    }

    // Near-full grid: pick uniformly over the free cells instead.
    warn!(
        "food placement exhausted {} samples, scanning for free cells",
        MAX_SAMPLE_ATTEMPTS
    );
    let free: Vec<Pos> = grid
        .positions()
        .filter(|&p| grid.cell(p) != CellState::Snake)
        .collect();
    if free.is_empty() {
        return Err(PlaceError::GridFull);
    }
    let pos = free[rng.gen_range(0..free.len())];
    Ok(grid.with_cell(pos, CellState::Food))
}
