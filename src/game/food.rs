//! Food placement
//!
//! Food is always placed on a free cell chosen uniformly among every cell the
//! snake does not cover. The free list is rebuilt from the whole grid on each
//! respawn instead of being maintained incrementally; boards are small and
//! respawns happen at most once per tick. Picking from the list (rather than
//! sampling random cells until one is free) keeps the cost flat as the board fills.

use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use super::state::{Cell, Grid};

/// Where food goes when there is no free cell left
pub const BOARD_FULL_CELL: Cell = Cell { column: 0, row: 0 };

/// Source of uniform choices among candidate cells
pub trait CellPicker {
    /// Pick one of `candidates` uniformly. `None` only when `candidates` is empty.
    fn pick_uniform(&mut self, candidates: &[Cell]) -> Option<Cell>;
}

/// `CellPicker` backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RandomPicker<R> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RandomPicker<StdRng> {
    /// Reproducible placements for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CellPicker for RandomPicker<R> {
    fn pick_uniform(&mut self, candidates: &[Cell]) -> Option<Cell> {
        candidates.choose(&mut self.rng).copied()
    }
}

impl<P: CellPicker + ?Sized> CellPicker for Box<P> {
    fn pick_uniform(&mut self, candidates: &[Cell]) -> Option<Cell> {
        (**self).pick_uniform(candidates)
    }
}

/// Outcome of placing food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Food sits on a free cell
    Placed(Cell),
    /// No free cell was left; food is parked on `BOARD_FULL_CELL`, under the snake
    BoardFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pos: Cell,
}

impl Food {
    /// Place the first food of a game, avoiding the starting snake
    pub fn spawn(grid: Grid, occupied: &HashSet<Cell>, picker: &mut impl CellPicker) -> (Self, Placement) {
        let placement = place(grid, occupied, picker);
        (Self { pos: placement_cell(placement) }, placement)
    }

    #[cfg(test)]
    pub(crate) fn at(pos: Cell) -> Self {
        Self { pos }
    }

    pub fn pos(&self) -> Cell {
        self.pos
    }

    /// Move the food to a new free cell
    pub fn respawn(&mut self, grid: Grid, occupied: &HashSet<Cell>, picker: &mut impl CellPicker) -> Placement {
        let placement = place(grid, occupied, picker);
        self.pos = placement_cell(placement);
        placement
    }
}

fn place(grid: Grid, occupied: &HashSet<Cell>, picker: &mut impl CellPicker) -> Placement {
    let free: Vec<Cell> = grid.cells().filter(|cell| !occupied.contains(cell)).collect();
    match picker.pick_uniform(&free) {
        Some(cell) => Placement::Placed(cell),
        None => Placement::BoardFull,
    }
}

fn placement_cell(placement: Placement) -> Cell {
    match placement {
        Placement::Placed(cell) => cell,
        Placement::BoardFull => BOARD_FULL_CELL,
    }
}
