use std::collections::{HashSet, VecDeque};

use super::action::Direction;

/// A cell on the game grid. Signed so that a head which left the board can still be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub column: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            column: self.column + dx,
            row: self.row + dy,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Dimensions of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: i32,
    pub rows: i32,
}

impl Grid {
    pub fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.column >= 0 && cell.column < self.columns && cell.row >= 0 && cell.row < self.rows
    }

    /// Every cell of the board, column by column
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.columns).flat_map(move |column| (0..self.rows).map(move |row| Cell::new(column, row)))
    }

    pub fn area(&self) -> usize {
        (self.columns.max(0) as usize) * (self.rows.max(0) as usize)
    }

    /// Where a new snake's head is placed
    pub fn start_cell(&self) -> Cell {
        Cell::new(self.columns / 4, self.rows / 2)
    }
}

/// The snake in the game
///
/// Direction changes are buffered and committed once per move, and growth is
/// deferred: `grow` only bumps a counter that later moves consume by keeping the tail.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Direction,
    pending_growth: usize,
}

impl Snake {
    /// Create a two-segment snake facing right, tail directly left of `head`
    pub fn new(head: Cell) -> Self {
        Self::with_body([head, head.moved_by(-1, 0)], Direction::Right)
    }

    /// Build a snake from explicit segments, head first
    ///
    /// # Panics
    ///
    /// If fewer than two segments are given.
    pub fn with_body(body: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let body: VecDeque<Cell> = body.into_iter().collect();
        assert!(body.len() >= 2, "a snake needs at least two segments");

        Self {
            body,
            direction,
            pending_direction: direction,
            pending_growth: 0,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Body segments head first
    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Committed direction, the one used by the last move
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next move will commit
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn pending_growth(&self) -> usize {
        self.pending_growth
    }

    /// Buffer `direction` for the next move.
    ///
    /// Returns false and leaves the buffer alone when `direction` reverses the
    /// committed direction. Later calls before the next move overwrite earlier ones.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Advance one cell in the buffered direction, keeping the tail while growth is pending
    pub fn move_forward(&mut self) {
        self.direction = self.pending_direction;
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }
    }

    /// Schedule `n` segments (at least one) to be added over the next moves
    pub fn grow(&mut self, n: usize) {
        self.pending_growth += n.max(1);
    }

    pub fn hits_wall(&self, grid: Grid) -> bool {
        !grid.contains(self.head())
    }

    /// True when the head shares a cell with any other segment
    pub fn hits_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    /// Snapshot of every cell the snake covers
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false, a snake keeps at least two segments
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}
