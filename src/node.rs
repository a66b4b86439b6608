use crate::grid::Position;

pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 10;

/// Display tag of a cell. Search logic never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Wall,
    Start,
    Target,
    Frontier,
    /// Backward frontier of a bidirectional search.
    Frontier2,
    Explored,
    Path,
    Dynamic,
}

/// A single cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub weight: u8,
    pub is_wall: bool,
    pub is_dynamic: bool,
    pub state: CellState,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell {
            row,
            col,
            weight: MIN_WEIGHT,
            is_wall: false,
            is_dynamic: false,
            state: CellState::Empty,
        }
    }

    pub fn pos(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Walls and dynamic obstacles are never traversable.
    pub fn blocked(&self) -> bool {
        self.is_wall || self.is_dynamic
    }

    pub(crate) fn mark_wall(&mut self, wall: bool) {
        self.is_wall = wall;
        self.state = if wall {
            CellState::Wall
        } else {
            CellState::Empty
        };
    }

    /// Reset the transient part of the cell, keeping walls and weight.
    pub(crate) fn reset_search_state(&mut self) {
        self.is_dynamic = false;
        self.state = if self.is_wall {
            CellState::Wall
        } else {
            CellState::Empty
        };
    }

    /// Wipe the cell back to a blank, weight-1 cell.
    pub(crate) fn clear(&mut self) {
        self.weight = MIN_WEIGHT;
        self.is_wall = false;
        self.is_dynamic = false;
        self.state = CellState::Empty;
    }
}
