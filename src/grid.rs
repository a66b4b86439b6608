use crate::error::GridError;
use crate::node::{Cell, CellState, MAX_WEIGHT, MIN_WEIGHT};
use crate::snapshot::{PositionSet, Snapshot};
use std::fmt::Write as _;
use std::path::Path;

/// (row, column) coordinates of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Six-way clockwise neighbour order: Up, Right, Down, Bottom-Right,
/// Left, Top-Left. Top-Right and Bottom-Left are not adjacent.
///
/// BFS, DFS and bidirectional tie-breaking depend on this order.
pub const DIRECTIONS: [(isize, isize); 6] = [
    (-1, 0),
    (0, 1),
    (1, 0),
    (1, 1),
    (0, -1),
    (-1, -1),
];

#[derive(Debug, Clone)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<Vec<Cell>>,
    start: Option<Position>,
    target: Option<Position>,
}

impl Grid {
    /// Create a blank grid with the default start and target.
    ///
    /// Both endpoints sit on the middle row: start at column 3, target at
    /// column `cols - 4`, clamped into the grid.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut grid = Self::empty(rows, cols);
        grid.set_default_endpoints();
        grid
    }

    /// Create a blank grid without start or target.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    pub fn empty(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid must have at least one cell");
        let cells = (0..rows)
            .map(|r| (0..cols).map(|c| Cell::new(r, c)).collect())
            .collect();
        Grid {
            rows,
            cols,
            cells,
            start: None,
            target: None,
        }
    }

    fn set_default_endpoints(&mut self) {
        let mid = self.rows / 2;
        let start = Position::new(mid, 3.min(self.cols - 1));
        let target = Position::new(mid, self.cols.saturating_sub(4));
        self.assign_start(start);
        self.assign_target(target);
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn check(&self, pos: Position) -> Result<(), GridError> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                position: pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn target(&self) -> Option<Position> {
        self.target
    }

    fn is_endpoint(&self, pos: Position) -> bool {
        self.start == Some(pos) || self.target == Some(pos)
    }

    /// Cell at `pos`. Panics if `pos` is out of bounds.
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row][pos.col]
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(pos.row).and_then(|row| row.get(pos.col))
    }

    fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[pos.row][pos.col]
    }

    /// Every cell, left-to-right, top-to-bottom.
    pub fn all_nodes(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Walkable neighbours of `pos` in [`DIRECTIONS`] order.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(DIRECTIONS.len());
        for &(dr, dc) in &DIRECTIONS {
            let (Some(row), Some(col)) = (
                pos.row.checked_add_signed(dr),
                pos.col.checked_add_signed(dc),
            ) else {
                continue;
            };
            let next = Position::new(row, col);
            if self.in_bounds(next) && !self.cell(next).blocked() {
                neighbors.push(next);
            }
        }
        neighbors
    }

    /// Sum of the weights of every cell entered after the first.
    pub fn path_cost(&self, path: &[Position]) -> u32 {
        path.iter()
            .skip(1)
            .map(|&p| u32::from(self.cell(p).weight))
            .sum()
    }

    // Endpoints

    pub fn set_start(&mut self, pos: Position) -> Result<(), GridError> {
        self.check(pos)?;
        self.assign_start(pos);
        Ok(())
    }

    pub fn set_target(&mut self, pos: Position) -> Result<(), GridError> {
        self.check(pos)?;
        self.assign_target(pos);
        Ok(())
    }

    fn assign_start(&mut self, pos: Position) {
        if let Some(old) = self.start.replace(pos) {
            if old != pos {
                let state = if self.target == Some(old) {
                    CellState::Target
                } else {
                    CellState::Empty
                };
                self.cell_mut(old).state = state;
            }
        }
        let cell = self.cell_mut(pos);
        cell.is_wall = false;
        cell.is_dynamic = false;
        cell.state = CellState::Start;
    }

    fn assign_target(&mut self, pos: Position) {
        if let Some(old) = self.target.replace(pos) {
            if old != pos {
                let state = if self.start == Some(old) {
                    CellState::Start
                } else {
                    CellState::Empty
                };
                self.cell_mut(old).state = state;
            }
        }
        let cell = self.cell_mut(pos);
        cell.is_wall = false;
        cell.is_dynamic = false;
        cell.state = CellState::Target;
    }

    // Walls

    pub fn toggle_wall(&mut self, pos: Position) -> Result<(), GridError> {
        self.check(pos)?;
        if !self.is_endpoint(pos) {
            let cell = self.cell_mut(pos);
            let wall = !cell.is_wall;
            cell.mark_wall(wall);
        }
        Ok(())
    }

    pub fn place_wall(&mut self, pos: Position) -> Result<(), GridError> {
        self.check(pos)?;
        if !self.is_endpoint(pos) {
            self.cell_mut(pos).mark_wall(true);
        }
        Ok(())
    }

    pub fn erase_wall(&mut self, pos: Position) -> Result<(), GridError> {
        self.check(pos)?;
        if !self.is_endpoint(pos) {
            self.cell_mut(pos).mark_wall(false);
        }
        Ok(())
    }

    /// Set the traversal cost of a cell, clamped to 1..=10.
    /// Walls and endpoints keep their weight.
    pub fn set_weight(&mut self, pos: Position, weight: u8) -> Result<(), GridError> {
        self.check(pos)?;
        if self.cell(pos).is_wall || self.is_endpoint(pos) {
            return Ok(());
        }
        self.cell_mut(pos).weight = weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
        Ok(())
    }

    /// Mark or clear a dynamic obstacle. Endpoints and walls are left alone.
    pub fn set_dynamic(&mut self, pos: Position, dynamic: bool) -> Result<(), GridError> {
        self.check(pos)?;
        if self.cell(pos).is_wall || self.is_endpoint(pos) {
            return Ok(());
        }
        let cell = self.cell_mut(pos);
        cell.is_dynamic = dynamic;
        cell.state = if dynamic {
            CellState::Dynamic
        } else {
            CellState::Empty
        };
        Ok(())
    }

    pub fn clear_dynamic(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if cell.is_dynamic {
                cell.is_dynamic = false;
                cell.state = CellState::Empty;
            }
        }
    }

    // Resets

    /// Clear dynamic obstacles and every display tag. Walls, weights and
    /// endpoints are preserved.
    pub fn reset_search(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.reset_search_state();
        }
        if let Some(start) = self.start {
            self.cell_mut(start).state = CellState::Start;
        }
        if let Some(target) = self.target {
            self.cell_mut(target).state = CellState::Target;
        }
    }

    /// Wipe walls, weights and endpoints back to a blank grid with the
    /// default endpoints.
    pub fn full_reset(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.clear();
        }
        self.start = None;
        self.target = None;
        self.set_default_endpoints();
    }

    /// Copy a snapshot's sets into the display tags of plain cells.
    pub fn paint(&mut self, snapshot: &Snapshot) {
        let backward = snapshot.frontier_bwd.as_ref();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                if self.is_endpoint(pos) || self.cell(pos).blocked() {
                    continue;
                }
                self.cell_mut(pos).state = display_state(snapshot, backward, pos);
            }
        }
    }

    // Text layouts

    /// Parse a text layout: `.` empty, `#` wall, `O` dynamic obstacle,
    /// `S` start, `T` target, `2`-`9` weight, `0` weight 10.
    pub fn from_layout(text: &str) -> Result<Self, GridError> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();

        let Some(&(_, first)) = lines.first() else {
            return Err(GridError::Layout {
                line: 0,
                reason: "layout is empty".to_string(),
            });
        };
        let cols = first.chars().count();
        let mut grid = Grid::empty(lines.len(), cols);

        for (row, &(line, cells)) in lines.iter().enumerate() {
            if cells.chars().count() != cols {
                return Err(GridError::Layout {
                    line,
                    reason: format!("expected {cols} columns"),
                });
            }
            for (col, ch) in cells.chars().enumerate() {
                let pos = Position::new(row, col);
                match ch {
                    '.' => {}
                    '#' => grid.cell_mut(pos).mark_wall(true),
                    'O' => grid.set_dynamic(pos, true)?,
                    'S' | 'T' => {
                        let taken = if ch == 'S' { grid.start } else { grid.target };
                        if taken.is_some() {
                            return Err(GridError::Layout {
                                line,
                                reason: format!("more than one '{ch}'"),
                            });
                        }
                        if ch == 'S' {
                            grid.assign_start(pos);
                        } else {
                            grid.assign_target(pos);
                        }
                    }
                    '0' => grid.cell_mut(pos).weight = MAX_WEIGHT,
                    '1'..='9' => {
                        grid.cell_mut(pos).weight = ch as u8 - b'0';
                    }
                    other => {
                        return Err(GridError::Layout {
                            line,
                            reason: format!("unknown cell '{other}'"),
                        })
                    }
                }
            }
        }
        Ok(grid)
    }

    pub fn load_layout(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_layout(&text)
    }

    /// Render the grid, overlaying `snapshot` when given.
    pub fn render(&self, snapshot: Option<&Snapshot>) -> String {
        let backward = snapshot.and_then(|s| s.frontier_bwd.as_ref());
        let mut out = String::new();

        out.push_str("   ");
        for col in 0..self.cols {
            let _ = write!(out, "{:2}", col % 10);
        }
        out.push('\n');

        for row in 0..self.rows {
            let _ = write!(out, "{:2} ", row);
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                let cell = self.cell(pos);
                let state = if self.start == Some(pos) {
                    CellState::Start
                } else if self.target == Some(pos) {
                    CellState::Target
                } else if cell.is_wall {
                    CellState::Wall
                } else if cell.is_dynamic {
                    CellState::Dynamic
                } else if let Some(snapshot) = snapshot {
                    display_state(snapshot, backward, pos)
                } else {
                    cell.state
                };
                let _ = write!(out, "{} ", glyph(state, cell.weight));
            }
            out.push('\n');
        }
        out
    }

    /// Print a visual representation of the grid.
    pub fn print_grid(&self, snapshot: Option<&Snapshot>) {
        println!(
            "Legend: S=Start, T=Target, #=Wall, O=Obstacle, +=Frontier, \
             ==Backward frontier, ~=Explored, *=Path, 2-9/0=Weight"
        );
        print!("{}", self.render(snapshot));
        println!();
    }
}

fn display_state(
    snapshot: &Snapshot,
    backward: Option<&PositionSet>,
    pos: Position,
) -> CellState {
    if snapshot.path.as_ref().is_some_and(|p| p.contains(&pos)) {
        CellState::Path
    } else if backward.is_some_and(|b| b.contains(&pos)) {
        CellState::Frontier2
    } else if snapshot.frontier.contains(&pos) {
        CellState::Frontier
    } else if snapshot.explored.contains(&pos) {
        CellState::Explored
    } else {
        CellState::Empty
    }
}

fn glyph(state: CellState, weight: u8) -> char {
    match state {
        CellState::Start => 'S',
        CellState::Target => 'T',
        CellState::Wall => '#',
        CellState::Dynamic => 'O',
        CellState::Frontier => '+',
        CellState::Frontier2 => '=',
        CellState::Explored => '~',
        CellState::Path => '*',
        CellState::Empty if weight == MAX_WEIGHT => '0',
        CellState::Empty if weight > MIN_WEIGHT => char::from(b'0' + weight),
        CellState::Empty => '.',
    }
}
