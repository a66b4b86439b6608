use crate::error::SearchError;
use crate::grid::{Grid, Position};
use crate::snapshot::Snapshot;
use rustc_hash::FxHashMap;

/// Parent pointers of a search tree. The root maps to `None`.
pub type CameFrom = FxHashMap<Position, Option<Position>>;

/// A resumable search advanced one unit of work at a time.
pub trait SearchStrategy {
    /// Advance one step and return the resulting snapshot.
    ///
    /// Returns [`SearchError::Finished`] once the terminal snapshot has
    /// been handed out.
    fn step(&mut self) -> Result<Snapshot, SearchError>;

    /// True once the terminal snapshot has been produced.
    fn is_done(&self) -> bool;
}

/// Read the endpoints a search is bound to, failing fast when either is
/// unassigned.
pub fn endpoints(grid: &Grid) -> Result<(Position, Position), SearchError> {
    let start = grid.start().ok_or(SearchError::MissingStart)?;
    let goal = grid.target().ok_or(SearchError::MissingTarget)?;
    Ok((start, goal))
}

/// Walk parent pointers from `end` back to the root.
///
/// Returns the start-to-end path, or an empty path when the chain does not
/// lead back to `start`.
pub fn reconstruct_path(came_from: &CameFrom, start: Position, end: Position) -> Vec<Position> {
    let mut path = Vec::new();
    let mut node = Some(end);
    while let Some(current) = node {
        path.push(current);
        // Guard against a cyclic chain.
        if path.len() > came_from.len() + 1 {
            return Vec::new();
        }
        node = came_from.get(&current).copied().flatten();
    }
    path.reverse();
    if path.first() == Some(&start) {
        path
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn reconstructs_chain_in_start_to_end_order() {
        let mut came_from = CameFrom::default();
        came_from.insert(p(0, 0), None);
        came_from.insert(p(0, 1), Some(p(0, 0)));
        came_from.insert(p(1, 2), Some(p(0, 1)));
        assert_eq!(
            reconstruct_path(&came_from, p(0, 0), p(1, 2)),
            vec![p(0, 0), p(0, 1), p(1, 2)]
        );
    }

    #[test]
    fn broken_chain_yields_empty_path() {
        let mut came_from = CameFrom::default();
        came_from.insert(p(0, 1), Some(p(5, 5)));
        assert!(reconstruct_path(&came_from, p(0, 0), p(0, 1)).is_empty());
    }

    #[test]
    fn cyclic_chain_yields_empty_path() {
        let mut came_from = CameFrom::default();
        came_from.insert(p(0, 1), Some(p(0, 2)));
        came_from.insert(p(0, 2), Some(p(0, 1)));
        assert!(reconstruct_path(&came_from, p(0, 0), p(0, 1)).is_empty());
    }

    #[test]
    fn endpoints_fail_fast_when_unassigned() {
        let mut grid = Grid::empty(2, 2);
        assert_eq!(endpoints(&grid), Err(SearchError::MissingStart));
        grid.set_start(p(0, 0)).unwrap();
        assert_eq!(endpoints(&grid), Err(SearchError::MissingTarget));
        grid.set_target(p(1, 1)).unwrap();
        assert_eq!(endpoints(&grid), Ok((p(0, 0), p(1, 1))));
    }
}
