use crate::algorithms::common::{endpoints, reconstruct_path, CameFrom, SearchStrategy};
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use crate::snapshot::{PositionSet, Snapshot};
use std::collections::VecDeque;

/// Breadth-first search: shortest path by edge count.
///
/// Each position's parent is written once, on first discovery.
pub struct Bfs<'g> {
    grid: &'g Grid,
    start: Position,
    goal: Position,
    queue: VecDeque<Position>,
    came_from: CameFrom,
    explored: PositionSet,
    frontier: PositionSet,
    /// Popped position waiting for its goal test and expansion.
    pending: Option<Position>,
    done: bool,
}

impl<'g> Bfs<'g> {
    pub fn new(grid: &'g Grid) -> Result<Self, SearchError> {
        let (start, goal) = endpoints(grid)?;
        let mut came_from = CameFrom::default();
        came_from.insert(start, None);
        let mut frontier = PositionSet::default();
        frontier.insert(start);

        Ok(Bfs {
            grid,
            start,
            goal,
            queue: VecDeque::from([start]),
            came_from,
            explored: PositionSet::default(),
            frontier,
            pending: None,
            done: false,
        })
    }

    fn expand(&mut self, current: Position) {
        for next in self.grid.neighbors(current) {
            if !self.came_from.contains_key(&next) {
                self.came_from.insert(next, Some(current));
                self.queue.push_back(next);
                self.frontier.insert(next);
            }
        }
    }

    fn finish(&mut self, path: Vec<Position>, frontier: PositionSet) -> Snapshot {
        self.done = true;
        log::debug!(
            "bfs finished: found={} explored={}",
            !path.is_empty(),
            self.explored.len()
        );
        Snapshot::finished(frontier, self.explored.clone(), path)
    }
}

impl SearchStrategy for Bfs<'_> {
    fn step(&mut self) -> Result<Snapshot, SearchError> {
        if self.done {
            return Err(SearchError::Finished);
        }

        if let Some(current) = self.pending.take() {
            if current == self.goal {
                let path = reconstruct_path(&self.came_from, self.start, self.goal);
                let frontier = self.frontier.clone();
                return Ok(self.finish(path, frontier));
            }
            self.expand(current);
        }

        let Some(current) = self.queue.pop_front() else {
            return Ok(self.finish(Vec::new(), PositionSet::default()));
        };
        self.frontier.remove(&current);
        self.explored.insert(current);
        self.pending = Some(current);

        Ok(Snapshot::progress(
            self.frontier.clone(),
            self.explored.clone(),
        ))
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(grid: &Grid) -> Vec<Snapshot> {
        let mut bfs = Bfs::new(grid).unwrap();
        let mut snapshots = Vec::new();
        while !bfs.is_done() {
            snapshots.push(bfs.step().unwrap());
        }
        snapshots
    }

    #[test]
    fn finds_straight_line_path() {
        let grid = Grid::from_layout("S..T").unwrap();
        let last = run(&grid).pop().unwrap();
        assert!(last.done && last.found);
        assert_eq!(
            last.path(),
            &[
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(0, 3)
            ]
        );
    }

    #[test]
    fn first_snapshot_pops_start() {
        let grid = Grid::from_layout("S..T").unwrap();
        let mut bfs = Bfs::new(&grid).unwrap();
        let first = bfs.step().unwrap();
        assert!(!first.done);
        assert!(first.frontier.is_empty());
        assert!(first.explored.contains(&Position::new(0, 0)));
        assert_eq!(first.path, None);
    }

    #[test]
    fn uses_diagonal_shortcut() {
        let grid = Grid::from_layout(
            "S..
             ...
             ..T",
        )
        .unwrap();
        let last = run(&grid).pop().unwrap();
        assert_eq!(last.path().len(), 3);
    }

    #[test]
    fn step_after_terminal_is_rejected() {
        let grid = Grid::from_layout("S#T").unwrap();
        let mut bfs = Bfs::new(&grid).unwrap();
        while !bfs.is_done() {
            bfs.step().unwrap();
        }
        assert_eq!(bfs.step(), Err(SearchError::Finished));
    }

    #[test]
    fn blocked_goal_reports_no_path() {
        let grid = Grid::from_layout("S#T").unwrap();
        let last = run(&grid).pop().unwrap();
        assert!(last.done && !last.found);
        assert_eq!(last.path, Some(Vec::new()));
        assert_eq!(last.explored.len(), 1);
    }
}
