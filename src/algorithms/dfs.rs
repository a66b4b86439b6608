use crate::algorithms::common::{endpoints, reconstruct_path, CameFrom, SearchStrategy};
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use crate::snapshot::{PositionSet, Snapshot};

/// Cells heavier than this are skipped by DFS unless they are the target.
pub const DFS_WEIGHT_LIMIT: u8 = 7;

/// Depth-first search over an explicit stack.
///
/// Parents are overwritten on every push so the recorded parent is the one
/// whose branch actually reaches the node under LIFO order.
pub struct Dfs<'g> {
    grid: &'g Grid,
    start: Position,
    goal: Position,
    weight_limit: u8,
    stack: Vec<Position>,
    came_from: CameFrom,
    explored: PositionSet,
    frontier: PositionSet,
    pending: Option<Position>,
    done: bool,
}

impl<'g> Dfs<'g> {
    pub fn new(grid: &'g Grid, weight_limit: u8) -> Result<Self, SearchError> {
        let (start, goal) = endpoints(grid)?;
        let mut came_from = CameFrom::default();
        came_from.insert(start, None);
        let mut frontier = PositionSet::default();
        frontier.insert(start);

        Ok(Dfs {
            grid,
            start,
            goal,
            weight_limit,
            stack: vec![start],
            came_from,
            explored: PositionSet::default(),
            frontier,
            pending: None,
            done: false,
        })
    }

    fn expand(&mut self, current: Position) {
        for next in self.grid.neighbors(current) {
            if self.explored.contains(&next) {
                continue;
            }
            if self.grid.cell(next).weight > self.weight_limit && next != self.goal {
                continue;
            }
            self.came_from.insert(next, Some(current));
            self.stack.push(next);
            self.frontier.insert(next);
        }
    }

    fn finish(&mut self, path: Vec<Position>, frontier: PositionSet) -> Snapshot {
        self.done = true;
        log::debug!(
            "dfs finished: found={} explored={}",
            !path.is_empty(),
            self.explored.len()
        );
        Snapshot::finished(frontier, self.explored.clone(), path)
    }
}

impl SearchStrategy for Dfs<'_> {
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

        loop {
            let Some(current) = self.stack.pop() else {
                return Ok(self.finish(Vec::new(), PositionSet::default()));
            };
            self.frontier.remove(&current);
            // Stale entry for a position already reached through another branch.
            if !self.explored.insert(current) {
                continue;
            }
            self.pending = Some(current);
            return Ok(Snapshot::progress(
                self.frontier.clone(),
                self.explored.clone(),
            ));
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last(grid: &Grid, limit: u8) -> Snapshot {
        let mut dfs = Dfs::new(grid, limit).unwrap();
        loop {
            let snapshot = dfs.step().unwrap();
            if snapshot.done {
                return snapshot;
            }
        }
    }

    #[test]
    fn heavy_target_is_still_reachable() {
        let mut grid = Grid::from_layout("S.T").unwrap();
        // Endpoints refuse weights, so move the target off, weigh it, move back.
        let target = grid.target().unwrap();
        grid.set_target(Position::new(0, 1)).unwrap();
        grid.set_weight(target, 10).unwrap();
        grid.set_target(target).unwrap();
        assert_eq!(grid.cell(target).weight, 10);

        let snapshot = last(&grid, DFS_WEIGHT_LIMIT);
        assert!(snapshot.found);
        assert_eq!(snapshot.path().last(), Some(&target));
    }

    #[test]
    fn heavy_cells_are_skipped() {
        let grid = Grid::from_layout("S8T").unwrap();
        let snapshot = last(&grid, DFS_WEIGHT_LIMIT);
        assert!(!snapshot.found);
        assert!(!snapshot.explored.contains(&Position::new(0, 1)));

        let snapshot = last(&grid, 8);
        assert!(snapshot.found);
    }

    #[test]
    fn last_push_wins_parent() {
        // S pushes (0,1), (1,0), (1,1). (1,1) is popped first and pushes
        // (0,1) again; (1,2) later pushes T and then (0,1) a third time.
        // (0,1) is popped next and pushes T last, so T's parent is (0,1).
        let grid = Grid::from_layout(
            "S.T
             ...",
        )
        .unwrap();
        let snapshot = last(&grid, DFS_WEIGHT_LIMIT);
        assert!(snapshot.found);
        let expected = [(0, 0), (1, 1), (1, 2), (0, 1), (0, 2)]
            .map(|(r, c)| Position::new(r, c));
        assert_eq!(snapshot.path(), &expected);
        for pair in snapshot.path().windows(2) {
            assert!(grid.neighbors(pair[0]).contains(&pair[1]));
        }
    }
}
