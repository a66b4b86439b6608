use crate::algorithms::common::{endpoints, reconstruct_path, CameFrom, SearchStrategy};
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use crate::snapshot::{PositionSet, Snapshot};

pub const DEFAULT_DEPTH_LIMIT: usize = 15;

/// Depth-limited search: DFS that stops expanding at `limit` edges from
/// the start. Stack entries carry their depth; parents are overwritten on
/// every push, as in [`Dfs`](crate::algorithms::dfs::Dfs).
pub struct DepthLimited<'g> {
    grid: &'g Grid,
    start: Position,
    goal: Position,
    limit: usize,
    stack: Vec<(Position, usize)>,
    came_from: CameFrom,
    explored: PositionSet,
    frontier: PositionSet,
    pending: Option<(Position, usize)>,
    done: bool,
}

impl<'g> DepthLimited<'g> {
    pub fn new(grid: &'g Grid, limit: usize) -> Result<Self, SearchError> {
        let (start, goal) = endpoints(grid)?;
        Ok(Self::between(grid, start, goal, limit))
    }

    /// Fresh pass with already validated endpoints.
    pub(crate) fn between(grid: &'g Grid, start: Position, goal: Position, limit: usize) -> Self {
        let mut came_from = CameFrom::default();
        came_from.insert(start, None);
        let mut frontier = PositionSet::default();
        frontier.insert(start);

        DepthLimited {
            grid,
            start,
            goal,
            limit,
            stack: vec![(start, 0)],
            came_from,
            explored: PositionSet::default(),
            frontier,
            pending: None,
            done: false,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn expand(&mut self, current: Position, depth: usize) {
        if depth >= self.limit {
            return;
        }
        for next in self.grid.neighbors(current) {
            if !self.explored.contains(&next) {
                self.came_from.insert(next, Some(current));
                self.stack.push((next, depth + 1));
                self.frontier.insert(next);
            }
        }
    }

    fn finish(&mut self, path: Vec<Position>, frontier: PositionSet, depth: usize) -> Snapshot {
        self.done = true;
        log::debug!(
            "dls(limit={}) finished: found={} explored={}",
            self.limit,
            !path.is_empty(),
            self.explored.len()
        );
        Snapshot::finished(frontier, self.explored.clone(), path).with_depth(self.limit, depth)
    }
}

impl SearchStrategy for DepthLimited<'_> {
    fn step(&mut self) -> Result<Snapshot, SearchError> {
        if self.done {
            return Err(SearchError::Finished);
        }

        if let Some((current, depth)) = self.pending.take() {
            if current == self.goal {
                let path = reconstruct_path(&self.came_from, self.start, self.goal);
                let frontier = self.frontier.clone();
                return Ok(self.finish(path, frontier, depth));
            }
            self.expand(current, depth);
        }

        loop {
            let Some((current, depth)) = self.stack.pop() else {
                let limit = self.limit;
                return Ok(self.finish(Vec::new(), PositionSet::default(), limit));
            };
            self.frontier.remove(&current);
            if !self.explored.insert(current) {
                continue;
            }
            self.pending = Some((current, depth));
            return Ok(
                Snapshot::progress(self.frontier.clone(), self.explored.clone())
                    .with_depth(self.limit, depth),
            );
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(grid: &Grid, limit: usize) -> Vec<Snapshot> {
        let mut dls = DepthLimited::new(grid, limit).unwrap();
        let mut snapshots = Vec::new();
        while !dls.is_done() {
            snapshots.push(dls.step().unwrap());
        }
        snapshots
    }

    #[test]
    fn goal_beyond_limit_is_not_found() {
        let grid = Grid::from_layout("S...T").unwrap();
        let snapshots = drain(&grid, 3);
        let last = snapshots.last().unwrap();
        assert!(last.done && !last.found);
        assert_eq!(last.depth_limit, Some(3));
        assert_eq!(last.current_depth, Some(3));
        assert_eq!(last.explored.len(), 4);
    }

    #[test]
    fn goal_at_limit_is_found() {
        let grid = Grid::from_layout("S...T").unwrap();
        let snapshots = drain(&grid, 4);
        let last = snapshots.last().unwrap();
        assert!(last.found);
        assert_eq!(last.path().len(), 5);
        assert_eq!(last.current_depth, Some(4));
    }

    #[test]
    fn snapshots_report_node_depth() {
        let grid = Grid::from_layout("S...T").unwrap();
        let depths: Vec<_> = drain(&grid, 4)
            .iter()
            .map(|s| s.current_depth.unwrap())
            .collect();
        assert_eq!(depths, vec![0, 1, 2, 3, 4, 4]);
    }

    #[test]
    fn latest_push_owns_the_parent() {
        let grid = Grid::from_layout(
            "S.T
             ...",
        )
        .unwrap();
        let last = drain(&grid, DEFAULT_DEPTH_LIMIT).pop().unwrap();
        assert!(last.found);
        // T is pushed from (1,2) at depth 3, then again from (0,1) at depth 4.
        let expected = [(0, 0), (1, 1), (1, 2), (0, 1), (0, 2)]
            .map(|(r, c)| Position::new(r, c));
        assert_eq!(last.path(), &expected);
        assert_eq!(last.current_depth, Some(4));
    }
}
