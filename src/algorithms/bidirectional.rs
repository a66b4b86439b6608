use crate::algorithms::common::{endpoints, reconstruct_path, CameFrom, SearchStrategy};
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use crate::snapshot::{PositionSet, Snapshot};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Forward,
    Backward,
}

/// One BFS half: rooted at the start (forward) or the target (backward).
struct Half {
    queue: VecDeque<Position>,
    came_from: CameFrom,
    visited: PositionSet,
    frontier: PositionSet,
}

impl Half {
    fn rooted_at(root: Position) -> Self {
        let mut came_from = CameFrom::default();
        came_from.insert(root, None);
        let mut visited = PositionSet::default();
        visited.insert(root);
        Half {
            queue: VecDeque::from([root]),
            came_from,
            visited: visited.clone(),
            frontier: visited,
        }
    }
}

/// Bidirectional BFS: alternates one expansion from the start side and one
/// from the target side, stopping as soon as either side discovers a
/// position the other has already visited.
pub struct Bidirectional<'g> {
    grid: &'g Grid,
    start: Position,
    goal: Position,
    forward: Half,
    backward: Half,
    turn: Side,
    done: bool,
}

impl<'g> Bidirectional<'g> {
    pub fn new(grid: &'g Grid) -> Result<Self, SearchError> {
        let (start, goal) = endpoints(grid)?;
        Ok(Bidirectional {
            grid,
            start,
            goal,
            forward: Half::rooted_at(start),
            backward: Half::rooted_at(goal),
            turn: Side::Forward,
            done: false,
        })
    }

    fn snapshot(&self) -> Snapshot {
        let explored = self
            .forward
            .visited
            .union(&self.backward.visited)
            .copied()
            .collect();
        Snapshot::progress(PositionSet::default(), explored).with_halves(
            self.forward.frontier.clone(),
            self.backward.frontier.clone(),
        )
    }

    fn finish(&mut self, path: Vec<Position>) -> Snapshot {
        self.done = true;
        let found = !path.is_empty();
        log::debug!(
            "bidirectional finished: found={} visited fwd={} bwd={}",
            found,
            self.forward.visited.len(),
            self.backward.visited.len()
        );
        Snapshot {
            path: Some(path),
            done: true,
            found,
            ..self.snapshot()
        }
    }

    /// Pop one position from `side` and discover its neighbours. Returns
    /// the meeting position if one was discovered.
    fn expand(&mut self, side: Side) -> Option<Position> {
        let (this, other) = match side {
            Side::Forward => (&mut self.forward, &self.backward),
            Side::Backward => (&mut self.backward, &self.forward),
        };
        let current = this.queue.pop_front()?;
        this.frontier.remove(&current);

        for next in self.grid.neighbors(current) {
            if !this.visited.insert(next) {
                continue;
            }
            this.came_from.insert(next, Some(current));
            this.queue.push_back(next);
            this.frontier.insert(next);

            if other.visited.contains(&next) {
                return Some(next);
            }
        }
        None
    }

    /// Join start -> meeting (forward tree) with meeting -> target
    /// (backward tree).
    ///
    /// The backward chain is already ordered toward the target because that
    /// tree is rooted at the target; it must not be reversed.
    fn stitch(&self, meeting: Position) -> Vec<Position> {
        let mut path = reconstruct_path(&self.forward.came_from, self.start, meeting);
        if path.is_empty() {
            return path;
        }
        let mut node = self.backward.came_from.get(&meeting).copied().flatten();
        while let Some(current) = node {
            path.push(current);
            if path.len() > self.forward.came_from.len() + self.backward.came_from.len() {
                return Vec::new();
            }
            node = self.backward.came_from.get(&current).copied().flatten();
        }
        if path.last() == Some(&self.goal) {
            path
        } else {
            Vec::new()
        }
    }
}

impl SearchStrategy for Bidirectional<'_> {
    fn step(&mut self) -> Result<Snapshot, SearchError> {
        if self.done {
            return Err(SearchError::Finished);
        }

        if self.start == self.goal {
            return Ok(self.finish(vec![self.start]));
        }

        let side = match self.turn {
            Side::Forward if !self.forward.queue.is_empty() => Side::Forward,
            Side::Backward if !self.backward.queue.is_empty() => Side::Backward,
            Side::Forward if !self.backward.queue.is_empty() => Side::Backward,
            Side::Backward if !self.forward.queue.is_empty() => Side::Forward,
            _ => return Ok(self.finish(Vec::new())),
        };
        self.turn = match side {
            Side::Forward => Side::Backward,
            Side::Backward => Side::Forward,
        };

        if let Some(meeting) = self.expand(side) {
            log::debug!("bidirectional frontiers met at {meeting:?}");
            let path = self.stitch(meeting);
            return Ok(self.finish(path));
        }
        Ok(self.snapshot())
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
