use crate::algorithms::common::{endpoints, SearchStrategy};
use crate::algorithms::dls::DepthLimited;
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use crate::snapshot::{PositionSet, Snapshot};

/// Ceiling on the depth limit so a search without a path terminates.
pub const MAX_DEPTH: usize = 200;

/// Iterative-deepening DFS: fresh depth-limited passes with limit
/// 0, 1, 2, ... up to `max_depth`. Nothing is carried between rounds.
pub struct IterativeDeepening<'g> {
    grid: &'g Grid,
    start: Position,
    goal: Position,
    max_depth: usize,
    round: DepthLimited<'g>,
    done: bool,
}

impl<'g> IterativeDeepening<'g> {
    pub fn new(grid: &'g Grid, max_depth: usize) -> Result<Self, SearchError> {
        let (start, goal) = endpoints(grid)?;
        Ok(IterativeDeepening {
            grid,
            start,
            goal,
            max_depth,
            round: DepthLimited::between(grid, start, goal, 0),
            done: false,
        })
    }

    /// Depth limit of the round in progress.
    pub fn iteration(&self) -> usize {
        self.round.limit()
    }

    fn tag(&self, snapshot: Snapshot) -> Snapshot {
        let iteration = self.round.limit();
        let mut snapshot = snapshot.with_iteration(iteration);
        snapshot.depth_limit = Some(iteration);
        snapshot
    }
}

impl SearchStrategy for IterativeDeepening<'_> {
    fn step(&mut self) -> Result<Snapshot, SearchError> {
        if self.done {
            return Err(SearchError::Finished);
        }

        loop {
            let snapshot = self.round.step()?;
            if !snapshot.done {
                return Ok(self.tag(snapshot));
            }
            if snapshot.found {
                self.done = true;
                log::debug!("iddfs found target in round {}", self.round.limit());
                return Ok(self.tag(snapshot));
            }

            let next = self.round.limit() + 1;
            if next > self.max_depth {
                self.done = true;
                log::debug!("iddfs exhausted {} rounds without a path", next);
                return Ok(Snapshot::finished(
                    PositionSet::default(),
                    snapshot.explored,
                    Vec::new(),
                )
                .with_iteration(self.max_depth)
                .with_depth(self.max_depth, self.max_depth));
            }
            log::trace!("iddfs deepening to limit {next}");
            self.round = DepthLimited::between(self.grid, self.start, self.goal, next);
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
