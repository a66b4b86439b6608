use crate::grid::Position;
use rustc_hash::FxHashSet;

pub type PositionSet = FxHashSet<Position>;

/// Observable state emitted after every unit of search work.
///
/// `path` is `None` until the terminal snapshot, where it holds the
/// reconstructed path (empty when no path exists). The bidirectional and
/// depth fields are only filled in by the strategies that track them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub frontier: PositionSet,
    pub frontier_fwd: Option<PositionSet>,
    pub frontier_bwd: Option<PositionSet>,
    pub explored: PositionSet,
    pub path: Option<Vec<Position>>,
    pub done: bool,
    pub found: bool,
    pub depth_limit: Option<usize>,
    pub current_depth: Option<usize>,
    pub iteration: Option<usize>,
}

impl Snapshot {
    /// A mid-run snapshot.
    pub fn progress(frontier: PositionSet, explored: PositionSet) -> Self {
        Snapshot {
            frontier,
            explored,
            ..Self::default()
        }
    }

    /// The terminal snapshot. `found` follows from the path being non-empty.
    pub fn finished(frontier: PositionSet, explored: PositionSet, path: Vec<Position>) -> Self {
        Snapshot {
            frontier,
            explored,
            found: !path.is_empty(),
            path: Some(path),
            done: true,
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth_limit: usize, current_depth: usize) -> Self {
        self.depth_limit = Some(depth_limit);
        self.current_depth = Some(current_depth);
        self
    }

    pub fn with_iteration(mut self, iteration: usize) -> Self {
        self.iteration = Some(iteration);
        self
    }

    /// Attach the two halves of a bidirectional frontier; `frontier`
    /// becomes their union.
    pub fn with_halves(mut self, forward: PositionSet, backward: PositionSet) -> Self {
        self.frontier = forward.union(&backward).copied().collect();
        self.frontier_fwd = Some(forward);
        self.frontier_bwd = Some(backward);
        self
    }

    /// Terminal path, or an empty slice while running.
    pub fn path(&self) -> &[Position] {
        self.path.as_deref().unwrap_or(&[])
    }
}
