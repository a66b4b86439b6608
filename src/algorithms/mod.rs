pub mod bfs;
pub mod bidirectional;
pub mod common;
pub mod dfs;
pub mod dls;
pub mod iddfs;
pub mod ucs;

use crate::error::SearchError;
use crate::grid::Grid;
use crate::snapshot::Snapshot;
use std::fmt;
use std::str::FromStr;

pub use bfs::Bfs;
pub use bidirectional::Bidirectional;
pub use common::{reconstruct_path, SearchStrategy};
pub use dfs::{Dfs, DFS_WEIGHT_LIMIT};
pub use dls::{DepthLimited, DEFAULT_DEPTH_LIMIT};
pub use iddfs::{IterativeDeepening, MAX_DEPTH};
pub use ucs::Ucs;

/// Tunables for the strategies that take one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub dfs_weight_limit: u8,
    pub dls_depth_limit: usize,
    pub iddfs_max_depth: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            dfs_weight_limit: DFS_WEIGHT_LIMIT,
            dls_depth_limit: DEFAULT_DEPTH_LIMIT,
            iddfs_max_depth: MAX_DEPTH,
        }
    }
}

/// Selection of a search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    Dls,
    Iddfs,
    Bidirectional,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Ucs,
        Algorithm::Dls,
        Algorithm::Iddfs,
        Algorithm::Bidirectional,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Ucs => "ucs",
            Algorithm::Dls => "dls",
            Algorithm::Iddfs => "iddfs",
            Algorithm::Bidirectional => "bidirectional",
        }
    }

    /// Bind a fresh search of this kind to `grid`.
    pub fn start<'g>(
        self,
        grid: &'g Grid,
        options: &SearchOptions,
    ) -> Result<Search<'g>, SearchError> {
        let search = match self {
            Algorithm::Bfs => Search::Bfs(Bfs::new(grid)?),
            Algorithm::Dfs => Search::Dfs(Dfs::new(grid, options.dfs_weight_limit)?),
            Algorithm::Ucs => Search::Ucs(Ucs::new(grid)?),
            Algorithm::Dls => Search::Dls(DepthLimited::new(grid, options.dls_depth_limit)?),
            Algorithm::Iddfs => {
                Search::Iddfs(IterativeDeepening::new(grid, options.iddfs_max_depth)?)
            }
            Algorithm::Bidirectional => Search::Bidirectional(Bidirectional::new(grid)?),
        };
        log::debug!("{} bound to {}x{} grid", self, grid.rows, grid.cols);
        Ok(search)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown algorithm '{s}': select bfs, dfs, ucs, dls, iddfs, \
                     bidirectional or all"
                )
            })
    }
}

/// A running search of any kind.
pub enum Search<'g> {
    Bfs(Bfs<'g>),
    Dfs(Dfs<'g>),
    Ucs(Ucs<'g>),
    Dls(DepthLimited<'g>),
    Iddfs(IterativeDeepening<'g>),
    Bidirectional(Bidirectional<'g>),
}

impl Search<'_> {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Search::Bfs(_) => Algorithm::Bfs,
            Search::Dfs(_) => Algorithm::Dfs,
            Search::Ucs(_) => Algorithm::Ucs,
            Search::Dls(_) => Algorithm::Dls,
            Search::Iddfs(_) => Algorithm::Iddfs,
            Search::Bidirectional(_) => Algorithm::Bidirectional,
        }
    }

    fn strategy(&mut self) -> &mut dyn SearchStrategy {
        match self {
            Search::Bfs(s) => s,
            Search::Dfs(s) => s,
            Search::Ucs(s) => s,
            Search::Dls(s) => s,
            Search::Iddfs(s) => s,
            Search::Bidirectional(s) => s,
        }
    }
}

impl SearchStrategy for Search<'_> {
    fn step(&mut self) -> Result<Snapshot, SearchError> {
        self.strategy().step()
    }

    fn is_done(&self) -> bool {
        match self {
            Search::Bfs(s) => s.is_done(),
            Search::Dfs(s) => s.is_done(),
            Search::Ucs(s) => s.is_done(),
            Search::Dls(s) => s.is_done(),
            Search::Iddfs(s) => s.is_done(),
            Search::Bidirectional(s) => s.is_done(),
        }
    }
}

/// Yields every snapshot up to and including the terminal one.
impl Iterator for Search<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        if self.is_done() {
            return None;
        }
        self.step().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    #[test]
    fn names_round_trip_through_from_str() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert!("a_star".parse::<Algorithm>().is_err());
    }

    #[test]
    fn start_fails_fast_without_endpoints() {
        let grid = Grid::empty(3, 3);
        for algorithm in Algorithm::ALL {
            assert!(matches!(
                algorithm.start(&grid, &SearchOptions::default()),
                Err(SearchError::MissingStart)
            ));
        }
    }

    #[test]
    fn iterator_stops_after_terminal_snapshot() {
        let grid = Grid::from_layout("S.T").unwrap();
        let mut search = Algorithm::Bfs.start(&grid, &SearchOptions::default()).unwrap();
        let snapshots: Vec<_> = search.by_ref().collect();
        assert!(snapshots.last().unwrap().done);
        assert_eq!(snapshots.iter().filter(|s| s.done).count(), 1);
        assert_eq!(search.next(), None);
        assert_eq!(search.step(), Err(SearchError::Finished));
        assert_eq!(search.algorithm(), Algorithm::Bfs);
    }

    #[test]
    fn options_reach_the_strategies() {
        let grid = Grid::from_layout("S...T").unwrap();
        let options = SearchOptions {
            dls_depth_limit: 2,
            ..SearchOptions::default()
        };
        let last = Algorithm::Dls.start(&grid, &options).unwrap().last().unwrap();
        assert!(!last.found);
        assert_eq!(last.depth_limit, Some(2));
        assert!(!last.explored.contains(&Position::new(0, 3)));
    }
}
