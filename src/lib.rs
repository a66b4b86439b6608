//! A steppable grid-search engine.
//!
//! Six strategies (BFS, DFS, UCS, depth-limited, iterative deepening and
//! bidirectional BFS) run over a weighted [`grid::Grid`] one unit of work
//! at a time, each step returning a [`snapshot::Snapshot`] of the frontier,
//! the explored set and, at the end, the path.
//!
//! ```no_run
//! use stepwise_pathfinding::algorithms::{Algorithm, SearchOptions};
//! use stepwise_pathfinding::grid::Grid;
//!
//! let grid = Grid::new(20, 30);
//! let search = Algorithm::Ucs.start(&grid, &SearchOptions::default()).unwrap();
//! for snapshot in search {
//!     if snapshot.done {
//!         println!("found={} path={:?}", snapshot.found, snapshot.path());
//!     }
//! }
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod node;
pub mod reference;
pub mod simulation;
pub mod snapshot;
pub mod statistics;
