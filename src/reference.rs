//! Reference optima computed with the `pathfinding` crate over the same
//! six-way adjacency, used to judge the paths a stepped search returns.

use crate::grid::{Grid, Position};
use pathfinding::prelude::{bfs, dijkstra};

/// Fewest edges from start to target, or `None` when unreachable or when
/// an endpoint is unassigned.
pub fn shortest_hops(grid: &Grid) -> Option<usize> {
    let (start, goal) = (grid.start()?, grid.target()?);
    bfs(&start, |p: &Position| grid.neighbors(*p), |p| *p == goal)
        .map(|path| path.len().saturating_sub(1))
}

/// Cheapest summed weight from start to target.
pub fn cheapest_cost(grid: &Grid) -> Option<u32> {
    let (start, goal) = (grid.start()?, grid.target()?);
    dijkstra(
        &start,
        |p: &Position| {
            grid.neighbors(*p)
                .into_iter()
                .map(|next| (next, u32::from(grid.cell(next).weight)))
                .collect::<Vec<_>>()
        },
        |p| *p == goal,
    )
    .map(|(_, cost)| cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optima_on_a_weighted_layout() {
        let grid = Grid::from_layout(
            "S9T
             ...",
        )
        .unwrap();
        assert_eq!(shortest_hops(&grid), Some(2));
        assert_eq!(cheapest_cost(&grid), Some(3));
    }

    #[test]
    fn unreachable_target_has_no_optimum() {
        let grid = Grid::from_layout("S#T").unwrap();
        assert_eq!(shortest_hops(&grid), None);
        assert_eq!(cheapest_cost(&grid), None);
    }

    #[test]
    fn unassigned_endpoint_has_no_optimum() {
        assert_eq!(shortest_hops(&Grid::empty(2, 2)), None);
    }
}
