use crate::algorithms::common::{endpoints, reconstruct_path, CameFrom, SearchStrategy};
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use crate::snapshot::{PositionSet, Snapshot};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry ordered by cost, then by insertion sequence. Positions are
/// never compared.
#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    cost: u32,
    seq: u64,
    pos: Position,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Uniform-cost search: cheapest path by summed cell weight.
///
/// Stale heap entries are skipped on pop instead of decreasing keys.
pub struct Ucs<'g> {
    grid: &'g Grid,
    start: Position,
    goal: Position,
    heap: BinaryHeap<QueueEntry>,
    seq: u64,
    came_from: CameFrom,
    cost_so_far: FxHashMap<Position, u32>,
    explored: PositionSet,
    frontier: PositionSet,
    pending: Option<Position>,
    done: bool,
}

impl<'g> Ucs<'g> {
    pub fn new(grid: &'g Grid) -> Result<Self, SearchError> {
        let (start, goal) = endpoints(grid)?;
        let mut came_from = CameFrom::default();
        came_from.insert(start, None);
        let mut cost_so_far = FxHashMap::default();
        cost_so_far.insert(start, 0);
        let mut frontier = PositionSet::default();
        frontier.insert(start);
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry {
            cost: 0,
            seq: 0,
            pos: start,
        });

        Ok(Ucs {
            grid,
            start,
            goal,
            heap,
            seq: 0,
            came_from,
            cost_so_far,
            explored: PositionSet::default(),
            frontier,
            pending: None,
            done: false,
        })
    }

    /// Cheapest cumulative cost found so far for `pos`.
    pub fn cost_of(&self, pos: Position) -> Option<u32> {
        self.cost_so_far.get(&pos).copied()
    }

    fn expand(&mut self, current: Position) {
        let base = self.cost_so_far.get(&current).copied().unwrap_or(0);
        for next in self.grid.neighbors(current) {
            let new_cost = base + u32::from(self.grid.cell(next).weight);
            let improves = self
                .cost_so_far
                .get(&next)
                .map_or(true, |&known| new_cost < known);
            if improves {
                self.cost_so_far.insert(next, new_cost);
                self.came_from.insert(next, Some(current));
                self.seq += 1;
                self.heap.push(QueueEntry {
                    cost: new_cost,
                    seq: self.seq,
                    pos: next,
                });
                self.frontier.insert(next);
            }
        }
    }

    fn finish(&mut self, path: Vec<Position>, frontier: PositionSet) -> Snapshot {
        self.done = true;
        log::debug!(
            "ucs finished: found={} cost={:?} explored={}",
            !path.is_empty(),
            self.cost_of(self.goal),
            self.explored.len()
        );
        Snapshot::finished(frontier, self.explored.clone(), path)
    }
}

impl SearchStrategy for Ucs<'_> {
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
            let Some(entry) = self.heap.pop() else {
                return Ok(self.finish(Vec::new(), PositionSet::default()));
            };
            self.frontier.remove(&entry.pos);
            if !self.explored.insert(entry.pos) {
                continue;
            }
            self.pending = Some(entry.pos);
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

    fn finish(ucs: &mut Ucs<'_>) -> Snapshot {
        loop {
            let snapshot = ucs.step().unwrap();
            if snapshot.done {
                return snapshot;
            }
        }
    }

    #[test]
    fn detours_around_heavy_cells() {
        let grid = Grid::from_layout(
            "S9T
             ...",
        )
        .unwrap();
        let mut ucs = Ucs::new(&grid).unwrap();
        let snapshot = finish(&mut ucs);
        assert!(snapshot.found);
        // Top-Right is not a move, so the cheap route is S, (1,1), (1,2), T.
        assert_eq!(grid.path_cost(snapshot.path()), 3);
        assert_eq!(ucs.cost_of(Position::new(0, 2)), Some(3));
        assert!(!snapshot.path().contains(&Position::new(0, 1)));
    }

    #[test]
    fn equal_cost_rediscovery_is_not_pushed() {
        // (1,1) reaches (1,2) and (2,1) at cost 2, the same cost already
        // recorded from (0,1) and (1,0).
        let grid = Grid::from_layout(
            "S..
             ...
             ..T",
        )
        .unwrap();
        let mut ucs = Ucs::new(&grid).unwrap();
        let snapshot = finish(&mut ucs);
        let p = Position::new;
        assert_eq!(ucs.came_from[&p(1, 2)], Some(p(0, 1)));
        assert_eq!(ucs.came_from[&p(2, 1)], Some(p(1, 0)));
        assert_eq!(ucs.cost_of(p(1, 2)), Some(2));
        // 3 from S, 2 each from (0,1) and (1,0), and only T from (1,1).
        assert_eq!(ucs.seq, 8);
        assert_eq!(snapshot.path(), &[p(0, 0), p(1, 1), p(2, 2)]);
    }

    #[test]
    fn heap_orders_by_cost_then_sequence() {
        let pos = Position::new(0, 0);
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry { cost: 3, seq: 1, pos });
        heap.push(QueueEntry { cost: 1, seq: 3, pos });
        heap.push(QueueEntry { cost: 1, seq: 2, pos });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|e| (e.cost, e.seq))
            .collect();
        assert_eq!(order, vec![(1, 2), (1, 3), (3, 1)]);
    }
}
