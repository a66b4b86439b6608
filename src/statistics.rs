use crate::algorithms::Algorithm;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunStatistics {
    pub algorithm: Algorithm,
    pub steps: usize,
    pub explored: usize,
    pub found: bool,
    pub path_hops: usize,
    pub path_cost: u32,
    pub optimal_hops: Option<usize>,
    pub optimal_cost: Option<u32>,
    pub elapsed: Duration,
}

impl RunStatistics {
    pub fn new(
        algorithm: Algorithm,
        optimal_hops: Option<usize>,
        optimal_cost: Option<u32>,
    ) -> Self {
        RunStatistics {
            algorithm,
            steps: 0,
            explored: 0,
            found: false,
            path_hops: 0,
            path_cost: 0,
            optimal_hops,
            optimal_cost,
            elapsed: Duration::ZERO,
        }
    }

    /// Path cost relative to the cheapest possible cost; 1.0 is optimal.
    pub fn route_efficiency(&self) -> f64 {
        match self.optimal_cost {
            Some(optimal) if self.found && optimal > 0 => {
                f64::from(self.path_cost) / f64::from(optimal)
            }
            _ => 0.0,
        }
    }

    pub fn extra_hops(&self) -> usize {
        self.optimal_hops
            .map_or(0, |optimal| self.path_hops.saturating_sub(optimal))
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Path found: {}", if self.found { "yes" } else { "no" })?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(f, "Nodes explored: {}", self.explored)?;
        if self.found {
            writeln!(f, "Path length: {} hops", self.path_hops)?;
            writeln!(f, "Path cost: {}", self.path_cost)?;
        }
        match (self.optimal_hops, self.optimal_cost) {
            (Some(hops), Some(cost)) => {
                writeln!(f, "Optimal: {} hops / cost {}", hops, cost)?;
            }
            _ => writeln!(f, "Optimal: unreachable")?,
        }
        if self.found {
            writeln!(f, "Route efficiency: {:.3}", self.route_efficiency())?;
            if self.extra_hops() > 0 {
                writeln!(f, "Extra hops over shortest: {}", self.extra_hops())?;
            }
        }
        writeln!(f, "Elapsed: {:.2?}", self.elapsed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efficiency_is_cost_over_optimum() {
        let mut stats = RunStatistics::new(Algorithm::Dfs, Some(4), Some(4));
        stats.found = true;
        stats.path_hops = 6;
        stats.path_cost = 6;
        assert!((stats.route_efficiency() - 1.5).abs() < f64::EPSILON);
        assert_eq!(stats.extra_hops(), 2);
    }

    #[test]
    fn failed_run_has_zero_efficiency() {
        let stats = RunStatistics::new(Algorithm::Bfs, None, None);
        assert_eq!(stats.route_efficiency(), 0.0);
        assert!(stats.to_string().contains("unreachable"));
    }
}
