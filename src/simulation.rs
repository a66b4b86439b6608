use crate::algorithms::{Algorithm, SearchOptions};
use crate::config::Config;
use crate::error::RunError;
use crate::grid::{Grid, Position};
use crate::reference::{cheapest_cost, shortest_hops};
use crate::snapshot::Snapshot;
use crate::statistics::RunStatistics;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use std::thread;
use std::time::{Duration, Instant};

/// Randomised walls and weights, reproducible from a seed.
#[derive(Debug, Clone)]
pub struct EnvironmentSetup {
    pub rows: usize,
    pub cols: usize,
    pub start: Position,
    pub goal: Position,
    pub walls: FxHashSet<Position>,
    pub weights: Vec<(Position, u8)>,
}

impl EnvironmentSetup {
    /// Start goes in the left half, goal in the right half; walls and
    /// weighted cells never cover either.
    pub fn generate(config: &Config, seed: u64) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let rows = config.rows.max(1);
        let cols = config.cols.max(2);

        let start = Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols / 2));
        let goal = Position::new(rng.gen_range(0..rows), rng.gen_range(cols / 2..cols));
        let free = |pos: Position, walls: &FxHashSet<Position>| {
            pos != start && pos != goal && !walls.contains(&pos)
        };

        let mut walls = FxHashSet::default();
        let mut attempts = 0;
        while walls.len() < config.num_walls && attempts < config.num_walls * 3 {
            let pos = Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
            if free(pos, &walls) {
                walls.insert(pos);
            }
            attempts += 1;
        }

        let mut weighted = FxHashSet::default();
        let mut weights = Vec::new();
        attempts = 0;
        while weights.len() < config.num_weighted && attempts < config.num_weighted * 3 {
            let pos = Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
            if free(pos, &walls) && weighted.insert(pos) {
                weights.push((pos, rng.gen_range(2..=10)));
            }
            attempts += 1;
        }

        log::info!(
            "generated environment seed={} start={:?} goal={:?} walls={} weighted={}",
            seed,
            start,
            goal,
            walls.len(),
            weights.len()
        );

        EnvironmentSetup {
            rows,
            cols,
            start,
            goal,
            walls,
            weights,
        }
    }

    pub fn create_grid(&self) -> Result<Grid, RunError> {
        let mut grid = Grid::empty(self.rows, self.cols);
        grid.set_start(self.start)?;
        grid.set_target(self.goal)?;
        for &wall in &self.walls {
            grid.place_wall(wall)?;
        }
        for &(pos, weight) in &self.weights {
            grid.set_weight(pos, weight)?;
        }
        Ok(grid)
    }
}

/// Drives one strategy over a grid, pulling snapshots until the terminal one.
pub struct Simulation {
    grid: Grid,
    algorithm: Algorithm,
    options: SearchOptions,
    config: Config,
}

impl Simulation {
    pub fn new(config: Config) -> Result<Self, RunError> {
        let algorithm = config
            .algorithm
            .parse::<Algorithm>()
            .map_err(RunError::UnknownAlgorithm)?;
        let grid = Self::build_grid(&config)?;
        Ok(Self::with_grid(config, algorithm, grid))
    }

    pub fn with_grid(config: Config, algorithm: Algorithm, grid: Grid) -> Self {
        Simulation {
            grid,
            algorithm,
            options: config.search_options(),
            config,
        }
    }

    /// Load the configured layout, or generate a seeded environment.
    pub fn build_grid(config: &Config) -> Result<Grid, RunError> {
        if let Some(path) = &config.layout {
            return Ok(Grid::load_layout(path)?);
        }
        let seed = config.seed.unwrap_or_else(rand::random);
        if !config.quiet {
            println!("Environment seed: {} (for reproducibility)", seed);
        }
        EnvironmentSetup::generate(config, seed).create_grid()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn run(&mut self) -> Result<RunStatistics, RunError> {
        let mut stats = RunStatistics::new(
            self.algorithm,
            shortest_hops(&self.grid),
            cheapest_cost(&self.grid),
        );
        let visualize = !self.config.no_visualization;
        let started = Instant::now();

        let mut last: Option<Snapshot> = None;
        {
            let search = self.algorithm.start(&self.grid, &self.options)?;
            for snapshot in search {
                stats.steps += 1;
                if visualize {
                    self.draw(&snapshot, stats.steps);
                }
                last = Some(snapshot);
            }
        }
        stats.elapsed = started.elapsed();

        if let Some(snapshot) = &last {
            stats.explored = snapshot.explored.len();
            stats.found = snapshot.found;
            stats.path_hops = snapshot.path().len().saturating_sub(1);
            stats.path_cost = self.grid.path_cost(snapshot.path());
            self.grid.paint(snapshot);
        }
        log::info!(
            "{} finished in {} steps: found={}",
            self.algorithm,
            stats.steps,
            stats.found
        );
        Ok(stats)
    }

    fn draw(&self, snapshot: &Snapshot, step: usize) {
        clear_screen();
        println!("=== STEPWISE SEARCH ===");
        print!(
            "Algorithm: {} | Step: {} | Frontier: {} | Explored: {}",
            self.algorithm,
            step,
            snapshot.frontier.len(),
            snapshot.explored.len()
        );
        if let Some(iteration) = snapshot.iteration {
            print!(" | Iteration: {}", iteration);
        } else if let (Some(limit), Some(depth)) =
            (snapshot.depth_limit, snapshot.current_depth)
        {
            print!(" | Depth: {}/{}", depth, limit);
        }
        println!();
        self.grid.print_grid(Some(snapshot));
        if !snapshot.done {
            thread::sleep(Duration::from_millis(self.config.delay_ms));
        }
    }

    /// Run every strategy on one shared grid and collect their statistics.
    pub fn run_all_algorithms(config: Config) -> Result<Vec<RunStatistics>, RunError> {
        let grid = Self::build_grid(&config)?;
        let mut quiet_config = config.clone();
        quiet_config.no_visualization = true;

        if !config.quiet {
            println!(
                "Running comparison of {} algorithms on a {}x{} grid...",
                Algorithm::ALL.len(),
                grid.rows,
                grid.cols
            );
            println!("Start: {:?}, Target: {:?}", grid.start(), grid.target());
            println!();
        }

        let mut results = Vec::new();
        for (i, algorithm) in Algorithm::ALL.into_iter().enumerate() {
            if !config.quiet {
                println!(
                    "Running algorithm {} of {}: {}",
                    i + 1,
                    Algorithm::ALL.len(),
                    algorithm
                );
            }
            let mut simulation = Self::with_grid(quiet_config.clone(), algorithm, grid.clone());
            results.push(simulation.run()?);
        }
        Ok(results)
    }

    pub fn print_comparison_results(results: &[RunStatistics]) {
        println!("\n=== ALGORITHM COMPARISON RESULTS ===");
        println!();
        println!(
            "{:<15} {:<8} {:<8} {:<10} {:<6} {:<6} {:<12} {:<12}",
            "Algorithm", "Found", "Steps", "Explored", "Hops", "Cost", "Efficiency", "Time"
        );
        println!("{}", "-".repeat(84));

        for result in results {
            println!(
                "{:<15} {:<8} {:<8} {:<10} {:<6} {:<6} {:<12} {:<12}",
                result.algorithm.name(),
                if result.found { "✓" } else { "✗" },
                result.steps,
                result.explored,
                result.path_hops,
                result.path_cost,
                format!("{:.3}", result.route_efficiency()),
                format!("{:.2?}", result.elapsed)
            );
        }
        println!();

        let successful: Vec<_> = results.iter().filter(|r| r.found).collect();
        let (Some(fewest_explored), Some(cheapest)) = (
            successful.iter().min_by_key(|r| r.explored),
            successful.iter().min_by_key(|r| r.path_cost),
        ) else {
            println!("No algorithm reached the target.");
            return;
        };

        println!("=== PERFORMANCE ANALYSIS ===");
        println!(
            "Fewest nodes explored: {} ({})",
            fewest_explored.algorithm, fewest_explored.explored
        );
        println!(
            "Cheapest path: {} (cost {})",
            cheapest.algorithm, cheapest.path_cost
        );
        if let Some(optimal) = results.first().and_then(|r| r.optimal_cost) {
            let optimal_count = successful.iter().filter(|r| r.path_cost == optimal).count();
            println!(
                "{} of {} successful algorithms matched the optimal cost {}",
                optimal_count,
                successful.len(),
                optimal
            );
        }
    }
}

/// Clear the terminal screen (only used when visualization is enabled)
fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["stepwise_pathfinding", "--no-visualization", "--quiet"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[test]
    fn same_seed_same_environment() {
        let config = config(&["--rows", "12", "--cols", "16"]);
        let a = EnvironmentSetup::generate(&config, 42);
        let b = EnvironmentSetup::generate(&config, 42);
        assert_eq!(a.start, b.start);
        assert_eq!(a.goal, b.goal);
        assert_eq!(a.walls, b.walls);
        assert_eq!(a.weights, b.weights);
    }

    #[test]
    fn environment_never_covers_endpoints() {
        let config = config(&["--rows", "6", "--cols", "6", "--num-walls", "30"]);
        let env = EnvironmentSetup::generate(&config, 3);
        assert!(!env.walls.contains(&env.start));
        assert!(!env.walls.contains(&env.goal));
        let grid = env.create_grid().unwrap();
        assert!(!grid.cell(env.start).blocked());
        assert!(!grid.cell(env.goal).blocked());
    }

    #[test]
    fn ucs_run_matches_reference_cost() {
        let config = config(&["--algorithm", "ucs", "--seed", "11"]);
        let mut simulation = Simulation::new(config).unwrap();
        let stats = simulation.run().unwrap();
        assert_eq!(stats.found, stats.optimal_cost.is_some());
        if stats.found {
            assert_eq!(Some(stats.path_cost), stats.optimal_cost);
        }
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let config = config(&["--algorithm", "a_star"]);
        assert!(matches!(
            Simulation::new(config),
            Err(RunError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn comparison_runs_every_algorithm() {
        let config = config(&["--algorithm", "all", "--seed", "5", "--max-depth", "40"]);
        let results = Simulation::run_all_algorithms(config).unwrap();
        assert_eq!(results.len(), Algorithm::ALL.len());
        let bfs = &results[0];
        let bidirectional = &results[5];
        assert_eq!(bfs.found, bidirectional.found);
    }
}
