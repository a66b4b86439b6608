use crate::algorithms::{SearchOptions, DEFAULT_DEPTH_LIMIT, DFS_WEIGHT_LIMIT, MAX_DEPTH};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    #[arg(long, default_value_t = 30)]
    pub cols: usize,

    #[arg(long, default_value_t = 80)]
    pub num_walls: usize,

    /// Cells given a random weight between 2 and 10
    #[arg(long, default_value_t = 40)]
    pub num_weighted: usize,

    /// bfs, dfs, ucs, dls, iddfs, bidirectional, or all
    #[arg(long, default_value = "bfs")]
    pub algorithm: String,

    #[arg(long, default_value_t = 30)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Seed for wall and weight placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Text layout to load instead of generating one
    #[arg(long)]
    pub layout: Option<PathBuf>,

    #[arg(long, default_value_t = DFS_WEIGHT_LIMIT)]
    pub dfs_weight_limit: u8,

    #[arg(long, default_value_t = DEFAULT_DEPTH_LIMIT)]
    pub depth_limit: usize,

    #[arg(long, default_value_t = MAX_DEPTH)]
    pub max_depth: usize,
}

impl Config {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            dfs_weight_limit: self.dfs_weight_limit,
            dls_depth_limit: self.depth_limit,
            iddfs_max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_search_options() {
        let config = Config::parse_from(["stepwise_pathfinding"]);
        assert_eq!(config.search_options(), SearchOptions::default());
        assert_eq!(config.algorithm, "bfs");
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::parse_from([
            "stepwise_pathfinding",
            "--algorithm",
            "iddfs",
            "--max-depth",
            "40",
            "--seed",
            "7",
            "--no-visualization",
        ]);
        assert_eq!(config.search_options().iddfs_max_depth, 40);
        assert_eq!(config.seed, Some(7));
        assert!(config.no_visualization);
    }
}
