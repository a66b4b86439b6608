use clap::Parser;

use stepwise_pathfinding::config::Config;
use stepwise_pathfinding::simulation::Simulation;

fn main() {
    let config = Config::parse();

    if !config.quiet {
        println!("Starting stepwise search...");
        match &config.layout {
            Some(path) => println!("Layout: {}", path.display()),
            None => {
                println!("Grid size: {}x{}", config.rows, config.cols);
                println!(
                    "Walls: {}, Weighted cells: {}",
                    config.num_walls, config.num_weighted
                );
            }
        }
        println!("Algorithm: {}", config.algorithm);

        if config.no_visualization {
            println!("Visualization disabled - running in fast mode");
        } else {
            println!("Visualization enabled with {}ms delay", config.delay_ms);
            println!("Press Ctrl+C to stop the search");
        }
        println!();
    }

    if config.algorithm == "all" {
        // Run all algorithms and compare results
        match Simulation::run_all_algorithms(config) {
            Ok(results) => Simulation::print_comparison_results(&results),
            Err(e) => {
                eprintln!("Error running all algorithms: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let quiet = config.quiet;
    let visualize = !config.no_visualization;
    let result = Simulation::new(config).and_then(|mut simulation| {
        let stats = simulation.run()?;
        Ok((simulation, stats))
    });

    match result {
        Ok((simulation, stats)) => {
            if !quiet && !visualize {
                simulation.grid().print_grid(None);
            }
            println!("\n=== FINAL RESULTS ===");
            print!("{}", stats);
        }
        Err(e) => {
            eprintln!("Search failed: {}", e);
            std::process::exit(1);
        }
    }
}
