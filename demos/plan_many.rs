//! Batch planning demo: one start, many random goals.
//!
//! Builds a cluttered map, samples free goal cells and plans the whole
//! fan in one call, optionally across worker threads or as an all-pairs
//! batch.
//!
//! Usage:
//!   cargo run --example plan_many -- --goals 12 --threads 4
//!   cargo run --example plan_many -- --pairs --goals 6
//!   cargo run --example plan_many -- --yaml > paths.yaml
//!
//! Enable debug logging to watch the batches:
//!   RUST_LOG=debug cargo run --example plan_many

use std::time::Instant;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use marga_nav::{GridCoord, MultiGoalPlanner, OccupancyGrid, PlannerConfig};

/// Multi-goal planning demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of goals to sample
    #[arg(short, long, default_value = "8")]
    goals: usize,

    /// Worker threads (0 = available parallelism, 1 = sequential)
    #[arg(short, long, default_value = "1")]
    threads: usize,

    /// Plan every unordered pair instead of a start-to-goal fan
    #[arg(long)]
    pairs: bool,

    /// Map clutter seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Dump the results as YAML instead of a summary table
    #[arg(long)]
    yaml: bool,
}

const SIZE: i32 = 64;

fn build_clutter(seed: u64) -> OccupancyGrid {
    let mut grid = OccupancyGrid::open(SIZE, SIZE).expect("valid dimensions");
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..120 {
        let x = rng.gen_range(2..SIZE - 2);
        let y = rng.gen_range(2..SIZE - 2);
        grid.set_blocked(GridCoord::new(x, y));
        if rng.gen_bool(0.4) {
            grid.set_blocked(GridCoord::new(x + 1, y));
        }
        if rng.gen_bool(0.4) {
            grid.set_blocked(GridCoord::new(x, y + 1));
        }
    }
    grid
}

fn sample_free(grid: &OccupancyGrid, rng: &mut StdRng, taken: &[GridCoord]) -> GridCoord {
    loop {
        let candidate = GridCoord::new(rng.gen_range(0..SIZE), rng.gen_range(0..SIZE));
        if grid.is_free(candidate) && !taken.contains(&candidate) {
            return candidate;
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let grid = build_clutter(args.seed);
    let mut rng = StdRng::seed_from_u64(args.seed ^ 0x5eed);

    let start = sample_free(&grid, &mut rng, &[]);
    let mut goals = Vec::with_capacity(args.goals);
    let mut taken = vec![start];
    for _ in 0..args.goals {
        let goal = sample_free(&grid, &mut rng, &taken);
        taken.push(goal);
        goals.push(goal);
    }

    let planner = MultiGoalPlanner::new(&grid, PlannerConfig::default());

    if args.pairs {
        let t0 = Instant::now();
        let pairs = planner.find_path_pairs(start, &goals).expect("valid endpoints");
        let elapsed = t0.elapsed();

        if args.yaml {
            print!("{}", serde_yaml::to_string(&pairs).expect("serializable paths"));
            return;
        }
        println!(
            "{} pairs over {} points in {} us",
            pairs.len(),
            goals.len() + 1,
            elapsed.as_micros()
        );
        for pair in &pairs {
            let status = if pair.path.is_reachable() {
                format!("{:.2}", pair.path.length)
            } else {
                "unreachable".to_string()
            };
            println!(
                "  {} -> {}: {} ({} expansions)",
                pair.from, pair.to, status, pair.path.expansions
            );
        }
        return;
    }

    let t0 = Instant::now();
    let paths = planner
        .find_paths_parallel(start, &goals, args.threads)
        .expect("valid endpoints");
    let elapsed = t0.elapsed();

    if args.yaml {
        print!("{}", serde_yaml::to_string(&paths).expect("serializable paths"));
        return;
    }

    println!(
        "{} goals from ({}, {}) in {} us ({} threads requested)",
        paths.len(),
        start.x,
        start.y,
        elapsed.as_micros(),
        args.threads
    );
    for (goal, path) in goals.iter().zip(&paths) {
        if path.is_reachable() {
            println!(
                "  ({:2}, {:2}): length={:7.2} waypoints={} expansions={}",
                goal.x,
                goal.y,
                path.length,
                path.waypoints.len(),
                path.expansions
            );
        } else {
            println!("  ({:2}, {:2}): unreachable", goal.x, goal.y);
        }
    }
}
