//! Single-query planning demo on a small office floor plan.
//!
//! Builds a 70x20 map with border walls, two long partitions and a
//! walled-off corner room, plans one path across it and renders the
//! result as ASCII art.
//!
//! Usage:
//!   cargo run --example plan_single
//!   cargo run --example plan_single -- --heuristic-weight 100
//!
//! Enable debug logging to watch the search:
//!   RUST_LOG=debug cargo run --example plan_single

use std::time::Instant;

use clap::Parser;

use marga_nav::{cells_crossed, GridCoord, LazyThetaStar, OccupancyGrid, PlannerConfig};

/// Single-path planning demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Heuristic inflation factor (1.0 = optimal paths)
    #[arg(long, default_value = "1.0")]
    heuristic_weight: f32,

    /// Meters per grid cell for the reported length
    #[arg(long, default_value = "1.0")]
    resolution: f32,
}

const WIDTH: i32 = 70;
const HEIGHT: i32 = 20;

fn build_office() -> OccupancyGrid {
    let mut grid = OccupancyGrid::open(WIDTH, HEIGHT).expect("valid dimensions");
    let mut wall = |pos: (i32, i32), size: (i32, i32)| {
        for x in pos.0..pos.0 + size.0 {
            for y in pos.1..pos.1 + size.1 {
                grid.set_blocked(GridCoord::new(x, y));
            }
        }
    };

    // borders
    wall((0, 0), (WIDTH, 1));
    wall((0, 0), (1, HEIGHT));
    wall((0, HEIGHT - 1), (WIDTH, 1));
    wall((WIDTH - 1, 0), (1, HEIGHT));

    // partitions and the corner room
    wall((5, 0), (1, HEIGHT - 6));
    wall((WIDTH - 6, 5), (1, HEIGHT - 6));
    wall((WIDTH - 6, 5), (4, 1));
    wall((WIDTH - 4, 8), (4, 1));
    wall((20, 0), (1, HEIGHT - 4));
    wall((WIDTH - 20, 5), (14, 1));

    grid
}

fn render(grid: &OccupancyGrid, waypoints: &[GridCoord], start: GridCoord, goal: GridCoord) {
    let mut canvas: Vec<Vec<char>> = (0..HEIGHT)
        .map(|y| {
            (0..WIDTH)
                .map(|x| {
                    if grid.is_blocked(GridCoord::new(x, y)) {
                        '#'
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect();

    // cells swept by each segment, then the corners on top
    for pair in waypoints.windows(2) {
        for cell in cells_crossed(pair[0], pair[1]) {
            canvas[cell.y as usize][cell.x as usize] = '.';
        }
    }
    for (i, wp) in waypoints.iter().enumerate() {
        let digit = char::from_digit((i % 10) as u32, 10).unwrap_or('*');
        canvas[wp.y as usize][wp.x as usize] = digit;
    }
    canvas[start.y as usize][start.x as usize] = 'S';
    canvas[goal.y as usize][goal.x as usize] = 'E';

    for row in &canvas {
        println!("{}", row.iter().collect::<String>());
    }
    println!("#  = walls");
    println!("S  = start, E = end");
    println!(".  = swept cells, digits = waypoints");
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let grid = build_office();
    let start = GridCoord::new(1, 1);
    let goal = GridCoord::new(WIDTH - 2, HEIGHT - 2);

    let config = PlannerConfig {
        heuristic_weight: args.heuristic_weight,
        resolution: args.resolution,
        ..Default::default()
    };
    let mut planner = LazyThetaStar::new(&grid, config);

    let t0 = Instant::now();
    let path = planner.find_path(start, goal).expect("valid endpoints");
    let elapsed = t0.elapsed();

    println!("Time used [microseconds]: {}", elapsed.as_micros());

    if !path.is_reachable() {
        println!("No path exists after {} expansions", path.expansions);
        return;
    }

    println!("This is the path:");
    for wp in &path.waypoints {
        println!("{}, {}", wp.x, wp.y);
    }
    println!(
        "length={:.3} expansions={} los_checks={}",
        path.length, path.expansions, path.los_checks
    );
    println!();

    render(&grid, &path.waypoints, start, goal);
}
