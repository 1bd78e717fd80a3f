//! Tick throughput per strategy across grid sizes

use std::time::Instant;

use life_canvas::domain::{Engine, Grid, TickStrategy};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded_grid(size: u32) -> Option<Grid> {
    let mut grid = Grid::new(size, size).ok()?;
    Engine::default().randomize(&mut grid, &mut StdRng::seed_from_u64(size as u64));
    Some(grid)
}

/// Average milliseconds per generation
fn benchmark(strategy: TickStrategy, size: u32, iterations: u32) -> Option<f64> {
    let mut grid = seeded_grid(size)?;
    let mut engine = Engine::new(strategy);
    // first tick sizes the scratch buffer
    engine.tick(&mut grid);

    let start = Instant::now();
    for _ in 0..iterations {
        engine.tick(&mut grid);
    }
    Some(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

fn main() {
    println!("=== Game of Life Tick Benchmark ===\n");

    let sizes = [64, 128, 256, 512, 1024, 2048];
    let iterations = 20;

    print!("{:>12}", "Size");
    for strategy in TickStrategy::all() {
        print!(" {:>12}", strategy.name());
    }
    println!(" {:>10}", "Speedup");
    println!("{:-<65}", "");

    for size in sizes {
        let timings: Vec<f64> = TickStrategy::all()
            .iter()
            .filter_map(|&strategy| benchmark(strategy, size, iterations))
            .collect();
        let [serial, parallel, auto] = timings[..] else {
            eprintln!("skipping {size}x{size}: grid could not be allocated");
            continue;
        };

        println!(
            "{:>12} {:>12.3} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{size}x{size}"),
            serial,
            parallel,
            auto,
            serial / parallel
        );
    }

    println!("\n=== Throughput at 2048x2048 ===\n");

    let cells = 2048.0 * 2048.0;
    for strategy in TickStrategy::all() {
        if let Some(ms) = benchmark(strategy, 2048, iterations) {
            println!(
                "{:<10} {:>8.2} ms/gen, {:>8.1}M cells/sec",
                strategy.name(),
                ms,
                cells / (ms / 1000.0) / 1_000_000.0
            );
        }
    }
}
