use grid_hill_climbing::{
    find_path, row_col, GridLayout, PathOverlay, DEFAULT_BLOCKED, DEFAULT_COLS,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_ROWS,
};
use rand::prelude::*;

// Generates a random 8x8 layout with 10 obstacles and prints the walk the hill climber takes.
// The first argument, if given, seeds the random generator so a run can be repeated:
//
//     RUST_LOG=debug cargo run --example hill_climb -- 42

fn main() {
    env_logger::init();
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let layout = match GridLayout::create_random(DEFAULT_ROWS, DEFAULT_COLS, DEFAULT_BLOCKED, &mut rng)
    {
        Ok(layout) => layout,
        Err(err) => {
            eprintln!("Could not create layout: {}", err);
            std::process::exit(1);
        }
    };
    println!("Seed: {}", seed);
    println!("{}", layout);

    let outcome = find_path(&layout, DEFAULT_MAX_ATTEMPTS, &mut rng);
    println!(
        "{:?} after {} attempt(s), {} cells:",
        outcome.status,
        outcome.attempts,
        outcome.path.len()
    );
    for (step, p) in outcome.path.iter().enumerate() {
        println!("{:>3}: {:?}", step, row_col(p));
    }
    println!();
    println!("{}", PathOverlay::new(&layout, &outcome.path));
}
