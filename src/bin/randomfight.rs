//! Random versus random
//!
//! A baseline series between two uniformly random players.

use clap::Parser;
use loveletter::players::Random;
use loveletter::training::Arena;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// wins needed to take the series
    #[arg(short, default_value_t = 1000)]
    n: usize,
}

fn main() {
    loveletter::log();
    let args = Args::parse();
    let ref mut rng = SmallRng::from_rng(&mut rand::rng());
    let wins = Arena::new([&Random, &Random]).series(args.n, rng);
    let winner = if wins[0] > wins[1] { 0 } else { 1 };
    log::info!(
        "Player {} won {}-{}",
        winner,
        wins[winner],
        wins[1 - winner]
    );
}
