//! Monte Carlo trainer
//!
//! Learns win tallies first from purely random games, then from
//! self-play with a decaying exploration rate.

use clap::Parser;
use loveletter::learning::Learner;
use loveletter::learning::MonteCarlo;
use loveletter::learning::PersistError;
use loveletter::training::Trainer;
use loveletter::training::evaluate;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    load: Option<PathBuf>,
    #[arg(long)]
    save: Option<PathBuf>,
    /// random games before any self-play
    #[arg(long, default_value_t = 10_000_000)]
    random: usize,
    /// self-play games per epoch
    #[arg(long, default_value_t = 1_000_000)]
    games: usize,
    #[arg(long, default_value_t = 10)]
    epochs: usize,
    #[arg(long, default_value_t = loveletter::EPSILON)]
    epsilon: f32,
    /// factor applied to epsilon after every epoch
    #[arg(long, default_value_t = 0.7)]
    epsilon_decay: f32,
    #[arg(long, default_value_t = loveletter::GAMMA)]
    gamma: f32,
    /// games per evaluation against random play
    #[arg(short, default_value_t = 10_000)]
    n: usize,
    #[arg(long, default_value_t = num_cpus::get())]
    workers: usize,
}

#[tokio::main]
async fn main() {
    loveletter::log();
    let args = Args::parse();
    let learner = Arc::new(MonteCarlo::new()) as Arc<dyn Learner>;
    learner.rates().set_gamma(args.gamma);
    if let Some(ref path) = args.load {
        match learner.load(path) {
            Ok(()) => log::info!("loaded tallies from {}", path.display()),
            Err(PersistError::Missing) => log::warn!("no tallies at {}, starting fresh", path.display()),
            Err(e) => panic!("load tallies: {}", e),
        }
    }
    let trainer = Trainer::new(args.workers);
    log::info!("learning from {} random games", args.random);
    trainer.train([learner.clone(), learner.clone()], args.random, 1.).await;
    evaluate(learner.clone(), args.n);
    let mut epsilon = args.epsilon;
    for epoch in 0..args.epochs {
        log::info!("self-play epoch {} of {} (epsilon {:.4})", epoch + 1, args.epochs, epsilon);
        trainer.train([learner.clone(), learner.clone()], args.games, epsilon).await;
        evaluate(learner.clone(), args.n);
        epsilon *= args.epsilon_decay;
    }
    if let Some(ref path) = args.save {
        learner.save(path).expect("save tallies");
    }
}
