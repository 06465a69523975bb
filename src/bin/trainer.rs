//! Temporal-difference trainer
//!
//! Self-play epochs for SARSA, Q-learning, Expected SARSA, or double
//! Q-learning, each followed by an evaluation against random play.

use clap::Parser;
use loveletter::learning::Learner;
use loveletter::learning::PersistError;
use loveletter::learning::Rule;
use loveletter::players::Random;
use loveletter::players::Robot;
use loveletter::training::Arena;
use loveletter::training::Trainer;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// weights to resume from; a missing file starts fresh
    #[arg(long)]
    load: Option<PathBuf>,
    /// where to write the final weights
    #[arg(long)]
    save: Option<PathBuf>,
    #[arg(long, default_value_t = Rule::ExpectedSarsa.to_string())]
    rule: String,
    #[arg(long, default_value_t = loveletter::EPSILON)]
    epsilon: f32,
    /// factor applied to epsilon every decay period
    #[arg(long, default_value_t = 0.7)]
    epsilon_decay: f32,
    /// epochs between epsilon decays
    #[arg(long, default_value_t = 100)]
    epsilon_period: usize,
    #[arg(long, default_value_t = loveletter::ALPHA)]
    alpha: f32,
    /// factor applied to alpha after every epoch
    #[arg(long, default_value_t = 0.995)]
    alpha_decay: f32,
    #[arg(long, default_value_t = loveletter::GAMMA)]
    gamma: f32,
    /// self-play games per epoch
    #[arg(long, default_value_t = 1_000_000)]
    games: usize,
    #[arg(long, default_value_t = 1000)]
    epochs: usize,
    /// games per evaluation against random play
    #[arg(short, default_value_t = 10_000)]
    n: usize,
    /// terminal snapshots to print at the end
    #[arg(long, default_value_t = 50)]
    traces: usize,
    #[arg(long, default_value_t = num_cpus::get())]
    workers: usize,
}

#[tokio::main]
async fn main() {
    loveletter::log();
    let args = Args::parse();
    let rule = Rule::try_from(args.rule.as_str()).expect("known rule");
    let learner = rule.learner();
    learner.rates().set_alpha(args.alpha);
    learner.rates().set_gamma(args.gamma);
    if let Some(ref path) = args.load {
        match learner.load(path) {
            Ok(()) => log::info!("loaded weights from {} ({})", path.display(), learner.rates()),
            Err(PersistError::Missing) => log::warn!("no weights at {}, starting fresh", path.display()),
            Err(e) => panic!("load weights: {}", e),
        }
    }
    if let Some(ref path) = args.save {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        assert!(dir.is_none_or(|d| d.is_dir()), "save directory does not exist");
        log::info!("final weights will be saved at {}", path.display());
    }
    let trainer = Trainer::new(args.workers);
    let mut epsilon = args.epsilon;
    for epoch in 0..args.epochs {
        log::info!("epoch {} of {} ({}, epsilon {:.4})", epoch + 1, args.epochs, learner.rates(), epsilon);
        trainer.train([learner.clone(), learner.clone()], args.games, epsilon).await;
        loveletter::training::evaluate(learner.clone(), args.n);
        learner.rates().decay(args.alpha_decay);
        if epoch % args.epsilon_period == 0 {
            epsilon *= args.epsilon_decay;
        }
    }
    trace(learner.clone(), args.traces);
    loveletter::training::evaluate(learner.clone(), args.n);
    if let Some(ref path) = args.save {
        learner.save(path).expect("save weights");
    }
}

fn trace(learner: Arc<dyn Learner>, games: usize) {
    let ref robot = Robot::new(learner);
    let ref mut rng = SmallRng::from_rng(&mut rand::rng());
    let finals = Arena::new([robot, &Random]).trace(games, rng);
    log::info!("playing greedily\n{}", loveletter::training::render(&finals));
}
