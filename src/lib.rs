//! Love Letter rules engine and tabular self-play reinforcement learning.
//!
//! The crate is layered leaves-first:
//!
//! - [`cards`] : card ranks, the counting [`cards::Deck`], and discard stacks
//! - [`game`] : the [`game::Game`] state machine and the [`game::Action`] it applies
//! - [`encoding`] : perfect hashing of a player's observation into a table index
//! - [`learning`] : shared value tables, policies, and TD / Monte Carlo learners
//! - [`players`] : the closed set of strategies that can sit at a table
//! - [`training`] : the concurrent self-play trainer and the evaluation arena

pub mod cards;
pub mod encoding;
pub mod game;
pub mod learning;
pub mod players;
pub mod training;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Rewards, returns, and value estimates.
pub type Utility = f32;
/// Exploration rates and sampling probabilities.
pub type Probability = f32;
/// Seat index around the table (0 = first to act).
pub type Position = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Number of players the encoder and trainer are built for.
pub const N: usize = 2;
/// Smallest table the engine will deal.
pub const MIN_PLAYERS: usize = 2;
/// Largest table the engine will deal.
pub const MAX_PLAYERS: usize = 4;
/// Cards dealt face-up to nobody in a heads-up game.
pub const FACEUP_HEADSUP: usize = 3;
/// Score differentials beyond this magnitude saturate in the state index.
pub const SCORE_CLIP: i32 = 15;

// ============================================================================
// TERMINAL REWARDS
// Asymmetric on purpose: losses are often bad luck, rule violations never are.
// ============================================================================
/// Reward for winning a game the opponent did not throw away.
pub const REWARD_WIN: Utility = 100.;
/// Penalty for an ordinary loss.
pub const REWARD_LOSS: Utility = -0.1;
/// Penalty for a rule-violating, always-losing play.
pub const REWARD_STUPID: Utility = -100.;
/// Reward for winning because the opponent violated a rule.
pub const REWARD_FORFEIT: Utility = 1.;
/// Reward for every non-terminal transition.
pub const REWARD_NONE: Utility = 0.;

// ============================================================================
// TRAINING INFRASTRUCTURE
// ============================================================================
/// Episodes handed to a worker per message.
pub const CHUNK_EPISODES: usize = 1024;
/// Games played from one template deal before dealing a fresh one.
pub const TEMPLATE_REFRESH: usize = 100;
/// Capacity of the bounded work and progress queues.
pub const QUEUE_CAPACITY: usize = 64;
/// Interval between progress log messages during training.
pub const TRAINING_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(10);
/// Default learning rate.
pub const ALPHA: Utility = 0.3;
/// Default discount factor.
pub const GAMMA: Utility = 1.0;
/// Default exploration rate.
pub const EPSILON: Probability = 0.3;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
