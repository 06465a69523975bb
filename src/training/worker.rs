use crate::Position;
use crate::Probability;
use crate::Utility;
use crate::encoding::Observation;
use crate::game::Game;
use crate::learning::Learner;
use crate::learning::Step;
use crate::learning::epsilon_greedy;
use rand::rngs::SmallRng;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::mpsc::Receiver;
use tokio::sync::mpsc::Sender;

/// One self-play thread.
///
/// Owns its RNG, its template deal, and both players' trajectory
/// buffers; shares only the learners. Runs on the blocking pool and
/// blocks only on the work and progress queues.
pub struct Worker {
    learners: [Arc<dyn Learner>; 2],
    epsilon: Probability,
    rng: SmallRng,
    template: Game,
    played: usize,
    last: [Option<usize>; 2],
    visits: [Vec<usize>; 2],
}

impl Worker {
    pub fn new(learners: [Arc<dyn Learner>; 2], epsilon: Probability, mut rng: SmallRng) -> Self {
        Self {
            template: Self::deal(&mut rng),
            learners,
            epsilon,
            rng,
            played: 0,
            last: [None; 2],
            visits: [Vec::new(), Vec::new()],
        }
    }

    /// Plays chunks until the work queue closes, reporting each
    /// finished chunk. Returns the number of episodes played.
    pub fn run(mut self, rx: Arc<Mutex<Receiver<usize>>>, tx: Sender<usize>) -> usize {
        loop {
            let chunk = rx
                .lock()
                .expect("a worker panicked holding the work queue")
                .blocking_recv();
            let Some(n) = chunk else {
                break;
            };
            (0..n).for_each(|_| {
                self.episode();
            });
            if tx.blocking_send(n).is_err() {
                log::warn!("progress queue closed");
            }
        }
        self.played
    }

    /// One game of self-play with every update it implies.
    /// Returns the winner.
    pub fn episode(&mut self) -> Position {
        if self.played % crate::TEMPLATE_REFRESH == 0 {
            self.template = Self::deal(&mut self.rng);
        }
        self.played += 1;
        self.last = [None; 2];
        self.visits.iter_mut().for_each(Vec::clear);
        let mut game = self.template.clone();
        while !game.ended() {
            let p = game.active();
            let ref observation = Observation::from(&game);
            let (action, next) =
                epsilon_greedy(&*self.learners[p], observation, self.epsilon, &mut self.rng);
            if let Some(last) = self.last[p] {
                self.learn(p, last, next, crate::REWARD_NONE, false);
            }
            self.last[p] = Some(next);
            self.visits[p].push(next);
            game.apply(action, &mut self.rng);
        }
        let winner = game.winner();
        let (won, lost) = match game.stupid() {
            true => (crate::REWARD_FORFEIT, crate::REWARD_STUPID),
            false => (crate::REWARD_WIN, crate::REWARD_LOSS),
        };
        for (p, reward) in [(winner, won), (1 - winner, lost)] {
            if let Some(last) = self.last[p].take() {
                self.learn(p, last, last, reward, true);
            }
            self.learners[p].conclude(&self.visits[p], p == winner, &mut self.rng);
        }
        winner
    }

    /// a fresh template; nobody reads self-play logs
    fn deal(rng: &mut SmallRng) -> Game {
        let mut game = Game::heads_up(rng);
        game.mute();
        game
    }

    fn learn(&mut self, p: Position, last: usize, next: usize, reward: Utility, ended: bool) {
        let step = Step {
            last,
            next,
            reward,
            ended,
            epsilon: self.epsilon,
        };
        self.learners[p].update(step, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::Player;
    use crate::players::Random;
    use rand::SeedableRng;

    #[test]
    fn templates_keep_no_log() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut game = Worker::deal(rng);
        assert!(game.events().is_muted());
        while !game.ended() {
            let action = Random.choose(&Observation::from(&game), rng);
            game.apply(action, rng);
        }
        assert!(game.events().lines().is_empty());
    }
}
