use crate::Position;
use crate::Probability;
use crate::encoding::Observation;
use crate::game::Final;
use crate::game::Game;
use crate::learning::Learner;
use crate::players::Player;
use crate::players::Random;
use crate::players::Robot;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::sync::Arc;

/// Evaluation games between two players.
///
/// Positions in the returned counts refer to `players`, not seats:
/// whoever moves first in a game, a win by `players[0]` counts for 0.
pub struct Arena<'a> {
    players: [&'a dyn Player; 2],
}

impl<'a> Arena<'a> {
    pub fn new(players: [&'a dyn Player; 2]) -> Self {
        Self { players }
    }

    /// Plays one game with `players[first]` in the first seat.
    /// Returns the finished game and the winning player.
    pub fn play(&self, first: Position, rng: &mut SmallRng) -> (Game, Position) {
        let mut game = Game::heads_up(rng);
        while !game.ended() {
            let player = self.players[(game.active() + first) % 2];
            let action = player.choose(&Observation::from(&game), rng);
            game.apply(action, rng);
        }
        let winner = (game.winner() + first) % 2;
        (game, winner)
    }

    /// Wins of `players[0]` over `games` games in which it moves first,
    /// played in parallel.
    pub fn fight(&self, games: usize) -> usize {
        (0..games)
            .into_par_iter()
            .map_init(
                || SmallRng::from_rng(&mut rand::rng()),
                |rng, _| self.play(0, rng).1,
            )
            .filter(|winner| *winner == 0)
            .count()
    }

    /// Plays until one player has `target` wins.
    /// The winner of each game moves first in the next.
    pub fn series(&self, target: usize, rng: &mut SmallRng) -> [usize; 2] {
        let mut wins = [0; 2];
        let mut first = 0;
        while wins.iter().all(|w| *w < target) {
            let (_, winner) = self.play(first, rng);
            wins[winner] += 1;
            first = winner;
            log::debug!("series {} - {}", wins[0], wins[1]);
        }
        wins
    }

    /// The terminal snapshots of `games` games with `players[0]` first.
    pub fn trace(&self, games: usize, rng: &mut SmallRng) -> Vec<Final> {
        (0..games)
            .filter_map(|_| self.play(0, rng).0.final_state())
            .collect()
    }
}

/// Win rates of a learner's greedy policy against [`Random`],
/// moving first and moving second.
pub fn evaluate(learner: Arc<dyn Learner>, games: usize) -> (Probability, Probability) {
    let ref robot = Robot::new(learner);
    let ref random = Random;
    let first = Arena::new([robot, random]).fight(games);
    let second = games - Arena::new([random, robot]).fight(games);
    let rate = |wins: usize| wins as Probability / games.max(1) as Probability;
    log::info!(
        "win rate vs random: {:5.1}% first, {:5.1}% second",
        rate(first) * 100.,
        rate(second) * 100.
    );
    (rate(first), rate(second))
}

/// A numbered table of terminal snapshots for the logs.
pub fn render(finals: &[Final]) -> String {
    let mut table = format!("Game | {}\n", Final::header().replace('\n', "\n-----|-"));
    for (i, last) in finals.iter().enumerate() {
        table.push_str(&format!("{:>4} | {}\n", i, last));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::MonteCarlo;

    #[test]
    fn fight_counts_first_player_wins() {
        let ref random = Random;
        let wins = Arena::new([random, random]).fight(1000);
        assert!(wins > 300 && wins < 700, "{} wins", wins);
    }

    #[test]
    fn series_stops_at_target() {
        let ref random = Random;
        let ref mut rng = SmallRng::seed_from_u64(0);
        let wins = Arena::new([random, random]).series(7, rng);
        assert_eq!(wins.iter().max(), Some(&7));
        assert!(wins.iter().min().unwrap() < &7);
    }

    #[test]
    fn trace_every_game() {
        let ref random = Random;
        let ref mut rng = SmallRng::seed_from_u64(1);
        let finals = Arena::new([random, random]).trace(20, rng);
        assert_eq!(finals.len(), 20);
        let table = render(&finals);
        assert_eq!(table.lines().count(), 22);
        assert!(table.starts_with("Game | Discard"));
    }

    #[test]
    #[ignore]
    fn learner_beats_random() {
        let learner = Arc::new(MonteCarlo::new()) as Arc<dyn Learner>;
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let trainer = super::super::Trainer::default();
        runtime.block_on(trainer.train([learner.clone(), learner.clone()], 2_000_000, 0.3));
        let (first, second) = evaluate(learner, 10_000);
        assert!(first > 0.5);
        assert!(second > 0.5);
    }
}
