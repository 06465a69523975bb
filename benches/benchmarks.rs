criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        indexing_observation,
        indexing_deck,
        dealing_game,
        playing_random_game,
        choosing_random_action,
        training_chunk,
}

use loveletter::Arbitrary;
use loveletter::cards::Card;
use loveletter::cards::Deck;
use loveletter::encoding::Observation;
use loveletter::encoding::index;
use loveletter::game::Game;
use loveletter::learning::Learner;
use loveletter::learning::MonteCarlo;
use loveletter::players::Player;
use loveletter::players::Random;
use loveletter::training::Arena;
use loveletter::training::Worker;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;

fn indexing_observation(c: &mut criterion::Criterion) {
    let seen = Deck::full();
    c.bench_function("index an Observation", |b| {
        b.iter(|| index(seen, Card::Priest, Card::Baron, Card::Handmaid, -8))
    });
}

fn indexing_deck(c: &mut criterion::Criterion) {
    let deck = Deck::random();
    c.bench_function("convert a Deck to and from usize", |b| {
        b.iter(|| Deck::from(usize::from(deck)))
    });
}

fn dealing_game(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    c.bench_function("deal a heads-up Game", |b| b.iter(|| Game::heads_up(rng)));
}

fn playing_random_game(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let ref random = Random;
    let arena = Arena::new([random, random]);
    c.bench_function("play a random Game to the end", |b| {
        b.iter(|| arena.play(0, rng))
    });
}

fn choosing_random_action(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let game = Game::heads_up(rng);
    let ref observation = Observation::from(&game);
    c.bench_function("choose a legal random Action", |b| {
        b.iter(|| Random.choose(observation, rng))
    });
}

fn training_chunk(c: &mut criterion::Criterion) {
    let learner = Arc::new(MonteCarlo::new()) as Arc<dyn Learner>;
    let rng = SmallRng::seed_from_u64(0);
    let mut worker = Worker::new([learner.clone(), learner], loveletter::EPSILON, rng);
    c.bench_function("train one self-play episode", |b| b.iter(|| worker.episode()));
}
