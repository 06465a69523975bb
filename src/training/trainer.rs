use super::producer::Producer;
use super::progress::Progress;
use super::worker::Worker;
use crate::Probability;
use crate::learning::Learner;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;
use std::sync::Mutex;

/// Drives concurrent self-play over a fixed pool of blocking workers.
///
/// Episodes are handed out in chunks over a bounded queue; finished
/// chunk counts flow back over a second bounded queue to a progress
/// logger. Both learners may be the same `Arc` for pure self-play.
pub struct Trainer {
    workers: usize,
}

impl Trainer {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Plays `episodes` games and returns how many were played.
    pub async fn train(
        &self,
        learners: [Arc<dyn Learner>; 2],
        episodes: usize,
        epsilon: Probability,
    ) -> usize {
        log::debug!(
            "training {} vs {} for {} episodes on {} workers (epsilon {:.4})",
            learners[0].name(),
            learners[1].name(),
            episodes,
            self.workers,
            epsilon
        );
        let (work_tx, work_rx) = tokio::sync::mpsc::channel::<usize>(crate::QUEUE_CAPACITY);
        let (done_tx, done_rx) = tokio::sync::mpsc::channel::<usize>(crate::QUEUE_CAPACITY);
        let work_rx = Arc::new(Mutex::new(work_rx));
        let progress = tokio::spawn(Progress::new(done_rx, episodes).run());
        let producer = tokio::spawn(Producer::new(work_tx, episodes).run());
        let workers = (0..self.workers)
            .map(|_| {
                let rng = SmallRng::from_rng(&mut rand::rng());
                let worker = Worker::new(learners.clone(), epsilon, rng);
                let rx = work_rx.clone();
                let tx = done_tx.clone();
                tokio::task::spawn_blocking(move || worker.run(rx, tx))
            })
            .collect::<Vec<_>>();
        drop(work_rx);
        drop(done_tx);
        let played = futures::future::join_all(workers)
            .await
            .into_iter()
            .map(joined)
            .sum::<usize>();
        let sent = joined(producer.await);
        let logged = joined(progress.await);
        assert_eq!(sent, played, "episodes sent but never played");
        assert_eq!(logged, played, "episodes played but never reported");
        learners[0].finalize();
        if !Arc::ptr_eq(&learners[0], &learners[1]) {
            learners[1].finalize();
        }
        played
    }
}

/// a task's output, re-raising its panic on this thread
fn joined<T>(result: Result<T, tokio::task::JoinError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => panic!("training task failed: {}", e),
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
