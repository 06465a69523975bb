use std::time::Instant;
use tokio::sync::mpsc::Receiver;

/// Aggregates completed-chunk counts from the workers and logs
/// the training rate at most once per log interval.
pub struct Progress {
    rx: Receiver<usize>,
    total: usize,
    done: usize,
    begin: Instant,
    delta: Instant,
    since: usize,
}

impl Progress {
    pub fn new(rx: Receiver<usize>, total: usize) -> Self {
        let now = Instant::now();
        Self {
            rx,
            total,
            done: 0,
            begin: now,
            delta: now,
            since: 0,
        }
    }

    /// Runs until every worker has dropped its sender.
    pub async fn run(mut self) -> usize {
        while let Some(n) = self.rx.recv().await {
            self.tick(n);
        }
        log::info!(
            "trained {} episodes in {:.0?}",
            self.done,
            self.begin.elapsed()
        );
        self.done
    }

    fn tick(&mut self, n: usize) {
        self.done += n;
        self.since += n;
        let now = Instant::now();
        let delta_t = now.duration_since(self.delta);
        if delta_t >= crate::TRAINING_LOG_INTERVAL || self.done == self.total {
            let total_t = now.duration_since(self.begin);
            log::info!(
                "progress: {:8.0?} {:>12} {:6.2}%   mean {:8.0}   last {:8.0}",
                total_t,
                self.done,
                self.done as f32 / self.total.max(1) as f32 * 100.,
                self.done as f32 / total_t.as_secs_f32(),
                self.since as f32 / delta_t.as_secs_f32(),
            );
            self.delta = now;
            self.since = 0;
        }
    }
}
