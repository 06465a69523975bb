use tokio::sync::mpsc::Sender;

/// Splits a training run into chunks of episodes for the worker pool.
pub struct Producer {
    tx: Sender<usize>,
    episodes: usize,
}

impl Producer {
    pub fn new(tx: Sender<usize>, episodes: usize) -> Self {
        Self { tx, episodes }
    }

    /// Sends every chunk, then drops the sender so workers drain and exit.
    pub async fn run(self) -> usize {
        let mut sent = 0;
        while sent < self.episodes {
            let chunk = crate::CHUNK_EPISODES.min(self.episodes - sent);
            if self.tx.send(chunk).await.is_err() {
                log::warn!("work queue closed after {} episodes", sent);
                break;
            }
            sent += chunk;
        }
        sent
    }
}
