use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use tally_logging::tally_debug;

use crate::executor::measure;
use crate::fetch::Fetcher;
use tally_core::Measurement;

/// One URL paired with its measurement, emitted once per dispatched URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub url: String,
    pub measure: Measurement,
}

/// How many fetches may run at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    /// One task per URL, merged by a fan-in stage.
    PerUrl,
    /// A fixed pool of workers pulling from a shared job queue. The
    /// effective pool size is capped at the URL count.
    Workers(NonZeroUsize),
}

#[derive(Debug, Clone, Copy)]
pub struct DispatchSettings {
    pub concurrency: Concurrency,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            concurrency: Concurrency::PerUrl,
        }
    }
}

/// Hands URLs to executors and multiplexes their outcomes onto one stream.
pub struct Dispatcher {
    fetcher: Arc<dyn Fetcher>,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: DispatchSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Starts every fetch and returns the outcome stream.
    ///
    /// The stream yields one [`Outcome`] per dispatched URL in completion
    /// order and closes only after the last of them has been delivered. An
    /// empty URL list closes the stream immediately. Must be called from
    /// within a tokio runtime.
    pub fn dispatch(&self, urls: Vec<String>) -> mpsc::Receiver<Outcome> {
        match self.settings.concurrency {
            Concurrency::PerUrl => self.dispatch_per_url(urls),
            Concurrency::Workers(bound) => self.dispatch_worker_pool(urls, bound.get()),
        }
    }

    fn dispatch_per_url(&self, urls: Vec<String>) -> mpsc::Receiver<Outcome> {
        tally_debug!("dispatching {} urls, one task each", urls.len());
        let sources = urls
            .into_iter()
            .map(|url| {
                let (tx, rx) = mpsc::channel(1);
                let fetcher = Arc::clone(&self.fetcher);
                tokio::spawn(async move {
                    let outcome = Outcome {
                        measure: measure(fetcher.as_ref(), &url).await,
                        url,
                    };
                    let _ = tx.send(outcome).await;
                });
                rx
            })
            .collect();
        fan_in(sources)
    }

    fn dispatch_worker_pool(&self, urls: Vec<String>, bound: usize) -> mpsc::Receiver<Outcome> {
        let workers = bound.min(urls.len());
        tally_debug!("dispatching {} urls across {} workers", urls.len(), workers);

        // Capacity covers every job and every outcome, so no producer ever
        // blocks on a reader that has gone away.
        let capacity = urls.len().max(1);
        let (job_tx, job_rx) = mpsc::channel(capacity);
        let (outcome_tx, outcome_rx) = mpsc::channel(capacity);
        let queue = Arc::new(Mutex::new(job_rx));

        // Feed every job, then drop the sender to mark the queue exhausted.
        tokio::spawn(async move {
            for url in urls {
                if job_tx.send(url).await.is_err() {
                    break;
                }
            }
        });

        for _ in 0..workers {
            let queue = Arc::clone(&queue);
            let outcome_tx = outcome_tx.clone();
            let fetcher = Arc::clone(&self.fetcher);
            tokio::spawn(async move {
                loop {
                    // Hold the queue lock only for the pull itself.
                    let next = { queue.lock().await.recv().await };
                    let Some(url) = next else { break };
                    let outcome = Outcome {
                        measure: measure(fetcher.as_ref(), &url).await,
                        url,
                    };
                    if outcome_tx.send(outcome).await.is_err() {
                        break;
                    }
                }
            });
        }

        // The stream closes once the last worker drops its sender clone.
        outcome_rx
    }
}

/// Merges per-source outcome channels into one stream.
///
/// One relay task drains each source; the merged channel closes exactly when
/// every relay has observed its source close and released its sender clone.
fn fan_in(sources: Vec<mpsc::Receiver<Outcome>>) -> mpsc::Receiver<Outcome> {
    let (tx, rx) = mpsc::channel(sources.len().max(1));
    for mut source in sources {
        let tx = tx.clone();
        tokio::spawn(async move {
            while let Some(outcome) = source.recv().await {
                if tx.send(outcome).await.is_err() {
                    break;
                }
            }
        });
    }
    rx
}
