use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use tally_core::{Measurement, Report};
use tally_logging::tally_info;

use crate::dispatch::Outcome;

/// Everything the collector learned before the stream closed or the run was
/// interrupted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub report: Report,
    pub interrupted: bool,
}

/// Drains the outcome stream into a per-URL report.
///
/// Stops at whichever comes first: the stream closing (every outcome is in)
/// or `cancel` firing. Outcomes are recorded into a value-keyed map, last
/// write wins. After the loop the report is built from `original_urls` in
/// input order; URLs without a recorded outcome are marked cancelled. Never
/// fails.
pub async fn collect(
    mut outcomes: mpsc::Receiver<Outcome>,
    original_urls: &[String],
    cancel: &CancellationToken,
) -> Collection {
    let mut recorded: HashMap<String, Measurement> = HashMap::with_capacity(original_urls.len());
    let mut interrupted = false;

    loop {
        tokio::select! {
            next = outcomes.recv() => match next {
                Some(outcome) => {
                    recorded.insert(outcome.url, outcome.measure);
                }
                None => break,
            },
            _ = cancel.cancelled() => {
                tally_info!(
                    "collection interrupted with {} of {} outcomes recorded",
                    recorded.len(),
                    original_urls.len()
                );
                interrupted = true;
                break;
            }
        }
    }

    Collection {
        report: Report::build(original_urls, &recorded),
        interrupted,
    }
}
