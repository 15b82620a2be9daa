use tally_core::Measurement;
use tally_logging::tally_warn;

use crate::fetch::{FailureKind, Fetcher};

/// Status code reported for transport, read, and URL failures.
pub const INTERNAL_ERROR_STATUS: u16 = 500;

/// Runs one URL's fetch to completion and folds every failure mode into a
/// `Measurement`.
///
/// Non-200 responses surface their own status code; everything else becomes
/// the internal-error code. Never panics and never propagates an error.
pub async fn measure(fetcher: &dyn Fetcher, url: &str) -> Measurement {
    match fetcher.fetch(url).await {
        Ok(lines) => Measurement::Lines(lines),
        Err(err) => {
            tally_warn!("fetch failed url={} error={}", url, err);
            match err.kind {
                FailureKind::HttpStatus(code) => Measurement::Failed(code),
                FailureKind::InvalidUrl | FailureKind::Timeout | FailureKind::Network => {
                    Measurement::Failed(INTERNAL_ERROR_STATUS)
                }
            }
        }
    }
}
