//! Tally engine: concurrent fetch dispatch and result collection.
mod collect;
mod dispatch;
mod executor;
mod fetch;
mod shutdown;

pub use collect::{collect, Collection};
pub use dispatch::{Concurrency, DispatchSettings, Dispatcher, Outcome};
pub use executor::{measure, INTERNAL_ERROR_STATUS};
pub use fetch::{FailureKind, FetchError, FetchSettings, Fetcher, ReqwestFetcher};
pub use shutdown::wait_for_shutdown_signal;
pub use tokio_util::sync::CancellationToken;
