//! Command-line entry point: fetch every URL in the argument list
//! concurrently and report one line count per URL in input order.

mod logging;

use std::env;
use std::sync::Arc;

use tally_core::parse_url_list;
use tally_engine::{
    collect, wait_for_shutdown_signal, CancellationToken, Concurrency, DispatchSettings,
    Dispatcher, FetchSettings, ReqwestFetcher,
};
use tally_logging::{tally_info, tally_warn};

const USAGE: &str = "URL list is empty. Must be specified as command-line argument:\n\
    tally \"https://ya.ru, https://google.com, https://mts.ru\"";

/// Optional worker-count override; unset means one task per URL.
const WORKERS_ENV: &str = "TALLY_WORKERS";

#[tokio::main]
async fn main() {
    logging::initialize(logging::LogDestination::File);

    let raw = env::args().nth(1).unwrap_or_default();
    if raw.is_empty() {
        println!("{USAGE}");
        return;
    }

    println!("processing...");
    let urls = parse_url_list(&raw);
    tally_info!("run started with {} urls", urls.len());

    let settings = DispatchSettings {
        concurrency: concurrency_from(env::var(WORKERS_ENV).ok().as_deref()),
    };
    let fetcher = Arc::new(ReqwestFetcher::new(FetchSettings::default()));
    let dispatcher = Dispatcher::new(fetcher, settings);
    let outcomes = dispatcher.dispatch(urls.clone());

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        if wait_for_shutdown_signal().await.is_ok() {
            canceller.cancel();
        }
    });

    let collection = collect(outcomes, &urls, &cancel).await;
    if collection.interrupted {
        println!("stopped");
    }
    print!("{}", collection.report);
    tally_info!("run finished, interrupted={}", collection.interrupted);
}

/// Maps the optional worker-count override to a dispatch strategy.
fn concurrency_from(raw: Option<&str>) -> Concurrency {
    match raw {
        None => Concurrency::PerUrl,
        Some(value) => match value.parse() {
            Ok(bound) => Concurrency::Workers(bound),
            Err(_) => {
                tally_warn!("ignoring invalid {WORKERS_ENV} value {value:?}");
                Concurrency::PerUrl
            }
        },
    }
}
