use std::time::Duration;

use tally_core::Measurement;
use tally_engine::{measure, FailureKind, FetchSettings, Fetcher, ReqwestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetcher_counts_newline_terminated_lines() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("one\ntwo\nthree\n"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/doc", server.uri());

    let lines = fetcher.fetch(&url).await.expect("fetch ok");
    assert_eq!(lines, 3);
}

#[tokio::test]
async fn fetcher_counts_an_unterminated_final_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("one\ntwo"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/doc", server.uri());

    let lines = fetcher.fetch(&url).await.expect("fetch ok");
    assert_eq!(lines, 2);
}

#[tokio::test]
async fn empty_body_counts_zero_lines() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/empty", server.uri());

    let lines = fetcher.fetch(&url).await.expect("fetch ok");
    assert_eq!(lines, 0);
}

#[tokio::test]
async fn non_200_status_is_reported_as_its_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/missing", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(measure(&fetcher, &url).await, Measurement::Failed(404));
}

#[tokio::test]
async fn even_success_statuses_other_than_200_report_their_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/no-content"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/no-content", server.uri());

    assert_eq!(measure(&fetcher, &url).await, Measurement::Failed(204));
}

#[tokio::test]
async fn slow_response_maps_to_the_internal_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
    };
    let fetcher = ReqwestFetcher::new(settings);
    let url = format!("{}/slow", server.uri());

    let err = fetcher.fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(measure(&fetcher, &url).await, Measurement::Failed(500));
}

#[tokio::test]
async fn unreachable_host_maps_to_the_internal_error_code() {
    let settings = FetchSettings {
        request_timeout: Duration::from_secs(1),
    };
    let fetcher = ReqwestFetcher::new(settings);

    // Nothing listens on the discard port.
    let outcome = measure(&fetcher, "http://127.0.0.1:9/").await;
    assert_eq!(outcome, Measurement::Failed(500));
}

#[tokio::test]
async fn unparseable_url_maps_to_the_internal_error_code() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());

    let err = fetcher.fetch("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
    assert_eq!(
        measure(&fetcher, "not a url").await,
        Measurement::Failed(500)
    );
}
