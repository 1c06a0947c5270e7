//! HTTP transport tests against a local mock server

use piaofang::config::{Config, DEFAULT_USER_AGENT};
use piaofang::crawler::{HttpFetcher, RankingsCollector, Transport};
use piaofang::utils::error::FetchError;
use std::fs;
use std::time::Duration;

fn load_fixture(filename: &str) -> String {
    let path = format!("tests/fixtures/html/{filename}");
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

#[test]
fn test_fetch_success_sends_browser_agent() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/movie/1250952")
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .match_header("accept-language", mockito::Matcher::Regex("^zh-CN".into()))
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body("<h1 class=\"nav-header\">热辣滚烫</h1>")
        .create();

    let fetcher = HttpFetcher::new().unwrap();
    let response = fetcher
        .fetch(&format!("{}/movie/1250952", server.url()))
        .unwrap();

    mock.assert();
    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert!(response.body.contains("热辣滚烫"));
}

#[test]
fn test_fetch_custom_user_agent() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/")
        .match_header("user-agent", "piaofang-test/1.0")
        .with_status(200)
        .create();

    let fetcher = HttpFetcher::with_config("piaofang-test/1.0", Duration::from_secs(5)).unwrap();
    fetcher.fetch(&server.url()).unwrap();

    mock.assert();
}

#[test]
fn test_non_success_status_is_returned_then_rejected() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/movie/404")
        .with_status(404)
        .with_body("not found")
        .expect(2)
        .create();

    let fetcher = HttpFetcher::new().unwrap();
    let url = format!("{}/movie/404", server.url());

    let response = fetcher.fetch(&url).unwrap();
    assert_eq!(response.status, 404);
    assert!(!response.is_success());

    let err = fetcher.fetch_text(&url).unwrap_err();
    assert!(matches!(err, FetchError::Status(404)));
}

#[test]
fn test_server_error_status() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/").with_status(503).create();

    let fetcher = HttpFetcher::new().unwrap();
    let err = fetcher.fetch_text(&server.url()).unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[test]
fn test_connection_refused_is_http_error() {
    let fetcher = HttpFetcher::with_config(DEFAULT_USER_AGENT, Duration::from_secs(2)).unwrap();
    let err = fetcher.fetch("http://127.0.0.1:1/").unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}

#[test]
fn test_rankings_over_http() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rankings/year")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(load_fixture("rankings.html"))
        .create();

    let mut config = Config::default();
    config.crawler.base_url = server.url();

    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let targets = RankingsCollector::from_config(&config)
        .fetch_targets(&fetcher)
        .unwrap();

    mock.assert();
    assert_eq!(
        targets,
        vec![
            format!("{}/movie/1250952", server.url()),
            format!("{}/movie/1446112", server.url()),
            format!("{}/movie/1465339", server.url()),
        ]
    );
}

#[test]
fn test_rankings_failure_is_fatal_error() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/rankings/year").with_status(500).create();

    let mut config = Config::default();
    config.crawler.base_url = server.url();

    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let result = RankingsCollector::from_config(&config).fetch_targets(&fetcher);
    assert!(matches!(result, Err(FetchError::Status(500))));
}
