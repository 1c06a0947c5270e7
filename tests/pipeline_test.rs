//! Harvest driver tests: batch isolation and end-to-end persistence

use piaofang::crawler::{FetchResponse, Harvester, HttpFetcher, Transport};
use piaofang::models::{HarvestStats, MovieRecord, PageState};
use piaofang::parser::{MovieParser, PageAssembler};
use piaofang::storage::{JsonWriter, RecordSink};
use piaofang::utils::error::FetchError;
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

fn load_fixture(filename: &str) -> String {
    let path = format!("tests/fixtures/html/{filename}");
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

/// Serves `<h1>` pages whose title is the requested address
struct EchoTransport {
    requested: RefCell<Vec<String>>,
}

impl EchoTransport {
    fn new() -> Self {
        Self {
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for EchoTransport {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        Ok(FetchResponse {
            status: 200,
            body: format!(r#"<h1 class="nav-header">{url}</h1>"#),
        })
    }
}

/// Delegates to the real parser but panics on one page
struct FaultyAssembler {
    poisoned: &'static str,
}

impl PageAssembler for FaultyAssembler {
    fn assemble(&self, html: &str) -> MovieRecord {
        if html.contains(self.poisoned) {
            panic!("unexpected markup");
        }
        MovieParser::new().assemble(html)
    }
}

fn addresses(ids: &[&str]) -> Vec<String> {
    ids.iter()
        .map(|id| format!("https://piaofang.maoyan.com/movie/{id}"))
        .collect()
}

#[test]
fn test_panicking_page_does_not_abort_batch() {
    let temp_dir = TempDir::new().unwrap();
    let writer = JsonWriter::new(temp_dir.path()).unwrap();

    let harvester = Harvester::new(
        EchoTransport::new(),
        FaultyAssembler { poisoned: "/movie/2" },
        &writer,
    );
    let stats = harvester.run(&addresses(&["1", "2", "3"]));

    assert_eq!(
        stats,
        HarvestStats {
            discovered: 3,
            persisted: 2,
            failed: 1
        }
    );
    assert!(writer.path_for("1").exists());
    assert!(!writer.path_for("2").exists());
    assert!(writer.path_for("3").exists());
}

#[test]
fn test_address_without_identifier_is_not_fetched() {
    let temp_dir = TempDir::new().unwrap();
    let transport = EchoTransport::new();
    let harvester = Harvester::new(
        &transport,
        MovieParser::new(),
        JsonWriter::new(temp_dir.path()).unwrap(),
    );

    let state = harvester.harvest_page("https://piaofang.maoyan.com/");

    assert_eq!(state, PageState::Failed);
    assert!(transport.requested.borrow().is_empty());
}

#[test]
fn test_persist_failure_marks_page_failed() {
    struct RejectingSink;

    impl RecordSink for RejectingSink {
        fn persist(&self, _record: &MovieRecord, _key: &str) -> piaofang::error::Result<()> {
            Err(std::io::Error::other("read-only output").into())
        }
    }

    let harvester = Harvester::new(EchoTransport::new(), MovieParser::new(), RejectingSink);
    let stats = harvester.run(&addresses(&["1", "2"]));

    assert_eq!(stats.persisted, 0);
    assert_eq!(stats.failed, 2);
}

#[test]
fn test_end_to_end_over_http() {
    let mut server = mockito::Server::new();
    let page = load_fixture("movie_page.html");
    let _ok = server
        .mock("GET", "/movie/1250952")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(&page)
        .create();
    let _missing = server.mock("GET", "/movie/404").with_status(404).create();

    let temp_dir = TempDir::new().unwrap();
    let writer = JsonWriter::new(temp_dir.path()).unwrap();
    let harvester = Harvester::new(HttpFetcher::new().unwrap(), MovieParser::new(), &writer);

    let targets = vec![
        format!("{}/movie/1250952", server.url()),
        format!("{}/movie/404", server.url()),
    ];
    let stats = harvester.run(&targets);

    assert_eq!(stats.persisted, 1);
    assert_eq!(stats.failed, 1);

    let content = fs::read_to_string(writer.path_for("1250952")).unwrap();
    assert!(content.contains("\"movie_title\": \"热辣滚烫\""));

    let record: MovieRecord = serde_json::from_str(&content).unwrap();
    assert_eq!(record, MovieParser::new().assemble(&page));
    assert!(!writer.path_for("404").exists());
}
