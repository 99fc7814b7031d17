use httpmock::prelude::*;
use s2doi::pacing::FixedInterval;
use s2doi::{ItemOutcome, Pipeline, Resolution, S2Client};
use std::time::Duration;
use tempfile::TempDir;

fn write_citations(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("citations.txt");
    std::fs::write(&path, content).unwrap();
    path
}

fn unpaced_pipeline(server: &MockServer) -> Pipeline {
    let client = S2Client::new(None).with_base_url(server.base_url());
    Pipeline::new(client).with_pacer(FixedInterval::new(Duration::ZERO))
}

fn mock_paper<'a>(
    server: &'a MockServer,
    corpus_id: &str,
    body: serde_json::Value,
) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/paper/CorpusId:{corpus_id}"))
            .query_param("fields", "externalIds");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    })
}

#[tokio::test]
async fn test_end_to_end_success_notfound_success() {
    let server = MockServer::start();
    let m1 = mock_paper(
        &server,
        "1",
        serde_json::json!({"externalIds": {"DOI": "10.1000/aaa"}}),
    );
    let m2 = server.mock(|when, then| {
        when.method(GET).path("/paper/CorpusId:2");
        then.status(404);
    });
    let m3 = mock_paper(
        &server,
        "3",
        serde_json::json!({"externalIds": {"DOI": "10.1000/ccc"}}),
    );

    let dir = TempDir::new().unwrap();
    let path = write_citations(
        &dir,
        "first: https://api.semanticscholar.org/CorpusID:1\n\
         second: https://api.semanticscholar.org/CorpusID:2\n\
         third: https://api.semanticscholar.org/CorpusID:3\n",
    );

    let report = unpaced_pipeline(&server).process_file(&path).await;

    m1.assert();
    m2.assert();
    m3.assert();

    assert_eq!(report.items.len(), 3);
    assert_eq!(report.dois(), vec!["10.1000/aaa", "10.1000/ccc"]);
    assert_eq!(
        report.items[1].outcome,
        ItemOutcome::Attempted {
            corpus_id: "2".to_string(),
            resolution: Resolution::NotFound,
        }
    );
}

#[tokio::test]
async fn test_duplicate_urls_fetched_twice() {
    let server = MockServer::start();
    let mock = mock_paper(
        &server,
        "12345",
        serde_json::json!({"externalIds": {"DOI": "10.1000/dup"}}),
    );

    let dir = TempDir::new().unwrap();
    let path = write_citations(
        &dir,
        "https://api.semanticscholar.org/CorpusID:12345\n\
         https://api.semanticscholar.org/CorpusID:12345\n",
    );

    let report = unpaced_pipeline(&server).process_file(&path).await;

    mock.assert_hits(2);
    assert_eq!(report.dois(), vec!["10.1000/dup", "10.1000/dup"]);
}

#[tokio::test]
async fn test_rate_limited_item_skipped_run_continues() {
    let server = MockServer::start();
    let m1 = server.mock(|when, then| {
        when.method(GET).path("/paper/CorpusId:1");
        then.status(429);
    });
    let m2 = mock_paper(
        &server,
        "2",
        serde_json::json!({"externalIds": {"DOI": "10.1000/ok"}}),
    );

    let dir = TempDir::new().unwrap();
    let path = write_citations(
        &dir,
        "https://api.semanticscholar.org/CorpusID:1\n\
         https://api.semanticscholar.org/CorpusID:2\n",
    );

    let report = unpaced_pipeline(&server).process_file(&path).await;

    m1.assert();
    m2.assert();
    assert_eq!(
        report.items[0].outcome,
        ItemOutcome::Attempted {
            corpus_id: "1".to_string(),
            resolution: Resolution::RateLimited,
        }
    );
    assert_eq!(report.dois(), vec!["10.1000/ok"]);
}

#[tokio::test]
async fn test_missing_doi_and_api_error_yield_no_entries() {
    let server = MockServer::start();
    mock_paper(&server, "1", serde_json::json!({"externalIds": {}}));
    server.mock(|when, then| {
        when.method(GET).path("/paper/CorpusId:2");
        then.status(500).body("upstream exploded");
    });

    let dir = TempDir::new().unwrap();
    let path = write_citations(
        &dir,
        "https://api.semanticscholar.org/CorpusID:1\n\
         https://api.semanticscholar.org/CorpusID:2\n",
    );

    let report = unpaced_pipeline(&server).process_file(&path).await;

    assert!(report.dois().is_empty());
    assert_eq!(
        report.items[0].outcome,
        ItemOutcome::Attempted {
            corpus_id: "1".to_string(),
            resolution: Resolution::MissingDoi,
        }
    );
    assert_eq!(
        report.items[1].outcome,
        ItemOutcome::Attempted {
            corpus_id: "2".to_string(),
            resolution: Resolution::ApiError { status: 500 },
        }
    );
}

#[tokio::test]
async fn test_missing_input_file_yields_empty_report() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does_not_exist.txt");

    let report = unpaced_pipeline(&server).process_file(&path).await;

    assert!(report.items.is_empty());
    assert!(report.dois().is_empty());
}

#[tokio::test]
async fn test_file_with_no_matching_urls() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();
    // Wrong host: not discoverable in file-scanning mode.
    let path = write_citations(&dir, "https://www.semanticscholar.org/CorpusID:1\n");

    let report = unpaced_pipeline(&server).process_file(&path).await;
    assert!(report.items.is_empty());
}

#[tokio::test]
async fn test_no_pause_after_last_item() {
    let server = MockServer::start();
    mock_paper(
        &server,
        "1",
        serde_json::json!({"externalIds": {"DOI": "10.1000/solo"}}),
    );

    let dir = TempDir::new().unwrap();
    let path = write_citations(&dir, "https://api.semanticscholar.org/CorpusID:1\n");

    let client = S2Client::new(None).with_base_url(server.base_url());
    let pipeline = Pipeline::new(client).with_pacer(FixedInterval::new(Duration::from_millis(500)));

    let start = std::time::Instant::now();
    let report = pipeline.process_file(&path).await;

    // A single item never triggers the inter-request pause.
    assert!(start.elapsed() < Duration::from_millis(400));
    assert_eq!(report.dois(), vec!["10.1000/solo"]);
}

#[test]
fn test_write_dois_file_joins_with_comma_space() {
    let dir = TempDir::new().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let dois = vec!["10.1000/aaa".to_string(), "10.1000/bbb".to_string()];
    s2doi::pipeline::write_dois_file(&dois).unwrap();

    let written = std::fs::read_to_string(s2doi::pipeline::OUTPUT_FILE).unwrap();
    assert_eq!(written, "10.1000/aaa, 10.1000/bbb");
}
