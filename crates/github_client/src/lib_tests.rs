//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: &str = "test-owner";
const REPO: &str = "test-repo";

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let octocrab = create_token_client("ghp_test_token", Some(&mock_server.uri())).unwrap();
    GitHubClient::new(octocrab)
}

fn github_error(message: &str) -> serde_json::Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest"
    })
}

#[tokio::test]
async fn test_get_file_contents_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/.github/pr-labeler.yml")))
        .and(query_param("ref", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "encoding": "base64",
            "size": 15,
            "name": "pr-labeler.yml",
            "path": ".github/pr-labeler.yml",
            "content": "ZG9jczogIioubWQiCg==\n",
            "sha": "3d21ec53a331a6f037a91c368710b99387d012c1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .get_file_contents(OWNER, REPO, ".github/pr-labeler.yml", Some("abc123"))
        .await;

    if let Err(e) = &result {
        eprintln!("get_file_contents error: {e:?}");
    }
    let contents = result.unwrap();
    assert_eq!(contents.encoding, "base64");
    assert_eq!(contents.content, "ZG9jczogIioubWQiCg==\n");
}

#[tokio::test]
async fn test_get_file_contents_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/missing.yml")))
        .respond_with(ResponseTemplate::new(404).set_body_json(github_error("Not Found")))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .get_file_contents(OWNER, REPO, "missing.yml", None)
        .await;

    assert!(
        matches!(result, Err(Error::NotFound)),
        "expected NotFound, got {result:?}"
    );
}

#[tokio::test]
async fn test_list_open_pull_requests_sends_paging_and_sort_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/pulls")))
        .and(query_param("state", "open"))
        .and(query_param("sort", "updated"))
        .and(query_param("direction", "desc"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "number": 12,
                "title": "Add docs",
                "state": "open",
                "labels": [{ "id": 1, "name": "documentation" }]
            },
            {
                "number": 9,
                "title": "Refactor parser",
                "state": "open",
                "labels": []
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let prs = client
        .list_open_pull_requests(OWNER, REPO, 2, MAX_PAGE_SIZE)
        .await
        .unwrap();

    assert_eq!(prs.len(), 2);
    assert_eq!(prs[0].number, 12);
    assert_eq!(prs[0].label_names().collect::<Vec<_>>(), vec!["documentation"]);
    assert_eq!(prs[1].title, "Refactor parser");
    assert!(!prs[1].is_labeled());
}

#[tokio::test]
async fn test_list_open_pull_requests_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/pulls")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let prs = client
        .list_open_pull_requests(OWNER, REPO, 1, MAX_PAGE_SIZE)
        .await
        .unwrap();

    assert!(prs.is_empty());
}

#[tokio::test]
async fn test_list_changed_files_returns_filenames_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/pulls/42/files")))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "sha": "a", "filename": "src/main.rs", "status": "modified", "additions": 3 },
            { "sha": "b", "filename": "README.md", "status": "added", "additions": 10 }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let files = client.list_changed_files(OWNER, REPO, 42).await.unwrap();

    assert_eq!(files, vec!["src/main.rs".to_string(), "README.md".to_string()]);
}

#[tokio::test]
async fn test_add_labels_posts_label_names() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/issues/7/labels")))
        .and(body_json(json!({ "labels": ["backend", "docs"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "backend", "color": "ededed" },
            { "id": 2, "name": "docs", "color": "ededed" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .add_labels(OWNER, REPO, 7, &["backend".to_string(), "docs".to_string()])
        .await;

    if let Err(e) = &result {
        eprintln!("add_labels error: {e:?}");
    }
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_rate_limited_request_maps_to_rate_limit_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/pulls")))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(github_error("API rate limit exceeded for installation ID 1.")),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client
        .list_open_pull_requests(OWNER, REPO, 1, MAX_PAGE_SIZE)
        .await;

    assert!(
        matches!(result, Err(Error::RateLimitExceeded)),
        "expected RateLimitExceeded, got {result:?}"
    );
}

#[tokio::test]
async fn test_unauthorized_request_maps_to_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/pulls/1/files")))
        .respond_with(ResponseTemplate::new(401).set_body_json(github_error("Bad credentials")))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_changed_files(OWNER, REPO, 1).await;

    match result {
        Err(Error::AuthError(msg)) => assert_eq!(msg, "Bad credentials"),
        other => panic!("expected AuthError, got {other:?}"),
    }
}

#[test]
fn test_classify_status() {
    assert!(matches!(
        classify_status(http::StatusCode::NOT_FOUND, "Not Found"),
        Error::NotFound
    ));
    assert!(matches!(
        classify_status(http::StatusCode::TOO_MANY_REQUESTS, "slow down"),
        Error::RateLimitExceeded
    ));
    assert!(matches!(
        classify_status(http::StatusCode::FORBIDDEN, "Resource not accessible by integration"),
        Error::AuthError(_)
    ));
    assert!(matches!(
        classify_status(http::StatusCode::UNPROCESSABLE_ENTITY, "Validation Failed"),
        Error::ApiError(_)
    ));
}

#[test]
fn test_create_token_client_rejects_invalid_base_uri() {
    let result = create_token_client("ghp_test_token", Some("not a uri"));

    assert!(matches!(result, Err(Error::AuthError(_))));
}
