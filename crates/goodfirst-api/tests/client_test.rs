use std::time::Duration;

use chrono::DateTime;
use goodfirst_api::{ApiError, GitHubClient, IssueState, SearchParams, SortKey};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: Option<&str>) -> GitHubClient {
    GitHubClient::with_base_url(
        token.map(str::to_string),
        server.uri(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn issue_json(number: u64, repo: &str) -> serde_json::Value {
    json!({
        "id": 1000 + number,
        "title": format!("Issue {number}"),
        "html_url": format!("https://github.com/{repo}/issues/{number}"),
        "labels": [{"id": 1, "name": "good first issue"}],
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-02T00:00:00Z",
        "comments": 2,
        "state": "open",
        "repository_url": format!("https://api.github.com/repos/{repo}"),
        "number": number
    })
}

#[tokio::test]
async fn test_search_sends_query_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("q", "label:\"good first issue\" language:rust state:open"))
        .and(query_param("sort", "created"))
        .and(query_param("per_page", "2"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .and(header("authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "incomplete_results": false,
            "items": [issue_json(1, "octo/one"), issue_json(2, "octo/two")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = SearchParams {
        labels: vec!["good first issue".into()],
        language: Some("rust".into()),
        state: Some(IssueState::Open),
        sort: Some(SortKey::Created),
        per_page: Some(2),
        ..Default::default()
    };

    let page = client_for(&server, Some("ghp_test"))
        .search_issues(&params)
        .await
        .unwrap();

    assert_eq!(page.total_count, 2);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].repo_key().unwrap().to_string(), "octo/two");
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_authorization() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stargazers_count": 1234,
            "full_name": "octo/hello",
            "language": "Rust",
            "description": "Hello"
        })))
        .mount(&server)
        .await;

    let repo = client_for(&server, None)
        .get_repository("octo", "hello")
        .await
        .unwrap();

    assert_eq!(repo.stargazers_count, 1234);
    assert_eq!(repo.language.as_deref(), Some("Rust"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_rate_limited_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1767225600")
                .set_body_json(json!({"message": "API rate limit exceeded"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .search_issues(&SearchParams::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::RateLimit {
            reset_at: DateTime::from_timestamp(1_767_225_600, 0).unwrap()
        }
    );
}

#[tokio::test]
async fn test_forbidden_with_quota_left_is_bad_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "4999")
                .set_body_json(json!({"message": "Bad credentials"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, Some("expired"))
        .search_issues(&SearchParams::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::BadAuth {
            message: "Bad credentials".into()
        }
    );
}

#[tokio::test]
async fn test_validation_error_uses_field_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{
                "resource": "Search",
                "field": "q",
                "code": "invalid",
                "message": "The search is longer than 256 characters."
            }]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .search_issues(&SearchParams::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "validation: The search is longer than 256 characters."
    );
}

#[tokio::test]
async fn test_status_codes_map_to_kinds() {
    let server = MockServer::start().await;

    for (repo, status) in [("gone", 404), ("broken", 500), ("teapot", 418), ("nope", 401)] {
        Mock::given(method("GET"))
            .and(path(format!("/repos/octo/{repo}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
    }

    let client = client_for(&server, None);

    let kind = |r: Result<_, ApiError>| r.unwrap_err().kind();
    assert_eq!(kind(client.get_repository("octo", "gone").await), "not_found");
    assert_eq!(kind(client.get_repository("octo", "broken").await), "server_error");
    assert_eq!(kind(client.get_repository("octo", "teapot").await), "network_error");
    assert_eq!(kind(client.get_repository("octo", "nope").await), "bad_auth");

    // Empty bodies fall back to the status line
    let err = client.get_repository("octo", "broken").await.unwrap_err();
    assert_eq!(err.message(), Some("HTTP 500"));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on port 1
    let client =
        GitHubClient::with_base_url(None, "http://127.0.0.1:1".into(), Duration::from_secs(2))
            .unwrap();

    let err = client.get_repository("octo", "hello").await.unwrap_err();
    assert_eq!(err.kind(), "network_error");
    assert!(!err.message().unwrap().is_empty());
}

#[tokio::test]
async fn test_slow_response_times_out_as_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"stargazers_count": 1, "full_name": "octo/slow"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client =
        GitHubClient::with_base_url(None, server.uri(), Duration::from_millis(100)).unwrap();

    let err = client.get_repository("octo", "slow").await.unwrap_err();
    assert_eq!(err.kind(), "network_error");
}

#[tokio::test]
async fn test_garbled_success_body_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .search_issues(&SearchParams::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "network_error");
}
