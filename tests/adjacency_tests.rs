use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use starlog::client::ContentClient;
use starlog::config::SiteConfig;
use starlog::content::AdjacencyResolver;
use starlog::error::Error;

// ── helpers ─────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> SiteConfig {
    SiteConfig {
        api_endpoint: server.uri(),
        ..Default::default()
    }
}

fn refs_body() -> serde_json::Value {
    json!({
        "refs": [
            { "id": "master", "ref": "master-ref-123", "isMasterRef": true }
        ]
    })
}

fn doc(uid: &str, published: &str) -> serde_json::Value {
    json!({
        "id": uid,
        "uid": uid,
        "type": "posts",
        "first_publication_date": published,
        "last_publication_date": null,
        "data": { "title": uid }
    })
}

fn page_body(results: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "page": 1,
        "results_per_page": 60,
        "total_results_size": results.len(),
        "total_pages": 1,
        "next_page": null,
        "prev_page": null,
        "results": results
    })
}

async fn mount_refs(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refs_body()))
        .mount(server)
        .await;
}

/// Matches when the `q` parameter contains the given fragment
struct QueryContains(&'static str);

impl wiremock::Match for QueryContains {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .any(|(key, value)| key == "q" && value.contains(self.0))
    }
}

async fn mount_side(server: &MockServer, fragment: &'static str, results: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/documents/search"))
        .and(QueryContains(fragment))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(results)))
        .mount(server)
        .await;
}

// ── scenario: one post on each side ─────────────────────────────

#[tokio::test]
async fn finds_prev_and_next_around_anchor() {
    let server = MockServer::start().await;
    mount_refs(&server).await;
    mount_side(
        &server,
        "date.after",
        vec![doc("july-post", "2021-07-01T00:00:00+0000")],
    )
    .await;
    mount_side(
        &server,
        "date.before",
        vec![doc("may-post", "2021-05-01T00:00:00+0000")],
    )
    .await;

    let client = ContentClient::new(&config_for(&server)).unwrap();
    let resolver = AdjacencyResolver::new(&client, "posts", 60);

    let adjacent = resolver
        .resolve("2021-06-01T00:00:00+0000", None)
        .await
        .unwrap();

    assert_eq!(adjacent.next.unwrap().uid, "july-post");
    assert_eq!(adjacent.prev.unwrap().uid, "may-post");
}

// ── scenario: sole post ─────────────────────────────────────────

#[tokio::test]
async fn sole_post_has_no_neighbors() {
    let server = MockServer::start().await;
    mount_refs(&server).await;
    mount_side(&server, "date.after", vec![]).await;
    mount_side(&server, "date.before", vec![]).await;

    let client = ContentClient::new(&config_for(&server)).unwrap();
    let resolver = AdjacencyResolver::new(&client, "posts", 60);

    let adjacent = resolver
        .resolve("2021-06-01T00:00:00+0000", None)
        .await
        .unwrap();

    assert!(adjacent.next.is_none());
    assert!(adjacent.prev.is_none());
}

// ── nearest selection is a scan, not a positional pick ──────────

#[tokio::test]
async fn nearest_candidate_wins_regardless_of_batch_order() {
    let server = MockServer::start().await;
    mount_refs(&server).await;
    // nearest-after entry buried in the middle of the batch
    mount_side(
        &server,
        "date.after",
        vec![
            doc("december-post", "2021-12-01T00:00:00+0000"),
            doc("july-post", "2021-07-01T00:00:00+0000"),
            doc("september-post", "2021-09-01T00:00:00+0000"),
        ],
    )
    .await;
    // nearest-before entry first, not last
    mount_side(
        &server,
        "date.before",
        vec![
            doc("may-post", "2021-05-01T00:00:00+0000"),
            doc("january-post", "2021-01-01T00:00:00+0000"),
        ],
    )
    .await;

    let client = ContentClient::new(&config_for(&server)).unwrap();
    let resolver = AdjacencyResolver::new(&client, "posts", 60);

    let adjacent = resolver
        .resolve("2021-06-01T00:00:00+0000", None)
        .await
        .unwrap();

    assert_eq!(adjacent.next.unwrap().uid, "july-post");
    assert_eq!(adjacent.prev.unwrap().uid, "may-post");
}

// ── validation ──────────────────────────────────────────────────

#[tokio::test]
async fn malformed_anchor_fails_before_any_query() {
    let server = MockServer::start().await;

    let client = ContentClient::new(&config_for(&server)).unwrap();
    let resolver = AdjacencyResolver::new(&client, "posts", 60);

    let err = resolver.resolve("06/01/2021", None).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── window size ─────────────────────────────────────────────────

#[tokio::test]
async fn side_queries_are_bounded_by_the_window() {
    let server = MockServer::start().await;
    mount_refs(&server).await;

    Mock::given(method("GET"))
        .and(path("/documents/search"))
        .and(wiremock::matchers::query_param("pageSize", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(vec![])))
        .expect(2)
        .mount(&server)
        .await;

    let client = ContentClient::new(&config_for(&server)).unwrap();
    let resolver = AdjacencyResolver::new(&client, "posts", 60);

    resolver
        .resolve("2021-06-01T00:00:00+0000", None)
        .await
        .unwrap();
}
