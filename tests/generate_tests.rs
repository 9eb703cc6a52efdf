use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use starlog::config::SiteConfig;
use starlog::generator::Generator;
use starlog::Starlog;

// ── helpers ─────────────────────────────────────────────────────

/// Matches when the `q` parameter contains the given fragment
struct QueryContains(String);

impl wiremock::Match for QueryContains {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .any(|(key, value)| key == "q" && value.contains(&self.0))
    }
}

fn summary_doc(uid: &str, published: &str, title: &str) -> serde_json::Value {
    json!({
        "id": uid,
        "uid": uid,
        "type": "posts",
        "first_publication_date": published,
        "last_publication_date": null,
        "data": { "title": title, "subtitle": "sub", "author": "Ana" }
    })
}

fn detail_doc(uid: &str, published: &str, title: &str) -> serde_json::Value {
    json!({
        "id": uid,
        "uid": uid,
        "type": "posts",
        "first_publication_date": published,
        "last_publication_date": "2021-08-01T08:00:00+0000",
        "data": {
            "title": title,
            "subtitle": "sub",
            "author": "Ana",
            "banner": { "url": "https://images.example.com/banner.png" },
            "content": [{
                "heading": "Introdução",
                "body": [{ "type": "paragraph", "text": "algumas palavras aqui" }]
            }]
        }
    })
}

fn page_body(results: Vec<serde_json::Value>, next_page: Option<&str>) -> serde_json::Value {
    json!({
        "page": 1,
        "results_per_page": 20,
        "total_results_size": results.len(),
        "total_pages": 1,
        "next_page": next_page,
        "prev_page": null,
        "results": results
    })
}

async fn mount_q(server: &MockServer, needle: String, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/documents/search"))
        .and(QueryContains(needle))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

const ALPHA_DATE: &str = "2021-05-01T00:00:00+0000";
const BETA_DATE: &str = "2021-07-01T00:00:00+0000";

async fn mount_site(server: &MockServer) -> String {
    // master ref is resolved exactly once and cached for the whole cycle
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "refs": [{ "id": "master", "ref": "master-ref-123", "isMasterRef": true }]
        })))
        .expect(1)
        .mount(server)
        .await;

    let cursor = format!("{}/documents/search?page=2&after=alpha", server.uri());
    Mock::given(method("GET"))
        .and(path("/documents/search"))
        .and(query_param("pageSize", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            vec![
                summary_doc("beta", BETA_DATE, "Beta post"),
                summary_doc("alpha", ALPHA_DATE, "Alpha post"),
                summary_doc("ghost", "2021-06-15T00:00:00+0000", "Ghost post"),
            ],
            Some(&cursor),
        )))
        .mount(server)
        .await;

    // detail fetches by slug
    mount_q(
        server,
        r#"my.posts.uid, "alpha""#.to_string(),
        page_body(vec![detail_doc("alpha", ALPHA_DATE, "Alpha post")], None),
    )
    .await;
    mount_q(
        server,
        r#"my.posts.uid, "beta""#.to_string(),
        page_body(vec![detail_doc("beta", BETA_DATE, "Beta post")], None),
    )
    .await;
    // ghost vanished upstream
    mount_q(
        server,
        r#"my.posts.uid, "ghost""#.to_string(),
        page_body(vec![], None),
    )
    .await;

    // adjacency, one pair of bounded queries per anchor
    mount_q(
        server,
        format!(r#"date.after(document.first_publication_date, "{}""#, ALPHA_DATE),
        page_body(vec![summary_doc("beta", BETA_DATE, "Beta post")], None),
    )
    .await;
    mount_q(
        server,
        format!(r#"date.before(document.first_publication_date, "{}""#, ALPHA_DATE),
        page_body(vec![], None),
    )
    .await;
    mount_q(
        server,
        format!(r#"date.after(document.first_publication_date, "{}""#, BETA_DATE),
        page_body(vec![], None),
    )
    .await;
    mount_q(
        server,
        format!(r#"date.before(document.first_publication_date, "{}""#, BETA_DATE),
        page_body(vec![summary_doc("alpha", ALPHA_DATE, "Alpha post")], None),
    )
    .await;

    cursor
}

fn app_for(server: &MockServer, base_dir: &std::path::Path) -> Starlog {
    let config = SiteConfig {
        title: "spacetraveling".to_string(),
        api_endpoint: server.uri(),
        ..Default::default()
    };
    Starlog {
        config,
        base_dir: base_dir.to_path_buf(),
        public_dir: base_dir.join("public"),
    }
}

// ── full generation cycle ───────────────────────────────────────

#[tokio::test]
async fn generates_index_posts_and_redirects() {
    let server = MockServer::start().await;
    let cursor = mount_site(&server).await;

    let tmp = tempfile::tempdir().unwrap();
    let app = app_for(&server, tmp.path());

    let generator = Generator::new(&app).unwrap();
    let summary = generator.generate(None).await.unwrap();
    assert_eq!(summary.posts, 2);
    assert_eq!(summary.redirects, 1);
    assert_eq!(summary.skipped, 0);

    // index: all three entries, formatted dates, load-more cursor
    let index = std::fs::read_to_string(app.public_dir.join("index.html")).unwrap();
    assert!(index.contains("Beta post"));
    assert!(index.contains("Alpha post"));
    assert!(index.contains("01 jul 2021"));
    assert!(index.contains("01 mai 2021"));
    assert!(index.contains("Carregar mais posts"));
    assert!(index.contains(&cursor));

    // alpha: next points at beta, no prev
    let alpha = std::fs::read_to_string(app.public_dir.join("post/alpha/index.html")).unwrap();
    assert!(alpha.contains(r#"href="/post/beta/""#));
    assert!(!alpha.contains(r#"class="prev""#));
    assert!(alpha.contains("editado em 01 ago 2021, às 08:00"));
    assert!(alpha.contains("<p>algumas palavras aqui</p>"));
    assert!(alpha.contains("1 min"));

    // beta: prev points at alpha, no next
    let beta = std::fs::read_to_string(app.public_dir.join("post/beta/index.html")).unwrap();
    assert!(beta.contains(r#"href="/post/alpha/""#));
    assert!(!beta.contains(r#"class="next""#));

    // ghost: redirect to the listing instead of an error page
    let ghost = std::fs::read_to_string(app.public_dir.join("post/ghost/index.html")).unwrap();
    assert!(ghost.contains("url=/"));

    // manifest carries the revalidation cadence
    let manifest = std::fs::read_to_string(app.public_dir.join("manifest.json")).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(manifest["revalidate_secs"], 3600);
    assert_eq!(manifest["posts"], 2);
    assert_eq!(manifest["redirects"], 1);
}

// ── preview mode ────────────────────────────────────────────────

#[tokio::test]
async fn preview_generation_marks_pages_and_skips_master_ref() {
    let server = MockServer::start().await;
    // no refs mock: every query must carry the preview ref

    Mock::given(method("GET"))
        .and(path("/documents/search"))
        .and(query_param("ref", "draft-ref-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            vec![summary_doc("alpha", ALPHA_DATE, "Alpha draft")],
            None,
        )))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let app = app_for(&server, tmp.path());

    let generator = Generator::new(&app).unwrap();
    let summary = generator.generate(Some("draft-ref-42")).await.unwrap();
    // the uid query matches the same mock, so alpha renders from the
    // summary-shaped document with empty content
    assert_eq!(summary.posts, 1);

    let index = std::fs::read_to_string(app.public_dir.join("index.html")).unwrap();
    assert!(index.contains("Modo Preview"));
    assert!(index.contains("Alpha draft"));
}
