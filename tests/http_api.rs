use std::fs;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use rusty_pricelist::app_router;
use rusty_pricelist::request_log::RequestLog;
use rusty_pricelist::server::serve;
use rusty_pricelist::state::AppState;
use serde_json::Value;
use tempfile::TempDir;

#[derive(Default)]
struct CapturingLog {
    entries: Mutex<Vec<(String, String)>>,
}

impl RequestLog for CapturingLog {
    fn record(&self, client: &str, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((client.to_string(), message.to_string()));
    }
}

struct TestServer {
    base: String,
    log: Arc<CapturingLog>,
    dir: TempDir,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn spawn_server(csv: Option<&str>) -> TestServer {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = dir.path().join("pricelist.csv");
    if let Some(body) = csv {
        fs::write(&source, body).expect("write source");
    }
    let static_dir = dir.path().join("static");
    fs::create_dir(&static_dir).expect("static dir");
    fs::write(static_dir.join("index.html"), "<h1>price list</h1>").expect("index");

    let log = Arc::new(CapturingLog::default());
    let app = app_router(AppState::new(&source, log.clone()), &static_dir);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let handle = tokio::spawn(async move {
        serve(listener, app).await.expect("server run");
    });

    TestServer {
        base: format!("http://{addr}"),
        log,
        dir,
        handle,
    }
}

fn numbered_rows(n: usize) -> String {
    (1..=n).map(|i| format!("C{i},R{i},EA,{i}.25\n")).collect()
}

async fn get_json(url: &str) -> Value {
    let response = reqwest::get(url).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("json body")
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|r| r["SPN"].as_str().expect("SPN").to_string())
        .collect()
}

#[tokio::test]
async fn pricelist_pages_over_source() {
    let server = spawn_server(Some(&numbered_rows(120))).await;

    let first = get_json(&format!("{}/pricelist?getpage=1", server.base)).await;
    let first_names = names(&first);
    assert_eq!(first_names.len(), 50);
    assert_eq!(first_names[0], "R1");
    assert_eq!(first_names[49], "R50");
    assert_eq!(
        first["data"][0],
        serde_json::json!({"SPC": "C1", "SPN": "R1", "SPPS": "EA", "SPP": 1.25})
    );

    let third = get_json(&format!("{}/pricelist?getpage=3", server.base)).await;
    assert_eq!(names(&third).len(), 20);
    assert_eq!(names(&third)[0], "R101");

    let fourth = get_json(&format!("{}/pricelist?getpage=4", server.base)).await;
    assert_eq!(fourth, serde_json::json!({"data": []}));
}

#[tokio::test]
async fn missing_or_bad_page_means_first_page() {
    let server = spawn_server(Some(&numbered_rows(60))).await;
    let first = get_json(&format!("{}/pricelist?getpage=1", server.base)).await;

    for suffix in ["", "?getpage=0", "?getpage=-5", "?getpage=abc"] {
        let body = get_json(&format!("{}/pricelist{suffix}", server.base)).await;
        assert_eq!(body, first, "suffix {suffix:?}");
    }
}

#[tokio::test]
async fn pricelistquery_filters_case_insensitively() {
    let csv = "1,Apple,KG,1\n2,apricot,KG,2\n3,Banana,EA,3\n4,APPLE PIE,EA,abc\n";
    let server = spawn_server(Some(csv)).await;

    let body = get_json(&format!("{}/pricelistquery?getpage=1&querystr=app", server.base)).await;
    assert_eq!(names(&body), vec!["Apple", "APPLE PIE"]);
    assert_eq!(body["data"][1]["SPP"], 0.0);

    let body = get_json(&format!("{}/pricelistquery?querystr=AP", server.base)).await;
    assert_eq!(names(&body), vec!["Apple", "apricot", "APPLE PIE"]);

    let body = get_json(&format!("{}/pricelistquery?getpage=1&querystr=kiwi", server.base)).await;
    assert_eq!(body, serde_json::json!({"data": []}));

    let all = get_json(&format!("{}/pricelistquery?getpage=1&querystr=", server.base)).await;
    assert_eq!(names(&all).len(), 4);
}

#[tokio::test]
async fn malformed_source_is_a_server_error() {
    let server = spawn_server(Some("1,Apple,KG,1\n2,Banana\n")).await;

    let response = reqwest::get(format!("{}/pricelist?getpage=1", server.base))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text().await.expect("body");
    assert!(text.contains("row 2"), "{text}");
}

#[tokio::test]
async fn missing_source_is_unavailable() {
    let server = spawn_server(None).await;

    let response = reqwest::get(format!("{}/pricelistquery?querystr=a", server.base))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn source_is_reread_on_every_request() {
    let server = spawn_server(Some("1,Apple,KG,1\n")).await;
    let source = server.dir.path().join("pricelist.csv");

    let before = get_json(&format!("{}/pricelist", server.base)).await;
    assert_eq!(names(&before), vec!["Apple"]);

    fs::write(&source, "1,Apple,KG,1\n2,Banana,EA,2\n").expect("rewrite source");
    let after = get_json(&format!("{}/pricelist", server.base)).await;
    assert_eq!(names(&after), vec!["Apple", "Banana"]);
}

#[tokio::test]
async fn responses_are_gzipped_on_request() {
    let server = spawn_server(Some(&numbered_rows(50))).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/pricelist?getpage=1", server.base))
        .header("Accept-Encoding", "gzip")
        .send()
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-encoding")
            .and_then(|v| v.to_str().ok()),
        Some("gzip")
    );

    let plain = client
        .get(format!("{}/pricelist?getpage=1", server.base))
        .send()
        .await
        .expect("response");
    assert!(plain.headers().get("content-encoding").is_none());
}

#[tokio::test]
async fn other_paths_serve_static_files() {
    let server = spawn_server(Some("1,Apple,KG,1\n")).await;

    let index = reqwest::get(format!("{}/", server.base)).await.expect("response");
    assert_eq!(index.status(), StatusCode::OK);
    assert_eq!(index.text().await.expect("body"), "<h1>price list</h1>");

    let missing = reqwest::get(format!("{}/nope.js", server.base))
        .await
        .expect("response");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn every_request_is_logged_with_peer_address() {
    let server = spawn_server(Some("1,Apple,KG,1\n")).await;
    get_json(&format!("{}/pricelist?getpage=2", server.base)).await;

    let entries = server.log.entries.lock().unwrap().clone();
    assert_eq!(entries.len(), 1);
    let (client, message) = &entries[0];
    assert!(client.starts_with("127.0.0.1:"), "{client}");
    assert_eq!(message, "GET /pricelist?getpage=2 -> 200");
}
