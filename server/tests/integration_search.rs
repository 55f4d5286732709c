use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use boolret_core::CorpusConfig;
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tower::ServiceExt;

fn build_tiny_corpus(dir: &Path) -> CorpusConfig {
    let docs = dir.join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("doc0.txt"), "Rust is great. Data mining in rust.").unwrap();
    fs::write(docs.join("doc1.txt"), "Learning rust and data structures.").unwrap();
    fs::write(docs.join("doc2.txt"), "Mining for gold, then later some data.").unwrap();
    fs::write(docs.join("broken.txt"), [0xffu8, 0xfe, 0xfd]).unwrap();
    let stop = dir.join("stopwords.txt");
    fs::write(&stop, "great\n").unwrap();
    CorpusConfig { dirs: vec![docs], stopwords: Some(stop), words: None }
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    call(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn results(json: &Value) -> Vec<&str> {
    json["results"].as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect()
}

#[tokio::test]
async fn boolean_search_returns_doc_ids() {
    let dir = tempdir().unwrap();
    let app = boolret_server::build_app(build_tiny_corpus(dir.path()), None).unwrap();

    let (status, json) = get(app.clone(), "/search?q=rust%20and%20data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["kind"], "boolean");
    assert_eq!(results(&json), vec!["doc0.txt", "doc1.txt"]);

    let (status, json) = get(app, "/search?q=rust%20and%20not%20mining").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results(&json), vec!["doc1.txt"]);
}

#[tokio::test]
async fn proximity_search_uses_positions() {
    let dir = tempdir().unwrap();
    let app = boolret_server::build_app(build_tiny_corpus(dir.path()), None).unwrap();

    // doc0: rust data mine rust; doc2: mine gold later data
    let (status, json) = get(app.clone(), "/search?q=data%20mining%20%2F1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["kind"], "proximity");
    assert_eq!(results(&json), vec!["doc0.txt"]);

    let (_, json) = get(app, "/search?q=data%20mining%20%2F3").await;
    assert_eq!(results(&json), vec!["doc0.txt", "doc2.txt"]);
}

#[tokio::test]
async fn empty_result_is_not_an_error() {
    let dir = tempdir().unwrap();
    let app = boolret_server::build_app(build_tiny_corpus(dir.path()), None).unwrap();
    let (status, json) = get(app, "/search?q=zebra").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 0);
}

#[tokio::test]
async fn malformed_queries_are_bad_requests() {
    let dir = tempdir().unwrap();
    let app = boolret_server::build_app(build_tiny_corpus(dir.path()), None).unwrap();

    let (status, json) = get(app.clone(), "/search?q=data%20%2Fx").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("proximity"));

    let (status, _) = get(app, "/search?q=rust%20or").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_skip_unreadable_documents() {
    let dir = tempdir().unwrap();
    let app = boolret_server::build_app(build_tiny_corpus(dir.path()), None).unwrap();
    let (status, json) = get(app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["num_docs"], 3);
}

#[tokio::test]
async fn rebuild_requires_admin_token() {
    let dir = tempdir().unwrap();
    let app = boolret_server::build_app(build_tiny_corpus(dir.path()), None).unwrap();
    let req = Request::post("/index/rebuild").header("X-ADMIN-TOKEN", "secret").body(Body::empty()).unwrap();
    let (status, _) = call(app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let app = boolret_server::build_app(build_tiny_corpus(dir.path()), Some("secret".into())).unwrap();
    let req = Request::post("/index/rebuild").header("X-ADMIN-TOKEN", "wrong").body(Body::empty()).unwrap();
    let (status, _) = call(app.clone(), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let req = Request::post("/index/rebuild").body(Body::empty()).unwrap();
    let (status, _) = call(app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rebuild_picks_up_new_documents() {
    let dir = tempdir().unwrap();
    let corpus = build_tiny_corpus(dir.path());
    let app = boolret_server::build_app(corpus, Some("secret".into())).unwrap();

    fs::write(dir.path().join("docs").join("doc3.txt"), "zebra crossing").unwrap();
    let req = Request::post("/index/rebuild").header("X-ADMIN-TOKEN", "secret").body(Body::empty()).unwrap();
    let (status, json) = call(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["num_docs"], 4);

    let (_, json) = get(app, "/search?q=zebra").await;
    assert_eq!(results(&json), vec!["doc3.txt"]);
}
