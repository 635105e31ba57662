use axum_test::TestServer;
use serde_json::{json, Value};

use vidrec_api::api::{create_router, AppState};
use vidrec_api::config::Config;

fn create_test_server() -> TestServer {
    let state = AppState::new(Config::default());
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn video(id: &str, channel: &str, category: &str, tags: &[&str], views: u64) -> Value {
    json!({
        "id": id,
        "title": format!("Video {id}"),
        "channelId": format!("UC-{channel}"),
        "channelTitle": channel,
        "categoryId": category,
        "tags": tags,
        "duration": "PT5M30S",
        "viewCount": views,
    })
}

async fn ingest(server: &TestServer, videos: Vec<Value>) {
    let response = server.post("/videos").json(&json!(videos)).await;
    response.assert_status(axum::http::StatusCode::CREATED);
}

async fn watch(server: &TestServer, user: &str, video: &str, ts: &str, pct: f64) {
    let response = server
        .post("/history")
        .json(&json!({
            "userId": user,
            "videoId": video,
            "timestamp": ts,
            "watchedPercentage": pct,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_ingest_and_get_catalog() {
    let server = create_test_server();
    ingest(
        &server,
        vec![
            video("a", "Tech Reviews", "28", &["rust"], 1000),
            video("b", "Tech Reviews", "28", &["rust"], 500),
        ],
    )
    .await;

    let response = server.get("/videos").await;
    response.assert_status_ok();
    let videos: Vec<Value> = response.json();
    assert_eq!(videos.len(), 2);

    let response = server.get("/videos/a").await;
    response.assert_status_ok();
    let v: Value = response.json();
    assert_eq!(v["channelTitle"], "Tech Reviews");
    assert_eq!(v["viewCount"], 1000);
}

#[tokio::test]
async fn test_unknown_video_is_404() {
    let server = create_test_server();
    let response = server.get("/videos/nope").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_record_does_not_abort_batch() {
    let server = create_test_server();
    let response = server
        .post("/videos")
        .json(&json!([
            video("a", "Tech Reviews", "28", &[], 100),
            {"title": "no id at all"},
            {"id": "sparse"},
        ]))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let result: Value = response.json();
    assert_eq!(result["added"], 2);
    assert_eq!(result["skipped"], 1);
    assert_eq!(result["total"], 2);

    // The sparse record defaulted its missing fields.
    let response = server.get("/videos/sparse").await;
    response.assert_status_ok();
    let v: Value = response.json();
    assert_eq!(v["title"], "");
    assert_eq!(v["viewCount"], 0);
}

#[tokio::test]
async fn test_reingest_overwrites_record() {
    let server = create_test_server();
    ingest(&server, vec![video("a", "Tech Reviews", "28", &[], 100)]).await;
    ingest(&server, vec![video("a", "Tech Reviews", "28", &[], 9000)]).await;

    let response = server.get("/videos/a").await;
    let v: Value = response.json();
    assert_eq!(v["viewCount"], 9000);

    let catalog: Vec<Value> = server.get("/videos").await.json();
    assert_eq!(catalog.len(), 1);
}

#[tokio::test]
async fn test_watch_history_flow() {
    let server = create_test_server();
    ingest(
        &server,
        vec![
            video("a", "Tech Reviews", "28", &[], 100),
            video("b", "Tech Reviews", "28", &[], 100),
        ],
    )
    .await;

    watch(&server, "u1", "a", "2026-08-01T10:00:00Z", 40.0).await;
    watch(&server, "u1", "b", "2026-08-02T10:00:00Z", 80.0).await;

    let history: Vec<Value> = server.get("/history/u1").await.json();
    assert_eq!(history.len(), 2);
    // Newest first, each joined with its completion percentage.
    assert_eq!(history[0]["id"], "b");
    assert_eq!(history[0]["watchedPercentage"], 80.0);
    assert_eq!(history[1]["id"], "a");
}

#[tokio::test]
async fn test_rewatch_replaces_history_entry() {
    let server = create_test_server();
    ingest(&server, vec![video("a", "Tech Reviews", "28", &[], 100)]).await;

    watch(&server, "u1", "a", "2026-08-01T10:00:00Z", 50.0).await;
    watch(&server, "u1", "a", "2026-08-02T10:00:00Z", 90.0).await;

    let history: Vec<Value> = server.get("/history/u1").await.json();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["watchedPercentage"], 90.0);
}

#[tokio::test]
async fn test_watch_of_unknown_video_is_dropped_silently() {
    let server = create_test_server();
    watch(&server, "u1", "ghost", "2026-08-01T10:00:00Z", 50.0).await;

    let history: Vec<Value> = server.get("/history/u1").await.json();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_watch_requires_ids() {
    let server = create_test_server();
    let response = server
        .post("/history")
        .json(&json!({"userId": "", "videoId": "a"}))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clear_history_is_per_user() {
    let server = create_test_server();
    ingest(&server, vec![video("a", "Tech Reviews", "28", &[], 100)]).await;
    watch(&server, "u1", "a", "2026-08-01T10:00:00Z", 50.0).await;
    watch(&server, "u2", "a", "2026-08-01T10:00:00Z", 60.0).await;

    let response = server.delete("/history/u1").await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    let u1: Vec<Value> = server.get("/history/u1").await.json();
    let u2: Vec<Value> = server.get("/history/u2").await.json();
    assert!(u1.is_empty());
    assert_eq!(u2.len(), 1);
}

#[tokio::test]
async fn test_content_recommendations_exclude_source_and_rank_by_overlap() {
    let server = create_test_server();
    let mut a = video("a", "X", "1", &["rust"], 100);
    let mut b = video("b", "X", "1", &["rust"], 100);
    let mut c = video("c", "Y", "2", &["cooking"], 100);
    a["title"] = json!("Async Rust programming tutorial");
    b["title"] = json!("Rust programming deep dive");
    c["title"] = json!("Pasta carbonara recipe");
    ingest(&server, vec![a, b, c]).await;

    let recs: Vec<Value> = server.get("/recommendations/content/a").await.json();
    assert!(!recs.iter().any(|v| v["id"] == "a"));
    assert_eq!(recs[0]["id"], "b");
    assert!(recs[0]["score"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_content_recommendations_for_unknown_source_are_empty() {
    let server = create_test_server();
    let recs: Vec<Value> = server.get("/recommendations/content/nope").await.json();
    assert!(recs.is_empty());
}

#[tokio::test]
async fn test_collaborative_recommendation_scenario() {
    let server = create_test_server();
    ingest(
        &server,
        vec![
            video("a", "X", "1", &[], 100),
            video("b", "X", "1", &[], 100),
            video("c", "Y", "2", &[], 100),
        ],
    )
    .await;

    // user1 watched {a, b}; user2 watched {a, b, c}: the only candidate
    // for user1 is c.
    watch(&server, "user1", "a", "2026-08-01T10:00:00Z", 100.0).await;
    watch(&server, "user1", "b", "2026-08-01T11:00:00Z", 100.0).await;
    watch(&server, "user2", "a", "2026-08-01T10:00:00Z", 100.0).await;
    watch(&server, "user2", "b", "2026-08-01T11:00:00Z", 100.0).await;
    watch(&server, "user2", "c", "2026-08-01T12:00:00Z", 100.0).await;

    let recs: Vec<Value> = server
        .get("/recommendations/collaborative/user1")
        .await
        .json();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["id"], "c");
}

#[tokio::test]
async fn test_hybrid_has_no_duplicates_and_respects_limit() {
    let server = create_test_server();
    ingest(
        &server,
        vec![
            video("a", "X", "1", &["rust"], 100),
            video("b", "X", "1", &["rust"], 200),
            video("c", "X", "1", &["rust"], 300),
            video("d", "Y", "2", &[], 400),
        ],
    )
    .await;
    watch(&server, "u1", "a", "2026-08-01T10:00:00Z", 100.0).await;
    watch(&server, "u2", "a", "2026-08-01T10:00:00Z", 100.0).await;
    watch(&server, "u2", "b", "2026-08-01T11:00:00Z", 100.0).await;
    watch(&server, "u2", "c", "2026-08-01T12:00:00Z", 100.0).await;

    let recs: Vec<Value> = server
        .get("/recommendations/hybrid?userId=u1&videoId=a&limit=3")
        .await
        .json();
    assert!(recs.len() <= 3);
    let mut ids: Vec<&str> = recs.iter().map(|v| v["id"].as_str().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), recs.len());
}

#[tokio::test]
async fn test_hybrid_falls_back_to_trending_without_signal() {
    let server = create_test_server();
    ingest(
        &server,
        vec![
            video("a", "X", "1", &[], 100),
            video("b", "X", "1", &[], 10_000),
        ],
    )
    .await;

    // Unknown user, no source video: popularity order.
    let recs: Vec<Value> = server
        .get("/recommendations/hybrid?userId=nobody")
        .await
        .json();
    assert_eq!(recs[0]["id"], "b");
    assert_eq!(recs[1]["id"], "a");
}

#[tokio::test]
async fn test_trending_filters_and_ranks() {
    let server = create_test_server();
    ingest(
        &server,
        vec![
            video("a", "X", "1", &[], 100),
            video("b", "X", "2", &[], 10_000),
            video("c", "X", "1", &[], 1_000),
        ],
    )
    .await;

    let recs: Vec<Value> = server.get("/trending?categoryId=1").await.json();
    let ids: Vec<&str> = recs.iter().map(|v| v["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["c", "a"]);
    for v in &recs {
        let score = v["score"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&score));
    }
}

#[tokio::test]
async fn test_trending_on_empty_catalog_is_empty() {
    let server = create_test_server();
    let recs: Vec<Value> = server.get("/trending").await.json();
    assert!(recs.is_empty());
}
