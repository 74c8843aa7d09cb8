//! Dashboard API integration tests
//!
//! Spins up the real server on an ephemeral port and drives it over HTTP:
//! - Stats counters against the seed data, with the analytics fallback
//! - Task filtering and partial updates
//! - Agent registry updates feeding back into stats
//! - Memory creation ordering and id assignment
//! - CORS preflight handling

use mission_control::{analytics::AnalyticsConfig, ApiServer, ServerConfig};
use serde_json::{json, Value};
use std::time::Duration;

/// Start a server on an ephemeral port with analytics pointed at a dead
/// endpoint so the stats fallback is deterministic. Returns the base URL.
async fn spawn_server() -> String {
    let config = ServerConfig {
        addr: ([127, 0, 0, 1], 0).into(),
        public_dir: std::env::temp_dir(),
        analytics: AnalyticsConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_millis(500),
            ..AnalyticsConfig::default()
        },
    };

    let server = ApiServer::new(config).expect("failed to build server");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Err(e) = server.serve_on(listener).await {
            eprintln!("test server error: {}", e);
        }
    });

    format!("http://{}", addr)
}

async fn get_json(url: &str) -> Value {
    reqwest::get(url)
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid JSON")
}

#[tokio::test]
async fn test_stats_reflect_seed_data_with_fallback_trend() {
    let base = spawn_server().await;

    let stats = get_json(&format!("{}/api/stats", base)).await;
    assert_eq!(stats["activeTasks"], 4);
    assert_eq!(stats["completedThisWeek"], 4);
    assert_eq!(stats["teamMembers"], 5);
    assert_eq!(stats["onlineAgents"], 3);
    assert_eq!(stats["dauTrend"], -74);
    assert!(stats["dauData"].is_null());
}

#[tokio::test]
async fn test_task_filter_returns_ordered_subset() {
    let base = spawn_server().await;

    let all = get_json(&format!("{}/api/tasks", base)).await;
    assert_eq!(all.as_array().unwrap().len(), 8);

    for status in ["todo", "inprogress", "done"] {
        let filtered = get_json(&format!("{}/api/tasks?status={}", base, status)).await;
        let filtered = filtered.as_array().unwrap();
        let expected: Vec<&Value> = all
            .as_array()
            .unwrap()
            .iter()
            .filter(|t| t["status"] == status)
            .collect();
        assert_eq!(filtered.iter().collect::<Vec<_>>(), expected);
    }

    // Trailing slash is tolerated
    let with_slash = get_json(&format!("{}/api/tasks/", base)).await;
    assert_eq!(with_slash, all);
}

#[tokio::test]
async fn test_patch_task_updates_list_and_stats() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let updated: Value = client
        .patch(format!("{}/api/tasks/1", base))
        .json(&json!({"status": "done"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["status"], "done");
    assert_eq!(updated["title"], "Research competitor pricing");

    let tasks = get_json(&format!("{}/api/tasks", base)).await;
    assert_eq!(tasks[0]["status"], "done");

    let stats = get_json(&format!("{}/api/stats", base)).await;
    assert_eq!(stats["activeTasks"], 3);
    assert_eq!(stats["completedThisWeek"], 5);
}

#[tokio::test]
async fn test_patch_missing_task_is_not_found_and_harmless() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .patch(format!("{}/api/tasks/999", base))
        .json(&json!({"status": "done"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Task not found: 999");

    let stats = get_json(&format!("{}/api/stats", base)).await;
    assert_eq!(stats["activeTasks"], 4);
    assert_eq!(stats["completedThisWeek"], 4);
}

#[tokio::test]
async fn test_agents_roundtrip_feeds_stats() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let agents = get_json(&format!("{}/api/agents", base)).await;
    assert_eq!(agents.as_object().unwrap().len(), 5);
    assert_eq!(agents["coder"]["status"], "idle");
    assert_eq!(agents["sage"]["name"], "Sage (CEO)");

    let updated: Value = client
        .patch(format!("{}/api/agents/coder", base))
        .json(&json!({"status": "online"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["status"], "online");
    assert_eq!(updated["task"], "Waiting for task");

    let stats = get_json(&format!("{}/api/stats", base)).await;
    assert_eq!(stats["onlineAgents"], 4);

    let response = client
        .patch(format!("{}/api/agents/ghost", base))
        .json(&json!({"status": "online"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_create_memory_prepends_with_server_assigned_fields() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let before = get_json(&format!("{}/api/memories", base)).await;
    let previous_len = before.as_array().unwrap().len();
    assert_eq!(previous_len, 4);

    let created: Value = client
        .post(format!("{}/api/memories", base))
        .json(&json!({"title": "T", "content": "C"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["id"], previous_len as u64 + 1);
    assert_eq!(created["title"], "T");
    assert_eq!(created["content"], "C");
    assert_eq!(
        created["date"],
        chrono::Local::now().format("%b %-d, %Y").to_string()
    );

    let after = get_json(&format!("{}/api/memories", base)).await;
    assert_eq!(after.as_array().unwrap().len(), 5);
    assert_eq!(after[0], created);

    let fetched = get_json(&format!("{}/api/memories/5", base)).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_memory_lookup_not_found() {
    let base = spawn_server().await;

    let response = reqwest::get(format!("{}/api/memories/99", base))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Memory not found: 99");
}

#[tokio::test]
async fn test_pipeline_and_calendar_are_fixed() {
    let base = spawn_server().await;

    let pipeline = get_json(&format!("{}/api/pipeline", base)).await;
    for lane in ["ideas", "writing", "media", "published"] {
        assert!(pipeline[lane].is_array(), "missing lane {}", lane);
    }
    assert_eq!(pipeline["ideas"].as_array().unwrap().len(), 2);
    assert_eq!(pipeline["published"][0]["title"], "Mission Control Launch");

    let calendar = get_json(&format!("{}/api/calendar", base)).await;
    let calendar = calendar.as_array().unwrap();
    assert_eq!(calendar.len(), 5);
    assert_eq!(calendar[0]["day"], 17);
    assert_eq!(calendar[0]["type"], "user");
}

#[tokio::test]
async fn test_cors_preflight_succeeds_on_any_path() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    for path in ["/api/tasks/1", "/api/stats", "/anything"] {
        let response = client
            .request(reqwest::Method::OPTIONS, format!("{}{}", base, path))
            .header("Origin", "http://dashboard.example")
            .header("Access-Control-Request-Method", "PATCH")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success(), "preflight failed for {}", path);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
        let allowed = response
            .headers()
            .get("access-control-allow-methods")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(allowed.contains("PATCH"));
        assert_eq!(response.bytes().await.unwrap().len(), 0);
    }
}
