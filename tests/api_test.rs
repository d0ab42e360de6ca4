// Tests for the HTTP API

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use voxflow::api::{build_router, ApiServer, Latency};
use voxflow::client::ApiClient;
use voxflow::core::{AppState, ConsoleService};
use voxflow::agent::flow;
use voxflow::store::models::{AgentPatch, StepKind};
use voxflow::store::Store;

fn test_app() -> Router {
    let service = ConsoleService::with_defaults(Store::seeded());
    build_router(AppState::new(service, Latency::none()))
}

async fn json_request(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = match body {
        Some(json) => Body::from(serde_json::to_string(&json).unwrap()),
        None => Body::empty(),
    };

    let req = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body_bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));
    (status, json)
}

async fn first_campaign_id(app: &Router) -> String {
    let (_, campaigns) = json_request(app, Method::GET, "/api/campaigns", None).await;
    campaigns[0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_stats() {
    let app = test_app();
    let (status, json) = json_request(&app, Method::GET, "/api/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "agents": 2, "campaigns": 1, "logs": 2 }));
}

#[tokio::test]
async fn test_agent_crud() {
    let app = test_app();

    let (status, created) = json_request(
        &app,
        Method::POST,
        "/api/agents",
        Some(json!({ "name": "Appointment Setter", "language": "German" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Appointment Setter");
    assert_eq!(created["language"], "German");
    assert_eq!(created["description"], "");
    assert_eq!(created["flowSteps"], json!([]));
    let id = created["id"].as_str().unwrap();

    let (status, fetched) =
        json_request(&app, Method::GET, &format!("/api/agents/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = json_request(
        &app,
        Method::PUT,
        &format!("/api/agents/{}", id),
        Some(json!({
            "id": "ignored",
            "flowSteps": [
                { "id": "s1", "type": "prompt", "content": "Hi there", "order": 0 },
                { "id": "s2", "type": "intent", "content": "Book a slot", "order": 1 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Appointment Setter");
    assert_eq!(updated["flowSteps"][1]["type"], "intent");

    let (_, agents) = json_request(&app, Method::GET, "/api/agents", None).await;
    assert_eq!(agents.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_missing_agent_is_404() {
    let app = test_app();

    let (status, _) = json_request(&app, Method::GET, "/api/agents/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = json_request(
        &app,
        Method::PUT,
        "/api/agents/missing",
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "agent not found: missing");
}

#[tokio::test]
async fn test_create_agent_with_empty_name_uses_defaults() {
    let app = test_app();

    let (status, created) = json_request(
        &app,
        Method::POST,
        "/api/agents",
        Some(json!({ "name": "", "language": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Untitled Agent");
    assert_eq!(created["language"], "English");
}

#[tokio::test]
async fn test_steps_without_ids_are_accepted() {
    let app = test_app();

    let (status, created) = json_request(
        &app,
        Method::POST,
        "/api/agents",
        Some(json!({
            "name": "Intake",
            "flowSteps": [
                { "type": "prompt", "content": "hi", "order": 0 },
                { "type": "intent", "content": "Wants a callback" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let steps = created["flowSteps"].as_array().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["content"], "hi");
    assert_eq!(steps[1]["content"], "Wants a callback");
    assert_eq!(steps[1]["order"], 1);
    assert!(!steps[0]["id"].as_str().unwrap().is_empty());
    assert_ne!(steps[0]["id"], steps[1]["id"]);

    let id = created["id"].as_str().unwrap();
    let (status, updated) = json_request(
        &app,
        Method::PUT,
        &format!("/api/agents/{}", id),
        Some(json!({ "flowSteps": [{ "type": "prompt", "content": "hello" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["flowSteps"][0]["order"], 0);
    assert!(updated["flowSteps"][0]["id"].is_string());
}

#[tokio::test]
async fn test_campaign_run_flow() {
    let app = test_app();
    let campaign_id = first_campaign_id(&app).await;

    let (status, run) = json_request(
        &app,
        Method::POST,
        &format!("/api/campaigns/{}/start", campaign_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(run["status"], "running");
    assert_eq!(run["transcript"], json!([]));
    assert!(run.get("completedAt").is_none());
    let run_id = run["id"].as_str().unwrap().to_string();

    let status_path = format!("/api/campaigns/{}/status", run_id);
    let (status, run) = json_request(&app, Method::GET, &status_path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["transcript"].as_array().unwrap().len(), 2);
    assert_eq!(run["transcript"][0]["role"], "bot");

    let (_, campaigns) = json_request(&app, Method::GET, "/api/campaigns", None).await;
    assert_eq!(campaigns[0]["status"], "running");

    let (status, run) = json_request(
        &app,
        Method::POST,
        &format!("/api/campaigns/{}/pause", run_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["status"], "paused");

    let (status, run) = json_request(
        &app,
        Method::POST,
        &format!("/api/campaigns/{}/stop", run_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["status"], "completed");
    assert!(run["completedAt"].is_string());

    let (_, campaigns) = json_request(&app, Method::GET, "/api/campaigns", None).await;
    assert_eq!(campaigns[0]["status"], "completed");

    let (_, logs) = json_request(&app, Method::GET, "/api/logs", None).await;
    assert_eq!(logs[0]["type"], "campaign");
    assert_eq!(logs[0]["title"], "Campaign Started");
}

#[tokio::test]
async fn test_unknown_run_operations_are_404() {
    let app = test_app();

    let (status, _) = json_request(&app, Method::POST, "/api/campaigns/missing/start", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = json_request(&app, Method::GET, "/api/campaigns/missing/status", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = json_request(&app, Method::POST, "/api/campaigns/missing/pause", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = json_request(&app, Method::POST, "/api/campaigns/missing/stop", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = test_app();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/agents")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error());

    let (_, stats) = json_request(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(stats["agents"], 2);
}

async fn spawn_server() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let service = ConsoleService::with_defaults(Store::seeded());
    let server = ApiServer::new(
        addr.to_string(),
        AppState::new(service, Latency::none()),
        Duration::from_millis(50),
    );
    tokio::spawn(async move { server.serve(listener).await });

    ApiClient::new(format!("http://{}", addr), Duration::from_secs(5))
}

#[tokio::test]
async fn test_served_seed_state_has_only_seed_logs() {
    let client = spawn_server().await;

    let stats = client.stats().await.unwrap();
    assert_eq!((stats.agents, stats.campaigns, stats.logs), (2, 1, 2));

    let logs = client.list_logs().await.unwrap();
    assert_eq!(logs[0].title, "Agent Created");
}

#[tokio::test]
async fn test_client_edits_agent_and_step() {
    let client = spawn_server().await;
    let agent = client.list_agents().await.unwrap().remove(0);

    let fields = AgentPatch {
        name: Some("Support Desk".to_string()),
        description: Some("Handles inbound calls".to_string()),
        ..AgentPatch::default()
    };
    let updated = client.update_agent(&agent.id, &fields).await.unwrap().unwrap();
    assert_eq!(updated.name, "Support Desk");
    assert_eq!(updated.language, agent.language);
    assert_eq!(updated.flow_steps, agent.flow_steps);

    let mut steps = updated.flow_steps.clone();
    let step_id = steps[1].id.clone();
    assert!(flow::update_content(&mut steps, &step_id, "Detect refund requests"));
    let fields = AgentPatch {
        flow_steps: Some(steps),
        ..AgentPatch::default()
    };
    let saved = client.update_agent(&agent.id, &fields).await.unwrap().unwrap();
    assert_eq!(saved.flow_steps[1].id, step_id);
    assert_eq!(saved.flow_steps[1].content(), "Detect refund requests");
    assert_eq!(saved.flow_steps[1].kind(), StepKind::Intent);

    let missing = client.update_agent("missing", &AgentPatch::default()).await.unwrap();
    assert!(missing.is_none());
}
