//! HTTP层集成测试
//!
//! 在随机端口上启动真实的服务，补全服务使用按脚本回放的测试替身

use agent_splitter::config::Config;
use agent_splitter::generator::context::GeneratorContext;
use agent_splitter::server::{AppState, create_router};
use agent_splitter::testing::ScriptedCompletionService;
use serde_json::{Value, json};
use std::sync::Arc;

/// 启动测试服务，返回基地址
async fn start_test_server(service: Arc<ScriptedCompletionService>) -> String {
    let context = GeneratorContext::with_service(Config::default(), service);
    let router = create_router(Arc::new(AppState::new(context)), &[]);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// GET请求，返回(状态码, 响应体)
async fn get(base: &str, path: &str) -> (u16, String) {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{}{}", base, path))
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap();
    (status, body)
}

/// POST JSON请求，返回(状态码, 响应体)
async fn post_json(base: &str, path: &str, json: &str) -> (u16, String) {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}{}", base, path))
        .header("content-type", "application/json")
        .body(json.to_string())
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap();
    (status, body)
}

fn agent_spec_body() -> String {
    json!({
        "agent_name": "travel-agent",
        "agent_description": "Plans trips, books flights and hotels, and sends itineraries",
        "input_schema": {"destination": "string", "dates": "string"},
        "output_schema": {"itinerary": "string"}
    })
    .to_string()
}

fn scripted_success() -> ScriptedCompletionService {
    ScriptedCompletionService::new()
        .respond(json!({"responsibilities": ["plan", "book", "notify"]}).to_string())
        .respond(
            json!({
                "microagents": [
                    {
                        "name": "plan-trip-agent",
                        "description": "Plans the trip",
                        "input_schema": {"destination": "string"},
                        "output_schema": {"plan": "object"},
                        "dependencies": []
                    },
                    {
                        "name": "book-flight-agent",
                        "description": "Books flights",
                        "input_schema": {"plan": "object"},
                        "output_schema": {"booking": "object"},
                        "dependencies": ["plan-trip-agent"]
                    }
                ]
            })
            .to_string(),
        )
        .respond(
            json!({
                "name": "orchestrate-travel-agent",
                "description": "Plans and then books",
                "flow": [
                    {"step": 1, "agent": "plan-trip-agent"},
                    {"step": 2, "agent": "book-flight-agent", "condition": "plan approved"}
                ]
            })
            .to_string(),
        )
}

// ============================================================================
// Health endpoint
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let service = Arc::new(ScriptedCompletionService::new());
    let base = start_test_server(service.clone()).await;

    for path in ["/health", "/api/v1/health"] {
        let (status, body) = get(&base, path).await;
        assert_eq!(status, 200);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, json!({"status": "healthy"}));
    }

    assert_eq!(service.call_count(), 0);
}

// ============================================================================
// Execute endpoint
// ============================================================================

#[tokio::test]
async fn test_execute_returns_decomposition() {
    let service = Arc::new(scripted_success().respond("graph TD\n  A --> B"));
    let base = start_test_server(service.clone()).await;

    let (status, body) = post_json(&base, "/api/v1/execute", &agent_spec_body()).await;

    assert_eq!(status, 200);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["microagents"].as_array().unwrap().len(), 2);
    assert_eq!(body["microagents"][1]["dependencies"][0], "plan-trip-agent");
    assert_eq!(body["orchestrator"]["name"], "orchestrate-travel-agent");
    assert_eq!(body["orchestrator"]["flow"][1]["condition"], "plan approved");
    assert_eq!(body["architecture_diagram"], "graph TD\n  A --> B");
    assert_eq!(service.call_count(), 4);
}

#[tokio::test]
async fn test_execute_diagram_failure_returns_null_diagram() {
    let service = Arc::new(scripted_success().fail("diagram service unavailable"));
    let base = start_test_server(service).await;

    let (status, body) = post_json(&base, "/api/v1/execute", &agent_spec_body()).await;

    assert_eq!(status, 200);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body.get("architecture_diagram").is_some());
    assert!(body["architecture_diagram"].is_null());
    assert_eq!(body["orchestrator"]["flow"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_execute_analysis_failure_returns_500() {
    let service = Arc::new(ScriptedCompletionService::new().fail("invalid api key"));
    let base = start_test_server(service.clone()).await;

    let (status, body) = post_json(&base, "/api/v1/execute", &agent_spec_body()).await;

    assert_eq!(status, 500);
    let body: Value = serde_json::from_str(&body).unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("complexity analysis failed"));
    assert!(detail.contains("invalid api key"));
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn test_execute_malformed_orchestrator_returns_500() {
    let service = Arc::new(
        ScriptedCompletionService::new()
            .respond("{}")
            .respond("{\"microagents\": []}")
            .respond("this is not json"),
    );
    let base = start_test_server(service.clone()).await;

    let (status, body) = post_json(&base, "/api/v1/execute", &agent_spec_body()).await;

    assert_eq!(status, 500);
    assert!(body.contains("orchestrator generation"));
    assert_eq!(service.call_count(), 3);
}

#[tokio::test]
async fn test_execute_rejects_invalid_body() {
    let service = Arc::new(ScriptedCompletionService::new());
    let base = start_test_server(service.clone()).await;

    let (status, _) = post_json(
        &base,
        "/api/v1/execute",
        r#"{"agent_name": "travel-agent", "input_schema": "nope"}"#,
    )
    .await;

    assert!((400..500).contains(&status));
    assert_eq!(service.call_count(), 0);
}
