//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use student_dashboard::internal::config::{GatewayConfig, ServiceEndpoints};
use student_dashboard::internal::dashboard::Dashboard;
use student_dashboard::internal::gateway::HttpGateway;
use student_dashboard::internal::ui::{FixedAnswer, NotificationBoard};

/// Gateway with a short default timeout so slow-server tests stay fast
pub fn gateway(timeout_ms: u64) -> HttpGateway {
    HttpGateway::new(&GatewayConfig {
        timeout_ms,
        ..Default::default()
    })
    .expect("gateway should build")
}

/// Dashboard wired to one mock server for both services
pub fn dashboard(base_url: &str, confirm: bool) -> (Dashboard, Arc<NotificationBoard>) {
    let board = Arc::new(NotificationBoard::new());
    let dashboard = Dashboard::new(
        Arc::new(gateway(2_000)),
        ServiceEndpoints::new(base_url, base_url).expect("mock server URL is valid"),
        board.clone(),
        Arc::new(FixedAnswer(confirm)),
        Duration::from_secs(30),
    )
    .expect("built-in form schemas are valid");
    (dashboard, board)
}

/// A student as the service stores it (numbers as strings)
pub fn stored_student(id: &str, name: &str, college_id: u64) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "1 Main St",
        "age": "20",
        "collegeId": college_id.to_string()
    })
}

/// A URL nothing listens on
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
