use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use hireflow::config::Config;
use hireflow::notify::ChannelNotifier;
use hireflow::state::SharedState;
use hireflow::store::MemoryStore;

/// A running test server instance backed by a fresh in-memory store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    #[allow(dead_code)]
    pub state: SharedState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Create a workflow, return the workflow JSON.
    pub async fn create_workflow(&self, body: &Value) -> Value {
        let (workflow, status) = self.post("/api/v1/workflows", body).await;
        assert_eq!(status, StatusCode::OK, "create workflow failed: {workflow}");
        workflow
    }

    /// Create a candidate, return the candidate JSON.
    pub async fn create_candidate(&self, name: &str, email: &str, skills: &[&str]) -> Value {
        let (candidate, status) = self
            .post(
                "/api/v1/candidates",
                &json!({ "name": name, "email": email, "skills": skills }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create candidate failed: {candidate}");
        candidate
    }
}

/// A workflow body listening for `event` that tags the target.
#[allow(dead_code)]
pub fn tagging_workflow(name: &str, event: &str, tag: &str) -> Value {
    json!({
        "name": name,
        "trigger": { "event": event, "conditions": [] },
        "actions": [
            { "type": "add_tag", "config": { "tag": tag }, "order": 1 }
        ]
    })
}

pub fn test_config() -> Config {
    Config {
        database_url: None,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
        notify_timeout_secs: 1,
        slack_webhook_url: None,
        smtp: None,
    }
}

/// Spawn a test app with an empty in-memory store and log-only notifications.
pub async fn spawn_app() -> TestApp {
    let state = hireflow::build_state(
        test_config(),
        Arc::new(MemoryStore::new()),
        Arc::new(ChannelNotifier::log_only()),
        None,
    );
    let app = hireflow::build_app(state.clone());

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        state,
    }
}
