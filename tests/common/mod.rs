#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use game_vault_api::auth::{hash_password, Claims, JwtKeys};
use game_vault_api::database::{MemoryStore, User};
use game_vault_api::{app, AppConfig, AppState};

pub const TEST_SECRET: &str = "test-secret";

pub struct TestServer {
    pub base_url: String,
    pub store: MemoryStore,
    pub client: reqwest::Client,
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Log in through the API and return the issued token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/api/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response missing token")
    }

    pub async fn admin_token(&self) -> Result<String> {
        self.login("alice", "correct").await
    }

    pub async fn player_token(&self) -> Result<String> {
        self.login("bob", "hunter2").await
    }

    /// Create a game as admin and return the response body.
    pub async fn create_game(&self, title: &str, genre: &str) -> Result<Value> {
        let token = self.admin_token().await?;
        let res = self
            .client
            .post(self.url("/api/games"))
            .header("authorization", token)
            .json(&json!({ "title": title, "genre": genre }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "create failed: {}", res.status());
        Ok(res.json::<Value>().await?)
    }
}

/// Sign a token with the server's secret without going through login.
pub fn forge_token(username: &str, role: &str) -> Result<String> {
    Ok(JwtKeys::new(TEST_SECRET.as_bytes()).sign(&Claims::new(username, role))?)
}

/// Start the real router on an ephemeral port, backed by an in-memory store
/// seeded with `alice` (admin, password `correct`) and `bob` (player, password `hunter2`).
pub async fn spawn_server() -> Result<TestServer> {
    let config = AppConfig::from_vars(|key| match key {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        _ => None,
    });

    let store = MemoryStore::new();
    for (username, password, role) in [("alice", "correct", "admin"), ("bob", "hunter2", "player")] {
        store
            .insert_user(User {
                username: username.to_string(),
                password: hash_password(password)
                    .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?,
                role: role.to_string(),
            })
            .await;
    }

    let router = app(AppState::new(&config, Arc::new(store.clone())), &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer {
        base_url: format!("http://{}", addr),
        store,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
