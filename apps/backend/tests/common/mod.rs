//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext with a temporary card directory
//! - A local stand-in for the remote spell catalog
//! - Helpers for loading decks through the API

#![allow(dead_code)]

pub mod fixtures;

use std::path::Path;
use std::time::Duration;

use axum::{
    extract::Path as UrlPath,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_test::TestServer;
use serde_json::Value;
use tempfile::TempDir;

use cardsheet_backend::config::Config;
use cardsheet_backend::{router, AppState};

/// Test context holding the application state and its card directory.
pub struct TestContext {
    pub state: AppState,
    pub card_dir: TempDir,
}

impl TestContext {
    /// Create a context whose catalog URL points nowhere.
    pub async fn new() -> Self {
        Self::with_catalog("http://127.0.0.1:9".to_string())
    }

    /// Create a context backed by a local fake catalog.
    pub async fn with_fake_catalog() -> Self {
        let url = spawn_fake_catalog().await;
        Self::with_catalog(url)
    }

    fn with_catalog(catalog_url: String) -> Self {
        let card_dir = tempfile::tempdir().expect("Failed to create card directory");
        let config = Config {
            card_dir: card_dir.path().to_path_buf(),
            catalog_url,
            apply_debounce: Duration::from_millis(100),
            ..Config::default()
        };
        let state = AppState::new(&config).expect("Failed to build app state");
        Self { state, card_dir }
    }

    /// Get the app router.
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    /// Write a class card file into the card directory.
    pub fn write_cards(&self, file: &str, text: &str) {
        write_file(self.card_dir.path(), file, text);
    }
}

fn write_file(dir: &Path, file: &str, text: &str) {
    std::fs::write(dir.join(file), text).expect("Failed to write card file");
}

/// Load a deck through the free-text apply endpoint and return the response body.
pub async fn load_text(server: &TestServer, text: &str) -> Value {
    let response = server.put("/api/deck/text").text(text).await;
    response.assert_status_ok();
    response.json()
}

/// Ids of the visible cards, in display order.
pub async fn visible_ids(server: &TestServer) -> Vec<String> {
    let body: Value = server.get("/api/cards/visible").await.json();
    body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

/// Visible card names, in display order.
pub async fn visible_names(server: &TestServer) -> Vec<String> {
    let body: Value = server.get("/api/cards/visible").await.json();
    body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["record"]["name"].as_str().unwrap().to_string())
        .collect()
}

async fn spell_listing() -> Json<Value> {
    Json(fixtures::spell_listing())
}

async fn spell_detail(UrlPath(index): UrlPath<String>) -> Result<Json<Value>, StatusCode> {
    fixtures::spell_detail(&index)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Serve the fixture catalog on an ephemeral port and return its base URL.
async fn spawn_fake_catalog() -> String {
    let app = Router::new()
        .route("/api/2014/spells", get(spell_listing))
        .route("/api/2014/spells/{index}", get(spell_detail));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake catalog");
    let addr = listener.local_addr().expect("Fake catalog has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{}", addr)
}
