#![allow(dead_code)]

//! Test helpers: build AppState and router for integration tests.
//!
//! Each test app gets its own in-memory SQLite database and temporary upload folder.

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use hibiki_api::setup::routes;
use hibiki_api::AppState;
use hibiki_core::{Config, Notice};
use hibiki_storage::{LocalStorage, Storage};
use sqlx::sqlite::SqlitePoolOptions;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_SECRET_KEY: &str = "test-secret-key-for-flash-cookies";

/// Test application: server, state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Names of the files currently in the upload folder.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir())
            .expect("Failed to read upload dir")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Verify the flash cookie set by `response` and return its notices.
    pub fn notices(&self, response: &TestResponse) -> Vec<Notice> {
        let cookie = flash_cookie(response).expect("Response set no flash cookie");
        let value = cookie
            .strip_prefix("hibiki_flash=")
            .expect("Unexpected cookie name");
        self.state
            .flash
            .decode(value)
            .expect("Flash cookie failed verification")
    }

    /// Upload `data` as the form's `file` field named `filename`.
    pub async fn upload(&self, filename: &str, data: &[u8]) -> TestResponse {
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(data.to_vec())
                .file_name(filename.to_string())
                .mime_type("audio/mpeg"),
        );
        self.server.post("/upload").multipart(form).await
    }

    pub async fn shorten(&self, url: &str) -> TestResponse {
        self.server.post("/shorten").form(&[("url", url)]).await
    }
}

/// Setup test app with default test configuration.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app, letting the caller adjust the configuration first.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

    let mut config = Config {
        database_url: "sqlite::memory:".to_string(),
        secret_key: TEST_SECRET_KEY.to_string(),
        upload_folder: temp_dir.path().to_path_buf(),
        ..Config::default()
    };
    configure(&mut config);

    // One connection: every connection to sqlite::memory: is a separate database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to test database");

    hibiki_db::ensure_schema(&pool)
        .await
        .expect("Failed to create schema");

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(temp_dir.path())
            .await
            .expect("Failed to create local storage"),
    );

    let state = Arc::new(AppState::new(config.clone(), pool, storage));
    let router = routes::setup_routes(&config, state.clone());
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}

/// `hibiki_flash=<value>` from the response's `Set-Cookie`, if present.
pub fn flash_cookie(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find(|c| c.starts_with("hibiki_flash="))
        .and_then(|c| c.split(';').next())
        .map(|c| c.to_string())
}

/// Assert `response` is the post-action redirect back to the list page.
pub fn assert_redirects_home(response: &TestResponse) {
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");
}
