//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use lyrics_core::{CreateUser, UserRepository};
use lyrics_server::{config::PaginationSettings, create_router, AppState, AuthService};
use lyrics_storage::Database;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Test user credentials
pub mod fixtures {
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
}

/// Full router over a temporary SQLite file
pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_catalog(|catalog| catalog).await
    }

    /// Build the app after adjusting the catalog (e.g. vote scoring)
    pub async fn with_catalog(configure: impl FnOnce(Database) -> Database) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = lyrics_storage::create_pool(&db_url).await.unwrap();
        lyrics_storage::run_migrations(&pool).await.unwrap();
        let db = Arc::new(configure(Database::new(pool)));

        let auth_service = Arc::new(AuthService::new(
            "test-secret-key".to_string(),
            1, // 1 hour access
            1, // 1 day refresh
        ));

        let app_state = AppState::new(
            Arc::clone(&db),
            Arc::clone(&auth_service),
            PaginationSettings::default(),
        );

        Self {
            router: create_router(app_state),
            db,
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Create the fixture user and return an access token for it
    pub async fn login_token(&self) -> String {
        let password_hash = self
            .auth_service
            .hash_password(fixtures::TEST_PASSWORD)
            .unwrap();
        let user = self
            .db
            .create_user(CreateUser {
                username: fixtures::TEST_USERNAME.to_string(),
                password_hash,
            })
            .await
            .unwrap();
        self.auth_service.create_access_token(user.id).unwrap()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None, None).await
    }
}

/// Create an artist and album through the API, returning `(artist_id, album_id)`
pub async fn seed_album(app: &TestApp) -> (i64, i64) {
    let (status, album) = app
        .post(
            "/albums",
            serde_json::json!({
                "name": "1989",
                "year": 2014,
                "artist": {"name": "Taylor Swift", "first_year_active": 2004}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{album}");
    (
        album["artist"]["id"].as_i64().unwrap(),
        album["id"].as_i64().unwrap(),
    )
}

/// Create a lyric with an inline song in `album_id`, returning its body
pub async fn seed_lyric(app: &TestApp, album_id: i64, song: &str, text: &str) -> Value {
    let (status, lyric) = app
        .post(
            "/lyrics",
            serde_json::json!({"text": text, "song": {"name": song, "album": album_id}}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{lyric}");
    lyric
}
