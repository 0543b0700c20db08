use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tower::ServiceExt;

use shanyrak_core::{AuthConfig, Credentials};
use shanyrak_db::Database;
use shanyrak_server::routes;
use shanyrak_server::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub router: Router,
    _container: ContainerAsync<GenericImage>,
}

/// Spin up a PostgreSQL container and return the test app router + container handle.
pub async fn setup_test_app() -> TestApp {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "shanyrak_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let url = format!("postgresql://postgres:postgres@{host}:{port}/shanyrak_test");
    let db = Database::from_pool(retry_connect(&url).await);
    db.migrate().await.expect("Failed to run migrations");

    let credentials = Credentials::new(&AuthConfig::new(TEST_SECRET).with_hash_cost(4));
    let state = Arc::new(AppState::new(db, credentials));

    TestApp {
        router: routes::router(state),
        _container: container,
    }
}

async fn retry_connect(url: &str) -> PgPool {
    for _ in 0..30 {
        if let Ok(pool) = PgPoolOptions::new().max_connections(5).connect(url).await {
            return pool;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    panic!("Failed to connect to test database");
}

impl TestApp {
    /// Send a request and decode the JSON body (`Null` when empty or not JSON).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    pub async fn register(&self, username: &str, password: &str) -> String {
        let (status, json) = self
            .send(json_request(
                "POST",
                "/auth/users/",
                None,
                &serde_json::json!({
                    "username": username,
                    "phone": "+7 701 123 4567",
                    "password": password,
                }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {json}");
        json["id"].as_str().unwrap().to_string()
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, json) = self.send(login_request(username, password)).await;
        assert_eq!(status, StatusCode::OK, "login failed: {json}");
        json["access_token"].as_str().unwrap().to_string()
    }

    /// Register and log in, returning the access token.
    pub async fn signup(&self, username: &str) -> String {
        self.register(username, "correct horse").await;
        self.login(username, "correct horse").await
    }

    pub async fn create_shanyrak(&self, token: &str, body: &serde_json::Value) -> String {
        let (status, json) = self
            .send(json_request("POST", "/shanyraks/", Some(token), body))
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {json}");
        json["id"].as_str().unwrap().to_string()
    }
}

pub fn sample_shanyrak() -> serde_json::Value {
    serde_json::json!({
        "type": "house",
        "price": 100000,
        "address": "x",
        "area": 50.0,
        "rooms_count": 3,
    })
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::post("/auth/users/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={username}&password={}",
            password.replace(' ', "+")
        )))
        .unwrap()
}
