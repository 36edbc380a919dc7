#![allow(dead_code)]

use std::net::SocketAddr;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use calendar_backend::api::router;
use calendar_backend::config::AppConfig;
use calendar_backend::db;
use calendar_backend::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

pub async fn spawn_app() -> TestApp {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        db_max_connections: 1,
        jwt_secret: "test-secret".to_string(),
        jwt_ttl_hours: 1,
        bcrypt_cost: 4,
    };

    let pool = db::connect(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to create test db");
    let state = AppState::new(pool, &config);

    TestApp {
        app: router(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, token, body).await;
        let value = serde_json::from_slice(&bytes).expect("Response is not JSON");
        (status, value)
    }

    pub async fn text(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, String) {
        let (status, bytes) = self.send(method, uri, token, body).await;
        (status, String::from_utf8(bytes).expect("Response is not UTF-8"))
    }

    /// Signs up through the API and returns a bearer token.
    pub async fn login_as(&self, email: &str) -> String {
        let credentials = json!({ "email": email, "password": "password" });

        let (status, _) = self.send("POST", "/user/signup", None, Some(credentials.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self.json("POST", "/user/login", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().expect("token missing").to_string()
    }

    pub async fn add_event(&self, token: &str, body: Value) -> Value {
        let (status, event) = self.json("POST", "/event", Some(token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        event
    }
}
