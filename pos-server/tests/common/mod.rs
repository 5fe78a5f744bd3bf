//! In-process test harness: the full router over an in-memory database

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use pos_server::db::repository::user;
use pos_server::{Config, ServerState, build_app};
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN: &str = "admin@restaurant.com";
pub const MANAGER: &str = "manager@restaurant.com";
pub const STAFF: &str = "staff@restaurant.com";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

impl TestApp {
    /// Seeded accounts, empty menu
    pub async fn new() -> Self {
        Self::with_config(Config::for_tests()).await
    }

    /// Seeded accounts and the sample menu
    pub async fn with_menu() -> Self {
        let mut config = Config::for_tests();
        config.seed_menu = true;
        Self::with_config(config).await
    }

    async fn with_config(config: Config) -> Self {
        let state = ServerState::initialize(&config)
            .await
            .expect("test state should initialize");
        Self {
            app: build_app(state.clone()),
            state,
        }
    }

    /// Token for a stored account without going through password verification
    pub async fn token(&self, email: &str) -> String {
        let account = user::find_by_email(&self.state.pool, email)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("no account {email}"));
        self.state.jwt_service.generate_token(&account).unwrap()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Id of a menu item by name, from the public listing
    pub async fn menu_item_id(&self, name: &str) -> i64 {
        let (_, items) = self.get("/api/menu/items", None).await;
        items
            .as_array()
            .unwrap()
            .iter()
            .find(|i| i["name"] == name)
            .and_then(|i| i["id"].as_i64())
            .unwrap_or_else(|| panic!("no menu item {name}"))
    }

    /// Id of a category by name
    pub async fn category_id(&self, name: &str) -> i64 {
        let (_, categories) = self.get("/api/menu/categories", None).await;
        categories
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["name"] == name)
            .and_then(|c| c["id"].as_i64())
            .unwrap_or_else(|| panic!("no category {name}"))
    }
}
