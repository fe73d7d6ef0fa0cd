#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use moodboard::{
    config::Config,
    server::{AppState, router},
};
use tower::ServiceExt;
use wiremock::MockServer;

pub const CLIENT_ID: &str = "test_client_id";
pub const CLIENT_SECRET: &str = "test_client_secret";
pub const UNSPLASH_KEY: &str = "test_unsplash_key";
pub const GEMINI_KEY: &str = "test_gemini_key";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }

    /// All `Set-Cookie` header values.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    pub fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{}=", name);
        self.set_cookies().into_iter().find(|c| c.starts_with(&prefix))
    }
}

pub fn config_with(vars: &[(&str, &str)]) -> Config {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| map.get(key).cloned())
}

/// Every provider pointed at `server`, every credential set.
pub fn mock_config(server: &MockServer) -> Config {
    let uri = server.uri();
    config_with(&[
        ("APP_URL", "http://localhost:3000"),
        ("PINTEREST_CLIENT_ID", CLIENT_ID),
        ("PINTEREST_CLIENT_SECRET", CLIENT_SECRET),
        ("PINTEREST_AUTH_URL", &format!("{}/oauth/", uri)),
        ("PINTEREST_API_URL", &format!("{}/v5", uri)),
        ("UNSPLASH_ACCESS_KEY", UNSPLASH_KEY),
        ("UNSPLASH_API_URL", &uri),
        ("GEMINI_API_KEY", GEMINI_KEY),
        ("GEMINI_API_URL", &uri),
    ])
}

pub async fn send(config: Config, request: Request<Body>) -> TestResponse {
    let app = router(AppState::new(config));
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).to_string(),
    }
}

pub async fn get(config: Config, uri: &str, cookie: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(config, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_json(config: Config, uri: &str, body: serde_json::Value) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(config, request).await
}

pub async fn post_raw(config: Config, uri: &str, content_type: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(config, request).await
}
