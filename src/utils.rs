use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::{Client, Response, header::CONTENT_TYPE};
use serde_json::Value;

use crate::{error::AppError, types::ProxiedImage};

pub const STATE_COOKIE: &str = "pinterest_oauth_state";
pub const ACCESS_TOKEN_COOKIE: &str = "pinterest_access_token";
pub const ACCESS_TOKEN_MAX_AGE_DAYS: i64 = 30;
pub const DEFAULT_SEARCH_QUERY: &str = "aesthetic";
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

const STATE_TOKEN_LEN: usize = 32;

pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Empty or missing search terms fall back to [`DEFAULT_SEARCH_QUERY`].
pub fn search_query_or_default(query: Option<&str>) -> &str {
    match query {
        Some(q) if !q.trim().is_empty() => q,
        _ => DEFAULT_SEARCH_QUERY,
    }
}

/// Short-lived CSRF state cookie; a session cookie with no max-age.
pub fn state_cookie(state: String) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, state))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build()
}

pub fn access_token_cookie(token: String) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::days(ACCESS_TOKEN_MAX_AGE_DAYS))
        .build()
}

/// Cookie handed to `CookieJar::remove`; the path has to match the one the
/// cookie was issued with.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

/// Fetches `url` and returns its bytes as base64 with the upstream content
/// type, defaulting to `image/jpeg`. Non-2xx responses are errors.
pub async fn fetch_image(client: &Client, url: &str) -> Result<ProxiedImage, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;

    let mime_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_IMAGE_MIME)
        .to_string();

    let bytes = response.bytes().await?;

    Ok(ProxiedImage {
        base64: STANDARD.encode(&bytes),
        mime_type,
    })
}

/// Passes a provider's JSON response through unchanged.
///
/// Transport errors carry their message; non-2xx responses carry the
/// upstream body, parsed as JSON when possible and as text otherwise.
pub async fn relay_json(result: Result<Response, reqwest::Error>) -> Result<Value, AppError> {
    let response = result.map_err(|e| AppError::Upstream(Value::String(e.to_string())))?;
    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|e| AppError::Upstream(Value::String(e.to_string())))?;

    if !status.is_success() {
        tracing::warn!(%status, "upstream request failed");
        return Err(AppError::Upstream(parse_body(body)));
    }

    serde_json::from_str(&body).map_err(|e| AppError::Upstream(Value::String(e.to_string())))
}

fn parse_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

/// Makes serialized JSON safe to embed inside an inline `<script>` block.
pub fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
