use reqwest::Client;
use url::Url;

use crate::{config::Config, types::TokenResponse};

/// Why a code exchange did not produce a token. Only ever logged; the
/// browser sees a generic message.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("token response is missing access_token: {0}")]
    Malformed(String),
}

/// Builds the Pinterest authorization URL the popup is sent to.
///
/// # Arguments
///
/// * `config` - Provides the authorization endpoint, scope and redirect URI
/// * `client_id` - The registered Pinterest app id
/// * `state` - CSRF token that Pinterest echoes back to the callback
///
/// # Errors
///
/// Fails only if `PINTEREST_AUTH_URL` is not a valid URL.
pub fn authorize_url(
    config: &Config,
    client_id: &str,
    state: &str,
) -> Result<String, url::ParseError> {
    let mut url = Url::parse(&config.pinterest_auth_url)?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", &config.redirect_uri())
        .append_pair("response_type", "code")
        .append_pair("scope", &config.pinterest_scope)
        .append_pair("state", state);

    Ok(url.into())
}

/// Trades an authorization code for an access token.
///
/// Server-to-server POST to `{PINTEREST_API_URL}/oauth/token` using HTTP
/// Basic auth built from the client id and secret, with a form-encoded body.
/// There is no retry: a failed exchange means the user starts over.
///
/// # Errors
///
/// Returns [`ExchangeError`] when credentials are missing (no request is
/// made), the request fails, Pinterest answers non-2xx, or the answer has no
/// `access_token`.
pub async fn exchange_code(
    client: &Client,
    config: &Config,
    code: &str,
) -> Result<TokenResponse, ExchangeError> {
    let client_id = config
        .pinterest_client_id
        .as_deref()
        .ok_or(ExchangeError::NotConfigured("PINTEREST_CLIENT_ID"))?;
    let client_secret = config
        .pinterest_client_secret
        .as_deref()
        .ok_or(ExchangeError::NotConfigured("PINTEREST_CLIENT_SECRET"))?;
    let redirect_uri = config.redirect_uri();

    let res = client
        .post(format!("{}/oauth/token", config.pinterest_api_url))
        .basic_auth(client_id, Some(client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(ExchangeError::Rejected { status, body });
    }

    serde_json::from_str::<TokenResponse>(&body).map_err(|_| ExchangeError::Malformed(body))
}
