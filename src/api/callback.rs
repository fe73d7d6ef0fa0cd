use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use crate::{
    config::Config,
    pinterest,
    server::AppState,
    types::{CallbackParams, OAuthMessage},
    utils::{self, STATE_COOKIE},
};

pub const STATE_MISMATCH: &str = "State mismatch";
pub const MISSING_CODE: &str = "Missing authorization code";
pub const EXCHANGE_FAILED: &str = "Failed to exchange token";

/// Finishes the OAuth flow inside the popup window.
///
/// The state cookie is consumed on every path. The token exchange only runs
/// once the provider reported no error and the `state` query parameter
/// equals the state cookie; anything else ends the flow with an
/// `OAUTH_ERROR` page and the user has to start again.
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    query: Result<Query<CallbackParams>, QueryRejection>,
) -> (CookieJar, Html<String>) {
    // An unparseable query carries no usable state and ends as a mismatch.
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!("Malformed OAuth callback query: {}", rejection.body_text());
            CallbackParams::default()
        }
    };
    let stored_state = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(utils::removal_cookie(STATE_COOKIE));

    if let Some(error) = params.error.filter(|e| !e.is_empty()) {
        warn!("Pinterest authorization denied: {}", error);
        return (jar, error_page(&state.config, &error));
    }

    if !states_match(params.state.as_deref(), stored_state.as_deref()) {
        warn!("OAuth state mismatch, refusing token exchange");
        return (jar, error_page(&state.config, STATE_MISMATCH));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        warn!("OAuth callback without authorization code");
        return (jar, error_page(&state.config, MISSING_CODE));
    };

    match pinterest::auth::exchange_code(&state.http, &state.config, &code).await {
        Ok(token) => {
            debug!(
                token_type = token.token_type.as_deref().unwrap_or("unknown"),
                expires_in = token.expires_in,
                scope = token.scope.as_deref().unwrap_or(""),
                has_refresh_token = token.refresh_token.is_some(),
                "Pinterest token exchange succeeded"
            );
            let jar = jar.add(utils::access_token_cookie(token.access_token));
            (jar, success_page(&state.config))
        }
        Err(e) => {
            tracing::error!("Pinterest OAuth error: {}", e);
            (jar, error_page(&state.config, EXCHANGE_FAILED))
        }
    }
}

/// Both sides must be present and identical. A missing cookie never matches
/// a missing query parameter.
fn states_match(query: Option<&str>, cookie: Option<&str>) -> bool {
    match (query, cookie) {
        (Some(q), Some(c)) => !q.is_empty() && q == c,
        _ => false,
    }
}

/// Serializes the message and the target origin as script literals.
fn script_literals(config: &Config, message: &OAuthMessage) -> (String, String) {
    let message = serde_json::to_string(message).unwrap_or_else(|_| "{}".to_string());
    let origin = serde_json::to_string(&config.app_origin()).unwrap_or_else(|_| "\"*\"".to_string());

    (
        utils::escape_script_json(&message),
        utils::escape_script_json(&origin),
    )
}

pub fn success_page(config: &Config) -> Html<String> {
    let (message, origin) = script_literals(config, &OAuthMessage::success());

    Html(format!(
        r#"<html>
  <body>
    <script>
      if (window.opener) {{
        window.opener.postMessage({message}, {origin});
        window.close();
      }} else {{
        window.location.href = '/';
      }}
    </script>
    <p>Authentication successful. This window should close automatically.</p>
  </body>
</html>
"#
    ))
}

pub fn error_page(config: &Config, error: &str) -> Html<String> {
    let (message, origin) = script_literals(config, &OAuthMessage::error(error));

    Html(format!(
        r#"<html><body><script>if (window.opener) {{ window.opener.postMessage({message}, {origin}); }} window.close();</script></body></html>
"#
    ))
}
