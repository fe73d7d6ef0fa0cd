//! Configuration management for the mood board proxy.
//!
//! Configuration is read exactly once at process start into a [`Config`]
//! value which is then shared with every handler through the server state.
//! Handlers never look at the process environment themselves.
//!
//! Values are resolved in this order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/moodboard/.env`)
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use tabled::Tabled;

pub const DEFAULT_APP_URL: &str = "http://localhost:3000";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_PINTEREST_AUTH_URL: &str = "https://www.pinterest.com/oauth/";
pub const DEFAULT_PINTEREST_API_URL: &str = "https://api.pinterest.com/v5";
pub const DEFAULT_PINTEREST_SCOPE: &str = "boards:read,pins:read";
pub const DEFAULT_UNSPLASH_API_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_STATIC_DIR: &str = "dist";

/// Path of the OAuth callback route, appended to `APP_URL` for the redirect URI.
pub const CALLBACK_PATH: &str = "/api/auth/pinterest/callback";

/// Loads environment variables from `.env` files.
///
/// The working directory is tried first, then `moodboard/.env` under the
/// platform-specific local data directory (created if missing so the build
/// script's `.env.example` has a home). Variables already present in the
/// environment are never overwritten, and a missing file is not an error.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodboard/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Process-wide configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_url: String,
    pub server_address: String,
    pub pinterest_client_id: Option<String>,
    pub pinterest_client_secret: Option<String>,
    pub pinterest_auth_url: String,
    pub pinterest_api_url: String,
    pub pinterest_scope: String,
    /// Check a present token against the Pinterest API before reporting
    /// "connected". Off by default: cookie presence alone means connected,
    /// so a revoked token reads as connected until a downstream call fails.
    pub validate_pinterest_status: bool,
    pub unsplash_access_key: Option<String>,
    pub unsplash_api_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            app_url: or("APP_URL", DEFAULT_APP_URL)
                .trim_end_matches('/')
                .to_string(),
            server_address: or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            pinterest_client_id: get("PINTEREST_CLIENT_ID"),
            pinterest_client_secret: get("PINTEREST_CLIENT_SECRET"),
            pinterest_auth_url: or("PINTEREST_AUTH_URL", DEFAULT_PINTEREST_AUTH_URL),
            pinterest_api_url: or("PINTEREST_API_URL", DEFAULT_PINTEREST_API_URL)
                .trim_end_matches('/')
                .to_string(),
            pinterest_scope: or("PINTEREST_SCOPE", DEFAULT_PINTEREST_SCOPE),
            validate_pinterest_status: get("PINTEREST_VALIDATE_STATUS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            unsplash_access_key: get("UNSPLASH_ACCESS_KEY"),
            unsplash_api_url: or("UNSPLASH_API_URL", DEFAULT_UNSPLASH_API_URL)
                .trim_end_matches('/')
                .to_string(),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_api_url: or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL)
                .trim_end_matches('/')
                .to_string(),
            gemini_model: or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            static_dir: PathBuf::from(or("STATIC_DIR", DEFAULT_STATIC_DIR)),
        }
    }

    /// The OAuth redirect URI registered with Pinterest.
    pub fn redirect_uri(&self) -> String {
        format!("{}{}", self.app_url, CALLBACK_PATH)
    }

    /// Scheme, host and port of `app_url`, used as the `postMessage` target
    /// origin. Falls back to `*` only when `app_url` does not parse.
    pub fn app_origin(&self) -> String {
        match url::Url::parse(&self.app_url) {
            Ok(url) => url.origin().ascii_serialization(),
            Err(_) => "*".to_string(),
        }
    }

    /// Rows for the `config` command. Secrets are masked.
    pub fn summary_rows(&self) -> Vec<ConfigTableRow> {
        vec![
            row("APP_URL", Some(self.app_url.as_str()), false),
            row("SERVER_ADDRESS", Some(self.server_address.as_str()), false),
            row(
                "PINTEREST_CLIENT_ID",
                self.pinterest_client_id.as_deref(),
                false,
            ),
            row(
                "PINTEREST_CLIENT_SECRET",
                self.pinterest_client_secret.as_deref(),
                true,
            ),
            row("PINTEREST_AUTH_URL", Some(self.pinterest_auth_url.as_str()), false),
            row("PINTEREST_API_URL", Some(self.pinterest_api_url.as_str()), false),
            row("PINTEREST_SCOPE", Some(self.pinterest_scope.as_str()), false),
            row(
                "PINTEREST_VALIDATE_STATUS",
                Some(self.validate_pinterest_status.to_string().as_str()),
                false,
            ),
            row(
                "UNSPLASH_ACCESS_KEY",
                self.unsplash_access_key.as_deref(),
                true,
            ),
            row("UNSPLASH_API_URL", Some(self.unsplash_api_url.as_str()), false),
            row("GEMINI_API_KEY", self.gemini_api_key.as_deref(), true),
            row("GEMINI_API_URL", Some(self.gemini_api_url.as_str()), false),
            row("GEMINI_MODEL", Some(self.gemini_model.as_str()), false),
            row(
                "STATIC_DIR",
                Some(self.static_dir.display().to_string().as_str()),
                false,
            ),
        ]
    }
}

#[derive(Debug, Tabled)]
pub struct ConfigTableRow {
    pub setting: String,
    pub value: String,
}

fn row(setting: &str, value: Option<&str>, secret: bool) -> ConfigTableRow {
    let value = match value {
        None => "missing".to_string(),
        Some(v) if secret => mask_secret(v),
        Some(v) => v.to_string(),
    };

    ConfigTableRow {
        setting: setting.to_string(),
        value,
    }
}

/// Keeps the last four characters of a secret visible.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
