//! # API Module
//!
//! HTTP endpoints of the mood board server. Every handler is a plain async
//! function taking the shared [`crate::server::AppState`]; none of them keeps
//! state between requests. The only session is the Pinterest access token,
//! which lives in an HTTP-only cookie in the browser.
//!
//! ## Endpoints
//!
//! ### Pinterest OAuth
//!
//! - [`auth_url`] - `GET /api/auth/pinterest/url`, issues the CSRF state cookie
//!   and returns the authorization URL
//! - [`callback`] - `GET /api/auth/pinterest/callback`, checks the state,
//!   exchanges the code and sets the token cookie
//! - [`status`] - `GET /api/pinterest/status`
//!
//! ### Provider proxies
//!
//! - [`boards`] / [`board_pins`] - Pinterest board and pin listings
//! - [`search`] - Unsplash photo search
//! - [`unsplash_grid`] / [`pinterest_grid`] - the same data projected onto
//!   provider-independent grid items
//!
//! ### Images
//!
//! - [`proxy_image`] - fetch-and-encode for cross-origin images
//! - [`analyze`] - palette, keywords and mood from the analysis model
//!
//! ### Monitoring
//!
//! - [`health`]
//!
//! ## Errors
//!
//! JSON endpoints fail with [`crate::error::AppError`]. The OAuth callback
//! never fails at the HTTP level: it always answers with a small page that
//! posts an `OAUTH_SUCCESS` or `OAUTH_ERROR` message to the opener window.

mod auth;
mod callback;
mod grid;
mod health;
mod images;
mod pinterest;
mod unsplash;

pub use auth::auth_url;
pub use callback::{EXCHANGE_FAILED, MISSING_CODE, STATE_MISMATCH, callback, error_page, success_page};
pub use grid::{pinterest_grid, unsplash_grid};
pub use health::health;
pub use images::{analyze, proxy_image};
pub use pinterest::{access_token, board_pins, boards, status};
pub use unsplash::search;
