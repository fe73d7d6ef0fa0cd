//! Mood Board Proxy Server Library
//!
//! This library provides the server tier of the mood board application: a
//! thin, credential-holding proxy between the browser and the third-party
//! services it uses (Unsplash photo search, the Pinterest REST API with its
//! OAuth flow, and a hosted model for image analysis). No state is kept on the
//! server; the only session is the Pinterest access token held in an
//! HTTP-only cookie in the browser.
//!
//! # Modules
//!
//! - `api` - axum handlers for every HTTP endpoint
//! - `config` - Configuration loading and the `Config` struct
//! - `error` - HTTP-facing error type
//! - `gemini` - Image analysis against the hosted model
//! - `pinterest` - Pinterest OAuth and REST calls
//! - `server` - Shared state, router assembly and the listener
//! - `types` - Wire types, image records and the OAuth message contract
//! - `unsplash` - Unsplash search calls
//! - `utils` - Token generation, cookies, image fetching and relaying
//!
//! # Example
//!
//! ```
//! use moodboard::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> moodboard::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env();
//!     server::start_api_server(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod gemini;
pub mod pinterest;
pub mod server;
pub mod types;
pub mod unsplash;
pub mod utils;

/// A convenient Result type alias for CLI-level operations that may fail.
///
/// HTTP handlers use [`error::AppError`] instead; this alias covers startup
/// and command code where any error simply ends the process.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal startup errors; request handling never calls this.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("UNSPLASH_ACCESS_KEY is not set, search will fail");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
