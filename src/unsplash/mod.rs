//! # Unsplash Integration Module
//!
//! Photo search against the Unsplash API using the server-held access key.

use reqwest::Client;
use serde_json::Value;

use crate::{config::Config, error::AppError, utils};

/// Number of results requested per search.
pub const PER_PAGE: u32 = 30;

/// Searches photos and relays the Unsplash response unchanged.
///
/// An empty or missing `query` is searched as `"aesthetic"`.
///
/// # Errors
///
/// - [`AppError::NotConfigured`] when `UNSPLASH_ACCESS_KEY` is unset; no
///   request is made in that case
/// - [`AppError::Upstream`] for transport failures and non-2xx answers
pub async fn search_photos(
    client: &Client,
    config: &Config,
    query: Option<&str>,
) -> Result<Value, AppError> {
    let access_key = config
        .unsplash_access_key
        .as_deref()
        .ok_or(AppError::NotConfigured("UNSPLASH_ACCESS_KEY"))?;

    let query = utils::search_query_or_default(query);
    let per_page = PER_PAGE.to_string();

    let res = client
        .get(format!("{}/search/photos", config.unsplash_api_url))
        .query(&[("query", query), ("per_page", per_page.as_str())])
        .header("Authorization", format!("Client-ID {}", access_key))
        .send()
        .await;

    utils::relay_json(res).await
}
