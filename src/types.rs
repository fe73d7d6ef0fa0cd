use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub connected: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageUrlRequest {
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxiedImage {
    pub base64: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Body of a successful `/oauth/token` exchange. Only `access_token` is
/// required; the rest is logged at debug level.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

/// Message posted from the OAuth popup to its opener window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OAuthMessage {
    #[serde(rename = "OAUTH_SUCCESS")]
    Success { provider: String },
    #[serde(rename = "OAUTH_ERROR")]
    Error { error: String },
}

impl OAuthMessage {
    pub fn success() -> Self {
        OAuthMessage::Success {
            provider: "pinterest".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        OAuthMessage::Error {
            error: message.into(),
        }
    }
}

/// Palette, tags and mood description returned by the analysis model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub palette: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Unsplash,
    Pinterest,
}

/// Unsplash photo as returned by `/search/photos`.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoRecord {
    pub id: String,
    pub urls: Option<PhotoUrls>,
    pub alt_description: Option<String>,
    pub description: Option<String>,
    pub user: Option<PhotoUser>,
    pub links: Option<PhotoLinks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUrls {
    pub raw: Option<String>,
    pub full: Option<String>,
    pub regular: Option<String>,
    pub small: Option<String>,
    pub thumb: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUser {
    pub name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoLinks {
    pub html: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSearchResponse {
    #[serde(default)]
    pub results: Vec<PhotoRecord>,
}

/// Pinterest pin as returned by `/boards/{id}/pins`.
#[derive(Debug, Clone, Deserialize)]
pub struct PinRecord {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub alt_text: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub media: Option<PinMedia>,
    pub board_owner: Option<PinOwner>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PinMedia {
    pub images: Option<HashMap<String, PinImage>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PinImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PinOwner {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PinListResponse {
    #[serde(default)]
    pub items: Vec<PinRecord>,
    pub bookmark: Option<String>,
}

/// An image from either provider.
#[derive(Debug, Clone)]
pub enum ImageRecord {
    Photo(PhotoRecord),
    Pin(PinRecord),
}

/// The provider-independent view the grid and modal render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridItem {
    pub id: String,
    pub source: ImageSource,
    pub display_url: String,
    pub alt: String,
    pub attribution: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridResponse {
    pub items: Vec<GridItem>,
}

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const DEFAULT_ALT: &str = "Inspiration image";
const NO_LINK: &str = "#";

impl ImageRecord {
    pub fn source(&self) -> ImageSource {
        match self {
            ImageRecord::Photo(_) => ImageSource::Unsplash,
            ImageRecord::Pin(_) => ImageSource::Pinterest,
        }
    }

    /// Projects the record onto a [`GridItem`]. Records without any usable
    /// image URL have nothing to show and yield `None`.
    pub fn to_grid_item(&self) -> Option<GridItem> {
        match self {
            ImageRecord::Photo(photo) => {
                let display_url = photo.urls.as_ref().and_then(|u| {
                    u.regular
                        .clone()
                        .or_else(|| u.full.clone())
                        .or_else(|| u.small.clone())
                        .or_else(|| u.raw.clone())
                        .or_else(|| u.thumb.clone())
                })?;

                Some(GridItem {
                    id: photo.id.clone(),
                    source: self.source(),
                    display_url,
                    alt: first_present(&[&photo.alt_description, &photo.description])
                        .unwrap_or_else(|| DEFAULT_ALT.to_string()),
                    attribution: photo
                        .user
                        .as_ref()
                        .and_then(|u| first_present(&[&u.name, &u.username]))
                        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                    link: photo
                        .links
                        .as_ref()
                        .and_then(|l| first_present(&[&l.html]))
                        .unwrap_or_else(|| NO_LINK.to_string()),
                })
            }
            ImageRecord::Pin(pin) => {
                let display_url = largest_pin_image(pin).or_else(|| pin.image_url.clone())?;

                Some(GridItem {
                    id: pin.id.clone(),
                    source: self.source(),
                    display_url,
                    alt: first_present(&[&pin.alt_text, &pin.title, &pin.description])
                        .unwrap_or_else(|| DEFAULT_ALT.to_string()),
                    attribution: pin
                        .board_owner
                        .as_ref()
                        .and_then(|o| first_present(&[&o.username]))
                        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                    link: first_present(&[&pin.link])
                        .unwrap_or_else(|| format!("https://www.pinterest.com/pin/{}/", pin.id)),
                })
            }
        }
    }
}

fn first_present(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|v| !v.trim().is_empty())
        .map(str::to_string)
}

fn largest_pin_image(pin: &PinRecord) -> Option<String> {
    let images = pin.media.as_ref()?.images.as_ref()?;
    let area = |img: &PinImage| img.width.unwrap_or(0) as u64 * img.height.unwrap_or(0) as u64;

    // Equal areas go to the greater size key so the pick is stable.
    images
        .iter()
        .max_by(|a, b| area(a.1).cmp(&area(b.1)).then_with(|| a.0.cmp(b.0)))
        .map(|(_, img)| img.url.clone())
}
