// src/integrations/vision/client.rs
//
// Poster-identification oracle over a hosted vision model API.
//
// ARCHITECTURE:
// - JSON-over-HTTP client for the generateContent endpoint
// - Sends the poster inline (base64) with extraction instructions
// - Maps external data to an internal DTO (NO domain mutation)
// - Used by the edit session's identification flow
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates or modifies domain entities directly
// - Any malformed or missing required field in the response is a
//   classification failure, surfaced as one user-readable error

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::domain::movie::parse_release_date;
use crate::error::{AppError, AppResult};
use crate::infrastructure::image_source::ImageSource;

/// User-facing failure for any identification that cannot produce a
/// usable record, regardless of the underlying cause.
pub const IDENTIFY_FAILURE_MESSAGE: &str =
    "Failed to identify movie from the provided poster. Please try a different image.";

const IDENTIFY_INSTRUCTIONS: &str = "From the provided movie poster, identify the movie. \
    Extract the full movie title, the theatrical release date in YYYY-MM-DD format, \
    a list of its primary genres, and a list of the main cast members. \
    Leave posterUrl as an empty string if the poster itself was provided.";

/// Best-effort movie record inferred from a poster image.
/// Required fields are already validated; the release date is typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedMovie {
    pub title: String,
    pub release_date: NaiveDate,
    pub poster_url: String,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
}

/// Anything that can infer movie metadata from image bytes.
///
/// The trait is the seam the edit session depends on; the HTTP client
/// below is one implementation, tests mock it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PosterOracle: Send + Sync {
    async fn identify(&self, image: &ImageSource) -> AppResult<IdentifiedMovie>;
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// Raw record as the model returns it, before validation
#[derive(Debug, Deserialize)]
struct RawIdentifiedMovie {
    title: Option<String>,
    #[serde(rename = "releaseDate")]
    release_date: Option<String>,
    #[serde(rename = "posterUrl")]
    poster_url: Option<String>,
    genres: Option<Vec<String>>,
    cast: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// HTTP implementation of [`PosterOracle`].
pub struct VisionClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl VisionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent".to_string(),
            api_key: api_key.into(),
            http_client,
        }
    }

    /// Point the client at a different endpoint (self-hosted, tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(api_key);
        client.base_url = base_url.into();
        client
    }

    async fn execute_request(&self, body: serde_json::Value) -> AppResult<GenerateResponse> {
        let response = self
            .http_client
            .post(&self.base_url)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Oracle(format!("Vision API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Oracle(format!(
                "Vision API returned status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Oracle(format!("Failed to parse Vision API response: {}", e)))
    }

    /// Pulls the model's JSON text out of the response envelope.
    fn response_text(response: GenerateResponse) -> AppResult<String> {
        response
            .candidates
            .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .map(|t| t.trim().to_string())
            .ok_or_else(|| AppError::Oracle("Vision API returned no content".to_string()))
    }

    /// Strict mapping from the raw record to the validated DTO. Missing or
    /// malformed required fields are classification failures.
    fn map_raw(raw: RawIdentifiedMovie) -> AppResult<IdentifiedMovie> {
        let title = raw
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Oracle(IDENTIFY_FAILURE_MESSAGE.to_string()))?;

        let release_date = raw
            .release_date
            .as_deref()
            .map(parse_release_date)
            .transpose()
            .map_err(|_| AppError::Oracle(IDENTIFY_FAILURE_MESSAGE.to_string()))?
            .ok_or_else(|| AppError::Oracle(IDENTIFY_FAILURE_MESSAGE.to_string()))?;

        Ok(IdentifiedMovie {
            title,
            release_date,
            poster_url: raw.poster_url.unwrap_or_default(),
            genres: raw.genres.unwrap_or_default(),
            cast: raw.cast.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl PosterOracle for VisionClient {
    async fn identify(&self, image: &ImageSource) -> AppResult<IdentifiedMovie> {
        let body = json!({
            "contents": [{
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": image.mime_type,
                            "data": STANDARD.encode(&image.bytes),
                        }
                    },
                    { "text": IDENTIFY_INSTRUCTIONS }
                ]
            }],
            "generationConfig": {
                "response_mime_type": "application/json"
            }
        });

        log::info!("identifying poster ({} bytes, {})", image.bytes.len(), image.mime_type);

        let response = self.execute_request(body).await?;
        let text = Self::response_text(response)?;

        let raw: RawIdentifiedMovie = serde_json::from_str(&text)
            .map_err(|_| AppError::Oracle(IDENTIFY_FAILURE_MESSAGE.to_string()))?;

        Self::map_raw(raw)
    }
}
