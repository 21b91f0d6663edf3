use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A tracked movie release.
/// This is the root entity of the collection; identity is the
/// (title, release date) pair, see [`MovieKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Display title, non-empty after trimming
    pub title: String,

    /// Theatrical release date, day granularity
    pub release_date: NaiveDate,

    /// Remote URL or embedded `data:` URI
    pub poster_url: String,

    /// Genres in display order (may be empty)
    pub genres: Vec<String>,

    /// Main cast in billing order (may be empty)
    pub cast: Vec<String>,

    /// Optional user tag, present only when its text is non-empty
    pub tag: Option<Tag>,
}

/// The natural identity of a movie record.
///
/// The collection treats (title, release date) as a de-facto unique key:
/// update and delete locate records through it rather than through a
/// surrogate identifier. Two distinct movies sharing both fields are
/// indistinguishable to the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieKey {
    pub title: String,
    pub release_date: NaiveDate,
}

/// A user-assigned badge displayed on the poster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub text: String,
    pub color: TagColor,
}

/// Closed set of tag badge colors offered by the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl Movie {
    /// Create a new Movie with the required fields; genres, cast and tag
    /// start empty and are filled by the producing flow.
    pub fn new(title: impl Into<String>, release_date: NaiveDate, poster_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            release_date,
            poster_url: poster_url.into(),
            genres: Vec::new(),
            cast: Vec::new(),
            tag: None,
        }
    }

    /// The identity key used by update/delete operations.
    pub fn key(&self) -> MovieKey {
        MovieKey {
            title: self.title.clone(),
            release_date: self.release_date,
        }
    }
}

impl Tag {
    /// Builds a tag from form input. Returns `None` when the text is empty
    /// after trimming; a tag never exists without visible text.
    pub fn from_parts(text: &str, color: TagColor) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            color,
        })
    }
}

impl TagColor {
    /// Stable style token consumed by the rendering layer.
    pub fn token(&self) -> &'static str {
        match self {
            TagColor::Red => "bg-red-500",
            TagColor::Blue => "bg-blue-500",
            TagColor::Green => "bg-green-500",
            TagColor::Yellow => "bg-yellow-500",
            TagColor::Purple => "bg-purple-500",
        }
    }
}

impl std::fmt::Display for TagColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagColor::Red => write!(f, "red"),
            TagColor::Blue => write!(f, "blue"),
            TagColor::Green => write!(f, "green"),
            TagColor::Yellow => write!(f, "yellow"),
            TagColor::Purple => write!(f, "purple"),
        }
    }
}

impl std::fmt::Display for MovieKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.release_date)
    }
}

/// Parses an ISO `YYYY-MM-DD` release date.
///
/// A trailing time component (`2024-06-15T00:00:00`) is tolerated and
/// stripped, so every stored date is already day-granular and all
/// downstream grouping is exact.
pub fn parse_release_date(raw: &str) -> DomainResult<NaiveDate> {
    let day_part = raw.split('T').next().unwrap_or(raw).trim();
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(raw.to_string()))
}
