// src/services/session_service.rs
//
// Edit Session Controller - the state machine behind the add/edit modal.
//
// Session state is an explicit tagged variant rather than ad hoc flags;
// "is this oracle result still relevant" is a property checked against
// the pending request token, which closes the stale-resolution race.

use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::movie::{parse_release_date, Movie, MovieKey, Tag, TagColor};
use crate::domain::{DomainError, DomainResult};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, IdentificationFailed};
use crate::infrastructure::image_source::ImageSource;
use crate::integrations::vision::{IdentifiedMovie, PosterOracle};
use crate::services::collection_service::CollectionService;

/// Which record, if any, the modal is working on.
#[derive(Debug, Clone, PartialEq)]
pub enum EditSession {
    /// No modal open
    Idle,
    /// New-record form, optionally pre-seeded with a calendar-cell date
    Creating { prefill_date: Option<NaiveDate> },
    /// Form pre-seeded from an existing record, located by its key
    Editing { key: MovieKey },
}

/// The form payload as the modal holds it: raw text everywhere, turned
/// into a validated [`Movie`] only on save.
#[derive(Debug, Clone, Default)]
pub struct MovieDraft {
    pub title: String,
    /// ISO `YYYY-MM-DD` text from the date input
    pub release_date: String,
    pub poster_url: String,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub tag_text: String,
    pub tag_color: TagColor,
}

impl MovieDraft {
    /// Fresh creation draft pre-seeded with a date.
    pub fn seeded(date: NaiveDate) -> Self {
        Self {
            release_date: date.to_string(),
            ..Self::default()
        }
    }

    /// Edit draft pre-seeded from an existing record.
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            release_date: movie.release_date.to_string(),
            poster_url: movie.poster_url.clone(),
            genres: movie.genres.clone(),
            cast: movie.cast.clone(),
            tag_text: movie.tag.as_ref().map(|t| t.text.clone()).unwrap_or_default(),
            tag_color: movie.tag.as_ref().map(|t| t.color).unwrap_or_default(),
        }
    }

    /// Draft carrying an oracle result for review before saving.
    pub fn from_identified(identified: IdentifiedMovie) -> Self {
        Self {
            title: identified.title,
            release_date: identified.release_date.to_string(),
            poster_url: identified.poster_url,
            genres: identified.genres,
            cast: identified.cast,
            ..Self::default()
        }
    }

    /// Splits a comma-separated form field into trimmed entries.
    pub fn parse_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Producer-side validation: a draft becomes a movie only with a
    /// non-empty title and a parseable date. Empty tag text means no tag.
    pub fn into_movie(self) -> DomainResult<Movie> {
        if self.title.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Movie title cannot be empty".to_string(),
            ));
        }
        let release_date = parse_release_date(&self.release_date)?;

        Ok(Movie {
            title: self.title,
            release_date,
            poster_url: self.poster_url,
            genres: self.genres,
            cast: self.cast,
            tag: Tag::from_parts(&self.tag_text, self.tag_color),
        })
    }
}

/// What a save attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Added,
    Updated,
    /// Draft failed validation; nothing changed, the form stays open
    Blocked,
}

pub struct SessionService {
    collection: Arc<CollectionService>,
    event_bus: Arc<EventBus>,
    session: RwLock<EditSession>,
    pending_lookup: RwLock<Option<Uuid>>,
}

impl SessionService {
    pub fn new(collection: Arc<CollectionService>, event_bus: Arc<EventBus>) -> Self {
        Self {
            collection,
            event_bus,
            session: RwLock::new(EditSession::Idle),
            pending_lookup: RwLock::new(None),
        }
    }

    pub fn current(&self) -> EditSession {
        self.session.read().unwrap().clone()
    }

    /// Opens the new-record form, optionally pre-seeded from a
    /// calendar-cell click.
    pub fn open_create(&self, prefill_date: Option<NaiveDate>) {
        *self.session.write().unwrap() = EditSession::Creating { prefill_date };
    }

    /// Opens the edit form for an existing record.
    pub fn open_edit(&self, movie: &Movie) {
        *self.session.write().unwrap() = EditSession::Editing { key: movie.key() };
    }

    /// Discards the in-progress form without touching the collection.
    /// Any in-flight identification becomes stale.
    pub fn cancel(&self) {
        self.close();
    }

    /// The form seed for the current state; `None` when no modal is open
    /// or the edited record has vanished.
    pub fn draft_for(&self, today: NaiveDate) -> AppResult<Option<MovieDraft>> {
        match self.current() {
            EditSession::Idle => Ok(None),
            EditSession::Creating { prefill_date } => {
                Ok(Some(MovieDraft::seeded(prefill_date.unwrap_or(today))))
            }
            EditSession::Editing { key } => Ok(self
                .collection
                .find_movie(&key)?
                .map(|m| MovieDraft::from_movie(&m))),
        }
    }

    /// Saves the form.
    ///
    /// "Is this an edit" is decided by re-checking that the originally
    /// opened key still exists: if it vanished between open and save, the
    /// save degrades to an add instead of failing. An invalid draft blocks
    /// silently - no error, no transition, no mutation.
    pub fn save(&self, draft: MovieDraft) -> AppResult<SaveOutcome> {
        let movie = match draft.into_movie() {
            Ok(movie) => movie,
            Err(reason) => {
                log::debug!("save blocked: {}", reason);
                return Ok(SaveOutcome::Blocked);
            }
        };

        let edited_key = match self.current() {
            EditSession::Editing { key } => self.collection.find_movie(&key)?.map(|_| key),
            _ => None,
        };

        let outcome = match edited_key {
            Some(key) => {
                self.collection.update_movie(&key, movie)?;
                SaveOutcome::Updated
            }
            None => {
                self.collection.add_movie(movie)?;
                SaveOutcome::Added
            }
        };

        self.close();
        Ok(outcome)
    }

    /// Deletes a record. Obtaining user confirmation first is the
    /// caller's concern, not enforced here.
    pub fn delete(&self, key: &MovieKey) -> AppResult<bool> {
        self.collection.remove_movie(key)
    }

    /// Swaps a record's poster for a freshly resolved image source.
    pub fn change_poster(&self, key: &MovieKey, poster_url: &str) -> AppResult<bool> {
        self.collection.replace_poster(key, poster_url)
    }

    // ========================================================================
    // POSTER IDENTIFICATION FLOW
    // ========================================================================

    /// Registers a new identification request and returns its token.
    /// Starting a new request supersedes any earlier in-flight one; there
    /// is no cancellation, the old result just becomes stale.
    pub fn begin_identification(&self) -> Uuid {
        let token = Uuid::new_v4();
        *self.pending_lookup.write().unwrap() = Some(token);
        token
    }

    /// Accepts exactly one resolution per token.
    ///
    /// A result whose token no longer matches the pending request (flow
    /// closed, restarted, or superseded) is discarded silently. A failure
    /// resets the flow and surfaces an error notification.
    pub fn resolve_identification(
        &self,
        token: Uuid,
        result: AppResult<IdentifiedMovie>,
    ) -> AppResult<Option<MovieDraft>> {
        {
            let mut pending = self.pending_lookup.write().unwrap();
            if *pending != Some(token) {
                log::debug!("discarding stale identification result");
                return Ok(None);
            }
            *pending = None;
        }

        match result {
            Ok(identified) => Ok(Some(MovieDraft::from_identified(identified))),
            Err(err) => {
                let reason = match err {
                    AppError::Oracle(msg) => msg,
                    other => other.to_string(),
                };
                log::warn!("identification failed: {}", reason);
                self.event_bus.emit(IdentificationFailed::new(reason));
                Ok(None)
            }
        }
    }

    /// One-shot identification: register, ask the oracle, resolve. The
    /// uploaded image itself becomes the draft's poster.
    pub async fn identify_poster(
        &self,
        oracle: &dyn PosterOracle,
        image: &ImageSource,
    ) -> AppResult<Option<MovieDraft>> {
        let token = self.begin_identification();
        let result = oracle.identify(image).await;
        Ok(self.resolve_identification(token, result)?.map(|mut draft| {
            draft.poster_url = image.to_data_uri();
            draft
        }))
    }

    fn close(&self) {
        *self.session.write().unwrap() = EditSession::Idle;
        *self.pending_lookup.write().unwrap() = None;
    }
}
