// src/services/collection_service.rs
//
// Orchestration seam between producers and the collection store:
// validate, mutate, emit. The store itself never validates and never
// emits; no-op mutations emit nothing.

use std::sync::Arc;

use crate::domain::movie::{validate_movie, Movie, MovieKey};
use crate::error::AppResult;
use crate::events::{EventBus, MovieAdded, MovieRemoved, MovieUpdated, PosterReplaced};
use crate::repositories::MovieRepository;

pub struct CollectionService {
    movie_repo: Arc<dyn MovieRepository>,
    event_bus: Arc<EventBus>,
}

impl CollectionService {
    pub fn new(movie_repo: Arc<dyn MovieRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            movie_repo,
            event_bus,
        }
    }

    /// Adds a genuinely new movie. The caller's flow guarantees the
    /// identity key is not already present.
    pub fn add_movie(&self, movie: Movie) -> AppResult<()> {
        validate_movie(&movie)?;
        self.movie_repo.add(movie.clone())?;

        log::info!("movie added: {} ({})", movie.title, movie.release_date);
        self.event_bus
            .emit(MovieAdded::new(movie.title, movie.release_date));
        Ok(())
    }

    /// Replaces the record at `old_key` wholesale. Returns false (and
    /// stays silent) when the key has vanished.
    pub fn update_movie(&self, old_key: &MovieKey, movie: Movie) -> AppResult<bool> {
        validate_movie(&movie)?;
        let title = movie.title.clone();
        let touched = self.movie_repo.update(old_key, movie)?;

        if touched {
            log::info!("movie updated: {}", title);
            self.event_bus.emit(MovieUpdated::new(title));
        }
        Ok(touched)
    }

    /// Deletes the record at `key`. User confirmation is the caller's
    /// concern; this method assumes it already happened.
    pub fn remove_movie(&self, key: &MovieKey) -> AppResult<bool> {
        let touched = self.movie_repo.remove(key)?;

        if touched {
            log::info!("movie removed: {}", key.title);
            self.event_bus.emit(MovieRemoved::new(key.title.clone()));
        }
        Ok(touched)
    }

    /// Swaps only the poster of the record at `key`.
    pub fn replace_poster(&self, key: &MovieKey, poster_url: &str) -> AppResult<bool> {
        let touched = self.movie_repo.replace_poster(key, poster_url)?;

        if touched {
            log::info!("poster replaced: {}", key.title);
            self.event_bus.emit(PosterReplaced::new(key.title.clone()));
        }
        Ok(touched)
    }

    pub fn list_movies(&self) -> AppResult<Vec<Movie>> {
        self.movie_repo.list_all()
    }

    pub fn find_movie(&self, key: &MovieKey) -> AppResult<Option<Movie>> {
        self.movie_repo.find_by_key(key)
    }
}
