// src/repositories/movie_repository.rs
//
// The movie collection store. The collection lives only in process memory
// for the session's duration; there is no persistence layer behind it.

use std::sync::RwLock;

use crate::domain::movie::{Movie, MovieKey};
use crate::error::AppResult;

/// Mutable set of movie records plus the ordering invariant.
///
/// Mutations are synchronous and total: the only "failure" is a missing
/// identity key, which is a silent no-op signalled through the `bool` in
/// the Ok value, never an error. Upstream flows guarantee the key exists
/// before calling.
pub trait MovieRepository: Send + Sync {
    /// Appends a record, then re-sorts the sequence ascending by release
    /// date (stable; equal dates keep insertion order). No uniqueness
    /// check: the producing flow only adds genuinely new identity keys.
    fn add(&self, movie: Movie) -> AppResult<()>;

    /// Replaces the first record matching `old_key` wholesale, leaving its
    /// sequence position unchanged. The sequence is NOT re-sorted, even if
    /// the new record's release date differs.
    fn update(&self, old_key: &MovieKey, movie: Movie) -> AppResult<bool>;

    /// Deletes the first record matching `key`.
    fn remove(&self, key: &MovieKey) -> AppResult<bool>;

    /// Targeted update touching only `poster_url`; every other field of
    /// the matching record is left untouched.
    fn replace_poster(&self, key: &MovieKey, poster_url: &str) -> AppResult<bool>;

    fn list_all(&self) -> AppResult<Vec<Movie>>;
    fn find_by_key(&self, key: &MovieKey) -> AppResult<Option<Movie>>;
    fn exists(&self, key: &MovieKey) -> AppResult<bool>;
}

pub struct InMemoryMovieRepository {
    movies: RwLock<Vec<Movie>>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self {
            movies: RwLock::new(Vec::new()),
        }
    }

    fn position_of(movies: &[Movie], key: &MovieKey) -> Option<usize> {
        movies
            .iter()
            .position(|m| m.title == key.title && m.release_date == key.release_date)
    }
}

impl Default for InMemoryMovieRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieRepository for InMemoryMovieRepository {
    fn add(&self, movie: Movie) -> AppResult<()> {
        let mut movies = self.movies.write().unwrap();
        movies.push(movie);
        // Vec::sort_by_key is stable: same-day releases keep insertion order
        movies.sort_by_key(|m| m.release_date);
        Ok(())
    }

    fn update(&self, old_key: &MovieKey, movie: Movie) -> AppResult<bool> {
        let mut movies = self.movies.write().unwrap();
        match Self::position_of(&movies, old_key) {
            Some(pos) => {
                movies[pos] = movie;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, key: &MovieKey) -> AppResult<bool> {
        let mut movies = self.movies.write().unwrap();
        match Self::position_of(&movies, key) {
            Some(pos) => {
                movies.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn replace_poster(&self, key: &MovieKey, poster_url: &str) -> AppResult<bool> {
        let mut movies = self.movies.write().unwrap();
        match Self::position_of(&movies, key) {
            Some(pos) => {
                movies[pos].poster_url = poster_url.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Movie>> {
        Ok(self.movies.read().unwrap().clone())
    }

    fn find_by_key(&self, key: &MovieKey) -> AppResult<Option<Movie>> {
        let movies = self.movies.read().unwrap();
        Ok(Self::position_of(&movies, key).map(|pos| movies[pos].clone()))
    }

    fn exists(&self, key: &MovieKey) -> AppResult<bool> {
        let movies = self.movies.read().unwrap();
        Ok(Self::position_of(&movies, key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn movie(title: &str, release: &str) -> Movie {
        Movie::new(title, date(release), "https://posters/test.jpg")
    }

    fn titles(repo: &InMemoryMovieRepository) -> Vec<String> {
        repo.list_all()
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect()
    }

    #[test]
    fn test_add_keeps_sequence_sorted_by_date() {
        let repo = InMemoryMovieRepository::new();
        repo.add(movie("Late", "2024-09-01")).unwrap();
        repo.add(movie("Early", "2024-01-01")).unwrap();
        repo.add(movie("Middle", "2024-05-01")).unwrap();

        assert_eq!(titles(&repo), vec!["Early", "Middle", "Late"]);

        let dates: Vec<NaiveDate> = repo
            .list_all()
            .unwrap()
            .iter()
            .map(|m| m.release_date)
            .collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_same_day_releases_keep_insertion_order() {
        let repo = InMemoryMovieRepository::new();
        repo.add(movie("First", "2024-06-14")).unwrap();
        repo.add(movie("Second", "2024-06-14")).unwrap();
        repo.add(movie("Third", "2024-06-14")).unwrap();

        assert_eq!(titles(&repo), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_update_moves_identity_to_new_key() {
        let repo = InMemoryMovieRepository::new();
        repo.add(movie("Old Title", "2024-06-14")).unwrap();

        let old_key = MovieKey {
            title: "Old Title".to_string(),
            release_date: date("2024-06-14"),
        };
        let touched = repo.update(&old_key, movie("New Title", "2024-06-14")).unwrap();
        assert!(touched);

        let new_key = MovieKey {
            title: "New Title".to_string(),
            release_date: date("2024-06-14"),
        };
        assert!(repo.find_by_key(&new_key).unwrap().is_some());
        assert!(repo.find_by_key(&old_key).unwrap().is_none());
    }

    #[test]
    fn test_update_changing_date_keeps_position() {
        // Documented quirk: only add re-sorts. An edit that moves the date
        // leaves the record in its old slot until the next add.
        let repo = InMemoryMovieRepository::new();
        repo.add(movie("A", "2024-01-01")).unwrap();
        repo.add(movie("B", "2024-05-01")).unwrap();
        repo.add(movie("C", "2024-09-01")).unwrap();

        let key = MovieKey {
            title: "A".to_string(),
            release_date: date("2024-01-01"),
        };
        repo.update(&key, movie("A", "2024-12-31")).unwrap();

        // "A" now has the latest date but still sits first
        assert_eq!(titles(&repo), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_update_vanished_key_is_silent_noop() {
        let repo = InMemoryMovieRepository::new();
        repo.add(movie("Keeper", "2024-06-14")).unwrap();

        let ghost = MovieKey {
            title: "Ghost".to_string(),
            release_date: date("2024-06-14"),
        };
        let touched = repo.update(&ghost, movie("Anything", "2024-06-15")).unwrap();
        assert!(!touched);
        assert_eq!(titles(&repo), vec!["Keeper"]);
    }

    #[test]
    fn test_remove_then_update_old_key_is_noop() {
        let repo = InMemoryMovieRepository::new();
        repo.add(movie("Dune", "2024-03-01")).unwrap();

        let key = MovieKey {
            title: "Dune".to_string(),
            release_date: date("2024-03-01"),
        };
        assert!(repo.remove(&key).unwrap());
        assert!(!repo.remove(&key).unwrap());
        assert!(!repo.update(&key, movie("Dune", "2024-03-01")).unwrap());
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_replace_poster_touches_only_poster() {
        let repo = InMemoryMovieRepository::new();
        let mut original = movie("Dune", "2024-03-01");
        original.genres = vec!["Sci-Fi".to_string()];
        original.cast = vec!["Timothee Chalamet".to_string()];
        repo.add(original.clone()).unwrap();

        let key = original.key();
        assert!(repo
            .replace_poster(&key, "data:image/png;base64,QUJD")
            .unwrap());

        let stored = repo.find_by_key(&key).unwrap().unwrap();
        assert_eq!(stored.poster_url, "data:image/png;base64,QUJD");
        assert_eq!(stored.genres, original.genres);
        assert_eq!(stored.cast, original.cast);
        assert_eq!(stored.title, original.title);
        assert_eq!(stored.release_date, original.release_date);
    }

    #[test]
    fn test_update_matches_first_of_duplicate_keys() {
        // Identical (title, date) pairs are indistinguishable; operations
        // target the first match.
        let repo = InMemoryMovieRepository::new();
        let mut first = movie("Twin", "2024-06-14");
        first.poster_url = "first".to_string();
        let mut second = movie("Twin", "2024-06-14");
        second.poster_url = "second".to_string();
        repo.add(first).unwrap();
        repo.add(second).unwrap();

        let key = MovieKey {
            title: "Twin".to_string(),
            release_date: date("2024-06-14"),
        };
        repo.replace_poster(&key, "patched").unwrap();

        let posters: Vec<String> = repo
            .list_all()
            .unwrap()
            .into_iter()
            .map(|m| m.poster_url)
            .collect();
        assert_eq!(posters, vec!["patched", "second"]);
    }
}
