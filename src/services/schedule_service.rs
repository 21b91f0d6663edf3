// src/services/schedule_service.rs
//
// Derived views over the collection: the month calendar grid and the
// upcoming feed. Owns the navigation cursor and the search query; every
// view is recomputed wholesale from the repository on each read, so the
// views can never drift from the collection.

use std::sync::{Arc, RwLock};

use chrono::{Local, NaiveDate};

use crate::domain::movie::Movie;
use crate::domain::schedule::{
    build_month_grid, upcoming_movies, CalendarCell, MonthCursor, ReleaseIndex,
};
use crate::error::AppResult;
use crate::repositories::MovieRepository;

/// Render model for one displayed month.
#[derive(Debug, Clone)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

pub struct ScheduleService {
    movie_repo: Arc<dyn MovieRepository>,
    cursor: RwLock<MonthCursor>,
    query: RwLock<String>,
}

impl ScheduleService {
    /// Starts at the month containing the real current date.
    pub fn new(movie_repo: Arc<dyn MovieRepository>) -> Self {
        Self::with_cursor(movie_repo, MonthCursor::for_date(Local::now().date_naive()))
    }

    /// Deterministic starting point, used by tests and restored sessions.
    pub fn with_cursor(movie_repo: Arc<dyn MovieRepository>, cursor: MonthCursor) -> Self {
        Self {
            movie_repo,
            cursor: RwLock::new(cursor),
            query: RwLock::new(String::new()),
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        *self.cursor.read().unwrap()
    }

    /// Moves the displayed month by `offset`. Navigating also clears the
    /// active search query (documented coupling, not an accident).
    pub fn change_month(&self, offset: i32) {
        let mut cursor = self.cursor.write().unwrap();
        *cursor = cursor.advance(offset);
        self.query.write().unwrap().clear();
        log::debug!("month changed to {}-{:02}", cursor.year, cursor.month);
    }

    pub fn set_query(&self, query: impl Into<String>) {
        *self.query.write().unwrap() = query.into();
    }

    pub fn query(&self) -> String {
        self.query.read().unwrap().clone()
    }

    /// The calendar grid for the displayed month, with today taken from
    /// the real clock.
    pub fn month_view(&self) -> AppResult<MonthView> {
        self.month_view_at(Local::now().date_naive())
    }

    /// Same grid with an explicit `today` (pure, testable).
    pub fn month_view_at(&self, today: NaiveDate) -> AppResult<MonthView> {
        let cursor = self.cursor();
        let movies = self.movie_repo.list_all()?;
        let index = ReleaseIndex::build(&movies);
        Ok(MonthView {
            year: cursor.year,
            month: cursor.month,
            cells: build_month_grid(cursor, &index, today),
        })
    }

    /// Movies releasing today or later, narrowed by the current query.
    pub fn upcoming_feed(&self) -> AppResult<Vec<Movie>> {
        self.upcoming_feed_at(Local::now().date_naive())
    }

    pub fn upcoming_feed_at(&self, today: NaiveDate) -> AppResult<Vec<Movie>> {
        let movies = self.movie_repo.list_all()?;
        Ok(upcoming_movies(&movies, today, &self.query()))
    }

    /// Full bucket for one day: the drill-down behind the overflow badge.
    pub fn day_movies(&self, date: NaiveDate) -> AppResult<Vec<Movie>> {
        let movies = self.movie_repo.list_all()?;
        Ok(ReleaseIndex::build(&movies).movies_on(date).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::DayLayout;
    use crate::repositories::InMemoryMovieRepository;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service_with(movies: Vec<Movie>, cursor: MonthCursor) -> ScheduleService {
        let repo = Arc::new(InMemoryMovieRepository::new());
        for m in movies {
            repo.add(m).unwrap();
        }
        ScheduleService::with_cursor(repo, cursor)
    }

    fn movie(title: &str, release: &str) -> Movie {
        Movie::new(title, date(release), "https://posters/test.jpg")
    }

    #[test]
    fn test_change_month_clears_query() {
        let service = service_with(vec![], MonthCursor::new(2024, 1));
        service.set_query("mat");
        service.change_month(1);

        assert_eq!(service.cursor(), MonthCursor::new(2024, 2));
        assert_eq!(service.query(), "");
    }

    #[test]
    fn test_month_view_reflects_collection() {
        let service = service_with(
            vec![movie("Dune", "2024-06-14"), movie("Inside Out 2", "2024-06-14")],
            MonthCursor::new(2024, 6),
        );
        let view = service.month_view_at(date("2024-06-15")).unwrap();

        assert_eq!(view.year, 2024);
        assert_eq!(view.month, 6);
        let day14 = view
            .cells
            .iter()
            .find_map(|c| match c {
                CalendarCell::Day(d) if d.day == 14 => Some(d),
                _ => None,
            })
            .unwrap();
        assert_eq!(day14.visible.len(), 2);
        assert_eq!(day14.layout, DayLayout::SplitPair);
    }

    #[test]
    fn test_upcoming_feed_applies_query() {
        let service = service_with(
            vec![
                movie("The Matrix", "2024-07-01"),
                movie("Inception", "2024-07-02"),
                movie("Matilda", "2024-07-03"),
            ],
            MonthCursor::new(2024, 7),
        );
        service.set_query("MAT");

        let feed = service.upcoming_feed_at(date("2024-06-01")).unwrap();
        let titles: Vec<&str> = feed.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["The Matrix", "Matilda"]);
    }

    #[test]
    fn test_day_movies_returns_whole_bucket() {
        let day = "2024-06-14";
        let service = service_with(
            (1..=5).map(|i| movie(&format!("M{}", i), day)).collect(),
            MonthCursor::new(2024, 6),
        );
        assert_eq!(service.day_movies(date(day)).unwrap().len(), 5);
        assert!(service.day_movies(date("2024-06-15")).unwrap().is_empty());
    }
}
