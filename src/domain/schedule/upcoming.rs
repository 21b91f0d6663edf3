use chrono::NaiveDate;

use crate::domain::movie::Movie;

/// Movies releasing today or later, optionally narrowed by a
/// case-insensitive substring match on the title.
///
/// "Upcoming" compares at day granularity, so a movie releasing on
/// `today` is included. An empty query passes everything through.
/// Preserves the input order; never reorders the collection.
pub fn upcoming_movies(movies: &[Movie], today: NaiveDate, query: &str) -> Vec<Movie> {
    let needle = query.to_lowercase();
    movies
        .iter()
        .filter(|movie| movie.release_date >= today)
        .filter(|movie| query.is_empty() || movie.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn movie(title: &str, release: &str) -> Movie {
        Movie::new(title, date(release), "https://posters/test.jpg")
    }

    #[test]
    fn test_today_is_inclusive() {
        let movies = vec![
            movie("Yesterday", "2024-06-14"),
            movie("Today", "2024-06-15"),
            movie("Tomorrow", "2024-06-16"),
        ];
        let result = upcoming_movies(&movies, date("2024-06-15"), "");
        let titles: Vec<&str> = result.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Today", "Tomorrow"]);
    }

    #[test]
    fn test_query_matches_case_insensitively() {
        let movies = vec![
            movie("The Matrix", "2024-07-01"),
            movie("Inception", "2024-07-02"),
            movie("Matilda", "2024-07-03"),
        ];
        let result = upcoming_movies(&movies, date("2024-06-01"), "mat");
        let titles: Vec<&str> = result.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["The Matrix", "Matilda"]);
    }

    #[test]
    fn test_empty_query_passes_everything() {
        let movies = vec![movie("A", "2024-07-01"), movie("B", "2024-07-02")];
        assert_eq!(upcoming_movies(&movies, date("2024-06-01"), "").len(), 2);
    }

    #[test]
    fn test_query_does_not_resurrect_past_releases() {
        let movies = vec![movie("The Matrix", "1999-03-31")];
        assert!(upcoming_movies(&movies, date("2024-06-01"), "matrix").is_empty());
    }

    #[test]
    fn test_input_order_is_preserved() {
        let movies = vec![
            movie("B", "2024-07-02"),
            movie("A", "2024-07-01"),
            movie("C", "2024-07-03"),
        ];
        let result = upcoming_movies(&movies, date("2024-06-01"), "");
        let titles: Vec<&str> = result.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }
}
