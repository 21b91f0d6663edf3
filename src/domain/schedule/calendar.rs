use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::movie::Movie;
use crate::domain::schedule::release_index::ReleaseIndex;

/// Maximum posters rendered directly inside a day cell; anything beyond
/// this becomes the overflow badge count.
pub const MAX_VISIBLE_POSTERS: usize = 3;

/// Navigation cursor for the displayed month. Always denotes the first
/// day of the month, so advancing can never overflow a short month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    /// 1-based calendar month
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    /// Cursor for the month containing `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Moves the cursor by `offset` whole months (negative = back).
    ///
    /// Works on month counts rather than dates, so January 31 + 1 month
    /// lands on February 1 instead of rolling into March.
    pub fn advance(self, offset: i32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + offset;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }
}

/// One slot of the 7-wide month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CalendarCell {
    /// Blank slot before day 1, aligning the first week
    Padding,
    Day(DayCell),
}

/// A day of the displayed month with its releases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    /// Up to [`MAX_VISIBLE_POSTERS`] movies rendered directly
    pub visible: Vec<Movie>,
    /// Releases beyond the visible cap
    pub overflow: usize,
    pub layout: DayLayout,
}

/// Poster arrangement inside a day cell, a pure function of how many
/// movies release that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayLayout {
    /// No releases
    Empty,
    /// One release: full-cell poster
    Single,
    /// Two releases: two-column split
    SplitPair,
    /// Three releases: one large left cell plus two stacked right cells
    MajorMinor,
    /// Four or more: three posters plus an overflow badge
    QuadOverflow,
}

impl DayLayout {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => DayLayout::Empty,
            1 => DayLayout::Single,
            2 => DayLayout::SplitPair,
            3 => DayLayout::MajorMinor,
            _ => DayLayout::QuadOverflow,
        }
    }
}

/// Builds the flat 7-column grid for the cursor's month.
///
/// Emits one padding cell per weekday before the 1st (Sunday-first), then
/// one day cell per calendar day. `today` is supplied by the caller so the
/// grid stays a pure function.
pub fn build_month_grid(
    cursor: MonthCursor,
    index: &ReleaseIndex,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let Some(first) = NaiveDate::from_ymd_opt(cursor.year, cursor.month, 1) else {
        return Vec::new();
    };

    let days_in_month = days_in_month(cursor);
    let first_weekday = first.weekday().num_days_from_sunday();

    let mut cells = Vec::with_capacity(first_weekday as usize + days_in_month as usize);
    for _ in 0..first_weekday {
        cells.push(CalendarCell::Padding);
    }

    for day in 1..=days_in_month {
        let Some(date) = NaiveDate::from_ymd_opt(cursor.year, cursor.month, day) else {
            continue;
        };
        let bucket = index.movies_on(date);
        cells.push(CalendarCell::Day(DayCell {
            day,
            date,
            is_today: date == today,
            visible: bucket.iter().take(MAX_VISIBLE_POSTERS).cloned().collect(),
            overflow: bucket.len().saturating_sub(MAX_VISIBLE_POSTERS),
            layout: DayLayout::for_count(bucket.len()),
        }));
    }

    cells
}

/// Day count of the cursor's month, via the distance to the next month's
/// first day.
fn days_in_month(cursor: MonthCursor) -> u32 {
    let first = NaiveDate::from_ymd_opt(cursor.year, cursor.month, 1);
    let next = cursor.advance(1);
    let next_first = NaiveDate::from_ymd_opt(next.year, next.month, 1);
    match (first, next_first) {
        (Some(a), Some(b)) => b.signed_duration_since(a).num_days() as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn movie(title: &str, release: NaiveDate) -> Movie {
        Movie::new(title, release, "https://posters/test.jpg")
    }

    fn day_cells(cells: &[CalendarCell]) -> Vec<&DayCell> {
        cells
            .iter()
            .filter_map(|c| match c {
                CalendarCell::Day(d) => Some(d),
                CalendarCell::Padding => None,
            })
            .collect()
    }

    #[test]
    fn test_padding_matches_first_weekday() {
        // May 1, 2024 is a Wednesday: exactly 3 padding cells
        let index = ReleaseIndex::default();
        let cells = build_month_grid(MonthCursor::new(2024, 5), &index, date(2024, 5, 15));
        let padding = cells
            .iter()
            .take_while(|c| matches!(c, CalendarCell::Padding))
            .count();
        assert_eq!(padding, 3);
        assert_eq!(cells.len(), 3 + 31);
    }

    #[test]
    fn test_sunday_start_month_has_no_padding() {
        // September 1, 2024 is a Sunday
        let index = ReleaseIndex::default();
        let cells = build_month_grid(MonthCursor::new(2024, 9), &index, date(2024, 9, 1));
        assert!(matches!(cells[0], CalendarCell::Day(_)));
        assert_eq!(cells.len(), 30);
    }

    #[test]
    fn test_leap_february_has_29_days() {
        let index = ReleaseIndex::default();
        let cells = build_month_grid(MonthCursor::new(2024, 2), &index, date(2024, 2, 1));
        let days = day_cells(&cells);
        assert_eq!(days.len(), 29);
        assert_eq!(days.last().unwrap().day, 29);
    }

    #[test]
    fn test_is_today_flagged_only_on_matching_day() {
        let index = ReleaseIndex::default();
        let today = date(2024, 6, 15);
        let cells = build_month_grid(MonthCursor::new(2024, 6), &index, today);
        let flagged: Vec<u32> = day_cells(&cells)
            .iter()
            .filter(|d| d.is_today)
            .map(|d| d.day)
            .collect();
        assert_eq!(flagged, vec![15]);

        // Different displayed month: nothing is flagged
        let cells = build_month_grid(MonthCursor::new(2024, 7), &index, today);
        assert!(day_cells(&cells).iter().all(|d| !d.is_today));
    }

    #[test]
    fn test_overflow_shows_three_plus_badge() {
        let day = date(2024, 6, 14);
        let movies: Vec<Movie> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|t| movie(t, day))
            .collect();
        let index = ReleaseIndex::build(&movies);
        let cells = build_month_grid(MonthCursor::new(2024, 6), &index, date(2024, 6, 1));

        let cell = day_cells(&cells)
            .into_iter()
            .find(|d| d.day == 14)
            .unwrap()
            .clone();
        let titles: Vec<&str> = cell.visible.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(cell.overflow, 2);
        assert_eq!(cell.layout, DayLayout::QuadOverflow);
    }

    #[test]
    fn test_layout_per_bucket_size() {
        assert_eq!(DayLayout::for_count(0), DayLayout::Empty);
        assert_eq!(DayLayout::for_count(1), DayLayout::Single);
        assert_eq!(DayLayout::for_count(2), DayLayout::SplitPair);
        assert_eq!(DayLayout::for_count(3), DayLayout::MajorMinor);
        assert_eq!(DayLayout::for_count(4), DayLayout::QuadOverflow);
        assert_eq!(DayLayout::for_count(17), DayLayout::QuadOverflow);
    }

    #[test]
    fn test_three_movies_have_no_overflow() {
        let day = date(2024, 6, 14);
        let movies: Vec<Movie> = ["A", "B", "C"].iter().map(|t| movie(t, day)).collect();
        let index = ReleaseIndex::build(&movies);
        let cells = build_month_grid(MonthCursor::new(2024, 6), &index, date(2024, 6, 1));
        let cell = day_cells(&cells).into_iter().find(|d| d.day == 14).unwrap().clone();
        assert_eq!(cell.visible.len(), 3);
        assert_eq!(cell.overflow, 0);
        assert_eq!(cell.layout, DayLayout::MajorMinor);
    }

    #[test]
    fn test_advance_lands_on_first_of_next_month() {
        // From January, +1 always means February 1 of the same year
        let jan = MonthCursor::new(2024, 1);
        assert_eq!(jan.advance(1), MonthCursor::new(2024, 2));
    }

    #[test]
    fn test_advance_crosses_year_boundaries() {
        let dec = MonthCursor::new(2024, 12);
        assert_eq!(dec.advance(1), MonthCursor::new(2025, 1));

        let jan = MonthCursor::new(2024, 1);
        assert_eq!(jan.advance(-1), MonthCursor::new(2023, 12));
        assert_eq!(jan.advance(-13), MonthCursor::new(2022, 12));
        assert_eq!(jan.advance(24), MonthCursor::new(2026, 1));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(MonthCursor::new(2024, 2)), 29);
        assert_eq!(days_in_month(MonthCursor::new(2023, 2)), 28);
        assert_eq!(days_in_month(MonthCursor::new(2024, 4)), 30);
        assert_eq!(days_in_month(MonthCursor::new(2024, 12)), 31);
    }
}
