// Derived views over the movie collection.
//
// Everything in this module is a pure recomputation: no state, no clock
// access, no mutation of the collection it reads.

pub mod calendar;
pub mod release_index;
pub mod upcoming;

pub use calendar::{
    build_month_grid, CalendarCell, DayCell, DayLayout, MonthCursor, MAX_VISIBLE_POSTERS,
};
pub use release_index::ReleaseIndex;
pub use upcoming::upcoming_movies;
