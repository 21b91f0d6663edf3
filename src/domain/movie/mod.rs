pub mod entity;
pub mod invariants;

pub use entity::{parse_release_date, Movie, MovieKey, Tag, TagColor};
pub use invariants::validate_movie;
