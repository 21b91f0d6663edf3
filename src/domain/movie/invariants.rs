use super::entity::Movie;
use crate::domain::{DomainError, DomainResult};

/// Validates all Movie invariants
/// These are the absolute rules that must hold for a Movie to be valid.
/// Producers (the edit session, the oracle mapping) call this before
/// handing a record to the collection; the collection never re-validates.
pub fn validate_movie(movie: &Movie) -> DomainResult<()> {
    validate_title(&movie.title)?;
    validate_tag(movie)?;
    Ok(())
}

/// Title cannot be empty
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// A tag, when present, must carry visible text
fn validate_tag(movie: &Movie) -> DomainResult<()> {
    if let Some(tag) = &movie.tag {
        if tag.text.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Movie tag must have non-empty text".to_string(),
            ));
        }
    }
    Ok(())
}

/// Invariants that must hold true for the Movie domain:
///
/// 1. Title is non-empty after trimming
/// 2. Release date is a valid calendar date (guaranteed by the type)
/// 3. Genres and cast may be empty
/// 4. A tag exists only with non-empty text
/// 5. Identity is the (title, release date) pair
/// 6. Duplicate identities are never created by the producing flows
