// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod movie;
pub mod schedule;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain
pub use movie::{parse_release_date, validate_movie, Movie, MovieKey, Tag, TagColor};

// Schedule Domain (Derived Data)
pub use schedule::{
    build_month_grid, upcoming_movies, CalendarCell, DayCell, DayLayout, MonthCursor,
    ReleaseIndex, MAX_VISIBLE_POSTERS,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid release date: {0}")]
    InvalidDate(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
