// src/lib.rs
// CineCal - Local-first movie release calendar and collection engine
//
// Architecture:
// - Domain-centric: entities and derived views live in domains
// - Event-driven: services coordinate through a synchronous event bus
// - Explicit: no implicit behavior, no magic
// - In-memory: the collection exists only for the process lifetime

// ============================================================================
// MODULES
// ============================================================================

pub mod application;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod integrations;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    build_month_grid,
    parse_release_date,
    upcoming_movies,
    validate_movie,
    CalendarCell,
    DayCell,
    DayLayout,
    MonthCursor,
    // Movie
    Movie,
    MovieKey,
    // Schedule
    ReleaseIndex,
    Tag,
    TagColor,
    MAX_VISIBLE_POSTERS,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    register_notification_handlers,
    DomainEvent,
    EmissionRecord,
    EventBus,
    IdentificationFailed,
    MovieAdded,
    MovieRemoved,
    MovieUpdated,
    PosterReplaced,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{InMemoryMovieRepository, MovieRepository};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::{
    placeholder_poster_url, read_image_as_data_uri, ImageSource, Notification,
    NotificationCenter, NotificationKind, NotificationSink, AUTO_DISMISS,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Collection Service
    CollectionService,
    // Edit Session Controller
    EditSession,
    MonthView,
    MovieDraft,
    SaveOutcome,
    // Schedule Service
    ScheduleService,
    SessionService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{IdentifiedMovie, PosterOracle, VisionClient};
