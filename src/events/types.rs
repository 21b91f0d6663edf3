// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// COLLECTION EVENTS
// ============================================================================

/// Emitted when a new movie enters the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
    pub release_date: NaiveDate,
}

impl MovieAdded {
    pub fn new(title: String, release_date: NaiveDate) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            title,
            release_date,
        }
    }
}

impl DomainEvent for MovieAdded {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "MovieAdded"
    }
}

/// Emitted when an existing movie is replaced wholesale by an edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
}

impl MovieUpdated {
    pub fn new(title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            title,
        }
    }
}

impl DomainEvent for MovieUpdated {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "MovieUpdated"
    }
}

/// Emitted when a movie is deleted from the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
}

impl MovieRemoved {
    pub fn new(title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            title,
        }
    }
}

impl DomainEvent for MovieRemoved {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "MovieRemoved"
    }
}

/// Emitted when only the poster of a movie is swapped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterReplaced {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub title: String,
}

impl PosterReplaced {
    pub fn new(title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            title,
        }
    }
}

impl DomainEvent for PosterReplaced {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "PosterReplaced"
    }
}

// ============================================================================
// IDENTIFICATION EVENTS
// ============================================================================

/// Emitted when the poster-identification oracle cannot produce a usable
/// record for an uploaded image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentificationFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub reason: String,
}

impl IdentificationFailed {
    pub fn new(reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            reason,
        }
    }
}

impl DomainEvent for IdentificationFailed {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "IdentificationFailed"
    }
}
