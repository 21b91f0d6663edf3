// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod collection_service;
pub mod schedule_service;
pub mod session_service;


// Re-export all services and their types
pub use collection_service::CollectionService;

pub use schedule_service::{MonthView, ScheduleService};

pub use session_service::{EditSession, MovieDraft, SaveOutcome, SessionService};
