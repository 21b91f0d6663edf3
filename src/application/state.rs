// src/application/state.rs

use std::sync::Arc;

use crate::events::{register_notification_handlers, EventBus};
use crate::infrastructure::notifier::{NotificationCenter, NotificationSink};
use crate::repositories::{InMemoryMovieRepository, MovieRepository};
use crate::services::{CollectionService, ScheduleService, SessionService};

/// Application state handed to the rendering layer.
/// All fields are Arc-wrapped for sharing across UI callbacks.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub collection_service: Arc<CollectionService>,
    pub schedule_service: Arc<ScheduleService>,
    pub session_service: Arc<SessionService>,
    pub notifications: Arc<NotificationCenter>,
}

impl AppState {
    /// Wires the whole engine in dependency order: infrastructure,
    /// repository, services, event handlers. The collection starts empty
    /// and lives only for the process lifetime.
    pub fn bootstrap() -> Self {
        // 1. INFRASTRUCTURE
        let event_bus = Arc::new(EventBus::new());
        let notifications = Arc::new(NotificationCenter::new());

        // 2. REPOSITORIES
        let movie_repo: Arc<dyn MovieRepository> = Arc::new(InMemoryMovieRepository::new());

        // 3. SERVICES
        let collection_service = Arc::new(CollectionService::new(
            movie_repo.clone(),
            event_bus.clone(),
        ));
        let schedule_service = Arc::new(ScheduleService::new(movie_repo.clone()));
        let session_service = Arc::new(SessionService::new(
            collection_service.clone(),
            event_bus.clone(),
        ));

        // 4. EVENT HANDLERS
        register_notification_handlers(
            &event_bus,
            notifications.clone() as Arc<dyn NotificationSink>,
        );

        Self {
            event_bus,
            collection_service,
            schedule_service,
            session_service,
            notifications,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::bootstrap()
    }
}
