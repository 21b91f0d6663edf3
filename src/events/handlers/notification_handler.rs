// events/handlers/notification_handler.rs
//
// Translates collection events into transient user notifications.
//
// The sink is a side channel: it receives a message and a kind, displays
// for a fixed window, and requires no acknowledgment. Nothing here feeds
// back into the collection.

use std::sync::Arc;

use crate::events::bus::EventBus;
use crate::events::types::{
    IdentificationFailed, MovieAdded, MovieRemoved, MovieUpdated, PosterReplaced,
};
use crate::infrastructure::notifier::{Notification, NotificationSink};

/// Subscribes the notification sink to every user-visible collection event.
pub fn register_notification_handlers(bus: &EventBus, sink: Arc<dyn NotificationSink>) {
    let s = Arc::clone(&sink);
    bus.subscribe::<MovieAdded, _>(move |event| {
        s.notify(Notification::success(format!(
            "{} added successfully!",
            event.title
        )));
    });

    let s = Arc::clone(&sink);
    bus.subscribe::<MovieUpdated, _>(move |event| {
        s.notify(Notification::success(format!(
            "{} updated successfully!",
            event.title
        )));
    });

    let s = Arc::clone(&sink);
    bus.subscribe::<MovieRemoved, _>(move |event| {
        s.notify(Notification::success(format!("{} deleted.", event.title)));
    });

    let s = Arc::clone(&sink);
    bus.subscribe::<PosterReplaced, _>(move |event| {
        s.notify(Notification::success(format!(
            "Poster for {} updated.",
            event.title
        )));
    });

    bus.subscribe::<IdentificationFailed, _>(move |event| {
        sink.notify(Notification::error(event.reason.clone()));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::notifier::{NotificationCenter, NotificationKind};
    use chrono::NaiveDate;

    fn wired() -> (EventBus, Arc<NotificationCenter>) {
        let bus = EventBus::new();
        let center = Arc::new(NotificationCenter::new());
        register_notification_handlers(&bus, center.clone());
        (bus, center)
    }

    #[test]
    fn test_added_event_produces_success_toast() {
        let (bus, center) = wired();
        bus.emit(MovieAdded::new(
            "Dune".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        ));

        let active = center.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "Dune added successfully!");
        assert_eq!(active[0].kind, NotificationKind::Success);
    }

    #[test]
    fn test_removed_and_poster_events_use_original_wording() {
        let (bus, center) = wired();
        bus.emit(MovieRemoved::new("Dune".to_string()));
        bus.emit(PosterReplaced::new("Dune".to_string()));

        let messages: Vec<String> = center.active().iter().map(|n| n.message.clone()).collect();
        assert_eq!(messages, vec!["Dune deleted.", "Poster for Dune updated."]);
    }

    #[test]
    fn test_identification_failure_is_an_error_toast() {
        let (bus, center) = wired();
        bus.emit(IdentificationFailed::new("could not identify".to_string()));

        let active = center.active();
        assert_eq!(active[0].kind, NotificationKind::Error);
    }
}
