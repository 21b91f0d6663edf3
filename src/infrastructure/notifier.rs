// src/infrastructure/notifier.rs
//
// Transient user notifications (toasts).
//
// The sink receives a message and a kind; the rendering layer displays it
// for a fixed window and may dismiss it early. No acknowledgment flows
// back, and no notification affects collection state.

use std::sync::RwLock;
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

/// Fixed display window before a notification auto-dismisses.
pub const AUTO_DISMISS: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    /// How long the rendering layer keeps this visible
    pub auto_dismiss: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            auto_dismiss: AUTO_DISMISS,
        }
    }
}

/// Anything able to receive notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// In-memory sink holding the currently visible notifications.
#[derive(Default)]
pub struct NotificationCenter {
    active: RwLock<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently visible notifications, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.active.read().unwrap().clone()
    }

    /// Early dismissal; returns whether the notification was still active.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut active = self.active.write().unwrap();
        let before = active.len();
        active.retain(|n| n.id != id);
        active.len() != before
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, notification: Notification) {
        log::debug!(
            "notification ({:?}): {}",
            notification.kind,
            notification.message
        );
        self.active.write().unwrap().push(notification);
    }
}
