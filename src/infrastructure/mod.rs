// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Contains implementation details that support the domain
// but are not part of the domain itself.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior
// - Infrastructure is replaceable

pub mod image_source;
pub mod notifier;
pub mod placeholder;

pub use image_source::{read_image_as_data_uri, ImageSource};
pub use notifier::{
    Notification, NotificationCenter, NotificationKind, NotificationSink, AUTO_DISMISS,
};
pub use placeholder::placeholder_poster_url;
