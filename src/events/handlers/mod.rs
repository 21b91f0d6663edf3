// src/events/handlers/mod.rs
//
// Event Handlers - INTERNAL MODULE
//
// Handlers use closure-based subscription via EventBus::subscribe; only
// the registration functions are exported, never handler internals.

pub mod notification_handler;

pub use notification_handler::register_notification_handlers;
