// events/bus/event_bus.rs
//
// Core event bus implementation.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers execute immediately in subscription order
// 2. Deterministic - same events, same result
// 3. Observable - every emission is logged
// 4. Type-safe - events are strongly typed

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased handler; downcast to the concrete event type happens inside.
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Central coordination point for all domain events.
///
/// Services emit events; handlers subscribe without the two knowing about
/// each other. Execution is synchronous, in subscription order, and a
/// panicking handler never prevents later handlers from running.
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,
    emissions: Arc<RwLock<Vec<EmissionRecord>>>,
}

/// One logged emission, kept for debugging and tests.
#[derive(Debug, Clone)]
pub struct EmissionRecord {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            emissions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Subscribe a handler to one event type. Handlers run in the order
    /// they were subscribed.
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap();
        handlers
            .entry(TypeId::of::<E>())
            .or_insert_with(Vec::new)
            .push(wrapped);
    }

    /// Emit an event: log it, then run every handler registered for its
    /// type. Returns once all handlers have run.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers = self.handlers.read().unwrap();
        let event_handlers = handlers.get(&TypeId::of::<E>());
        let handler_count = event_handlers.map(|h| h.len()).unwrap_or(0);

        let record = EmissionRecord {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count,
        };
        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            record.event_type,
            record.event_id,
            record.handler_count
        );
        self.emissions.write().unwrap().push(record);

        if let Some(handlers) = event_handlers {
            for (idx, handler) in handlers.iter().enumerate() {
                // A panicking handler must not break the others
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    handler(&event as &dyn Any);
                }));
                if result.is_err() {
                    log::error!("handler {} for {} panicked", idx, event.event_type());
                }
            }
        }
    }

    /// Emission log so far, oldest first.
    pub fn emission_log(&self) -> Vec<EmissionRecord> {
        self.emissions.read().unwrap().clone()
    }

    pub fn clear_emission_log(&self) {
        self.emissions.write().unwrap().clear();
    }

    /// Number of handlers registered for an event type.
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let handlers = self.handlers.read().unwrap();
        handlers.get(&TypeId::of::<E>()).map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Shared-reference clone
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            emissions: Arc::clone(&self.emissions),
        }
    }
}
