use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use super::core::{DomainEvent, EventEnvelope, EventHandler};
use super::error::{DispatchError, HandlerFailure};

// ============================================================================
// Event Dispatcher - In-Process Domain Event Fan-Out
// ============================================================================
//
// Registry of event type -> ordered handler list.
//
// Registry rules:
// - A key only appears through `register`
// - Handler order is registration order, duplicates allowed
// - Unregistering the last handler leaves an empty list behind
// - Only `unregister_all` makes a key absent again
//
// Handler failures are isolated: every handler runs, failures are collected
// and reported once the fan-out is complete.
//
// ============================================================================

/// Handlers subscribed to one payload type
struct HandlerList<E: DomainEvent> {
    handlers: Vec<Arc<dyn EventHandler<E>>>,
}

/// Type-erased view over a `HandlerList<E>`
trait RegisteredHandlers: Any + Send + Sync {
    fn event_type(&self) -> &'static str;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: DomainEvent> RegisteredHandlers for HandlerList<E> {
    fn event_type(&self) -> &'static str {
        E::event_type()
    }

    fn len(&self) -> usize {
        self.handlers.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Default)]
pub struct EventDispatcher {
    registry: HashMap<TypeId, Box<dyn RegisteredHandlers>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the list for `E`, creating the list if needed.
    ///
    /// Registering the same handler twice yields two entries.
    pub fn register<E: DomainEvent>(&mut self, handler: Arc<impl EventHandler<E> + 'static>) {
        let handler: Arc<dyn EventHandler<E>> = handler;

        let entry = self
            .registry
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(HandlerList::<E> { handlers: Vec::new() }));

        if let Some(list) = entry.as_any_mut().downcast_mut::<HandlerList<E>>() {
            tracing::debug!(
                event_type = E::event_type(),
                handler = handler.name(),
                position = list.handlers.len(),
                "Registering event handler"
            );
            list.handlers.push(handler);
        }
    }

    /// Remove the first registration of `handler` (by identity) for `E`.
    ///
    /// Unknown event types and handlers are ignored.
    pub fn unregister<E: DomainEvent>(&mut self, handler: &Arc<impl ?Sized + EventHandler<E>>) {
        let Some(list) = self.list_mut::<E>() else {
            tracing::debug!(
                event_type = E::event_type(),
                "Unregister ignored, event type has no handlers"
            );
            return;
        };

        let target = Arc::as_ptr(handler) as *const ();
        let position = list
            .handlers
            .iter()
            .position(|registered| Arc::as_ptr(registered) as *const () == target);

        match position {
            Some(position) => {
                let removed = list.handlers.remove(position);
                tracing::debug!(
                    event_type = E::event_type(),
                    handler = removed.name(),
                    position,
                    remaining = list.handlers.len(),
                    "Unregistered event handler"
                );
            }
            None => {
                tracing::debug!(
                    event_type = E::event_type(),
                    "Unregister ignored, handler not registered"
                );
            }
        }
    }

    /// Drop every registration. Previously known event types become absent.
    pub fn unregister_all(&mut self) {
        tracing::debug!(event_types = self.registry.len(), "Clearing event handler registry");
        self.registry.clear();
    }

    /// Invoke every handler registered for `E`, in registration order.
    ///
    /// A failing handler does not stop the fan-out. If any handler failed the
    /// collected failures are returned once all handlers have run.
    pub fn notify<E: DomainEvent>(&self, event: &EventEnvelope<E>) -> Result<(), DispatchError> {
        let Some(list) = self.list::<E>() else {
            tracing::trace!(event_type = E::event_type(), "No handlers registered for event");
            return Ok(());
        };

        let mut failures = Vec::new();

        for (position, handler) in list.handlers.iter().enumerate() {
            if let Err(error) = handler.handle(event) {
                tracing::warn!(
                    event_type = E::event_type(),
                    event_id = %event.event_id,
                    handler = handler.name(),
                    position,
                    error = %error,
                    "Event handler failed"
                );
                failures.push(HandlerFailure {
                    handler: handler.name().to_string(),
                    position,
                    error,
                });
            }
        }

        tracing::debug!(
            event_type = E::event_type(),
            event_id = %event.event_id,
            invoked = list.handlers.len(),
            failed = failures.len(),
            "Event dispatched"
        );

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::HandlersFailed {
                event_type: E::event_type(),
                invoked: list.handlers.len(),
                failures,
            })
        }
    }

    /// Handlers registered for `E`.
    ///
    /// `None` means the type was never registered (or the registry was
    /// cleared); `Some(&[])` means every handler has been unregistered.
    pub fn event_handlers<E: DomainEvent>(&self) -> Option<&[Arc<dyn EventHandler<E>>]> {
        self.list::<E>().map(|list| list.handlers.as_slice())
    }

    pub fn is_registered<E: DomainEvent>(&self) -> bool {
        self.registry.contains_key(&TypeId::of::<E>())
    }

    pub fn handler_count<E: DomainEvent>(&self) -> usize {
        self.list::<E>().map_or(0, |list| list.handlers.len())
    }

    /// Every present event type by name, with its number of handlers
    pub fn registry_view(&self) -> BTreeMap<&'static str, usize> {
        self.registry
            .values()
            .map(|list| (list.event_type(), list.len()))
            .collect()
    }

    fn list<E: DomainEvent>(&self) -> Option<&HandlerList<E>> {
        self.registry
            .get(&TypeId::of::<E>())
            .and_then(|list| list.as_any().downcast_ref::<HandlerList<E>>())
    }

    fn list_mut<E: DomainEvent>(&mut self) -> Option<&mut HandlerList<E>> {
        self.registry
            .get_mut(&TypeId::of::<E>())
            .and_then(|list| list.as_any_mut().downcast_mut::<HandlerList<E>>())
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("registry", &self.registry_view())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
