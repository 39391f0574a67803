//=========================================================================
// Event Listener Registry
//=========================================================================
//
// Maps each event kind to an ordered list of callbacks.
//
// Architecture:
//   register(kind, cb) → HashMap<EventKind, Vec<Listener>>
//                              ↓
//   fire(&event, &mut ctx) → listeners[event.kind()] in registration order
//
// Contract:
// - Insertion order is invocation order
// - No deduplication, priorities, or removal
// - A listener returning `Err` is logged and skipped; the remaining
//   listeners for the same event still run
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::error::Error;

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::context::Context;
use super::event::{Event, EventKind};

//=== Public API ==========================================================

/// Result returned by every listener.
pub type ListenerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Boxed listener callback.
pub type Listener = Box<dyn FnMut(&mut Context, &Event) -> ListenerResult>;

/// Counters describing one `fire` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Listeners invoked (successful or not).
    pub invoked: usize,

    /// Listeners that returned an error.
    pub failed: usize,
}

impl DispatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

//=== EventRegistry =======================================================

/// Ordered listener lists keyed by [`EventKind`].
#[derive(Default)]
pub struct EventRegistry {
    listeners: HashMap<EventKind, Vec<Listener>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Appends `callback` to the listeners of `kind`.
    pub fn register<F>(&mut self, kind: EventKind, callback: F)
    where
        F: FnMut(&mut Context, &Event) -> ListenerResult + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(callback));
    }

    /// Number of listeners registered for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    //--- Dispatch ---------------------------------------------------------

    /// Invokes every listener registered for `event.kind()`, in order.
    pub fn fire(&mut self, event: &Event, context: &mut Context) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        let Some(listeners) = self.listeners.get_mut(&event.kind()) else {
            trace!("No listeners for {:?}", event);
            return outcome;
        };

        for (index, listener) in listeners.iter_mut().enumerate() {
            outcome.invoked += 1;
            if let Err(e) = listener(context, event) {
                outcome.failed += 1;
                warn!("Listener #{} for {:?} failed: {}", index, event.kind(), e);
            }
        }

        trace!(
            "Dispatched {:?} to {} listener(s), {} failed",
            event,
            outcome.invoked,
            outcome.failed
        );
        outcome
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self
            .listeners
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        f.debug_struct("EventRegistry").field("listeners", &counts).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::core::context::GameState;
    use crate::core::event::KeyCode;
    use crate::core::math::Color;
    use crate::core::resources::ResourceManager;

    fn context() -> Context {
        let mut ctx = Context::new(ResourceManager::new(), Color::GRAY);
        ctx.set_state(GameState::Running);
        ctx
    }

    //=====================================================================
    // Ordering
    //=====================================================================

    #[test]
    fn listeners_fire_once_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::new();

        for i in 0..5 {
            let log = Rc::clone(&log);
            registry.register(EventKind::KeyDown, move |_, _| {
                log.borrow_mut().push(i);
                Ok(())
            });
        }

        let outcome = registry.fire(&Event::KeyDown(KeyCode::KeyA), &mut context());

        assert_eq!(*log.borrow(), vec![0, 1, 2, 3, 4]);
        assert_eq!(outcome, DispatchOutcome { invoked: 5, failed: 0 });
    }

    #[test]
    fn same_callback_registered_twice_runs_twice() {
        let hits = Rc::new(RefCell::new(0));
        let mut registry = EventRegistry::new();
        for _ in 0..2 {
            let hits = Rc::clone(&hits);
            registry.register(EventKind::Quit, move |_, _| {
                *hits.borrow_mut() += 1;
                Ok(())
            });
        }

        registry.fire(&Event::Quit, &mut context());
        assert_eq!(*hits.borrow(), 2);
        assert_eq!(registry.count(EventKind::Quit), 2);
    }

    //=====================================================================
    // Routing
    //=====================================================================

    #[test]
    fn only_matching_kind_fires() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::new();

        let h = Rc::clone(&hits);
        registry.register(EventKind::KeyDown, move |_, e| {
            h.borrow_mut().push(*e);
            Ok(())
        });

        registry.fire(&Event::KeyUp(KeyCode::KeyA), &mut context());
        registry.fire(&Event::Quit, &mut context());
        registry.fire(&Event::KeyDown(KeyCode::KeyB), &mut context());

        assert_eq!(*hits.borrow(), vec![Event::KeyDown(KeyCode::KeyB)]);
    }

    #[test]
    fn fire_without_listeners_is_noop() {
        let mut registry = EventRegistry::new();
        let outcome = registry.fire(&Event::Quit, &mut context());
        assert_eq!(outcome, DispatchOutcome::default());
    }

    //=====================================================================
    // Failure Isolation
    //=====================================================================

    #[test]
    fn failing_listener_does_not_stop_dispatch() {
        let ran_after = Rc::new(RefCell::new(false));
        let mut registry = EventRegistry::new();

        registry.register(EventKind::Quit, |_, _| Err("boom".into()));
        let r = Rc::clone(&ran_after);
        registry.register(EventKind::Quit, move |_, _| {
            *r.borrow_mut() = true;
            Ok(())
        });

        let outcome = registry.fire(&Event::Quit, &mut context());

        assert!(*ran_after.borrow());
        assert_eq!(outcome.invoked, 2);
        assert_eq!(outcome.failed, 1);
        assert!(!outcome.is_clean());
    }

    //=====================================================================
    // Context Access
    //=====================================================================

    #[test]
    fn listener_can_quit_through_context() {
        let mut registry = EventRegistry::new();
        registry.register(EventKind::KeyDown, |ctx, event| {
            if event.key() == Some(KeyCode::Escape) {
                ctx.quit();
            }
            Ok(())
        });

        let mut ctx = context();
        registry.fire(&Event::KeyDown(KeyCode::KeyA), &mut ctx);
        assert!(ctx.should_run());

        registry.fire(&Event::KeyDown(KeyCode::Escape), &mut ctx);
        assert!(!ctx.should_run());
    }
}
