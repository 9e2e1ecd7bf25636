//! Event wiring for page scripts.
//!
//! Scripts register handlers for a target node and an event kind and get a
//! [`Subscription`] back. Dispatch runs the target's handlers for that kind
//! in registration order; a failing handler is logged and reported without
//! stopping the ones after it. Disposing a subscription removes exactly its
//! handler, so tests can tear wiring down deterministically.

use std::fmt;

use log::warn;

use crate::{
    document::{Document, NodeId},
    error::Result,
    report::ConversionReport,
};

/// Events the page scripts react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The page finished loading.
    Load,
    /// A form control's value changed.
    Change,
    /// A tab (or other hidden section) was shown.
    Shown,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Load => "load",
            EventKind::Change => "change",
            EventKind::Shown => "shown",
        };
        f.write_str(name)
    }
}

/// Token identifying one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "a subscription is the only way to remove its handler"]
pub struct Subscription(u64);

/// A registered event handler.
pub type Handler = Box<dyn FnMut(&mut Document, NodeId) -> Result<ConversionReport>>;

struct Registration {
    subscription: Subscription,
    target: NodeId,
    kind: EventKind,
    handler: Handler,
}

/// What one handler did during a dispatch.
#[derive(Debug)]
pub struct HandlerOutcome {
    pub subscription: Subscription,
    pub result: Result<ConversionReport>,
}

/// Handlers keyed by target node and event kind.
#[derive(Default)]
pub struct EventRegistry {
    registrations: Vec<Registration>,
    next_id: u64,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `kind` events on `target`.
    pub fn on<F>(&mut self, target: NodeId, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&mut Document, NodeId) -> Result<ConversionReport> + 'static,
    {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            subscription,
            target,
            kind,
            handler: Box::new(handler),
        });
        subscription
    }

    /// Removes a handler. Returns whether it was still registered.
    pub fn dispose(&mut self, subscription: Subscription) -> bool {
        let before = self.registrations.len();
        self.registrations
            .retain(|registration| registration.subscription != subscription);
        self.registrations.len() != before
    }

    /// Removes every handler.
    pub fn clear(&mut self) {
        self.registrations.clear();
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Runs every `kind` handler registered on `target`.
    pub fn dispatch(&mut self, doc: &mut Document, target: NodeId, kind: EventKind) -> Vec<HandlerOutcome> {
        let mut outcomes = Vec::new();

        for registration in self
            .registrations
            .iter_mut()
            .filter(|r| r.target == target && r.kind == kind)
        {
            let result = (registration.handler)(doc, target);
            if let Err(error) = &result {
                warn!("{kind} handler failed: {error}");
            }
            outcomes.push(HandlerOutcome {
                subscription: registration.subscription,
                result,
            });
        }

        outcomes
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("handlers", &self.registrations.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::{error::MeridianError, report::Script};

    fn recording(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Handler {
        let log = Rc::clone(log);
        Box::new(move |_doc: &mut Document, _target: NodeId| {
            log.borrow_mut().push(name);
            Ok(ConversionReport::new(Script::Labels))
        })
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::new();

        let _first = registry.on(root, EventKind::Load, recording(&log, "first"));
        let _other = registry.on(root, EventKind::Change, recording(&log, "change"));
        let _second = registry.on(root, EventKind::Load, recording(&log, "second"));

        let outcomes = registry.dispatch(&mut doc, root, EventKind::Load);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_dispatch_only_reaches_target() {
        let mut doc = Document::new();
        let input = doc.append_element(doc.root(), "input", &[]);
        let other = doc.append_element(doc.root(), "input", &[]);
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::new();

        let _sub = registry.on(input, EventKind::Change, recording(&log, "input"));

        assert!(registry.dispatch(&mut doc, other, EventKind::Change).is_empty());
        assert_eq!(registry.dispatch(&mut doc, input, EventKind::Change).len(), 1);
    }

    #[test]
    fn test_dispose_removes_only_that_handler() {
        let mut doc = Document::new();
        let root = doc.root();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::new();

        let first = registry.on(root, EventKind::Load, recording(&log, "first"));
        let _second = registry.on(root, EventKind::Load, recording(&log, "second"));

        assert!(registry.dispose(first));
        assert!(!registry.dispose(first));
        assert_eq!(registry.len(), 1);

        registry.dispatch(&mut doc, root, EventKind::Load);
        assert_eq!(*log.borrow(), vec!["second"]);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failing_handler_does_not_stop_the_rest() {
        let mut doc = Document::new();
        let root = doc.root();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::new();

        let _failing = registry.on(root, EventKind::Load, |_doc: &mut Document, _target: NodeId| {
            Err(MeridianError::OffsetUnavailable("no clock".to_string()))
        });
        let _after = registry.on(root, EventKind::Load, recording(&log, "after"));

        let outcomes = registry.dispatch(&mut doc, root, EventKind::Load);
        assert!(outcomes[0].result.is_err());
        assert!(outcomes[1].result.is_ok());
        assert_eq!(*log.borrow(), vec!["after"]);
    }
}
