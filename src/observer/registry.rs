use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::debug;

use super::listener::EventListener;
use crate::error::ListenerError;

/// Non-owning handle the registry keeps for each subscription.
///
/// Use [`listener_ref`] for an `Rc` of a concrete listener type; an
/// `Rc<dyn EventListener<P>>` can go through `Rc::downgrade` directly.
pub type ListenerRef<P> = Weak<dyn EventListener<P>>;

/// Downgrades a concrete listener into the handle the registry stores.
pub fn listener_ref<P, L>(listener: &Rc<L>) -> ListenerRef<P>
where
    P: ?Sized,
    L: EventListener<P> + 'static,
{
    let weak: Weak<L> = Rc::downgrade(listener);
    weak
}

/// Maps each declared event type to its subscribers, in subscription order.
///
/// The vocabulary is fixed at construction. Subscribing, unsubscribing or
/// notifying an undeclared type does nothing.
pub struct EventRegistry<P: ?Sized> {
    listeners: HashMap<String, Vec<ListenerRef<P>>>,
}

impl<P: ?Sized> EventRegistry<P> {
    pub fn new<I, S>(event_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let listeners = event_types
            .into_iter()
            .map(|event_type| (event_type.into(), Vec::new()))
            .collect();
        Self { listeners }
    }

    pub fn subscribe(&mut self, event_type: &str, listener: ListenerRef<P>) {
        let Some(list) = self.listeners.get_mut(event_type) else {
            debug!(event_type, "subscribe ignored: undeclared event type");
            return;
        };
        list.retain(|existing| existing.strong_count() > 0);
        list.push(listener);
        debug!(event_type, subscribers = list.len(), "listener subscribed");
    }

    /// Removes the first subscription pointing at `listener`.
    pub fn unsubscribe(&mut self, event_type: &str, listener: &ListenerRef<P>) {
        let Some(list) = self.listeners.get_mut(event_type) else {
            debug!(event_type, "unsubscribe ignored: undeclared event type");
            return;
        };
        if let Some(index) = list.iter().position(|existing| existing.ptr_eq(listener)) {
            list.remove(index);
            debug!(event_type, subscribers = list.len(), "listener unsubscribed");
        }
        list.retain(|existing| existing.strong_count() > 0);
    }

    /// Calls every live subscriber of `event_type` in order.
    ///
    /// Stops at the first listener error and returns it as is; the
    /// listeners after it are not called.
    pub fn notify(&self, event_type: &str, payload: &P) -> Result<(), ListenerError> {
        let Some(list) = self.listeners.get(event_type) else {
            debug!(event_type, "notify ignored: undeclared event type");
            return Ok(());
        };
        for listener in list.iter().filter_map(Weak::upgrade) {
            listener.update(event_type, payload)?;
        }
        Ok(())
    }

    pub fn is_registered(&self, event_type: &str) -> bool {
        self.listeners.contains_key(event_type)
    }

    /// Live subscriptions for `event_type`, counting each duplicate.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).map_or(0, |list| {
            list.iter()
                .filter(|listener| listener.strong_count() > 0)
                .count()
        })
    }

    pub fn event_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.listeners.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl<P: ?Sized> std::fmt::Debug for EventRegistry<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for event_type in self.event_types() {
            map.entry(&event_type, &self.listener_count(event_type));
        }
        map.finish()
    }
}
