//! Publish/subscribe registry keyed by channel name.

use super::{Change, Listener};
use crate::core::{Event, State};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Reference-counted listener, compared by identity on removal.
pub type SharedListener<E, S> = Arc<dyn Listener<E, S>>;

/// Listeners attached to all channels or to one named channel.
///
/// Channel names are not validated here; the automaton checks them
/// against its declared events before delegating.
pub struct ListenerRegistry<E, S> {
    global: Vec<SharedListener<E, S>>,
    named: BTreeMap<String, Vec<SharedListener<E, S>>>,
}

impl<E, S> Default for ListenerRegistry<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> ListenerRegistry<E, S> {
    pub fn new() -> Self {
        Self {
            global: Vec::new(),
            named: BTreeMap::new(),
        }
    }

    /// Attach a listener. The same listener may be attached more than once
    /// and is then notified once per attachment.
    pub fn add(&mut self, channel: Option<&str>, listener: SharedListener<E, S>) {
        match channel {
            None => self.global.push(listener),
            Some(name) => self
                .named
                .entry(name.to_string())
                .or_default()
                .push(listener),
        }
    }

    /// Detach one attachment of `listener`. Returns whether one was found.
    pub fn remove(&mut self, channel: Option<&str>, listener: &SharedListener<E, S>) -> bool {
        let list = match channel {
            None => Some(&mut self.global),
            Some(name) => self.named.get_mut(name),
        };
        let Some(list) = list else {
            return false;
        };
        match list.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Listeners attached to `channel`, or every attachment when `None`:
    /// global ones first, then named ones ordered by channel name.
    pub fn listeners(&self, channel: Option<&str>) -> Vec<SharedListener<E, S>> {
        match channel {
            None => self
                .global
                .iter()
                .chain(self.named.values().flatten())
                .cloned()
                .collect(),
            Some(name) => self.named.get(name).cloned().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.named.values().all(Vec::is_empty)
    }
}

impl<E: Event, S: State> ListenerRegistry<E, S> {
    /// Deliver a change to global listeners, then to the listeners of its channel.
    pub fn publish(&self, change: &Change<E, S>) {
        for listener in &self.global {
            listener.on_change(change);
        }
        if let Some(listeners) = self.named.get(&change.channel()) {
            for listener in listeners {
                listener.on_change(change);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event_enum, state_enum};
    use parking_lot::Mutex;

    state_enum! {
        enum Light { Off, On }
    }

    event_enum! {
        enum Switch { Flip }
    }

    fn recorder() -> (SharedListener<Switch, Light>, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let listener: SharedListener<Switch, Light> =
            Arc::new(move |change: &Change<Switch, Light>| sink.lock().push(change.channel()));
        (listener, log)
    }

    #[test]
    fn global_listener_receives_every_channel() {
        let mut registry = ListenerRegistry::new();
        let (listener, log) = recorder();
        registry.add(None, listener);

        registry.publish(&Change::State {
            old: None,
            new: Light::On,
        });
        registry.publish(&Change::Enablement {
            event: Switch::Flip,
            old: false,
            new: true,
        });

        assert_eq!(*log.lock(), vec!["state", "Flip_enabled"]);
    }

    #[test]
    fn named_listener_receives_only_its_channel() {
        let mut registry = ListenerRegistry::new();
        let (listener, log) = recorder();
        registry.add(Some("Flip_enabled"), listener);

        registry.publish(&Change::State {
            old: None,
            new: Light::On,
        });
        registry.publish(&Change::Enablement {
            event: Switch::Flip,
            old: true,
            new: true,
        });

        assert_eq!(*log.lock(), vec!["Flip_enabled"]);
    }

    #[test]
    fn remove_detaches_by_identity() {
        let mut registry = ListenerRegistry::new();
        let (listener, _) = recorder();
        let (other, _) = recorder();
        registry.add(Some("state"), Arc::clone(&listener));

        assert!(!registry.remove(Some("state"), &other));
        assert!(!registry.remove(None, &listener));
        assert_eq!(registry.listeners(Some("state")).len(), 1);

        assert!(registry.remove(Some("state"), &listener));
        assert!(registry.listeners(Some("state")).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn listing_without_channel_is_ordered_by_channel() {
        let mut registry = ListenerRegistry::new();
        let (global, _) = recorder();
        let (state, _) = recorder();
        let (flip, _) = recorder();
        let (reset, _) = recorder();
        registry.add(Some("state"), Arc::clone(&state));
        registry.add(Some("Reset_enabled"), Arc::clone(&reset));
        registry.add(None, Arc::clone(&global));
        registry.add(Some("Flip_enabled"), Arc::clone(&flip));

        let listed = registry.listeners(None);
        let expected = [global, flip, reset, state];

        assert_eq!(listed.len(), expected.len());
        for (listed, expected) in listed.iter().zip(&expected) {
            assert!(Arc::ptr_eq(listed, expected));
        }
    }

    #[test]
    fn listing_without_channel_includes_named_attachments() {
        let mut registry = ListenerRegistry::new();
        let (global, _) = recorder();
        let (named, _) = recorder();
        registry.add(None, global);
        registry.add(Some("state"), named);

        assert_eq!(registry.listeners(None).len(), 2);
        assert_eq!(registry.listeners(Some("state")).len(), 1);
        assert!(registry.listeners(Some("Flip_enabled")).is_empty());
    }
}
