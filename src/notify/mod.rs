//! Change notifications.
//!
//! Every committed state change publishes one [`Change::State`] followed by
//! one [`Change::Enablement`] per declared event. Listeners subscribe either
//! to every channel or to a single named channel:
//!
//! - `"state"` carries state changes
//! - `"<event>_enabled"` carries enablement of one event

mod registry;

pub use registry::{ListenerRegistry, SharedListener};

use crate::core::{Event, State};

/// Channel carrying state changes.
pub const STATE_CHANNEL: &str = "state";

/// Suffix appended to an event name to form its enablement channel.
pub const ENABLED_SUFFIX: &str = "_enabled";

/// Name of the enablement channel of `event`.
pub fn enabled_channel<E: Event>(event: &E) -> String {
    format!("{}{}", event.name(), ENABLED_SUFFIX)
}

/// A single published change.
#[derive(Clone, Debug, PartialEq)]
pub enum Change<E, S> {
    /// The current state moved from `old` (absent before initialization) to `new`.
    State { old: Option<S>, new: S },
    /// Enablement of `event` before and after the state change.
    Enablement { event: E, old: bool, new: bool },
}

impl<E: Event, S: State> Change<E, S> {
    /// Channel this change is published on.
    pub fn channel(&self) -> String {
        match self {
            Change::State { .. } => STATE_CHANNEL.to_string(),
            Change::Enablement { event, .. } => enabled_channel(event),
        }
    }

    /// Whether the old and new values differ.
    ///
    /// Enablement changes are published for every declared event on every
    /// state change, so listeners interested only in actual flips filter
    /// on this.
    pub fn is_flip(&self) -> bool {
        match self {
            Change::State { old, new } => old.as_ref() != Some(new),
            Change::Enablement { old, new, .. } => old != new,
        }
    }
}

/// Receiver of published changes.
///
/// Implemented for every `Fn(&Change<E, S>)` closure.
pub trait Listener<E, S>: Send + Sync {
    fn on_change(&self, change: &Change<E, S>);
}

impl<E, S, F> Listener<E, S> for F
where
    F: Fn(&Change<E, S>) + Send + Sync,
{
    fn on_change(&self, change: &Change<E, S>) {
        self(change)
    }
}
