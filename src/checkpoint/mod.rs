//! Checkpoint and resume functionality for automata.
//!
//! A checkpoint captures where an automaton is and how it got there. The
//! tables are not part of it: guards and actions are code, not data, so a
//! checkpoint can only be restored into an automaton built with the same
//! registrations.
//!
//! # Example
//!
//! ```rust
//! use automaton::checkpoint::Checkpoint;
//! use automaton::{event_enum, state_enum, Automaton};
//!
//! state_enum! {
//!     enum Light { Off, On }
//! }
//! event_enum! {
//!     enum Switch { Flip }
//! }
//!
//! fn lamp() -> Automaton<Switch, Light> {
//!     let mut lamp = Automaton::new(Switch::ALL.to_vec(), Light::ALL.to_vec()).unwrap();
//!     lamp.register_transition(Light::Off, Switch::Flip, Light::On);
//!     lamp.register_transition(Light::On, Switch::Flip, Light::Off);
//!     lamp.register_initialization(Light::Off);
//!     lamp
//! }
//!
//! let mut first = lamp();
//! first.initialize(&[]).unwrap();
//! first.accept_event(Switch::Flip, &[]).unwrap();
//! let json = first.checkpoint().to_json().unwrap();
//!
//! let mut second = lamp();
//! second.restore(&Checkpoint::from_json(&json).unwrap()).unwrap();
//! assert_eq!(second.current_state(), Some(&Light::On));
//! assert_eq!(second.history().len(), 2);
//! ```

use crate::core::{Event, State, StateHistory};
use crate::engine::Automaton;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of an automaton's position.
/// Does NOT include the transition table (guards and actions are not serializable).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<E: Event, S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Current state, `None` if the automaton was never initialized
    pub current_state: Option<S>,

    /// Complete transition history
    pub history: StateHistory<E, S>,
}

impl<E: Event, S: State> Checkpoint<E, S> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl<E: Event, S: State> Automaton<E, S> {
    /// Snapshot the current state and history.
    pub fn checkpoint(&self) -> Checkpoint<E, S> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            current_state: self.current_state().cloned(),
            history: self.history().clone(),
        }
    }

    /// Resume from a checkpoint.
    ///
    /// The history is replaced by the checkpoint's. Listeners see the jump
    /// as a regular state change; no action runs.
    pub fn restore(&mut self, checkpoint: &Checkpoint<E, S>) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if let Some(state) = &checkpoint.current_state {
            if !self.states().contains(state) {
                return Err(CheckpointError::ValidationFailed(format!(
                    "State {} is not declared",
                    state.name()
                )));
            }
        }

        debug!(id = %checkpoint.id, "Restoring checkpoint");
        self.resume(checkpoint.current_state.clone(), checkpoint.history.clone());
        Ok(())
    }
}
