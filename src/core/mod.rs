//! Core automaton types.
//!
//! This module holds the building blocks the engine is assembled from:
//! - `State` / `Event` traits for the symbolic value sets
//! - `Pair`, the value-compared `(event, state)` lookup key
//! - `Guard` / `Condition` predicates and `Effect` / `Action` procedures
//! - History of committed state changes

mod action;
mod guard;
mod history;
mod pair;
mod state;

pub use action::{Action, Effect};
pub use guard::{Condition, Guard};
pub use history::{StateHistory, StateTransition};
pub use pair::{Pair, TransitionKey};
pub use state::{Event, State};
