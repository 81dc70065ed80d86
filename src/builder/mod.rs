//! Builder API for ergonomic automaton construction.
//!
//! This module provides fluent builders and macros for declaring symbol
//! sets, transitions and initial states with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::AutomatonBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Event, Guard, State};
use crate::engine::Transition;
use serde_json::Value;

/// Create an unguarded transition with no action.
///
/// # Example
///
/// ```
/// use automaton::builder::simple_transition;
/// use automaton::{event_enum, state_enum};
///
/// state_enum! {
///     enum Lamp { Off, On }
/// }
/// event_enum! {
///     enum Press { Toggle }
/// }
///
/// let transition = simple_transition(Lamp::Off, Press::Toggle, Lamp::On);
/// assert!(transition.guard.is_always());
/// ```
pub fn simple_transition<E: Event, S: State>(from: S, event: E, to: S) -> Transition<E, S> {
    Transition::new(from, event, to)
}

/// Create a transition taken only when `predicate` holds for the event
/// parameters.
pub fn guarded_transition<E, S, F>(from: S, event: E, to: S, predicate: F) -> Transition<E, S>
where
    E: Event,
    S: State,
    F: Fn(&[Value]) -> bool + Send + Sync + 'static,
{
    Transition {
        guard: Guard::when(predicate),
        ..Transition::new(from, event, to)
    }
}
