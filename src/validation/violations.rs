//! Table violations reported by validation.

use thiserror::Error;

/// A well-formedness problem in an automaton's tables.
///
/// Registration never rejects these; they only surface through
/// [`Automaton::validate`](crate::Automaton::validate) or a strict build.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableViolation {
    #[error("No initial state registered")]
    MissingInitialization,

    #[error("Initial State {0} is not declared")]
    UndeclaredInitialState(String),

    #[error("Transition on Event {event} leaves undeclared State {state}")]
    UndeclaredSource { event: String, state: String },

    #[error("Transition on Event {event} from State {from} targets undeclared State {target}")]
    UndeclaredTarget {
        event: String,
        from: String,
        target: String,
    },

    #[error("Transition from State {state} is triggered by undeclared Event {event}")]
    UndeclaredEvent { event: String, state: String },

    #[error("Branch to State {target} on Event {event} from State {state} follows an unguarded branch and can never be taken")]
    ShadowedBranch {
        event: String,
        state: String,
        target: String,
    },
}
