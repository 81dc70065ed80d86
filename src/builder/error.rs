//! Build errors for automaton and transition builders.

use crate::engine::AutomatonError;
use crate::validation::TableViolation;
use thiserror::Error;

/// Errors that can occur when building automata and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error(transparent)]
    Automaton(#[from] AutomatonError),

    #[error("Transition table is invalid: {}", join_violations(.0))]
    Invalid(Vec<TableViolation>),
}

fn join_violations(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
