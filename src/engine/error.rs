//! Errors raised by the automaton.

use thiserror::Error;

/// Broad classification of an [`AutomatonError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied value is unusable, or no guarded branch applies.
    InvalidArgument,
    /// The event has no branch from the current state.
    IllegalState,
    /// A register holds a value of another type than the one requested.
    TypeMismatch,
}

/// Errors that can occur while configuring or driving an automaton.
///
/// Every failure is reported to the immediate caller; the automaton never
/// retries or recovers internally and is left unchanged by a failed call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    #[error("The set of Events cannot be empty")]
    EmptyEvents,

    #[error("The set of States cannot be empty")]
    EmptyStates,

    #[error("The set of initial states cannot be empty")]
    EmptyInitialStates,

    #[error("Event {event} is not allowed in State {state}")]
    EventNotAllowed { event: String, state: String },

    #[error("No state change possible with parameters {parameters} for Event {event} from State {state}")]
    NoReachableState {
        event: String,
        state: String,
        parameters: String,
    },

    #[error("No initial state reachable with parameters {parameters}")]
    NoReachableInitialState { parameters: String },

    #[error("< {0} > is not a correct name for a register. Name must fit [a-zA-Z][a-zA-Z0-9_]*")]
    InvalidRegisterName(String),

    #[error("Register {0} already exists.")]
    RegisterExists(String),

    #[error("Register {0} does not exist.")]
    UnknownRegister(String),

    #[error("Register {name} does not hold a value of type {expected}")]
    RegisterTypeMismatch { name: String, expected: &'static str },

    #[error("The name of the property to listen to should be 'state' or <anyEvent>_enabled, got '{0}'")]
    UnknownChannel(String),
}

impl AutomatonError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AutomatonError::EventNotAllowed { .. } => ErrorKind::IllegalState,
            AutomatonError::RegisterTypeMismatch { .. } => ErrorKind::TypeMismatch,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(AutomatonError::EmptyEvents.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            AutomatonError::EventNotAllowed {
                event: "E1".into(),
                state: "S1".into()
            }
            .kind(),
            ErrorKind::IllegalState
        );
        assert_eq!(
            AutomatonError::NoReachableInitialState {
                parameters: "[]".into()
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            AutomatonError::RegisterTypeMismatch {
                name: "x".into(),
                expected: "i32"
            }
            .kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn messages_name_the_offending_values() {
        let err = AutomatonError::EventNotAllowed {
            event: "CB3".into(),
            state: "S1".into(),
        };
        assert_eq!(err.to_string(), "Event CB3 is not allowed in State S1");
        assert_eq!(
            AutomatonError::RegisterExists("count".into()).to_string(),
            "Register count already exists."
        );
    }
}
