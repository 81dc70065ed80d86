//! The transition engine.
//!
//! [`Automaton`] owns the transition table, the initialization branches,
//! the current-state cell, the listener registry and the register bank.
//! Everything runs synchronously on the caller's thread:
//!
//! 1. guards of the matching key are evaluated in registration order,
//!    stopping at the first that holds
//! 2. the target state is committed and recorded in the history
//! 3. the state change and every enablement change are published
//! 4. the branch's action runs with the event's parameters

mod error;
mod machine;
mod registers;
mod transition;

pub use error::{AutomatonError, ErrorKind};
pub use machine::Automaton;
pub use registers::Registers;
pub use transition::{Branch, Branches, Transition};
