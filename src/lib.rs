//! Automaton: a table-driven finite state machine library
//!
//! An automaton is declared over a fixed set of events and states. Its
//! behavior lives in two tables: a transition table keyed by
//! (event, source state) and an initialization table. Each entry holds one
//! or more guarded branches; on dispatch the first branch whose guard holds
//! for the event parameters is taken, its target becomes the current state
//! and its action runs.
//!
//! # Core Concepts
//!
//! - **State / Event**: Symbol types, usually declared with [`state_enum!`] and [`event_enum!`]
//! - **Guards**: Predicates over event parameters that select a branch
//! - **Effects**: Actions run after the state change is committed
//! - **Listeners**: Observers of state changes and event enablement
//! - **Registers**: Named, typed storage shared by guards and actions
//! - **History**: Record of every committed state change
//!
//! # Example
//!
//! ```rust
//! use automaton::{event_enum, state_enum, Automaton, Guard, Effect};
//! use serde_json::json;
//!
//! state_enum! {
//!     enum Turnstile { Locked, Unlocked }
//! }
//! event_enum! {
//!     enum Input { Coin, Push }
//! }
//!
//! let mut gate = Automaton::new(Input::ALL.to_vec(), Turnstile::ALL.to_vec()).unwrap();
//! gate.register_guarded_transition(
//!     Turnstile::Locked,
//!     Input::Coin,
//!     Turnstile::Unlocked,
//!     Effect::NONE,
//!     Guard::when(|params| params.first().and_then(|v| v.as_u64()) >= Some(50)),
//! );
//! gate.register_transition(Turnstile::Unlocked, Input::Push, Turnstile::Locked);
//! gate.register_initialization(Turnstile::Locked);
//!
//! gate.initialize(&[]).unwrap();
//! assert!(gate.accept_event(Input::Coin, &[json!(20)]).is_err());
//! gate.accept_event(Input::Coin, &[json!(50)]).unwrap();
//! assert_eq!(gate.current_state(), Some(&Turnstile::Unlocked));
//! assert_eq!(gate.enabled_events(), vec![Input::Push]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod notify;
pub mod validation;

// Re-export commonly used types
pub use builder::{AutomatonBuilder, BuildError, TransitionBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{
    Action, Condition, Effect, Event, Guard, State, StateHistory, StateTransition,
};
pub use engine::{Automaton, AutomatonError, ErrorKind, Registers, Transition};
pub use notify::{Change, Listener, SharedListener};
