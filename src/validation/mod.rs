//! Well-formedness validation of transition tables.
//!
//! Registration accepts any state or event, declared or not. Validation
//! inspects the finished tables and uses Stillwater's `Validation` type to
//! report every problem in a single pass rather than stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use automaton::validation::TableViolation;
//! use automaton::{event_enum, state_enum, Automaton};
//! use stillwater::validation::Validation;
//!
//! state_enum! {
//!     enum Door { Open, Closed, Jammed }
//! }
//! event_enum! {
//!     enum Push { Close }
//! }
//!
//! let mut door = Automaton::new(Push::ALL.to_vec(), [Door::Open, Door::Closed]).unwrap();
//! door.register_transition(Door::Open, Push::Close, Door::Jammed);
//!
//! match door.validate() {
//!     Validation::Failure(errors) => assert_eq!(errors.len(), 2),
//!     Validation::Success(_) => unreachable!(),
//! }
//! ```

mod rules;
mod violations;

pub use violations::TableViolation;
