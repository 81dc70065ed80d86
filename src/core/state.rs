//! Symbolic state and event traits.
//!
//! An automaton is generic over two closed sets of caller-supplied values:
//! the states it can occupy and the events it reacts to. Neither set is
//! ever extended by the engine.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for automaton states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the transition table and history
/// - `Eq` + `Hash`: states are part of the table lookup key
/// - `Debug`: states are debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states appear in checkpoints
///
/// # Example
///
/// ```rust
/// use automaton::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Stable display name, used by the diagnostic dump.
    fn name(&self) -> &str;
}

/// Trait for automaton events.
///
/// The name is part of the observable contract: it forms the
/// `<name>_enabled` notification channel.
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Stable name of the event.
    fn name(&self) -> &str;
}
