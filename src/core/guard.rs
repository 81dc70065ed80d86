//! Guard predicates for controlling transitions.
//!
//! A guard decides, from the parameters supplied with an event, whether a
//! transition branch applies. Guards never mutate the automaton.

use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Predicate over the parameter list of an event.
///
/// Implemented for every `Fn(&[Value]) -> bool` closure, so most callers
/// never implement it by hand.
pub trait Condition: Send + Sync {
    fn is_verified(&self, parameters: &[Value]) -> bool;
}

impl<F> Condition for F
where
    F: Fn(&[Value]) -> bool + Send + Sync,
{
    fn is_verified(&self, parameters: &[Value]) -> bool {
        self(parameters)
    }
}

/// Shareable handle on a condition, keyed by identity.
///
/// Two guards are equal when they are both [`Guard::ALWAYS`] or when they
/// wrap the same condition instance. This identity is what makes a
/// re-registration on the same key replace a branch rather than append one.
///
/// # Example
///
/// ```rust
/// use automaton::core::Guard;
/// use serde_json::json;
///
/// let flag_set = Guard::when(|params| params.first() == Some(&json!(true)));
///
/// assert!(flag_set.check(&[json!(true)]));
/// assert!(!flag_set.check(&[json!(false)]));
/// assert!(Guard::ALWAYS.check(&[]));
/// ```
#[derive(Clone, Default)]
pub enum Guard {
    /// Satisfied by every parameter list.
    #[default]
    Always,
    When(Arc<dyn Condition>),
}

impl Guard {
    pub const ALWAYS: Guard = Guard::Always;

    /// Wrap any condition.
    pub fn new<C>(condition: C) -> Self
    where
        C: Condition + 'static,
    {
        Guard::When(Arc::new(condition))
    }

    /// Build a guard from a closure.
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        Self::new(predicate)
    }

    /// Evaluate the guard against a parameter list.
    pub fn check(&self, parameters: &[Value]) -> bool {
        match self {
            Guard::Always => true,
            Guard::When(condition) => condition.is_verified(parameters),
        }
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Guard::Always)
    }

    /// Order against a possibly absent guard.
    ///
    /// An absent operand orders before every guard. Present guards order
    /// by identity, which is stable for the lifetime of the guard but
    /// carries no meaning beyond deduplication.
    pub fn compare(&self, other: Option<&Guard>) -> Ordering {
        other.map_or(Ordering::Greater, |other| self.cmp(other))
    }

    fn identity(&self) -> usize {
        match self {
            Guard::Always => 0,
            Guard::When(condition) => Arc::as_ptr(condition) as *const () as usize,
        }
    }
}

impl PartialEq for Guard {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Guard::Always, Guard::Always) => true,
            (Guard::When(a), Guard::When(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Guard {}

impl PartialOrd for Guard {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Guard {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl Hash for Guard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Always => f.write_str("Always"),
            Guard::When(_) => write!(f, "When({:#x})", self.identity()),
        }
    }
}
