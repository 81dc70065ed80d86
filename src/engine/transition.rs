//! Transition records and guarded branch lists.

use crate::core::{Effect, Event, Guard, State, TransitionKey};
use serde_json::Value;
use tracing::trace;

/// A transition declaration: on `event` in `source`, move to `target` and
/// run `effect`, provided `guard` holds.
#[derive(Clone, Debug)]
pub struct Transition<E, S> {
    pub source: S,
    pub event: E,
    pub target: S,
    pub guard: Guard,
    pub effect: Effect,
}

impl<E: Event, S: State> Transition<E, S> {
    /// Unguarded transition with no action.
    pub fn new(source: S, event: E, target: S) -> Self {
        Self {
            source,
            event,
            target,
            guard: Guard::ALWAYS,
            effect: Effect::NONE,
        }
    }

    pub fn key(&self) -> TransitionKey<E, S> {
        TransitionKey::new(self.event.clone(), self.source.clone())
    }
}

/// One guard → (target, action) entry.
#[derive(Clone, Debug)]
pub struct Branch<S> {
    pub guard: Guard,
    pub target: S,
    pub effect: Effect,
}

/// Insertion-ordered mapping from guard to branch.
///
/// Resolution walks the entries in insertion order and stops at the first
/// guard that holds, so the order of registration is significant whenever
/// several guards can hold at once.
#[derive(Clone, Debug)]
pub struct Branches<S> {
    entries: Vec<Branch<S>>,
}

impl<S> Default for Branches<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Branches<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a branch, or replace target and action of the branch already
    /// registered under an identical guard, keeping its position.
    pub fn insert(&mut self, guard: Guard, target: S, effect: Effect) {
        match self.entries.iter_mut().find(|b| b.guard == guard) {
            Some(branch) => {
                branch.target = target;
                branch.effect = effect;
            }
            None => self.entries.push(Branch {
                guard,
                target,
                effect,
            }),
        }
    }

    /// First branch whose guard holds for `parameters`.
    pub fn resolve(&self, parameters: &[Value]) -> Option<&Branch<S>> {
        self.entries.iter().enumerate().find_map(|(index, branch)| {
            let verified = branch.guard.check(parameters);
            trace!(index, guard = ?branch.guard, verified, "Trying guard");
            verified.then_some(branch)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Branch<S>> {
        self.entries.iter()
    }

    pub fn targets(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|b| &b.target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
