//! Two-component value key.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An ordered pair compared and hashed by value.
///
/// The transition table is keyed by `Pair<Event, State>`: the triggering
/// event and the source state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Pair<A, B> {
    first: A,
    second: B,
}

/// Lookup key of a group of transition branches: `(event, source state)`.
pub type TransitionKey<E, S> = Pair<E, S>;

impl<A, B> Pair<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }

    /// Compare against a possibly absent pair.
    ///
    /// An absent operand always orders before `self`.
    pub fn compare(&self, other: Option<&Self>) -> Ordering
    where
        A: Ord,
        B: Ord,
    {
        other.map_or(Ordering::Greater, |other| self.cmp(other))
    }
}

impl<A: Ord, B: Ord> PartialOrd for Pair<A, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: Ord, B: Ord> Ord for Pair<A, B> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.first
            .cmp(&other.first)
            .then_with(|| self.second.cmp(&other.second))
    }
}

impl<A, B> From<(A, B)> for Pair<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Display for Pair<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pair{{<{:?}, {:?}>}}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn pairs_with_equal_parts_are_equal() {
        assert_eq!(Pair::new("a", 1), Pair::new("a", 1));
        assert_ne!(Pair::new("a", 1), Pair::new("a", 2));
        assert_ne!(Pair::new("a", 1), Pair::new("b", 1));
    }

    #[test]
    fn pair_works_as_map_key() {
        let mut map = HashMap::new();
        map.insert(Pair::new("e1", "s1"), 1);
        map.insert(Pair::new("e1", "s2"), 2);

        assert_eq!(map.get(&Pair::new("e1", "s1")), Some(&1));
        assert_eq!(map.get(&Pair::new("e1", "s2")), Some(&2));
        assert_eq!(map.get(&Pair::new("e2", "s1")), None);
    }

    #[test]
    fn accessors_return_components() {
        let pair = Pair::new(3, 'x');
        assert_eq!(*pair.first(), 3);
        assert_eq!(*pair.second(), 'x');
        assert_eq!(pair.into_parts(), (3, 'x'));
    }

    #[test]
    fn compare_with_absent_pair_is_greater() {
        let pair = Pair::new(1, 2);
        assert_eq!(pair.compare(None), Ordering::Greater);
        assert_eq!(pair.compare(Some(&Pair::new(1, 2))), Ordering::Equal);
        assert_eq!(pair.compare(Some(&Pair::new(1, 3))), Ordering::Less);
        assert_eq!(pair.compare(Some(&Pair::new(0, 9))), Ordering::Greater);
    }

    #[test]
    fn display_shows_both_parts() {
        assert_eq!(Pair::new(1, "s").to_string(), "Pair{<1, \"s\">}");
    }
}
