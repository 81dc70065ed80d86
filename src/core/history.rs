//! State change history tracking.
//!
//! Every committed state change, initialization included, is recorded as
//! a [`StateTransition`] so callers can inspect the path an automaton took.

use super::state::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<E: Event, S: State> {
    /// The state being left; `None` for the initialization step
    pub from: Option<S>,
    /// The state being entered
    pub to: S,
    /// The triggering event; `None` for initialization and restores
    pub event: Option<E>,
    /// When the change was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state changes.
///
/// Unbounded by default. With a limit, only the most recent records are
/// kept and older ones are dropped as new ones arrive.
///
/// # Example
///
/// ```rust
/// use automaton::core::{StateHistory, StateTransition};
/// use automaton::{event_enum, state_enum};
/// use chrono::Utc;
///
/// state_enum! {
///     enum Phase { One, Two }
/// }
/// event_enum! {
///     enum Step { Next }
/// }
///
/// let mut history: StateHistory<Step, Phase> = StateHistory::new();
/// history.record(StateTransition {
///     from: None,
///     to: Phase::One,
///     event: None,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Some(Phase::One),
///     to: Phase::Two,
///     event: Some(Step::Next),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&Phase::One, &Phase::Two]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<E: Event, S: State> {
    transitions: Vec<StateTransition<E, S>>,
    #[serde(default)]
    limit: Option<usize>,
}

impl<E: Event, S: State> Default for StateHistory<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event, S: State> StateHistory<E, S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// History keeping at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Change the bound, dropping the oldest records if they no longer fit.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.truncate();
    }

    /// Append a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<E, S>) {
        self.transitions.push(transition);
        self.truncate();
    }

    /// Forget every record. The limit is kept.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Get the path of states traversed.
    ///
    /// Starts with the `from` state of the first record when there is one,
    /// followed by the `to` state of each record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.first().and_then(|t| t.from.as_ref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time elapsed between the first and last record.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition<E, S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn last(&self) -> Option<&StateTransition<E, S>> {
        self.transitions.last()
    }

    fn truncate(&mut self) {
        if let Some(limit) = self.limit {
            let excess = self.transitions.len().saturating_sub(limit);
            self.transitions.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Go,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            "Go"
        }
    }

    fn step(from: Option<TestState>, to: TestState) -> StateTransition<TestEvent, TestState> {
        StateTransition {
            event: from.as_ref().map(|_| TestEvent::Go),
            from,
            to,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestEvent, TestState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn path_starts_at_first_entered_state_after_initialization() {
        let mut history = StateHistory::new();
        history.record(step(None, TestState::Initial));
        history.record(step(Some(TestState::Initial), TestState::Processing));
        history.record(step(Some(TestState::Processing), TestState::Complete));

        let path = history.get_path();
        assert_eq!(
            path,
            vec![
                &TestState::Initial,
                &TestState::Processing,
                &TestState::Complete
            ]
        );
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn path_includes_source_of_first_record() {
        let mut history = StateHistory::new();
        history.record(step(Some(TestState::Initial), TestState::Processing));

        assert_eq!(
            history.get_path(),
            vec![&TestState::Initial, &TestState::Processing]
        );
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        history.record(step(None, TestState::Initial));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.record(step(Some(TestState::Initial), TestState::Processing));

        let duration = history.duration().unwrap();
        assert!(duration >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn limited_history_keeps_most_recent_records() {
        let mut history = StateHistory::with_limit(2);
        history.record(step(None, TestState::Initial));
        history.record(step(Some(TestState::Initial), TestState::Processing));
        history.record(step(Some(TestState::Processing), TestState::Complete));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![
                &TestState::Initial,
                &TestState::Processing,
                &TestState::Complete
            ]
        );
    }

    #[test]
    fn lowering_limit_drops_oldest_records() {
        let mut history = StateHistory::new();
        history.record(step(None, TestState::Initial));
        history.record(step(Some(TestState::Initial), TestState::Processing));
        history.record(step(Some(TestState::Processing), TestState::Complete));

        history.set_limit(Some(1));

        assert_eq!(history.limit(), Some(1));
        assert_eq!(history.last().map(|t| &t.to), Some(&TestState::Complete));
        assert_eq!(history.len(), 1);

        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.limit(), Some(1));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::new();
        history.record(step(None, TestState::Initial));
        history.record(step(Some(TestState::Initial), TestState::Complete));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestEvent, TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(history.transitions(), deserialized.transitions());
    }
}
