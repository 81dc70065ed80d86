//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Effect, Event, Guard, State};
use crate::engine::Transition;
use serde_json::Value;

/// Builder for constructing transitions with a fluent API.
///
/// Source, event and target are required; the guard defaults to
/// [`Guard::ALWAYS`] and the effect to [`Effect::NONE`].
pub struct TransitionBuilder<E, S> {
    from: Option<S>,
    event: Option<E>,
    to: Option<S>,
    guard: Guard,
    effect: Effect,
}

impl<E: Event, S: State> TransitionBuilder<E, S> {
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            to: None,
            guard: Guard::ALWAYS,
            effect: Effect::NONE,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    /// Guard the transition with a closure over the event parameters.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.guard = Guard::when(predicate);
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Run a closure once the transition has committed.
    pub fn then<F>(mut self, action: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.effect = Effect::from_fn(action);
        self
    }

    pub fn build(self) -> Result<Transition<E, S>, BuildError> {
        let source = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let target = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Transition {
            source,
            event,
            target,
            guard: self.guard,
            effect: self.effect,
        })
    }
}

impl<E: Event, S: State> Default for TransitionBuilder<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event_enum, state_enum};
    use serde_json::json;

    state_enum! {
        enum TestState { Initial, Processing }
    }

    event_enum! {
        enum TestEvent { Go }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<TestEvent, TestState>::new()
            .on(TestEvent::Go)
            .to(TestState::Processing)
            .build();
        assert!(matches!(result, Err(BuildError::MissingFromState)));

        let result = TransitionBuilder::<TestEvent, TestState>::new()
            .from(TestState::Initial)
            .to(TestState::Processing)
            .build();
        assert!(matches!(result, Err(BuildError::MissingEvent)));

        let result = TransitionBuilder::<TestEvent, TestState>::new()
            .from(TestState::Initial)
            .on(TestEvent::Go)
            .build();
        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn defaults_are_unguarded_and_silent() {
        let transition = TransitionBuilder::new()
            .from(TestState::Initial)
            .on(TestEvent::Go)
            .to(TestState::Processing)
            .build()
            .unwrap();

        assert_eq!(transition.source, TestState::Initial);
        assert_eq!(transition.event, TestEvent::Go);
        assert_eq!(transition.target, TestState::Processing);
        assert!(transition.guard.is_always());
        assert!(transition.effect.is_none());
    }

    #[test]
    fn when_and_then_attach_closures() {
        let transition = TransitionBuilder::new()
            .from(TestState::Initial)
            .on(TestEvent::Go)
            .to(TestState::Processing)
            .when(|params| params.first() == Some(&json!("go")))
            .then(|_| {})
            .build()
            .unwrap();

        assert!(transition.guard.check(&[json!("go")]));
        assert!(!transition.guard.check(&[json!("stop")]));
        assert!(!transition.effect.is_none());
    }
}
