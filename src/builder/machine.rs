//! Builder for constructing automata.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Effect, Event, Guard, State};
use crate::engine::{Automaton, Transition};
use crate::notify::SharedListener;
use stillwater::validation::Validation;
use tracing::debug;

/// Builder for configuring an automaton with a fluent API.
///
/// The built automaton is not yet initialized; call
/// [`Automaton::initialize`] with the start-up parameters.
pub struct AutomatonBuilder<E: Event, S: State> {
    events: Vec<E>,
    states: Vec<S>,
    transitions: Vec<Transition<E, S>>,
    initial_states: Vec<S>,
    initial_effects: Vec<Effect>,
    initial_guards: Vec<Guard>,
    registers: Vec<String>,
    listeners: Vec<(Option<String>, SharedListener<E, S>)>,
    history_limit: Option<usize>,
    strict: bool,
}

impl<E: Event, S: State> AutomatonBuilder<E, S> {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            states: Vec::new(),
            transitions: Vec::new(),
            initial_states: Vec::new(),
            initial_effects: Vec::new(),
            initial_guards: Vec::new(),
            registers: Vec::new(),
            listeners: Vec::new(),
            history_limit: None,
            strict: false,
        }
    }

    /// Declare events (at least one required).
    pub fn events(mut self, events: impl IntoIterator<Item = E>) -> Self {
        self.events.extend(events);
        self
    }

    /// Declare states (at least one required).
    pub fn states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states.extend(states);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<E, S>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<E, S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<E, S>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Add an unguarded initial state.
    pub fn initial(self, state: S) -> Self {
        self.initial_when(state, Guard::ALWAYS, Effect::NONE)
    }

    /// Add a guarded initial state with its entry effect.
    ///
    /// Follows [`Automaton::register_initializations`]: a lone initial
    /// state is always taken, whatever its guard.
    pub fn initial_when(mut self, state: S, guard: Guard, effect: Effect) -> Self {
        self.initial_states.push(state);
        self.initial_guards.push(guard);
        self.initial_effects.push(effect);
        self
    }

    /// Create an empty register.
    pub fn register(mut self, name: impl Into<String>) -> Self {
        self.registers.push(name.into());
        self
    }

    /// Attach a listener to `channel`, or to every channel when `None`.
    pub fn listener(mut self, channel: Option<&str>, listener: SharedListener<E, S>) -> Self {
        self.listeners.push((channel.map(str::to_string), listener));
        self
    }

    /// Keep only the `limit` most recent history records.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Reject tables that fail [`Automaton::validate`].
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Build the automaton.
    /// Returns an error if required fields are missing or invalid.
    pub fn build(self) -> Result<Automaton<E, S>, BuildError> {
        if self.initial_states.is_empty() {
            return Err(BuildError::MissingInitialState);
        }

        let mut automaton = Automaton::new(self.events, self.states)?;
        for transition in self.transitions {
            automaton.add_transition(transition);
        }
        automaton.register_initializations(
            &self.initial_states,
            &self.initial_effects,
            &self.initial_guards,
        )?;
        for name in &self.registers {
            automaton.create_register(name)?;
        }
        for (channel, listener) in self.listeners {
            automaton.add_listener(channel.as_deref(), listener)?;
        }
        automaton.set_history_limit(self.history_limit);

        if self.strict {
            if let Validation::Failure(violations) = automaton.validate() {
                let violations: Vec<_> = violations.iter().cloned().collect();
                debug!(count = violations.len(), "Strict build rejected the table");
                return Err(BuildError::Invalid(violations));
            }
        }

        Ok(automaton)
    }
}

impl<E: Event, S: State> Default for AutomatonBuilder<E, S> {
    fn default() -> Self {
        Self::new()
    }
}
