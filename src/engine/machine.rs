//! The transition engine.

use super::error::AutomatonError;
use super::registers::Registers;
use super::transition::{Branches, Transition};
use crate::core::{Effect, Event, Guard, State, StateHistory, StateTransition, TransitionKey};
use crate::notify::{enabled_channel, Change, ListenerRegistry, SharedListener, STATE_CHANNEL};
use chrono::Utc;
use serde_json::Value;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace, warn};

/// Mealy-style automaton over a closed set of events and states.
///
/// Transitions are grouped by `(event, source)`; each group is an ordered
/// list of guarded branches. Feeding an event picks the first branch whose
/// guard holds for the supplied parameters, commits the target state,
/// publishes the resulting changes to listeners and finally runs the
/// branch's action.
///
/// The automaton does no internal locking. Sharing one instance between
/// threads requires the caller to serialize every call.
///
/// # Example
///
/// ```rust
/// use automaton::{event_enum, state_enum, Automaton};
///
/// state_enum! {
///     enum Door { Open, Closed }
/// }
/// event_enum! {
///     enum Push { Close, Open }
/// }
///
/// let mut door = Automaton::new(Push::ALL.to_vec(), Door::ALL.to_vec()).unwrap();
/// door.register_transition(Door::Open, Push::Close, Door::Closed);
/// door.register_transition(Door::Closed, Push::Open, Door::Open);
/// door.register_initialization(Door::Open);
///
/// door.initialize(&[]).unwrap();
/// assert!(door.is_event_enabled(&Push::Close));
///
/// door.accept_event(Push::Close, &[]).unwrap();
/// assert_eq!(door.current_state(), Some(&Door::Closed));
/// assert!(!door.is_event_enabled(&Push::Close));
/// ```
pub struct Automaton<E: Event, S: State> {
    events: Vec<E>,
    states: Vec<S>,
    table: HashMap<TransitionKey<E, S>, Branches<S>>,
    initial: Branches<S>,
    current: Option<S>,
    listeners: ListenerRegistry<E, S>,
    registers: Registers,
    history: StateHistory<E, S>,
}

impl<E: Event, S: State> Automaton<E, S> {
    /// Create an uninitialized automaton.
    ///
    /// Both sets must be non-empty. Duplicates are dropped; declaration
    /// order is kept and drives the order of enablement notifications.
    pub fn new<IE, IS>(events: IE, states: IS) -> Result<Self, AutomatonError>
    where
        IE: IntoIterator<Item = E>,
        IS: IntoIterator<Item = S>,
    {
        let events = declared(events);
        let states = declared(states);
        trace!(?events, ?states, "Creating automaton");
        if events.is_empty() {
            return Err(AutomatonError::EmptyEvents);
        }
        if states.is_empty() {
            return Err(AutomatonError::EmptyStates);
        }
        Ok(Self {
            events,
            states,
            table: HashMap::new(),
            initial: Branches::new(),
            current: None,
            listeners: ListenerRegistry::new(),
            registers: Registers::new(),
            history: StateHistory::new(),
        })
    }

    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Register an unguarded transition with no action.
    pub fn register_transition(&mut self, source: S, event: E, target: S) {
        self.register_guarded_transition(source, event, target, Effect::NONE, Guard::ALWAYS);
    }

    /// Register an unguarded transition that runs `effect` once committed.
    pub fn register_transition_with_effect(
        &mut self,
        source: S,
        event: E,
        target: S,
        effect: Effect,
    ) {
        self.register_guarded_transition(source, event, target, effect, Guard::ALWAYS);
    }

    /// Register a branch on `(event, source)` taken when `guard` holds.
    ///
    /// Branches accumulate per key in registration order. Registering
    /// again under an identical guard replaces that branch's target and
    /// effect. Membership of `source`, `event` and `target` in the
    /// declared sets is not checked here; see [`Automaton::validate`].
    pub fn register_guarded_transition(
        &mut self,
        source: S,
        event: E,
        target: S,
        effect: Effect,
        guard: Guard,
    ) {
        trace!(
            source = source.name(),
            event = event.name(),
            target = target.name(),
            ?effect,
            ?guard,
            "Registering transition"
        );
        self.table
            .entry(TransitionKey::new(event, source))
            .or_default()
            .insert(guard, target, effect);
    }

    /// Register a prebuilt [`Transition`].
    pub fn add_transition(&mut self, transition: Transition<E, S>) {
        let Transition {
            source,
            event,
            target,
            guard,
            effect,
        } = transition;
        self.register_guarded_transition(source, event, target, effect, guard);
    }

    /// Make `state` the unconditional initial state.
    pub fn register_initialization(&mut self, state: S) {
        self.register_initialization_with_effect(state, Effect::NONE);
    }

    /// Make `state` the unconditional initial state, running `effect` on entry.
    pub fn register_initialization_with_effect(&mut self, state: S, effect: Effect) {
        trace!(state = state.name(), ?effect, "Registering initialization");
        self.initial.insert(Guard::ALWAYS, state, effect);
    }

    /// Register initial-state branches.
    ///
    /// With a single state, only `effects[0]` is consulted and the branch
    /// is unguarded. With several, branch `i` uses `effects[i]` and
    /// `guards[i]`; missing entries default to [`Effect::NONE`] and
    /// [`Guard::ALWAYS`].
    pub fn register_initializations(
        &mut self,
        states: &[S],
        effects: &[Effect],
        guards: &[Guard],
    ) -> Result<(), AutomatonError> {
        trace!(?states, ?effects, ?guards, "Registering initializations");
        match states {
            [] => Err(AutomatonError::EmptyInitialStates),
            [state] => {
                let effect = effects.first().cloned().unwrap_or_default();
                self.register_initialization_with_effect(state.clone(), effect);
                Ok(())
            }
            _ => {
                for (index, state) in states.iter().enumerate() {
                    let effect = effects.get(index).cloned().unwrap_or_default();
                    let guard = guards.get(index).cloned().unwrap_or_default();
                    self.initial.insert(guard, state.clone(), effect);
                }
                Ok(())
            }
        }
    }

    /// Enter the initial state selected by the initialization branches.
    ///
    /// May be called again later; it then re-enters an initial state from
    /// wherever the automaton currently is.
    pub fn initialize(&mut self, parameters: &[Value]) -> Result<(), AutomatonError> {
        trace!(parameters = %format_parameters(parameters), "Initializing");
        let Some(branch) = self.initial.resolve(parameters) else {
            let err = AutomatonError::NoReachableInitialState {
                parameters: format_parameters(parameters),
            };
            warn!(error = %err, "Initialization failed");
            return Err(err);
        };
        let (target, effect) = (branch.target.clone(), branch.effect.clone());
        self.go_to_state(target, None);
        effect.execute(parameters);
        Ok(())
    }

    /// Feed an event.
    ///
    /// Fails with [`AutomatonError::EventNotAllowed`] when no branch is
    /// registered for `event` from the current state (including before
    /// initialization), and with [`AutomatonError::NoReachableState`] when
    /// branches exist but none of their guards holds. A failed call leaves
    /// the automaton untouched.
    pub fn accept_event(&mut self, event: E, parameters: &[Value]) -> Result<(), AutomatonError> {
        trace!(
            event = event.name(),
            parameters = %format_parameters(parameters),
            "Accepting event"
        );
        let branches = self
            .current
            .as_ref()
            .and_then(|state| self.table.get(&TransitionKey::new(event.clone(), state.clone())));
        let Some(branches) = branches else {
            let err = AutomatonError::EventNotAllowed {
                event: event.name().to_string(),
                state: self.current_state_name(),
            };
            warn!(error = %err, "Event rejected");
            return Err(err);
        };
        let Some(branch) = branches.resolve(parameters) else {
            let err = AutomatonError::NoReachableState {
                event: event.name().to_string(),
                state: self.current_state_name(),
                parameters: format_parameters(parameters),
            };
            warn!(error = %err, "Event rejected");
            return Err(err);
        };
        let (target, effect) = (branch.target.clone(), branch.effect.clone());
        self.go_to_state(target, Some(event));
        effect.execute(parameters);
        Ok(())
    }

    /// Whether some branch exists for `event` from the current state.
    ///
    /// Guards are not evaluated: an enabled event may still be rejected
    /// for a given parameter list. Always `false` before initialization.
    pub fn is_event_enabled(&self, event: &E) -> bool {
        trace!(event = event.name(), state = ?self.current, "Checking enablement");
        self.current
            .as_ref()
            .is_some_and(|state| self.has_branches(event, state))
    }

    /// Declared events enabled in the current state, in declaration order.
    pub fn enabled_events(&self) -> Vec<E> {
        self.events
            .iter()
            .filter(|event| self.is_event_enabled(event))
            .cloned()
            .collect()
    }

    pub fn current_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    pub fn history(&self) -> &StateHistory<E, S> {
        &self.history
    }

    /// Bound the history to the `limit` most recent records, or lift the
    /// bound with `None`.
    pub fn set_history_limit(&mut self, limit: Option<usize>) {
        trace!(?limit, "Setting history limit");
        self.history.set_limit(limit);
    }

    pub fn clear_history(&mut self) {
        trace!("Clearing history");
        self.history.clear();
    }

    /// Branches registered on `(event, source)`.
    pub fn branches(&self, event: &E, source: &S) -> Option<&Branches<S>> {
        self.table
            .get(&TransitionKey::new(event.clone(), source.clone()))
    }

    pub fn initial_branches(&self) -> &Branches<S> {
        &self.initial
    }

    /// Handle on the register bank, for guards and actions to capture.
    pub fn registers(&self) -> Registers {
        self.registers.clone()
    }

    pub fn create_register(&self, name: &str) -> Result<(), AutomatonError> {
        self.registers.create(name)
    }

    pub fn get_register_value<T>(&self, name: &str) -> Result<Option<T>, AutomatonError>
    where
        T: Any + Clone,
    {
        self.registers.get(name)
    }

    pub fn set_register_value<T>(&self, name: &str, value: T) -> Result<(), AutomatonError>
    where
        T: Any + Send + Sync,
    {
        self.registers.set(name, value)
    }

    /// Attach a listener to `channel`, or to every channel when `None`.
    ///
    /// Valid channels are `"state"` and `"<event>_enabled"` for each
    /// declared event.
    pub fn add_listener(
        &mut self,
        channel: Option<&str>,
        listener: SharedListener<E, S>,
    ) -> Result<(), AutomatonError> {
        trace!(?channel, "Registering listener");
        self.check_channel(channel)?;
        self.listeners.add(channel, listener);
        Ok(())
    }

    /// Detach one attachment of `listener`. Returns whether it was attached.
    pub fn remove_listener(
        &mut self,
        channel: Option<&str>,
        listener: &SharedListener<E, S>,
    ) -> Result<bool, AutomatonError> {
        trace!(?channel, "Removing listener");
        self.check_channel(channel)?;
        Ok(self.listeners.remove(channel, listener))
    }

    /// Listeners attached to `channel`, or every attachment when `None`.
    pub fn listeners(
        &self,
        channel: Option<&str>,
    ) -> Result<Vec<SharedListener<E, S>>, AutomatonError> {
        self.check_channel(channel)?;
        Ok(self.listeners.listeners(channel))
    }

    pub(crate) fn table(&self) -> &HashMap<TransitionKey<E, S>, Branches<S>> {
        &self.table
    }

    /// Commit `target` as the current state, record it and publish the
    /// state change plus one enablement change per declared event.
    pub(crate) fn go_to_state(&mut self, target: S, event: Option<E>) {
        debug!(
            from = ?self.current,
            to = target.name(),
            event = event.as_ref().map(|e| e.name()),
            "Going to state"
        );
        let old = self.current.replace(target.clone());
        self.history.record(StateTransition {
            from: old.clone(),
            to: target.clone(),
            event,
            timestamp: Utc::now(),
        });
        self.publish_changes(old, &target);
    }

    /// Jump to a saved position, replacing the history. Listeners are
    /// notified as for any state change; no action runs.
    pub(crate) fn resume(&mut self, state: Option<S>, history: StateHistory<E, S>) {
        debug!(from = ?self.current, to = ?state, "Resuming");
        let old = std::mem::replace(&mut self.current, state.clone());
        let limit = self.history.limit();
        self.history = history;
        self.history.set_limit(limit);
        if let Some(new) = state {
            self.publish_changes(old, &new);
        }
    }

    fn publish_changes(&self, old: Option<S>, new: &S) {
        self.listeners.publish(&Change::State {
            old: old.clone(),
            new: new.clone(),
        });
        for event in &self.events {
            let was_enabled = old
                .as_ref()
                .is_some_and(|state| self.has_branches(event, state));
            let is_enabled = self.has_branches(event, new);
            self.listeners.publish(&Change::Enablement {
                event: event.clone(),
                old: was_enabled,
                new: is_enabled,
            });
        }
    }

    fn has_branches(&self, event: &E, state: &S) -> bool {
        self.table
            .contains_key(&TransitionKey::new(event.clone(), state.clone()))
    }

    fn check_channel(&self, channel: Option<&str>) -> Result<(), AutomatonError> {
        match channel {
            None | Some(STATE_CHANNEL) => Ok(()),
            Some(name) if self.events.iter().any(|e| enabled_channel(e) == name) => Ok(()),
            Some(name) => Err(AutomatonError::UnknownChannel(name.to_string())),
        }
    }

    fn current_state_name(&self) -> String {
        self.current
            .as_ref()
            .map_or_else(|| "none".to_string(), |s| s.name().to_string())
    }
}

/// Human-readable dump of the initial branches and, per declared state,
/// the declared events it reacts to with their possible targets.
impl<E: Event, S: State> fmt::Display for Automaton<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial State: [{}]", join_names(self.initial.targets()))?;
        for state in &self.states {
            for event in &self.events {
                if let Some(branches) = self.branches(event, state) {
                    writeln!(
                        f,
                        "{}=>{}=>[{}]",
                        state.name(),
                        event.name(),
                        join_names(branches.targets())
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl<E: Event, S: State> fmt::Debug for Automaton<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("events", &self.events)
            .field("states", &self.states)
            .field("current", &self.current)
            .field("keys", &self.table.len())
            .finish_non_exhaustive()
    }
}

fn declared<T: Clone + Eq + Hash>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn format_parameters(parameters: &[Value]) -> String {
    Value::Array(parameters.to_vec()).to_string()
}

fn join_names<'a, S: State>(states: impl Iterator<Item = &'a S>) -> String {
    states.map(State::name).collect::<Vec<_>>().join(", ")
}
